use crate::api::SheetsClient;
use crate::api::sheets::AppendResult;
use crate::db::OutreachStorage;
use crate::error::OutreachError;
use crate::types::Lead;

#[derive(Clone)]
pub struct ExportService {
    storage: OutreachStorage,
    sheets: SheetsClient,
}

impl ExportService {
    pub fn new(storage: OutreachStorage, sheets: SheetsClient) -> Self {
        Self { storage, sheets }
    }

    pub async fn export(&self, leads: &[Lead]) -> Result<AppendResult, OutreachError> {
        if leads.is_empty() {
            return Err(OutreachError::Validation("no leads to export".to_string()));
        }
        self.sheets.append_leads(leads).await
    }

    /// Export everything the user has saved.
    pub async fn export_stored(&self, user_id: &str) -> Result<AppendResult, OutreachError> {
        let leads: Vec<Lead> = self
            .storage
            .list_leads(user_id)
            .await?
            .into_iter()
            .map(Lead::from)
            .collect();
        self.export(&leads).await
    }
}
