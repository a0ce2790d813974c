use serde::Serialize;
use tracing::{debug, info};

use crate::db::{OutreachStorage, SaveSummary};
use crate::error::OutreachError;
use crate::types::Lead;

#[derive(Debug, Clone, Serialize)]
pub struct SavedLeads {
    pub summary: SaveSummary,
    pub leads: Vec<Lead>,
}

#[derive(Clone)]
pub struct LeadService {
    storage: OutreachStorage,
}

impl LeadService {
    pub fn new(storage: OutreachStorage) -> Self {
        Self { storage }
    }

    pub async fn load(&self, user_id: &str) -> Result<Vec<Lead>, OutreachError> {
        let rows = self.storage.list_leads(user_id).await?;
        debug!(user_id = %user_id, count = rows.len(), "leads loaded");
        Ok(rows.into_iter().map(Lead::from).collect())
    }

    /// Store the edited list and hand back the stored state, ids included.
    pub async fn save(&self, user_id: &str, leads: &[Lead]) -> Result<SavedLeads, OutreachError> {
        let summary = self.storage.save_leads(user_id, leads).await?;
        info!(
            user_id = %user_id,
            inserted = summary.inserted,
            updated = summary.updated,
            skipped = summary.skipped,
            "leads saved"
        );
        Ok(SavedLeads {
            summary,
            leads: self.load(user_id).await?,
        })
    }

    pub async fn delete(&self, user_id: &str, id: i64) -> Result<(), OutreachError> {
        if !self.storage.delete_lead(user_id, id).await? {
            return Err(OutreachError::NotFound("lead"));
        }
        info!(user_id = %user_id, lead_id = id, "lead deleted");
        Ok(())
    }
}
