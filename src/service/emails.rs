use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::api::WorkflowClient;
use crate::db::OutreachStorage;
use crate::error::OutreachError;
use crate::middleware::UserContext;
use crate::types::{DraftBatch, GeneratedEmail, Lead, UserSettings};

#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    pub sent: usize,
    pub confirmation: Value,
}

#[derive(Clone)]
pub struct EmailService {
    storage: OutreachStorage,
    workflow: WorkflowClient,
}

impl EmailService {
    pub fn new(storage: OutreachStorage, workflow: WorkflowClient) -> Self {
        Self { storage, workflow }
    }

    /// Blank rows are dropped before calling the workflow. Without an
    /// explicit resume URL the one stored in the user's settings is attached.
    pub async fn generate(
        &self,
        user: &UserContext,
        leads: Vec<Lead>,
        resume_url: Option<String>,
    ) -> Result<DraftBatch<GeneratedEmail>, OutreachError> {
        let leads: Vec<Lead> = leads.into_iter().filter(Lead::has_data).collect();
        if leads.is_empty() {
            return Err(OutreachError::Validation(
                "no leads to generate emails for".to_string(),
            ));
        }

        let resume_url = match resume_url.filter(|u| !u.is_empty()) {
            Some(url) => Some(url),
            None => self
                .storage
                .load_settings(&user.user_id)
                .await?
                .map(UserSettings::from)
                .and_then(|s| s.resume().map(|(url, _)| url.to_string())),
        };

        let data = self
            .workflow
            .generate_emails(&leads, user.email.as_deref(), resume_url.as_deref())
            .await?;
        let drafts = GeneratedEmail::from_workflow(data)?;
        info!(
            user_id = %user.user_id,
            leads = leads.len(),
            drafts = drafts.len(),
            "emails generated"
        );
        Ok(DraftBatch::new(drafts))
    }

    /// Only drafts still selected are handed to the send workflow.
    pub async fn send(
        &self,
        user: &UserContext,
        drafts: DraftBatch<GeneratedEmail>,
    ) -> Result<SendReport, OutreachError> {
        let emails = drafts.into_active();
        if emails.is_empty() {
            return Err(OutreachError::Validation(
                "no selected emails to send".to_string(),
            ));
        }
        let confirmation = self
            .workflow
            .send_emails(&emails, user.email.as_deref())
            .await?;
        info!(user_id = %user.user_id, sent = emails.len(), "emails handed to send workflow");
        Ok(SendReport {
            sent: emails.len(),
            confirmation,
        })
    }
}
