use tracing::{info, warn};

use crate::api::WorkflowClient;
use crate::db::OutreachStorage;
use crate::error::OutreachError;
use crate::types::UserSettings;

#[derive(Clone)]
pub struct SettingsService {
    storage: OutreachStorage,
    workflow: WorkflowClient,
    verify_resume: bool,
}

impl SettingsService {
    pub fn new(storage: OutreachStorage, workflow: WorkflowClient, verify_resume: bool) -> Self {
        Self {
            storage,
            workflow,
            verify_resume,
        }
    }

    /// Load settings, dropping a resume whose stored object no longer exists.
    ///
    /// Only a definite non-2xx answer clears the record. A probe that fails at
    /// the transport level (DNS, refused connection, timeout) is not treated as
    /// a missing file and leaves the stored resume in place.
    pub async fn load(&self, user_id: &str) -> Result<Option<UserSettings>, OutreachError> {
        let Some(settings) = self.storage.load_settings(user_id).await? else {
            return Ok(None);
        };
        let settings = UserSettings::from(settings);
        if !self.verify_resume {
            return Ok(Some(settings));
        }
        let Some((url, _)) = settings.resume() else {
            return Ok(Some(settings));
        };

        match self.workflow.resume_exists(url).await {
            Some(false) => {
                warn!(user_id = %user_id, url = %url, "stored resume is gone; clearing it");
                self.storage.clear_resume(user_id).await?;
                Ok(Some(settings.without_resume()))
            }
            _ => Ok(Some(settings)),
        }
    }

    pub async fn save_resume(
        &self,
        user_id: &str,
        resume_url: &str,
        resume_filename: &str,
    ) -> Result<UserSettings, OutreachError> {
        if resume_url.trim().is_empty() || resume_filename.trim().is_empty() {
            return Err(OutreachError::Validation(
                "resume url and filename are required".to_string(),
            ));
        }
        url::Url::parse(resume_url)
            .map_err(|e| OutreachError::Validation(format!("invalid resume url: {e}")))?;
        let row = self
            .storage
            .save_resume(user_id, resume_url, resume_filename)
            .await?;
        info!(user_id = %user_id, filename = %resume_filename, "resume saved to settings");
        Ok(row.into())
    }

    pub async fn clear_resume(&self, user_id: &str) -> Result<(), OutreachError> {
        if self.storage.clear_resume(user_id).await? {
            info!(user_id = %user_id, "resume cleared from settings");
        }
        Ok(())
    }
}
