use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::DbUserSettings;

/// Per-user settings; today this only tracks the attached resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub id: i64,
    pub user_id: String,
    pub resume_url: Option<String>,
    pub resume_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Both halves of the resume reference are needed for it to be usable.
    pub fn resume(&self) -> Option<(&str, &str)> {
        match (self.resume_url.as_deref(), self.resume_filename.as_deref()) {
            (Some(url), Some(name)) if !url.is_empty() && !name.is_empty() => Some((url, name)),
            _ => None,
        }
    }

    pub fn without_resume(self) -> Self {
        Self {
            resume_url: None,
            resume_filename: None,
            ..self
        }
    }
}

impl From<DbUserSettings> for UserSettings {
    fn from(row: DbUserSettings) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            resume_url: row.resume_url,
            resume_filename: row.resume_filename,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
