use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbLead {
    pub id: i64,
    pub user_id: String,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub linkedin: Option<String>,
    pub template: Option<String>,
    pub email_signature: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbConnectionRequest {
    pub id: i64,
    pub user_id: String,
    pub number_of_employees: Option<i64>,
    pub company_name: Option<String>,
    pub school: Option<String>,
    pub job_title: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbUserSettings {
    pub id: i64,
    pub user_id: String,
    pub resume_url: Option<String>,
    pub resume_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
