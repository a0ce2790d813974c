use serde::{Deserialize, Serialize};

use crate::db::models::DbConnectionRequest;

/// Default head count for a freshly added research row.
pub const DEFAULT_EMPLOYEE_COUNT: i64 = 5;

/// A prospect research request: who to look for at which company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub number_of_employees: Option<i64>,
    pub company_name: String,
    pub school: String,
    pub job_title: String,
}

impl ConnectionRequest {
    pub fn blank() -> Self {
        Self {
            number_of_employees: Some(DEFAULT_EMPLOYEE_COUNT),
            ..Default::default()
        }
    }

    /// The employee count alone does not make a row worth storing.
    pub fn has_data(&self) -> bool {
        !self.company_name.is_empty() || !self.school.is_empty() || !self.job_title.is_empty()
    }
}

impl From<DbConnectionRequest> for ConnectionRequest {
    fn from(row: DbConnectionRequest) -> Self {
        Self {
            id: Some(row.id),
            number_of_employees: Some(row.number_of_employees.unwrap_or(0)),
            company_name: row.company_name.unwrap_or_default(),
            school: row.school.unwrap_or_default(),
            job_title: row.job_title.unwrap_or_default(),
        }
    }
}
