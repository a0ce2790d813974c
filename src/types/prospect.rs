use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Discardable, first_non_empty, workflow_records};
use crate::error::OutreachError;

/// A person surfaced by the prospect discovery workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedProspect {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_url: String,
    pub discarded: bool,
}

impl GeneratedProspect {
    pub fn from_workflow(data: Value) -> Result<Vec<Self>, OutreachError> {
        let records = workflow_records(data).ok_or(OutreachError::UnexpectedWorkflowResponse)?;
        Ok(records
            .iter()
            .enumerate()
            .map(|(idx, record)| Self {
                id: format!("generated-{idx}"),
                first_name: first_non_empty(record, &["firstName", "first_name"]),
                last_name: first_non_empty(record, &["lastName", "last_name"]),
                profile_url: first_non_empty(record, &["profileUrl", "profile_url", "linkedin"]),
                discarded: false,
            })
            .collect())
    }
}

impl Discardable for GeneratedProspect {
    fn is_discarded(&self) -> bool {
        self.discarded
    }

    fn set_discarded(&mut self, discarded: bool) {
        self.discarded = discarded;
    }
}
