use serde::{Deserialize, Serialize};

use crate::db::models::DbLead;

/// A lead as edited by the user. `id` is present once the row has been stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub linkedin: String,
    pub template: String,
    #[serde(rename = "emailSignature")]
    pub email_signature: String,
}

impl Lead {
    pub fn has_data(&self) -> bool {
        [
            &self.email,
            &self.firstname,
            &self.lastname,
            &self.linkedin,
            &self.template,
            &self.email_signature,
        ]
        .iter()
        .any(|f| !f.is_empty())
    }
}

impl From<DbLead> for Lead {
    fn from(row: DbLead) -> Self {
        Self {
            id: Some(row.id),
            email: row.email.unwrap_or_default(),
            firstname: row.firstname.unwrap_or_default(),
            lastname: row.lastname.unwrap_or_default(),
            linkedin: row.linkedin.unwrap_or_default(),
            template: row.template.unwrap_or_default(),
            email_signature: row.email_signature.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lead_has_no_data() {
        assert!(!Lead::default().has_data());
        let lead = Lead {
            email_signature: "Best, Sam".into(),
            ..Default::default()
        };
        assert!(lead.has_data());
    }

    #[test]
    fn signature_uses_camel_case_on_the_wire() {
        let lead: Lead =
            serde_json::from_str(r#"{"email":"a@b.co","emailSignature":"-- A"}"#).unwrap();
        assert_eq!(lead.email_signature, "-- A");
        assert_eq!(lead.id, None);
        let out = serde_json::to_value(&lead).unwrap();
        assert_eq!(out["emailSignature"], "-- A");
        assert!(out.get("id").is_none());
    }
}
