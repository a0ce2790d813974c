use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Discardable, first_non_empty, workflow_records};
use crate::error::OutreachError;

/// An email draft produced by the generation workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedEmail {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub subject: String,
    pub body: String,
    pub signature: String,
    pub discarded: bool,
    #[serde(
        rename = "linkedinHighlights",
        skip_serializing_if = "Option::is_none"
    )]
    pub linkedin_highlights: Option<Value>,
}

impl GeneratedEmail {
    /// Map a workflow response onto drafts. Field names vary between
    /// workflow revisions, so each field accepts several aliases.
    pub fn from_workflow(data: Value) -> Result<Vec<Self>, OutreachError> {
        let records = workflow_records(data).ok_or(OutreachError::UnexpectedWorkflowResponse)?;
        Ok(records.iter().map(Self::from_record).collect())
    }

    fn from_record(record: &Value) -> Self {
        Self {
            email: first_non_empty(record, &["emailId", "recipient_email"]),
            firstname: first_non_empty(record, &["firstName", "firstname", "first_name"]),
            lastname: first_non_empty(record, &["lastName", "lastname", "last_name"]),
            subject: first_non_empty(record, &["subject"]),
            body: first_non_empty(record, &["body", "content"]),
            signature: first_non_empty(record, &["signature"]),
            discarded: false,
            linkedin_highlights: record
                .get("linkedinHighlights")
                .filter(|v| v.is_object())
                .cloned(),
        }
    }
}

impl Discardable for GeneratedEmail {
    fn is_discarded(&self) -> bool {
        self.discarded
    }

    fn set_discarded(&mut self, discarded: bool) {
        self.discarded = discarded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_object_is_wrapped() {
        let emails = GeneratedEmail::from_workflow(json!({
            "recipient_email": "jo@acme.io",
            "first_name": "Jo",
            "lastName": "Park",
            "subject": "Hello",
            "content": "Body text",
        }))
        .unwrap();
        assert_eq!(emails.len(), 1);
        let e = &emails[0];
        assert_eq!(e.email, "jo@acme.io");
        assert_eq!(e.firstname, "Jo");
        assert_eq!(e.lastname, "Park");
        assert_eq!(e.body, "Body text");
        assert!(!e.discarded);
        assert!(e.linkedin_highlights.is_none());
    }

    #[test]
    fn empty_alias_falls_through_to_next() {
        let emails = GeneratedEmail::from_workflow(json!([
            {"emailId": "", "recipient_email": "b@x.io", "body": "", "content": "fallback"}
        ]))
        .unwrap();
        assert_eq!(emails[0].email, "b@x.io");
        assert_eq!(emails[0].body, "fallback");
    }

    #[test]
    fn scalar_response_is_rejected() {
        let err = GeneratedEmail::from_workflow(json!("done")).unwrap_err();
        assert!(matches!(err, OutreachError::UnexpectedWorkflowResponse));
        assert!(GeneratedEmail::from_workflow(Value::Null).is_err());
    }

    #[test]
    fn highlights_are_kept_when_structured() {
        let emails = GeneratedEmail::from_workflow(json!([
            {"emailId": "a@x.io", "linkedinHighlights": {"company": "Acme", "job_title": "CTO"}},
            {"emailId": "b@x.io", "linkedinHighlights": "n/a"}
        ]))
        .unwrap();
        assert_eq!(emails[0].linkedin_highlights.as_ref().unwrap()["company"], "Acme");
        assert!(emails[1].linkedin_highlights.is_none());
    }
}
