//! Wire and domain records exchanged with callers and with the workflows.

pub mod connection;
pub mod draft;
pub mod email;
pub mod lead;
pub mod prospect;
pub mod settings;

use serde_json::Value;

pub use connection::ConnectionRequest;
pub use draft::{Discardable, DraftBatch};
pub use email::GeneratedEmail;
pub use lead::Lead;
pub use prospect::GeneratedProspect;
pub use settings::UserSettings;

/// Normalise a workflow response into a list of records.
/// Arrays pass through, a bare object becomes a single record.
pub(crate) fn workflow_records(data: Value) -> Option<Vec<Value>> {
    match data {
        Value::Array(items) => Some(items),
        obj @ Value::Object(_) => Some(vec![obj]),
        _ => None,
    }
}

/// First non-empty string found under any of `keys`, or an empty string.
pub(crate) fn first_non_empty(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| record.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Empty text is persisted as NULL.
pub(crate) fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
