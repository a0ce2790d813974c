//! Outbound HTTP clients: the workflow webhooks and the spreadsheet API.

pub mod sheets;
pub mod workflow;

pub use sheets::SheetsClient;
pub use workflow::WorkflowClient;
