use axum::{Json, extract::State};
use serde::Deserialize;

use crate::OutreachError;
use crate::middleware::UserContext;
use crate::router::OutreachState;
use crate::service::SendReport;
use crate::types::{DraftBatch, GeneratedEmail, Lead};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEmailsRequest {
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

/// POST /api/emails/generate
pub async fn generate_emails(
    State(state): State<OutreachState>,
    user: UserContext,
    Json(req): Json<GenerateEmailsRequest>,
) -> Result<Json<DraftBatch<GeneratedEmail>>, OutreachError> {
    let drafts = state
        .emails
        .generate(&user, req.leads, req.resume_url)
        .await?;
    Ok(Json(drafts))
}

#[derive(Debug, Deserialize)]
pub struct SendEmailsRequest {
    pub emails: DraftBatch<GeneratedEmail>,
}

/// POST /api/emails/send -> discarded drafts are not sent.
pub async fn send_emails(
    State(state): State<OutreachState>,
    user: UserContext,
    Json(req): Json<SendEmailsRequest>,
) -> Result<Json<SendReport>, OutreachError> {
    Ok(Json(state.emails.send(&user, req.emails).await?))
}
