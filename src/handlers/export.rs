use axum::{Json, extract::State};
use serde::Serialize;

use crate::OutreachError;
use crate::api::sheets::AppendResult;
use crate::middleware::{RequireKeyAuth, UserContext};
use crate::router::OutreachState;
use crate::types::Lead;

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: AppendResult,
}

/// POST /api/export-leads -> appends the posted leads as spreadsheet rows.
pub async fn export_leads(
    State(state): State<OutreachState>,
    _auth: RequireKeyAuth,
    Json(leads): Json<Vec<Lead>>,
) -> Result<Json<ExportResponse>, OutreachError> {
    let result = state.export.export(&leads).await?;
    Ok(Json(ExportResponse {
        success: true,
        result,
    }))
}

/// POST /api/leads/export -> appends the caller's saved leads.
pub async fn export_saved_leads(
    State(state): State<OutreachState>,
    user: UserContext,
) -> Result<Json<ExportResponse>, OutreachError> {
    let result = state.export.export_stored(&user.user_id).await?;
    Ok(Json(ExportResponse {
        success: true,
        result,
    }))
}
