use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::OutreachError;
use crate::middleware::UserContext;
use crate::router::OutreachState;
use crate::service::leads::SavedLeads;
use crate::service::template::{PlaceholderValues, RenderedLead, render_lead};
use crate::types::Lead;

/// GET /api/leads
pub async fn list_leads(
    State(state): State<OutreachState>,
    user: UserContext,
) -> Result<Json<Vec<Lead>>, OutreachError> {
    Ok(Json(state.leads.load(&user.user_id).await?))
}

/// PUT /api/leads -> rows without `id` are inserted, rows with one are updated.
pub async fn save_leads(
    State(state): State<OutreachState>,
    user: UserContext,
    Json(leads): Json<Vec<Lead>>,
) -> Result<Json<SavedLeads>, OutreachError> {
    Ok(Json(state.leads.save(&user.user_id, &leads).await?))
}

/// DELETE /api/leads/{id}
pub async fn delete_lead(
    State(state): State<OutreachState>,
    user: UserContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, OutreachError> {
    state.leads.delete(&user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PreviewRequest {
    /// Falls back to the caller's saved leads when absent.
    pub leads: Option<Vec<Lead>>,
    pub placeholders: PlaceholderValues,
}

/// POST /api/leads/preview -> each lead's template and signature, filled in.
pub async fn preview_leads(
    State(state): State<OutreachState>,
    user: UserContext,
    Json(req): Json<PreviewRequest>,
) -> Result<Json<Vec<RenderedLead>>, OutreachError> {
    let leads = match req.leads {
        Some(leads) => leads,
        None => state.leads.load(&user.user_id).await?,
    };
    let rendered = leads
        .iter()
        .filter(|l| l.has_data())
        .map(|l| render_lead(l, &req.placeholders))
        .collect();
    Ok(Json(rendered))
}
