use axum::{Json, extract::State};
use serde::Deserialize;

use crate::OutreachError;
use crate::middleware::UserContext;
use crate::router::OutreachState;
use crate::types::{ConnectionRequest, DraftBatch, GeneratedProspect};

#[derive(Debug, Deserialize)]
pub struct GenerateProspectsRequest {
    pub connections: Vec<ConnectionRequest>,
}

/// POST /api/prospects/generate
pub async fn generate_prospects(
    State(state): State<OutreachState>,
    _user: UserContext,
    Json(req): Json<GenerateProspectsRequest>,
) -> Result<Json<DraftBatch<GeneratedProspect>>, OutreachError> {
    Ok(Json(state.prospects.generate(&req.connections).await?))
}
