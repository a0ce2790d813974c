use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::OutreachError;
use crate::middleware::UserContext;
use crate::router::OutreachState;
use crate::service::connections::SavedConnections;
use crate::types::ConnectionRequest;

/// GET /api/connections
pub async fn list_connections(
    State(state): State<OutreachState>,
    user: UserContext,
) -> Result<Json<Vec<ConnectionRequest>>, OutreachError> {
    Ok(Json(state.connections.load(&user.user_id).await?))
}

/// PUT /api/connections
pub async fn save_connections(
    State(state): State<OutreachState>,
    user: UserContext,
    Json(connections): Json<Vec<ConnectionRequest>>,
) -> Result<Json<SavedConnections>, OutreachError> {
    Ok(Json(state.connections.save(&user.user_id, &connections).await?))
}

/// DELETE /api/connections/{id}
pub async fn delete_connection(
    State(state): State<OutreachState>,
    user: UserContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, OutreachError> {
    state.connections.delete(&user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
