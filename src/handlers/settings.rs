use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::OutreachError;
use crate::middleware::UserContext;
use crate::router::OutreachState;
use crate::types::UserSettings;

/// GET /api/settings -> `null` when the user has none yet.
pub async fn get_settings(
    State(state): State<OutreachState>,
    user: UserContext,
) -> Result<Json<Option<UserSettings>>, OutreachError> {
    Ok(Json(state.settings.load(&user.user_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    #[serde(alias = "resumeUrl")]
    pub resume_url: String,
    #[serde(alias = "resumeFileName", alias = "resumeFilename")]
    pub resume_filename: String,
}

/// PUT /api/settings/resume
pub async fn save_resume(
    State(state): State<OutreachState>,
    user: UserContext,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<UserSettings>, OutreachError> {
    let settings = state
        .settings
        .save_resume(&user.user_id, &req.resume_url, &req.resume_filename)
        .await?;
    Ok(Json(settings))
}

/// DELETE /api/settings/resume
pub async fn clear_resume(
    State(state): State<OutreachState>,
    user: UserContext,
) -> Result<StatusCode, OutreachError> {
    state.settings.clear_resume(&user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
