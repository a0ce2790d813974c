use axum::Json;

use crate::middleware::RequireKeyAuth;
use crate::service::template::{BUILTIN_TEMPLATES, BuiltinTemplate};

/// GET /api/templates
pub async fn list_templates(_auth: RequireKeyAuth) -> Json<&'static [BuiltinTemplate]> {
    Json(BUILTIN_TEMPLATES.as_slice())
}
