use axum::{Json, http::StatusCode, response::IntoResponse};
use oauth2::basic::BasicErrorResponseType;
use oauth2::reqwest::Error as ReqwestClientError;
use oauth2::{HttpClientError, RequestTokenError, StandardErrorResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::{error, warn};

#[derive(Debug, ThisError)]
pub enum OutreachError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("OAuth2 token request error: {0}")]
    Oauth2Token(String),

    #[error("OAuth2 server error: {error}")]
    Oauth2Server { error: String },

    #[error("missing or invalid service key")]
    Unauthorized,

    #[error("missing `x-user-id` header")]
    MissingUser,

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("workflow `{0}` is not configured")]
    WorkflowNotConfigured(&'static str),

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("unexpected response format from workflow")]
    UnexpectedWorkflowResponse,

    #[error("spreadsheet export is not configured")]
    SheetsNotConfigured,
}

impl From<
        RequestTokenError<
            HttpClientError<ReqwestClientError>,
            StandardErrorResponse<BasicErrorResponseType>,
        >,
    > for OutreachError
{
    fn from(
        e: RequestTokenError<
            HttpClientError<ReqwestClientError>,
            StandardErrorResponse<BasicErrorResponseType>,
        >,
    ) -> Self {
        match e {
            RequestTokenError::ServerResponse(err) => OutreachError::Oauth2Server {
                error: err.error().to_string(),
            },
            RequestTokenError::Request(req_e) => {
                OutreachError::Oauth2Token(format!("request failed: {}", req_e))
            }
            RequestTokenError::Parse(parse_err, _body) => {
                OutreachError::Oauth2Token(format!("malformed token response: {}", parse_err))
            }
            RequestTokenError::Other(s) => OutreachError::Oauth2Token(s),
        }
    }
}

impl IntoResponse for OutreachError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            OutreachError::DatabaseError(e) => {
                error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred.".to_string(),
                )
            }
            OutreachError::UrlParse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred.".to_string(),
            ),
            OutreachError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid or missing service key.".to_string(),
            ),
            OutreachError::MissingUser => (
                StatusCode::UNAUTHORIZED,
                "MISSING_USER",
                self.to_string(),
            ),
            OutreachError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", self.to_string())
            }
            OutreachError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            OutreachError::WorkflowNotConfigured(_) | OutreachError::SheetsNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_CONFIGURED",
                self.to_string(),
            ),
            OutreachError::Reqwest(_) => (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                "Upstream service is unavailable.".to_string(),
            ),
            OutreachError::Upstream { status, message } => {
                warn!(upstream_status = %status, message = %message, "upstream call failed");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", self.to_string())
            }
            OutreachError::UnexpectedWorkflowResponse => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", self.to_string())
            }
            OutreachError::Oauth2Token(e) | OutreachError::Oauth2Server { error: e } => {
                warn!(error = %e, "sheets token request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "SHEETS_AUTH_FAILED",
                    "Spreadsheet authorization failed.".to_string(),
                )
            }
        };
        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
