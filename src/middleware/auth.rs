use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::OutreachError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Shared service key callers must present.
#[derive(Clone)]
pub struct ServiceKey(pub Arc<str>);

fn key_matches(candidate: &str, expected: &str) -> bool {
    bool::from(candidate.as_bytes().ct_eq(expected.as_bytes()))
}

/// Ensure the inbound request is authorized.
/// Accepts either:
/// - Header: `Authorization: Bearer <key>`
/// - Header: `x-api-key: <key>`
/// - Query string: `?key=...`
pub fn ensure_authorized(
    headers: &HeaderMap,
    query: Option<&str>,
    expected: &str,
) -> Result<(), OutreachError> {
    if let Some(auth) = headers.typed_get::<Authorization<Bearer>>()
        && key_matches(auth.token(), expected)
    {
        return Ok(());
    }

    if let Some(hv) = headers.get("x-api-key").and_then(|v| v.to_str().ok())
        && key_matches(hv, expected)
    {
        return Ok(());
    }

    if let Some(qs) = query {
        for (k, v) in url::form_urlencoded::parse(qs.as_bytes()) {
            if k == "key" && key_matches(&v, expected) {
                return Ok(());
            }
        }
    }

    Err(OutreachError::Unauthorized)
}

#[derive(Debug, Clone, Copy)]
pub struct RequireKeyAuth;

impl<S> FromRequestParts<S> for RequireKeyAuth
where
    S: Send + Sync,
    ServiceKey: FromRef<S>,
{
    type Rejection = OutreachError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ServiceKey(expected) = ServiceKey::from_ref(state);
        ensure_authorized(&parts.headers, parts.uri.query(), &expected)?;
        Ok(Self)
    }
}

/// The end user a request acts for. Identity is asserted by the trusted
/// caller holding the service key; the value itself is opaque here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
    pub email: Option<String>,
}

impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
    ServiceKey: FromRef<S>,
{
    type Rejection = OutreachError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        RequireKeyAuth::from_request_parts(parts, state).await?;

        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let user_id = header(USER_ID_HEADER).ok_or(OutreachError::MissingUser)?;
        let email = header(USER_EMAIL_HEADER);
        Ok(Self { user_id, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn accepts_bearer_header_or_query() {
        let mut headers = HeaderMap::new();
        assert!(ensure_authorized(&headers, None, "k1").is_err());
        assert!(ensure_authorized(&headers, Some("key=k1"), "k1").is_ok());
        assert!(ensure_authorized(&headers, Some("key=k2"), "k1").is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer k1"));
        assert!(ensure_authorized(&headers, None, "k1").is_ok());

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("k1"));
        assert!(ensure_authorized(&headers, None, "k1").is_ok());
        assert!(ensure_authorized(&headers, None, "k10").is_err());
    }
}
