use crate::config::SheetsConfig;
use crate::error::OutreachError;

use oauth2::{
    Client as OAuth2Client, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RefreshToken,
    StandardRevocableToken, TokenResponse, TokenUrl,
    basic::{
        BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
        BasicTokenResponse,
    },
};
use tracing::info;

/// How the exporter authorizes against the Sheets API.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetsCredential {
    /// A bearer token supplied by the operator, used as-is.
    Static(String),
    /// Exchanged for a fresh access token on every export.
    Refresh {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        token_uri: String,
    },
}

impl SheetsCredential {
    /// A static token wins over a refresh-token triple.
    pub fn from_config(cfg: &SheetsConfig) -> Option<Self> {
        if let Some(token) = cfg.access_token.as_ref().filter(|t| !t.is_empty()) {
            return Some(Self::Static(token.clone()));
        }
        match (&cfg.client_id, &cfg.client_secret, &cfg.refresh_token) {
            (Some(id), Some(secret), Some(refresh)) => Some(Self::Refresh {
                client_id: id.clone(),
                client_secret: secret.clone(),
                refresh_token: refresh.clone(),
                token_uri: cfg.token_uri.clone(),
            }),
            _ => None,
        }
    }
}

/// Stateless Google OAuth Endpoints.
pub struct GoogleOauthEndpoints;

impl GoogleOauthEndpoints {
    /// Resolve a bearer token for one export.
    pub async fn access_token(
        cred: &SheetsCredential,
        http_client: &reqwest::Client,
    ) -> Result<String, OutreachError> {
        match cred {
            SheetsCredential::Static(token) => Ok(token.clone()),
            SheetsCredential::Refresh {
                client_id,
                client_secret,
                refresh_token,
                token_uri,
            } => {
                let client = build_oauth2_client(client_id, client_secret, token_uri)?;
                let token: BasicTokenResponse = client
                    .exchange_refresh_token(&RefreshToken::new(refresh_token.clone()))
                    .request_async(http_client)
                    .await?;
                info!("Sheets access token refreshed successfully");
                Ok(token.access_token().secret().to_string())
            }
        }
    }
}

fn build_oauth2_client(
    client_id: &str,
    client_secret: &str,
    token_uri: &str,
) -> Result<GoogleOauth2Client, OutreachError> {
    let client = OAuth2Client::new(ClientId::new(client_id.to_string()))
        .set_client_secret(ClientSecret::new(client_secret.to_string()))
        .set_token_uri(TokenUrl::new(token_uri.to_string())?);
    Ok(client)
}

pub(super) type GoogleOauth2Client = OAuth2Client<
    BasicErrorResponse,
    BasicTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;
