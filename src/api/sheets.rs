use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::config::SheetsConfig;
use crate::error::OutreachError;
use crate::google_oauth::{GoogleOauthEndpoints, SheetsCredential};
use crate::types::Lead;

/// Appends leads as rows to a Google spreadsheet.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    target: Option<SheetTarget>,
}

#[derive(Clone)]
struct SheetTarget {
    api_base: String,
    spreadsheet_id: String,
    range: String,
    credential: SheetsCredential,
}

#[derive(Serialize)]
struct ValueRange<'a> {
    values: &'a [[&'a str; 5]],
}

/// Subset of the append response worth reporting back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResult {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    #[serde(default)]
    updates: AppendResult,
}

impl SheetsClient {
    pub fn new(http: reqwest::Client, cfg: &SheetsConfig) -> Self {
        let target = cfg
            .spreadsheet_id
            .as_ref()
            .filter(|id| !id.is_empty())
            .zip(SheetsCredential::from_config(cfg))
            .map(|(id, credential)| SheetTarget {
                api_base: cfg.api_base.trim_end_matches('/').to_string(),
                spreadsheet_id: id.clone(),
                range: cfg.range.clone(),
                credential,
            });
        Self { http, target }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    /// Columns: email, firstname, lastname, linkedin, template.
    pub fn rows(leads: &[Lead]) -> Vec<[&str; 5]> {
        leads
            .iter()
            .map(|l| {
                [
                    l.email.as_str(),
                    l.firstname.as_str(),
                    l.lastname.as_str(),
                    l.linkedin.as_str(),
                    l.template.as_str(),
                ]
            })
            .collect()
    }

    pub async fn append_leads(&self, leads: &[Lead]) -> Result<AppendResult, OutreachError> {
        let target = self.target.as_ref().ok_or(OutreachError::SheetsNotConfigured)?;
        let token = GoogleOauthEndpoints::access_token(&target.credential, &self.http).await?;

        let mut url = Url::parse(&format!(
            "{}/{}/values/{}:append",
            target.api_base, target.spreadsheet_id, target.range
        ))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let rows = Self::rows(leads);
        let resp: AppendResponse = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&ValueRange { values: &rows })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(
            rows = rows.len(),
            updated_range = resp.updates.updated_range.as_deref().unwrap_or("<unknown>"),
            "leads appended to spreadsheet"
        );
        Ok(resp.updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_column_order() {
        let leads = vec![Lead {
            email: "a@x.io".into(),
            firstname: "Ana".into(),
            lastname: "Ruiz".into(),
            linkedin: "in/ana".into(),
            template: "Hi".into(),
            email_signature: "not exported".into(),
            id: Some(1),
        }];
        assert_eq!(
            SheetsClient::rows(&leads),
            vec![["a@x.io", "Ana", "Ruiz", "in/ana", "Hi"]]
        );
    }

    #[test]
    fn disabled_without_spreadsheet_or_credential() {
        let http = reqwest::Client::new();
        assert!(!SheetsClient::new(http.clone(), &SheetsConfig::default()).is_enabled());
        let no_cred = SheetsConfig {
            spreadsheet_id: Some("abc".into()),
            ..Default::default()
        };
        assert!(!SheetsClient::new(http.clone(), &no_cred).is_enabled());
        let ok = SheetsConfig {
            spreadsheet_id: Some("abc".into()),
            access_token: Some("tok".into()),
            ..Default::default()
        };
        assert!(SheetsClient::new(http, &ok).is_enabled());
    }
}
