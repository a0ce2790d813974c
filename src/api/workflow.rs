use std::time::Duration;

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::config::WorkflowConfig;
use crate::error::OutreachError;
use crate::types::{ConnectionRequest, GeneratedEmail, Lead};

/// Stateless caller for the webhook-triggered workflows.
///
/// Each call is a single POST; a failed call is reported to the caller
/// as-is and never retried.
#[derive(Clone)]
pub struct WorkflowClient {
    http: reqwest::Client,
    generate_emails_url: Option<Url>,
    send_emails_url: Option<Url>,
    generate_connections_url: Option<Url>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateEmailsPayload<'a> {
    leads: &'a [Lead],
    user_email: Option<&'a str>,
    resume_url: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailsPayload<'a> {
    emails: &'a [GeneratedEmail],
    user_email: Option<&'a str>,
}

#[derive(Serialize)]
struct GenerateConnectionsPayload<'a> {
    connections: &'a [ConnectionRequest],
}

impl WorkflowClient {
    pub fn new(cfg: &WorkflowConfig) -> Result<Self, OutreachError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("outreach-desk/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.timeout_secs));
        // only the configured proxy is used, never the environment's
        builder = match cfg.proxy.as_ref() {
            Some(proxy_url) => builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?),
            None => builder.no_proxy(),
        };
        Ok(Self::with_client(builder.build()?, cfg))
    }

    pub fn with_client(http: reqwest::Client, cfg: &WorkflowConfig) -> Self {
        Self {
            http,
            generate_emails_url: cfg.generate_emails_url.clone(),
            send_emails_url: cfg.send_emails_url.clone(),
            generate_connections_url: cfg.generate_connections_url.clone(),
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub async fn generate_emails(
        &self,
        leads: &[Lead],
        user_email: Option<&str>,
        resume_url: Option<&str>,
    ) -> Result<Value, OutreachError> {
        let url = self
            .generate_emails_url
            .as_ref()
            .ok_or(OutreachError::WorkflowNotConfigured("generate_emails"))?;
        let resp = self
            .http
            .post(url.clone())
            .json(&GenerateEmailsPayload {
                leads,
                user_email,
                resume_url,
            })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(upstream(resp.status(), "Failed to trigger workflow"));
        }
        info!(leads = leads.len(), "email generation workflow answered");
        Ok(resp.json().await?)
    }

    pub async fn send_emails(
        &self,
        emails: &[GeneratedEmail],
        user_email: Option<&str>,
    ) -> Result<Value, OutreachError> {
        let url = self
            .send_emails_url
            .as_ref()
            .ok_or(OutreachError::WorkflowNotConfigured("send_emails"))?;
        let resp = self
            .http
            .post(url.clone())
            .json(&SendEmailsPayload { emails, user_email })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(upstream(resp.status(), "Failed to send emails"));
        }
        info!(emails = emails.len(), "send workflow answered");
        Ok(resp.json().await?)
    }

    /// Upstream error text is passed through when the workflow supplies one.
    pub async fn generate_connections(
        &self,
        connections: &[ConnectionRequest],
    ) -> Result<Value, OutreachError> {
        let url = self
            .generate_connections_url
            .as_ref()
            .ok_or(OutreachError::WorkflowNotConfigured("generate_connections"))?;
        let resp = self
            .http
            .post(url.clone())
            .json(&GenerateConnectionsPayload { connections })
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = match text.trim() {
                "" => "Failed to generate connections",
                t => t,
            };
            return Err(upstream(status, message));
        }
        let data: Value = resp.json().await?;
        info!(requests = connections.len(), "prospect workflow answered");
        Ok(data)
    }

    /// `HEAD` the URL. `None` when the request itself failed.
    pub async fn resume_exists(&self, url: &str) -> Option<bool> {
        match self.http.head(url).send().await {
            Ok(resp) => Some(resp.status().is_success()),
            Err(e) => {
                warn!(url = %url, error = %e, "resume probe failed");
                None
            }
        }
    }
}

fn upstream(status: StatusCode, message: &str) -> OutreachError {
    OutreachError::Upstream {
        status,
        message: message.to_string(),
    }
}
