use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{delete, get, post, put},
};

use crate::api::{SheetsClient, WorkflowClient};
use crate::config::Config;
use crate::db::OutreachStorage;
use crate::error::OutreachError;
use crate::handlers::{connections, emails, export, leads, prospects, settings, templates};
use crate::middleware::auth::ServiceKey;
use crate::service::{
    ConnectionService, EmailService, ExportService, LeadService, ProspectService,
    SettingsService,
};

#[derive(Clone)]
pub struct OutreachState {
    pub key: ServiceKey,
    pub leads: LeadService,
    pub connections: ConnectionService,
    pub emails: EmailService,
    pub prospects: ProspectService,
    pub settings: SettingsService,
    pub export: ExportService,
}

impl OutreachState {
    pub fn new(storage: OutreachStorage, cfg: &Config) -> Result<Self, OutreachError> {
        let workflow = WorkflowClient::new(&cfg.workflow)?;
        let sheets = SheetsClient::new(workflow.http().clone(), &cfg.sheets);
        Ok(Self::from_parts(storage, workflow, sheets, cfg))
    }

    pub fn from_parts(
        storage: OutreachStorage,
        workflow: WorkflowClient,
        sheets: SheetsClient,
        cfg: &Config,
    ) -> Self {
        Self {
            key: ServiceKey(Arc::from(cfg.basic.api_key.as_str())),
            leads: LeadService::new(storage.clone()),
            connections: ConnectionService::new(storage.clone()),
            emails: EmailService::new(storage.clone(), workflow.clone()),
            prospects: ProspectService::new(workflow.clone()),
            settings: SettingsService::new(
                storage.clone(),
                workflow,
                cfg.settings.verify_resume_on_load,
            ),
            export: ExportService::new(storage, sheets),
        }
    }
}

impl FromRef<OutreachState> for ServiceKey {
    fn from_ref(state: &OutreachState) -> Self {
        state.key.clone()
    }
}

pub fn outreach_router(state: OutreachState, body_limit: usize) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/leads", get(leads::list_leads).put(leads::save_leads))
        .route("/api/leads/{id}", delete(leads::delete_lead))
        .route("/api/leads/preview", post(leads::preview_leads))
        .route("/api/leads/export", post(export::export_saved_leads))
        .route(
            "/api/connections",
            get(connections::list_connections).put(connections::save_connections),
        )
        .route("/api/connections/{id}", delete(connections::delete_connection))
        .route("/api/emails/generate", post(emails::generate_emails))
        .route("/api/emails/send", post(emails::send_emails))
        .route("/api/prospects/generate", post(prospects::generate_prospects))
        .route("/api/settings", get(settings::get_settings))
        .route(
            "/api/settings/resume",
            put(settings::save_resume).delete(settings::clear_resume),
        )
        .route("/api/templates", get(templates::list_templates))
        .route("/api/export-leads", post(export::export_leads))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
