use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &outreach_desk::config::CONFIG;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        sheets = cfg.sheets.spreadsheet_id.is_some(),
        "starting outreach-desk"
    );

    if cfg.basic.uses_default_key() {
        warn!("basic.api_key is the default placeholder; set OUTREACH_BASIC__API_KEY");
    }

    for (name, url) in [
        ("generate_emails", &cfg.workflow.generate_emails_url),
        ("send_emails", &cfg.workflow.send_emails_url),
        ("generate_connections", &cfg.workflow.generate_connections_url),
    ] {
        match url {
            Some(url) => info!(workflow = name, url = %url, "workflow configured"),
            None => warn!(workflow = name, "workflow URL not set; route will answer 503"),
        }
    }

    let storage = outreach_desk::db::connect(&cfg.basic.database_url).await?;
    let state = outreach_desk::OutreachState::new(storage, cfg)?;
    let app = outreach_desk::outreach_router(state, cfg.basic.body_limit);

    let listener = TcpListener::bind(cfg.basic.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
