//! theater-workbench server entry point.
//!
//! Starts the Axum HTTP server with the workbench REST endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use theater_workbench::api;
use theater_workbench::app_state::AppState;
use theater_workbench::config::WorkbenchConfig;
use theater_workbench::domain::{SystemClock, TagCatalog};
use theater_workbench::service::WorkbenchService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WorkbenchConfig::from_env().context("loading configuration")?;
    let listen_addr = config.listen_addr;
    let request_timeout = config.request_timeout();
    tracing::info!(
        addr = %listen_addr,
        expiring_soon_days = config.thresholds.expiring_soon_days,
        default_option_term_days = ?config.default_option_term_days,
        "starting theater-workbench"
    );

    let workbench = WorkbenchService::new(
        Arc::new(SystemClock),
        Arc::new(config),
        Arc::new(TagCatalog::builtin()),
    );
    let app = api::build_app(AppState::new(workbench), request_timeout);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app)
        .await
        .context("serving HTTP")
        .inspect_err(|e| {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "server stopped");
        })?;

    Ok(())
}
