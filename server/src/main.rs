//! DocuNest server
//!
//! Serves the document upload/sharing API and the password-gated guest
//! download flow.
//!
//! Usage:
//!   ENCRYPTION_SECRET=... docunest-server --port 3000 --database docunest.db
//!
//! Identity comes from a trusted header set by an authenticating proxy; see
//! `--identity-header`.

use anyhow::{Context, Result};
use clap::Parser;
use docunest_server::{build_router, build_state, Args, ServerConfig, SECRET_ENV};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("DocuNest server starting...");
    let config = ServerConfig::from_args(args, std::env::var(SECRET_ENV).ok())?;
    let state = build_state(&config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        addr = %config.bind_addr,
        database = %config.database.display(),
        storage = %config.storage_dir.display(),
        files = %config.public_base_url,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("DocuNest server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
