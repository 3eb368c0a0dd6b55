mod auth;
mod config;
mod db;
mod engine;
mod errors;
mod extract;
mod history;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::PgAccountStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::engine::catalog::Catalog;
use crate::engine::recommender::Recommender;
use crate::engine::scoring::ScoringWeights;
use crate::history::PgHistoryStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerMatrix API v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("loading career catalog from {}", path.display()))?,
        None => Catalog::bundled().context("loading bundled career catalog")?,
    };

    let recommender =
        Recommender::new(catalog, ScoringWeights::default()).context("invalid scoring weights")?;
    info!(
        "Career catalog loaded ({} careers), weights {:?}",
        recommender.catalog().len(),
        recommender.weights()
    );

    let state = match &config.database_url {
        Some(url) => {
            let db = create_pool(url).await?;
            info!("PostgreSQL pool ready, migrations applied");
            AppState {
                recommender: Arc::new(recommender),
                history: Arc::new(PgHistoryStore::new(db.clone())),
                accounts: Arc::new(PgAccountStore::new(db)),
                config: config.clone(),
            }
        }
        None => {
            info!("DATABASE_URL not set; history and accounts are kept in memory");
            AppState::in_memory(recommender, config.clone())
        }
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM so in-flight requests can finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received TERM signal");
            }
            Err(e) => {
                warn!("Failed to install TERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
