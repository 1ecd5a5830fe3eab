//! Pointkeeper HTTP server.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use pointkeeper::adapters::http::{app_router, AppState};
use pointkeeper::adapters::postgres::{self, PostgresLedgerReader, PostgresLedgerRepository};
use pointkeeper::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let settings = config.ledger.aggregation_settings()?;
    let policy = config.ledger.batch_policy;

    let state = match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            AppState::new(
                Arc::new(PostgresLedgerReader::new(pool.clone())),
                Arc::new(PostgresLedgerRepository::new(pool)),
                settings,
                policy,
            )
        }
        None => {
            warn!("No database configured; rows are kept in memory and lost on exit");
            AppState::in_memory(settings, policy)
        }
    };

    let addr = config.server.socket_addr();
    let app = app_router(state, &config.server);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        batch_policy = ?policy,
        utc_offset_minutes = config.ledger.utc_offset_minutes,
        "pointkeeper listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("pointkeeper stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured directive.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
