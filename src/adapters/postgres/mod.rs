//! PostgreSQL adapters - Database implementations for the ledger ports.
//!
//! - `PostgresLedgerReader` - lookups, listings and filtered sums
//! - `PostgresLedgerRepository` - row persistence
//! - `connect` - pool construction and embedded migrations

mod ledger_reader;
mod ledger_repository;
mod rows;

pub use ledger_reader::PostgresLedgerReader;
pub use ledger_repository::PostgresLedgerRepository;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

/// Opens the connection pool and, if configured, applies migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(pool)
}
