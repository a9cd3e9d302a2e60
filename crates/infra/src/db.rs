//! Postgres connection pool wiring.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::instrument;

use crate::config::DatabaseConfig;
use crate::store::{PostgresInventoryStore, StoreError};

/// Open a pool and make sure the inventory schema exists.
#[instrument(skip(config), fields(max_connections = config.max_connections), err)]
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(|e| StoreError::Backend(format!("failed to connect to database: {e}")))?;

    PostgresInventoryStore::new(pool.clone()).ensure_schema().await?;
    tracing::info!("database schema ready");
    Ok(pool)
}
