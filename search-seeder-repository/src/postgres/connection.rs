//! PostgreSQL connection setup.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::errors::SourceError;

/// Connect to PostgreSQL and return a connection pool.
///
/// # Arguments
///
/// * `database_url` - Connection string of the database
/// * `max_connections` - Upper bound of the pool size
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, SourceError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!(max_connections = max_connections, "Connected to PostgreSQL");
    Ok(pool)
}
