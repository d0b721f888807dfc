//! Username reader backed by the users database.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::errors::SourceError;
use crate::interfaces::UsernameSource;

/// Reads usernames from the `profile` table of the users database.
pub struct PostgresUsernameSource {
    pool: PgPool,
}

impl PostgresUsernameSource {
    /// Creates a source over an already connected pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close the underlying pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UsernameSource for PostgresUsernameSource {
    async fn fetch_usernames(&self) -> Result<Vec<Option<String>>, SourceError> {
        let rows = sqlx::query("SELECT username FROM profile")
            .fetch_all(&self.pool)
            .await?;

        debug!(row_count = rows.len(), "Read usernames");

        rows.iter()
            .map(|row| row.try_get::<Option<String>, _>("username").map_err(SourceError::from))
            .collect()
    }
}
