//! Username set backed by a Redis set.
//!
//! `SCARD` for the cardinality check, one `SADD` with every member for the
//! bulk insert and `QUIT` on shutdown.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{cmd, AsyncCommands, Client};
use tracing::{debug, info};

use crate::errors::CacheError;
use crate::interfaces::UsernameSetStore;

/// Redis-backed `UsernameSetStore`.
pub struct RedisUsernameSet {
    connection: ConnectionManager,
}

impl RedisUsernameSet {
    /// Connect to Redis at `connection_string` (e.g. `redis://127.0.0.1:6379`).
    pub async fn new(connection_string: &str) -> Result<Self, CacheError> {
        let client =
            Client::open(connection_string).map_err(|e| CacheError::connection(e.to_string()))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::connection(e.to_string()))?;

        info!("Connected to Redis");
        Ok(Self { connection })
    }
}

#[async_trait]
impl UsernameSetStore for RedisUsernameSet {
    async fn cardinality(&self, key: &str) -> Result<u64, CacheError> {
        let mut conn = self.connection.clone();
        let count: u64 = conn.scard(key).await?;
        Ok(count)
    }

    async fn add_members(&self, key: &str, members: &[String]) -> Result<u64, CacheError> {
        if members.is_empty() {
            return Ok(0);
        }

        let mut conn = self.connection.clone();
        let added: u64 = conn.sadd(key, members).await?;

        debug!(key = %key, requested = members.len(), added = added, "Added set members");
        Ok(added)
    }

    async fn close(&self) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        cmd("QUIT").query_async::<()>(&mut conn).await?;
        Ok(())
    }
}
