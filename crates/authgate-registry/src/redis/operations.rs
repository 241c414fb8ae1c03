//! Redis session registry implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_core::traits::registry::SessionRegistry;

use super::client::RedisClient;

/// Lua script for atomic compare-and-delete.
///
/// KEYS[1] = registry key
/// ARGV[1] = expected value
///
/// Returns 1 if the key held the expected value and was deleted, 0 otherwise.
/// Running server-side makes the read and delete a single step, so two
/// concurrent rotations of the same session resolve to first-wins.
const COMPARE_AND_DELETE_SCRIPT: &str = r#"
    if redis.call('GET', KEYS[1]) == ARGV[1] then
        return redis.call('DEL', KEYS[1])
    end
    return 0
"#;

/// Redis-backed session registry.
///
/// TTL enforcement is delegated to Redis key expiry; entries vanish without
/// an explicit delete once their refresh lifetime elapses.
#[derive(Debug, Clone)]
pub struct RedisSessionRegistry {
    /// Redis client.
    client: RedisClient,
}

impl RedisSessionRegistry {
    /// Create a new Redis session registry.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    ///
    /// Registry outages are infrastructure failures, never auth failures.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(
            ErrorKind::UpstreamUnavailable,
            format!("Redis error: {e}"),
            e,
        )
    }
}

#[async_trait]
impl SessionRegistry for RedisSessionRegistry {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .set_ex(&full_key, value, ttl.as_secs())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        let deleted: i64 = redis::Script::new(COMPARE_AND_DELETE_SCRIPT)
            .key(&full_key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        Ok(deleted == 1)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
