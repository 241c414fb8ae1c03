//! Session store — the registry client scoped to refresh tokens.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_core::traits::registry::SessionRegistry;

/// Registry key prefix for refresh-token entries.
const REFRESH_KEY_PREFIX: &str = "refresh_token:";

/// Wraps the session registry with refresh-token key scoping, the
/// configured entry TTL, and a bounded timeout on every call.
///
/// At most one entry exists per identity: `put` overwrites, which is what
/// makes a new login or rotation invalidate the previous session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// The registry backend.
    registry: Arc<dyn SessionRegistry>,
    /// Entry TTL, equal to the refresh-token lifetime.
    refresh_ttl: Duration,
    /// Upper bound on any single registry call.
    op_timeout: Duration,
}

impl SessionStore {
    /// Creates a new session store over the given registry.
    pub fn new(registry: Arc<dyn SessionRegistry>, config: &AuthConfig) -> Self {
        Self {
            registry,
            refresh_ttl: Duration::from_secs(config.refresh_ttl_seconds),
            op_timeout: Duration::from_millis(config.upstream_timeout_ms),
        }
    }

    fn key(identity: &str) -> String {
        format!("{REFRESH_KEY_PREFIX}{identity}")
    }

    /// Runs a registry call under the configured timeout.
    async fn bounded<T>(&self, fut: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::upstream_unavailable(
                "Session registry call timed out",
            )),
        }
    }

    /// Stores `token` as the single valid refresh token for `identity`.
    pub async fn put(&self, identity: &str, token: &str) -> AppResult<()> {
        self.bounded(self.registry.put(&Self::key(identity), token, self.refresh_ttl))
            .await
    }

    /// Returns the currently valid refresh token for `identity`, if any.
    pub async fn get(&self, identity: &str) -> AppResult<Option<String>> {
        self.bounded(self.registry.get(&Self::key(identity))).await
    }

    /// Removes the session entry for `identity`. Idempotent.
    pub async fn delete(&self, identity: &str) -> AppResult<()> {
        self.bounded(self.registry.delete(&Self::key(identity)))
            .await
    }

    /// Consumes the entry for `identity` only if it still equals `expected`.
    pub async fn compare_and_delete(&self, identity: &str, expected: &str) -> AppResult<bool> {
        self.bounded(
            self.registry
                .compare_and_delete(&Self::key(identity), expected),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use authgate_core::error::ErrorKind;

    /// Registry stub that never answers.
    #[derive(Debug)]
    struct StalledRegistry;

    #[async_trait]
    impl SessionRegistry for StalledRegistry {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }

        async fn put(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }

        async fn compare_and_delete(&self, _key: &str, _expected: &str) -> AppResult<bool> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(false)
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    fn make_store() -> SessionStore {
        SessionStore::new(
            Arc::new(StalledRegistry),
            &AuthConfig {
                secret: "unused".to_string(),
                access_ttl_seconds: 60,
                refresh_ttl_seconds: 3600,
                upstream_timeout_ms: 100,
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_get_maps_to_upstream_unavailable() {
        let store = make_store();
        let err = store.get("alice").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UpstreamUnavailable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_put_maps_to_upstream_unavailable() {
        let store = make_store();
        let err = store.put("alice", "token").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UpstreamUnavailable);
    }
}
