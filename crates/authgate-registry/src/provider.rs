//! Registry manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use authgate_core::config::registry::RegistryConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_core::traits::registry::SessionRegistry;

/// Registry manager that wraps the configured session registry provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct RegistryManager {
    /// The inner registry provider.
    inner: Arc<dyn SessionRegistry>,
}

impl RegistryManager {
    /// Create a new registry manager from configuration.
    pub async fn new(config: &RegistryConfig) -> AppResult<Self> {
        let inner: Arc<dyn SessionRegistry> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis session registry");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisSessionRegistry::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory session registry");
                Arc::new(crate::memory::MemorySessionRegistry::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown registry provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a registry manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn SessionRegistry>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl SessionRegistry for RegistryManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.put(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        self.inner.compare_and_delete(key, expected).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
