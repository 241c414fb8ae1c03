//! In-memory session registry for single-node development and tests.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use authgate_core::config::registry::MemoryRegistryConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_core::traits::registry::SessionRegistry;

/// A stored value with its expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory session registry backed by a concurrent map.
///
/// Expired entries are evicted lazily on access; `DashMap::remove_if` gives
/// the per-entry atomicity the compare-and-delete contract requires. Uses
/// `tokio::time::Instant` so tests can drive expiry with paused time.
#[derive(Debug)]
pub struct MemorySessionRegistry {
    entries: DashMap<String, Entry>,
    max_capacity: u64,
}

impl MemorySessionRegistry {
    /// Create a new in-memory registry from configuration.
    pub fn new(config: &MemoryRegistryConfig) -> Self {
        Self {
            entries: DashMap::new(),
            max_capacity: config.max_capacity,
        }
    }

    /// Create a registry with default capacity (for tests).
    pub fn with_defaults() -> Self {
        Self::new(&MemoryRegistryConfig::default())
    }

    /// Drop every expired entry. Called opportunistically on writes.
    fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }
}

#[async_trait]
impl SessionRegistry for MemorySessionRegistry {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();

        // Lazy eviction: an expired entry is indistinguishable from an
        // absent one, matching the backend TTL semantics.
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(now) {
                drop(entry);
                self.entries.remove_if(key, |_, e| e.is_expired(now));
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.purge_expired();

        if self.entries.len() as u64 >= self.max_capacity && !self.entries.contains_key(key) {
            return Err(AppError::upstream_unavailable(
                "In-memory registry is at capacity",
            ));
        }

        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        let now = Instant::now();
        let removed = self
            .entries
            .remove_if(key, |_, entry| {
                !entry.is_expired(now) && entry.value == expected
            })
            .is_some();

        if !removed {
            debug!(key, "compare_and_delete missed");
        }
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
