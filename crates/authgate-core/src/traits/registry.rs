//! Session registry trait for pluggable key-value backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for session registry backends (Redis or in-memory).
///
/// The registry is the single source of truth for refresh-token validity.
/// Per-key operations are atomic at the backend; callers never hold a lock
/// across a sequence of calls.
#[async_trait]
pub trait SessionRegistry: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has
    /// expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL. Unconditionally overwrites an existing entry
    /// and resets its TTL.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Idempotent; deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Delete the key only if its current value equals `expected`.
    ///
    /// Returns `true` if the delete happened. The comparison and delete are
    /// a single atomic step on the backend, which is what closes the
    /// concurrent-refresh race: of two callers holding the same old token,
    /// exactly one observes `true`.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool>;

    /// Check that the registry backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
