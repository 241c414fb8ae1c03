//! Session registry configuration.

use serde::{Deserialize, Serialize};

/// Top-level session registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis-specific registry configuration.
    #[serde(default)]
    pub redis: RedisRegistryConfig,
    /// In-memory registry configuration.
    #[serde(default)]
    pub memory: MemoryRegistryConfig,
}

/// Redis registry backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisRegistryConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for all AuthGate registry keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisRegistryConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

/// In-memory registry backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRegistryConfig {
    /// Maximum number of entries before writes are rejected.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for MemoryRegistryConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "authgate:".to_string()
}

fn default_max_capacity() -> u64 {
    100_000
}
