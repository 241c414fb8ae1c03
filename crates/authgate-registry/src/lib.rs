//! # authgate-registry
//!
//! Session registry backends for AuthGate. The registry holds the single
//! currently-valid refresh token per identity, with TTL-driven eviction and
//! an atomic compare-and-delete used to serialize concurrent rotations.
//!
//! ## Providers
//!
//! - `redis` — production backend; per-key atomicity comes from Redis
//!   itself, compare-and-delete runs as a server-side Lua script
//! - `memory` — single-node backend for development and tests

#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::RegistryManager;
