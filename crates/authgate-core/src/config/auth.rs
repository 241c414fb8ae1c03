//! Token and credential configuration.

use serde::{Deserialize, Serialize};

/// Token signing and lifetime configuration.
///
/// The signing secret is read once at startup and never mutated afterwards;
/// rotating it is a deployment-time operation that invalidates every
/// outstanding token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// Refresh token TTL in seconds. Also the registry entry TTL.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_seconds: u64,
    /// Upper bound on any single registry or credential-store call, in
    /// milliseconds. Elapsed calls surface as `UpstreamUnavailable`.
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_ms: u64,
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    1800
}

fn default_refresh_ttl() -> u64 {
    604_800
}

fn default_upstream_timeout() -> u64 {
    3000
}
