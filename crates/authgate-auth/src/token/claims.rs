//! Claims structure embedded in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload carried by every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the identity this token vouches for.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch), exclusive: a token
    /// presented at exactly `exp` is already expired.
    pub exp: i64,
    /// Unique token ID. Guarantees two tokens for the same subject are
    /// never byte-equal even when issued within the same second, which
    /// rotation depends on.
    pub jti: Uuid,
    /// Token kind: access or refresh.
    pub token_type: TokenKind,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token presented on every protected request.
    Access,
    /// Long-lived token used only to mint new access tokens.
    Refresh,
}
