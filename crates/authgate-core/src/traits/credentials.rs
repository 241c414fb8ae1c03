//! Credential verifier trait — the outbound interface to the member store.

use async_trait::async_trait;

use crate::result::AppResult;

/// Verifies identifiers and secrets against the credential store.
///
/// The store itself (schema, hashing, persistence) lives behind this
/// interface; the auth flows only ever ask these two questions.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Whether `secret` matches the stored credential for `identifier`.
    /// Returns `Ok(false)` for an unknown identifier as well as a mismatch.
    async fn verify(&self, identifier: &str, secret: &str) -> AppResult<bool>;

    /// Whether `identifier` resolves to a known identity.
    async fn exists(&self, identifier: &str) -> AppResult<bool>;
}
