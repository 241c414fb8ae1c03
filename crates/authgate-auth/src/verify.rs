//! Repository-backed credential verification.

use std::sync::Arc;

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_core::traits::credentials::CredentialVerifier;
use authgate_database::MemberRepository;

use crate::password::PasswordHasher;

/// `CredentialVerifier` over the member repository.
///
/// Combines the stored-hash lookup with Argon2id verification so callers
/// only ever see the match/no-match answer, never the hash.
#[derive(Debug, Clone)]
pub struct DirectoryVerifier {
    repo: Arc<MemberRepository>,
    hasher: PasswordHasher,
}

impl DirectoryVerifier {
    /// Creates a new verifier over the given repository.
    pub fn new(repo: Arc<MemberRepository>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }
}

#[async_trait]
impl CredentialVerifier for DirectoryVerifier {
    async fn verify(&self, identifier: &str, secret: &str) -> AppResult<bool> {
        match self.repo.find_password_hash(identifier).await? {
            Some(hash) => self.hasher.verify_password(secret, &hash),
            None => Ok(false),
        }
    }

    async fn exists(&self, identifier: &str) -> AppResult<bool> {
        self.repo.exists(identifier).await
    }
}
