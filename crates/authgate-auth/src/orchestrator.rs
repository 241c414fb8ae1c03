//! Auth orchestrator — the login, logout, and refresh flows.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_core::traits::credentials::CredentialVerifier;

use crate::session::SessionStore;
use crate::token::{TokenCodec, TokenPair};

/// Composes the token codec, session store, and credential verifier into
/// the three auth flows.
///
/// Holds no lock across registry calls; concurrent rotations of the same
/// session are serialized by the registry's compare-and-delete, first wins.
#[derive(Clone)]
pub struct AuthService {
    /// Token codec.
    codec: Arc<TokenCodec>,
    /// Refresh-token session store.
    sessions: Arc<SessionStore>,
    /// Credential verifier.
    verifier: Arc<dyn CredentialVerifier>,
    /// Upper bound on any single credential-store call.
    verifier_timeout: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("codec", &self.codec)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service from its collaborators.
    pub fn new(
        codec: Arc<TokenCodec>,
        sessions: Arc<SessionStore>,
        verifier: Arc<dyn CredentialVerifier>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            codec,
            sessions,
            verifier,
            verifier_timeout: Duration::from_millis(config.upstream_timeout_ms),
        }
    }

    /// Runs a credential-store call under the configured timeout.
    async fn bounded<T>(&self, fut: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        match tokio::time::timeout(self.verifier_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::upstream_unavailable(
                "Credential store call timed out",
            )),
        }
    }

    /// Authenticates an identifier/secret pair and opens a session.
    ///
    /// On success the new refresh token overwrites any existing registry
    /// entry for the identity: last login wins, and a session opened
    /// elsewhere is silently invalidated. A failed login never touches the
    /// registry.
    pub async fn login(&self, identifier: &str, secret: &str) -> AppResult<TokenPair> {
        if !self.bounded(self.verifier.exists(identifier)).await? {
            return Err(AppError::identity_not_found("Unknown member identifier"));
        }

        if !self.bounded(self.verifier.verify(identifier, secret)).await? {
            return Err(AppError::invalid_credentials(
                "Invalid identifier or password",
            ));
        }

        let pair = self.codec.issue_pair(identifier)?;
        self.sessions.put(identifier, &pair.refresh_token).await?;

        info!(identity = %identifier, "Login successful");
        Ok(pair)
    }

    /// Closes the session the refresh token belongs to.
    ///
    /// Never fails: a malformed or expired token means there is nothing
    /// left to revoke, and a registry outage must not stop the client from
    /// clearing its local state.
    pub async fn logout(&self, refresh_token: &str) {
        let claims = match self.codec.parse_refresh(refresh_token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Logout with unusable token, treating as already logged out");
                return;
            }
        };

        match self.sessions.delete(&claims.sub).await {
            Ok(()) => info!(identity = %claims.sub, "Logout completed"),
            Err(e) => warn!(identity = %claims.sub, error = %e, "Failed to delete session on logout"),
        }
    }

    /// Rotates a refresh token into a new access + refresh pair.
    ///
    /// The presented token must be signature-valid, unexpired, and
    /// byte-equal to the registry's current entry for its subject. The old
    /// token is consumed atomically; it is unusable the moment this call
    /// returns, regardless of its embedded expiry.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self
            .codec
            .parse_refresh(refresh_token)
            .map_err(|e| {
                debug!(error = %e, "Refresh token failed validation");
                AppError::invalid_token("Refresh token rejected")
            })?;
        let identity = claims.sub;

        match self.sessions.get(&identity).await? {
            Some(stored) if stored == refresh_token => {}
            _ => {
                return Err(AppError::invalid_token(
                    "Refresh token is not the current session token",
                ));
            }
        }

        // The account may have been deleted while the session was live.
        if !self.bounded(self.verifier.exists(&identity)).await? {
            return Err(AppError::identity_not_found(
                "Identity no longer exists",
            ));
        }

        let pair = self.codec.issue_pair(&identity)?;

        // Consume the old token first. If another refresh or a logout got
        // there in between, this observes false and the whole call fails:
        // one rotation per presented token, first caller wins.
        if !self
            .sessions
            .compare_and_delete(&identity, refresh_token)
            .await?
        {
            return Err(AppError::invalid_token(
                "Refresh token already rotated or revoked",
            ));
        }

        self.sessions.put(&identity, &pair.refresh_token).await?;

        info!(identity = %identity, "Token refreshed");
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use authgate_core::error::ErrorKind;
    use authgate_registry::memory::MemorySessionRegistry;

    use crate::token::TokenKind;

    /// Credential verifier over a plain map, for flow tests.
    #[derive(Debug, Default)]
    struct StubVerifier {
        users: Mutex<HashMap<String, String>>,
    }

    impl StubVerifier {
        fn with_user(identifier: &str, secret: &str) -> Arc<Self> {
            let stub = Self::default();
            stub.users
                .lock()
                .unwrap()
                .insert(identifier.to_string(), secret.to_string());
            Arc::new(stub)
        }

        fn remove_user(&self, identifier: &str) {
            self.users.lock().unwrap().remove(identifier);
        }
    }

    #[async_trait]
    impl CredentialVerifier for StubVerifier {
        async fn verify(&self, identifier: &str, secret: &str) -> AppResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .get(identifier)
                .is_some_and(|stored| stored == secret))
        }

        async fn exists(&self, identifier: &str) -> AppResult<bool> {
            Ok(self.users.lock().unwrap().contains_key(identifier))
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "orchestrator-test-secret".to_string(),
            access_ttl_seconds: 60,
            refresh_ttl_seconds: 3600,
            upstream_timeout_ms: 1000,
        }
    }

    fn make_service(verifier: Arc<StubVerifier>) -> (AuthService, Arc<SessionStore>) {
        let config = test_config();
        let codec = Arc::new(TokenCodec::new(&config));
        let registry = Arc::new(MemorySessionRegistry::with_defaults());
        let sessions = Arc::new(SessionStore::new(registry, &config));
        let service = AuthService::new(codec, sessions.clone(), verifier, &config);
        (service, sessions)
    }

    #[tokio::test]
    async fn test_login_then_refresh_succeeds() {
        let (service, _) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let pair = service.login("alice", "correct-pw").await.unwrap();
        assert_eq!(pair.expires_in, 60);

        let rotated = service.refresh(&pair.refresh_token).await.unwrap();
        assert_ne!(rotated.refresh_token, pair.refresh_token);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (service, sessions) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let err = service.login("mallory", "whatever").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::IdentityNotFound);
        assert_eq!(sessions.get("mallory").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_wrong_password_leaves_registry_untouched() {
        let (service, sessions) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let err = service.login("alice", "wrong-pw").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
        assert_eq!(sessions.get("alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_revokes_refresh() {
        let (service, _) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let pair = service.login("alice", "correct-pw").await.unwrap();
        service.logout(&pair.refresh_token).await;

        // Token is cryptographically intact but the session is gone.
        let err = service.refresh(&pair.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[tokio::test]
    async fn test_logout_with_garbage_token_is_silent() {
        let (service, _) = make_service(StubVerifier::with_user("alice", "correct-pw"));
        // Must not panic or error.
        service.logout("not-a-token").await;
    }

    #[tokio::test]
    async fn test_logout_with_access_token_does_not_revoke() {
        let (service, sessions) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let pair = service.login("alice", "correct-pw").await.unwrap();
        service.logout(&pair.access_token).await;

        // Wrong kind is treated as unusable; the session survives.
        assert!(sessions.get("alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_second_login_invalidates_first_session() {
        let (service, _) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let first = service.login("alice", "correct-pw").await.unwrap();
        let second = service.login("alice", "correct-pw").await.unwrap();

        let err = service.refresh(&first.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);

        // The newest session still refreshes fine.
        service.refresh(&second.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn test_rotation_consumes_presented_token() {
        let (service, _) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let pair = service.login("alice", "correct-pw").await.unwrap();
        let rotated = service.refresh(&pair.refresh_token).await.unwrap();

        // The old token is dead immediately, well before its expiry.
        let err = service.refresh(&pair.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);

        // Full scenario: logging out of the rotated session kills it too.
        service.logout(&rotated.refresh_token).await;
        let err = service.refresh(&rotated.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[tokio::test]
    async fn test_concurrent_refresh_yields_single_success() {
        let (service, _) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let pair = service.login("alice", "correct-pw").await.unwrap();
        let (a, b) = tokio::join!(
            service.refresh(&pair.refresh_token),
            service.refresh(&pair.refresh_token),
        );

        let succeeded = [a.is_ok(), b.is_ok()].into_iter().filter(|ok| *ok).count();
        assert_eq!(succeeded, 1, "exactly one racer may rotate the token");

        let failure = if a.is_err() { a } else { b };
        assert_eq!(failure.unwrap_err().kind, ErrorKind::InvalidToken);
    }

    #[tokio::test]
    async fn test_refresh_with_access_token_rejected() {
        let (service, _) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        let pair = service.login("alice", "correct-pw").await.unwrap();
        let err = service.refresh(&pair.access_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[tokio::test]
    async fn test_refresh_with_expired_token_rejected() {
        let (service, sessions) = make_service(StubVerifier::with_user("alice", "correct-pw"));
        let codec = TokenCodec::new(&test_config());

        let stale = codec
            .issue_with_ttl("alice", Duration::ZERO, TokenKind::Refresh)
            .unwrap();
        sessions.put("alice", &stale).await.unwrap();

        let err = service.refresh(&stale).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[tokio::test]
    async fn test_refresh_after_account_deleted() {
        let verifier = StubVerifier::with_user("alice", "correct-pw");
        let (service, _) = make_service(verifier.clone());

        let pair = service.login("alice", "correct-pw").await.unwrap();
        verifier.remove_user("alice");

        let err = service.refresh(&pair.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::IdentityNotFound);
    }

    #[tokio::test]
    async fn test_forged_refresh_token_rejected() {
        let (service, sessions) = make_service(StubVerifier::with_user("alice", "correct-pw"));

        // Signed with a different key entirely.
        let foreign = TokenCodec::new(&AuthConfig {
            secret: "attacker-secret".to_string(),
            ..test_config()
        });
        let forged = foreign.issue("alice", TokenKind::Refresh).unwrap();
        sessions.put("alice", &forged).await.unwrap();

        let err = service.refresh(&forged).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }
}
