//! Token codec — issues and parses signed, self-contained tokens.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;

use super::claims::{Claims, TokenKind};

/// Creates and validates signed HS256 tokens.
///
/// The signing key is loaded once from configuration and immutable for the
/// process lifetime. Validity is fully determined by signature and expiry;
/// the codec performs no I/O.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature-only validation settings.
    validation: Validation,
    /// Access token TTL.
    access_ttl: Duration,
    /// Refresh token TTL.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// A freshly issued access + refresh token pair.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token lifetime in whole seconds.
    pub expires_in: u64,
}

impl TokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        // Expiry is checked by hand after decode so the exclusive bound
        // (`exp == now` is expired) and the error taxonomy stay exact.
        // Signature verification still happens inside `decode`, before any
        // claim is surfaced.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl: Duration::from_secs(config.access_ttl_seconds),
            refresh_ttl: Duration::from_secs(config.refresh_ttl_seconds),
        }
    }

    /// Issues a token of the given kind with its configured TTL.
    pub fn issue(&self, subject: &str, kind: TokenKind) -> AppResult<String> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        self.issue_with_ttl(subject, ttl, kind)
    }

    /// Issues a token with an explicit TTL.
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        ttl: Duration,
        kind: TokenKind,
    ) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
            jti: Uuid::new_v4(),
            token_type: kind,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Issues a new access + refresh pair for the given subject.
    pub fn issue_pair(&self, subject: &str) -> AppResult<TokenPair> {
        let access_token = self.issue(subject, TokenKind::Access)?;
        let refresh_token = self.issue(subject, TokenKind::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_ttl.as_secs(),
        })
    }

    /// Decodes and validates a token string.
    ///
    /// Checks, in order:
    /// 1. Structure and signature (inside `decode`; no claim is trusted
    ///    before the signature verifies)
    /// 2. Expiry, exclusive upper bound
    pub fn parse(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::invalid_signature("Token signature does not verify")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    AppError::invalid_signature("Token signed with an unexpected algorithm")
                }
                _ => AppError::malformed_token(format!("Token is not well-formed: {e}")),
            })?;

        let claims = token_data.claims;
        if Utc::now().timestamp() >= claims.exp {
            return Err(AppError::expired("Token has expired"));
        }

        Ok(claims)
    }

    /// Parses a token and requires it to be an access token.
    pub fn parse_access(&self, token: &str) -> AppResult<Claims> {
        let claims = self.parse(token)?;
        if claims.token_type != TokenKind::Access {
            return Err(AppError::invalid_token(
                "Expected an access token, got a refresh token",
            ));
        }
        Ok(claims)
    }

    /// Parses a token and requires it to be a refresh token.
    pub fn parse_refresh(&self, token: &str) -> AppResult<Claims> {
        let claims = self.parse(token)?;
        if claims.token_type != TokenKind::Refresh {
            return Err(AppError::invalid_token(
                "Expected a refresh token, got an access token",
            ));
        }
        Ok(claims)
    }

    /// Parses a token and returns only its subject.
    pub fn subject_of(&self, token: &str) -> AppResult<String> {
        Ok(self.parse(token)?.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_core::error::ErrorKind;

    fn make_codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            secret: "unit-test-signing-secret".to_string(),
            access_ttl_seconds: 60,
            refresh_ttl_seconds: 3600,
            upstream_timeout_ms: 1000,
        })
    }

    #[test]
    fn test_issue_parse_roundtrip() {
        let codec = make_codec();
        let token = codec.issue("alice", TokenKind::Access).unwrap();
        let claims = codec.parse(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.token_type, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_subject_of() {
        let codec = make_codec();
        let token = codec.issue("bob", TokenKind::Refresh).unwrap();
        assert_eq!(codec.subject_of(&token).unwrap(), "bob");
    }

    #[test]
    fn test_pair_tokens_are_distinct() {
        let codec = make_codec();
        let pair = codec.issue_pair("alice").unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);
        assert_eq!(pair.expires_in, 60);

        // Back-to-back pairs for the same subject must also differ, even
        // within the same clock second.
        let second = codec.issue_pair("alice").unwrap();
        assert_ne!(pair.refresh_token, second.refresh_token);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = make_codec();
        let token = codec.issue("alice", TokenKind::Access).unwrap();

        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, tampered);

        let err = codec.parse(&tampered).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_foreign_key_rejected() {
        let codec = make_codec();
        let other = TokenCodec::new(&AuthConfig {
            secret: "a-different-secret".to_string(),
            access_ttl_seconds: 60,
            refresh_ttl_seconds: 3600,
            upstream_timeout_ms: 1000,
        });

        let token = other.issue("alice", TokenKind::Access).unwrap();
        let err = codec.parse(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = make_codec();
        let err = codec.parse("definitely-not-a-token").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedToken);

        let err = codec.parse("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedToken);
    }

    #[test]
    fn test_expiry_bound_is_exclusive() {
        let codec = make_codec();
        // A zero-TTL token has exp == iat == now and must already count as
        // expired on the very second it was issued.
        let token = codec
            .issue_with_ttl("alice", Duration::ZERO, TokenKind::Access)
            .unwrap();
        let err = codec.parse(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Expired);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let codec = make_codec();
        let refresh = codec.issue("alice", TokenKind::Refresh).unwrap();
        let access = codec.issue("alice", TokenKind::Access).unwrap();

        assert_eq!(
            codec.parse_access(&refresh).unwrap_err().kind,
            ErrorKind::InvalidToken
        );
        assert_eq!(
            codec.parse_refresh(&access).unwrap_err().kind,
            ErrorKind::InvalidToken
        );
    }
}
