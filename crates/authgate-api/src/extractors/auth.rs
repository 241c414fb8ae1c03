//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates it, and injects the caller's identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

use authgate_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller identity, available to any protected handler.
///
/// Every possible failure (missing header, malformed scheme, bad signature,
/// expired token, wrong token kind) collapses into a single UNAUTHENTICATED
/// rejection. The response never tells a probing client which check failed;
/// the distinction lives only in the debug logs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The subject of the validated access token.
    pub identity: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                debug!("Request without a usable Authorization header");
                unauthenticated()
            })?;

        let claims = state.token_codec.parse_access(token).map_err(|e| {
            debug!(error = %e, "Access token rejected at the gate");
            unauthenticated()
        })?;

        Ok(AuthUser {
            identity: claims.sub,
        })
    }
}

fn unauthenticated() -> ApiError {
    ApiError(AppError::unauthenticated("Authentication required"))
}
