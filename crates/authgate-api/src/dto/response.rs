//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Token pair issued by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Member profile for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    /// Login identifier.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Business registration number.
    pub business_number: String,
    /// Contact email.
    pub email: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// ID duplicate check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateCheckResponse {
    /// Whether the identifier is already taken.
    pub is_duplicate: bool,
    /// Human-readable verdict.
    pub message: String,
}

/// Password policy check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordValidationResponse {
    /// Whether the password satisfies every rule.
    pub is_valid: bool,
    /// Human-readable verdict.
    pub message: String,
    /// One entry per violated rule, empty when valid.
    pub errors: Vec<String>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Session registry status.
    pub registry: String,
    /// Database status.
    pub database: String,
}
