//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Member login identifier.
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Logout request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogoutRequest {
    /// Refresh token of the session being closed.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Member registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Member login identifier.
    #[validate(length(min = 3, max = 50, message = "User ID must be 3-50 characters"))]
    pub user_id: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Business registration number.
    #[validate(length(min = 1, message = "Business number is required"))]
    pub business_number: String,
    /// Contact email.
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
}

/// Query parameters for the ID duplicate check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateCheckParams {
    /// Candidate login identifier.
    pub user_id: String,
}

/// Password validation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordValidationRequest {
    /// Candidate password to check against the policy.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            user_id: "alice01".to_string(),
            password: "long enough pw".to_string(),
            name: "Alice".to_string(),
            business_number: "123-45-67890".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_requires_fields() {
        let empty = LoginRequest {
            user_id: String::new(),
            password: String::new(),
        };
        assert!(empty.validate().is_err());
    }
}
