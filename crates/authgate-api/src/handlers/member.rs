//! Member handlers — registration, duplicate check, password validation,
//! and the authenticated profile.

use axum::Json;
use axum::extract::{Query, State};
use tracing::info;
use validator::Validate;

use authgate_core::error::AppError;
use authgate_database::NewMember;

use crate::dto::request::{DuplicateCheckParams, PasswordValidationRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, DuplicateCheckResponse, MemberResponse, MessageResponse,
    PasswordValidationResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/member/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    state.password_policy.validate(&req.password)?;

    let password_hash = state.password_hasher.hash_password(&req.password)?;

    state
        .member_repo
        .create(&NewMember {
            user_id: req.user_id.clone(),
            password_hash,
            name: req.name,
            business_number: req.business_number,
            email: req.email,
        })
        .await?;

    info!(user_id = %req.user_id, "Member registered");

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Registration completed".to_string(),
    })))
}

/// GET /api/member/check-duplicate
pub async fn check_duplicate(
    State(state): State<AppState>,
    Query(params): Query<DuplicateCheckParams>,
) -> Result<Json<ApiResponse<DuplicateCheckResponse>>, ApiError> {
    let is_duplicate = state.member_repo.exists(&params.user_id).await?;

    let message = if is_duplicate {
        "This ID is already in use"
    } else {
        "This ID is available"
    };

    Ok(Json(ApiResponse::ok(DuplicateCheckResponse {
        is_duplicate,
        message: message.to_string(),
    })))
}

/// POST /api/member/validate-password
pub async fn validate_password(
    State(state): State<AppState>,
    Json(req): Json<PasswordValidationRequest>,
) -> Result<Json<ApiResponse<PasswordValidationResponse>>, ApiError> {
    let report = state.password_policy.check(&req.password);

    let message = if report.is_valid {
        "Password satisfies the policy"
    } else {
        "Password does not satisfy the policy"
    };

    Ok(Json(ApiResponse::ok(PasswordValidationResponse {
        is_valid: report.is_valid,
        message: message.to_string(),
        errors: report.errors,
    })))
}

/// GET /api/member/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MemberResponse>>, ApiError> {
    let profile = state
        .member_repo
        .find_profile(&auth.identity)
        .await?
        .ok_or_else(|| AppError::identity_not_found("Member no longer exists"))?;

    Ok(Json(ApiResponse::ok(MemberResponse {
        user_id: profile.user_id,
        name: profile.name,
        business_number: profile.business_number,
        email: profile.email,
        created_at: profile.created_at,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_core::error::ErrorKind;

    use crate::state::tests::make_state;

    fn register_request(password: &str) -> RegisterRequest {
        RegisterRequest {
            user_id: "alice01".to_string(),
            password: password.to_string(),
            name: "Alice".to_string(),
            business_number: "123-45-67890".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password_before_storage() {
        let state = make_state();
        // Long enough for the DTO check but missing digit and special char;
        // must be rejected by the policy without touching the database.
        let err = register(State(state), Json(register_request("onlyletters")))
            .await
            .unwrap_err();
        assert_eq!(err.0.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_validate_password_reports_violations() {
        let state = make_state();

        let res = validate_password(
            State(state.clone()),
            Json(PasswordValidationRequest {
                password: "onlyletters".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(!res.0.data.is_valid);
        assert_eq!(res.0.data.errors.len(), 2);

        let res = validate_password(
            State(state),
            Json(PasswordValidationRequest {
                password: "Str0ng!pass".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(res.0.data.is_valid);
        assert!(res.0.data.errors.is_empty());
    }
}
