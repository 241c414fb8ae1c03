//! Health check handler.

use axum::Json;
use axum::extract::State;

use authgate_core::traits::registry::SessionRegistry;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let registry = match state.registry.health_check().await {
        Ok(true) => "up",
        _ => "down",
    };

    let database = match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => "up",
        Err(_) => "down",
    };

    let status = if registry == "up" && database == "up" {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        registry: registry.to_string(),
        database: database.to_string(),
    }))
}
