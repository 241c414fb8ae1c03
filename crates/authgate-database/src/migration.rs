//! Embedded SQL migrations.

use sqlx::PgPool;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;

/// Run all pending migrations against the given pool.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::internal(format!("Migration failed: {e}")))
}
