//! Member repository — credential lookup and profile queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;

/// A member's public profile, without the credential.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct MemberProfile {
    /// Login identifier.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Registered business number.
    pub business_number: String,
    /// Contact email.
    pub email: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields required to register a new member. The password arrives already
/// hashed; this crate never sees a plaintext secret.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub user_id: String,
    pub password_hash: String,
    pub name: String,
    pub business_number: String,
    pub email: String,
}

/// Repository over the `members` table.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up the stored password hash for an identifier.
    pub async fn find_password_hash(&self, user_id: &str) -> AppResult<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM members WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(row.map(|(hash,)| hash))
    }

    /// Whether a member with the given identifier exists.
    pub async fn exists(&self, user_id: &str) -> AppResult<bool> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM members WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.is_some())
    }

    /// Fetch a member's profile.
    pub async fn find_profile(&self, user_id: &str) -> AppResult<Option<MemberProfile>> {
        sqlx::query_as::<_, MemberProfile>(
            "SELECT user_id, name, business_number, email, created_at \
             FROM members WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)
    }

    /// Insert a new member. A duplicate identifier, business number, or
    /// email surfaces as a validation error rather than an internal one.
    pub async fn create(&self, member: &NewMember) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO members (user_id, password_hash, name, business_number, email) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&member.user_id)
        .bind(&member.password_hash)
        .bind(&member.name)
        .bind(&member.business_number)
        .bind(&member.email)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                AppError::validation("A member with these details already exists"),
            ),
            Err(e) => Err(map_db_err(e)),
        }
    }
}

/// Map a sqlx error to an AppError.
///
/// Database trouble is an upstream outage from the auth flows' point of
/// view, not an authentication verdict.
fn map_db_err(e: sqlx::Error) -> AppError {
    AppError::with_source(
        ErrorKind::UpstreamUnavailable,
        format!("Database error: {e}"),
        e,
    )
}
