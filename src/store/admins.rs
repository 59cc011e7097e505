use bcrypt::{hash, DEFAULT_COST};
use sqlx::SqlitePool;
use crate::error::AppError;
use crate::models::admin_user::AdminUser;

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as::<_, AdminUser>(
        "SELECT id, username, password_hash FROM admin_users WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_users")
        .fetch_one(pool)
        .await
}

/// Creates the single admin account when none exists yet.
/// Returns `true` if an account was created.
pub async fn ensure_default_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<bool, AppError> {
    if count(pool).await? > 0 {
        return Ok(false);
    }

    let password_hash = hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    sqlx::query("INSERT INTO admin_users (username, password_hash) VALUES (?, ?)")
        .bind(username)
        .bind(&password_hash)
        .execute(pool)
        .await?;

    tracing::info!(%username, "Created default admin account");
    Ok(true)
}
