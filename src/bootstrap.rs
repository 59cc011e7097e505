// src/bootstrap.rs
use std::path::PathBuf;
use sqlx::SqlitePool;
use crate::catalog::import::{self, ImportOutcome};
use crate::config::Config;
use crate::database;
use crate::error::AppError;
use crate::store;

/// Startup sequence: schema, default admin, then the best-effort product import.
/// Only schema or admin failures are fatal; the import outcome is logged and returned.
pub async fn setup(pool: &SqlitePool, config: &Config) -> Result<ImportOutcome, AppError> {
    database::init_schema(pool).await?;
    store::admins::ensure_default_admin(pool, &config.admin_username, &config.admin_password).await?;

    let outcome = import::run(pool, PathBuf::from(&config.products_file)).await;
    outcome.log();
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn empty_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_setup_creates_one_admin_and_survives_missing_source() {
        let pool = empty_pool().await;
        let config = Config::for_tests();

        let outcome = setup(&pool, &config).await.expect("setup succeeds without a source file");
        assert!(matches!(outcome, ImportOutcome::Failed(_)));
        assert_eq!(store::admins::count(&pool).await.unwrap(), 1);

        setup(&pool, &config).await.expect("second setup");
        assert_eq!(store::admins::count(&pool).await.unwrap(), 1);
    }
}
