//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! optica-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Admin migrations: `crates/admin/migrations/`

use optica_admin::config::{AdminConfig, ConfigError};
use optica_admin::db;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run admin database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing, the database is
/// unreachable, or a migration fails.
pub async fn admin() -> Result<(), MigrationError> {
    let config = AdminConfig::from_env()?;

    tracing::info!("Connecting to admin database...");
    let pool = db::create_pool(&config.database_url, &config.pool).await?;

    tracing::info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}
