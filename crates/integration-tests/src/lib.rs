//! Integration tests for Optica.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory roster contract tests
//! cargo test -p optica-integration-tests
//!
//! # Including live PostgreSQL tests (migrated database required)
//! ADMIN_DATABASE_URL=postgres://... cargo test -p optica-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `roster_resolution` - Resolver contract against the in-memory store
//! - `postgres_roster` - Resolver against a live database

use std::sync::Arc;

use optica_admin::config::AdminConfig;
use optica_admin::demo::{self, DemoIds};
use optica_admin::store::MemoryStore;
use sqlx::PgPool;

/// In-memory store loaded with the demo data set.
///
/// # Panics
///
/// Panics if the built-in demo data fails to load.
pub async fn demo_store() -> (Arc<MemoryStore>, DemoIds) {
    let store = MemoryStore::new();
    let ids = demo::load_memory(&store)
        .await
        .expect("demo data should load");
    (Arc::new(store), ids)
}

/// Connect to the database named by `ADMIN_DATABASE_URL` and run migrations.
///
/// # Panics
///
/// Panics if configuration is missing, the database is unreachable, or a
/// migration fails.
pub async fn migrated_pool() -> PgPool {
    let config = AdminConfig::from_env().expect("ADMIN_DATABASE_URL must be set");
    let pool = optica_admin::db::create_pool(&config.database_url, &config.pool)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("../admin/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}
