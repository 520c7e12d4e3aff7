//! CLI subcommands.

pub mod dashboard;
pub mod migrate;
pub mod roster;
pub mod seed;

use std::sync::Arc;

use optica_admin::config::AdminConfig;
use optica_admin::store::{EntityStore, MemoryStore, PgEntityStore};
use optica_admin::{db, demo};

/// The configured database, or an in-memory store holding the demo data.
async fn open_store(use_demo: bool) -> Result<Arc<dyn EntityStore>, Box<dyn std::error::Error>> {
    if use_demo {
        let store = MemoryStore::new();
        demo::load_memory(&store).await?;
        return Ok(Arc::new(store));
    }
    let config = AdminConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, &config.pool).await?;
    Ok(Arc::new(PgEntityStore::new(pool)))
}
