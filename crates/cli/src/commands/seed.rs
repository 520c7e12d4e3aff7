//! Seed the database with the demo data set.

use tracing::info;

use optica_admin::config::AdminConfig;
use optica_admin::{db, demo};

/// Insert the demo shops, clients, and prescriptions.
///
/// Run `optica-cli migrate` first. Running twice inserts a second copy.
///
/// # Errors
///
/// Returns an error if configuration is missing or an insert fails.
pub async fn demo_data() -> Result<(), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;

    let pool = db::create_pool(&config.database_url, &config.pool).await?;
    info!("Connected to database");

    let ids = demo::load_postgres(&pool).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Seeded demo data:");
        for (i, shop) in ids.shops.iter().enumerate() {
            println!("  shop {}: {shop}", i + 1);
        }
        println!("  {} clients", ids.clients.len());
    }

    Ok(())
}
