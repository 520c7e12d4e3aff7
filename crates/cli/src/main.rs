//! Optica CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations
//! optica-cli migrate
//!
//! # Insert the demo data set
//! optica-cli seed
//!
//! # Print the roster for a shop (or `particular`)
//! optica-cli roster --shop 7f1c9b4e-0d52-4a8e-9a51-3f0e6b1d2c44
//!
//! # Same, against the in-memory demo data, as JSON
//! optica-cli roster --demo --json
//!
//! # Counts, payment totals, and recent visits
//! optica-cli dashboard
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with demo data
//! - `roster` - Resolve and print a client roster
//! - `dashboard` - Print the dashboard summary

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "optica-cli")]
#[command(author, version, about = "Optica CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run admin database migrations
    Migrate,
    /// Insert the demo data set
    Seed,
    /// Resolve and print a client roster
    Roster {
        /// Scope token: a shop ID, `particular`, or empty for every client
        #[arg(short, long)]
        shop: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Resolve against the built-in demo data instead of the database
        #[arg(long)]
        demo: bool,
    },
    /// Print entity counts, payment totals, and recent visits
    Dashboard {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Read the built-in demo data instead of the database
        #[arg(long)]
        demo: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::admin().await?,
        Commands::Seed => commands::seed::demo_data().await?,
        Commands::Roster { shop, json, demo } => {
            commands::roster::print(shop.as_deref(), json, demo).await?;
        }
        Commands::Dashboard { json, demo } => commands::dashboard::print(json, demo).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_roster_flags() {
        let cli = Cli::parse_from(["optica-cli", "roster", "--shop", "particular", "--json"]);
        match cli.command {
            Commands::Roster { shop, json, demo } => {
                assert_eq!(shop.as_deref(), Some("particular"));
                assert!(json);
                assert!(!demo);
            }
            _ => panic!("expected roster command"),
        }
    }
}
