//! Trailhead CLI - Catalog and pre-order inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog (built-in, or a JSON catalog file)
//! th-cli catalog list
//! th-cli catalog list --catalog catalog.json
//!
//! # List stored pre-orders
//! th-cli preorders list --file data/preorders.json
//!
//! # Pre-order counts and totals per product
//! th-cli preorders summary
//! ```
//!
//! Paths default to `STOREFRONT_CATALOG_PATH` and `STOREFRONT_PREORDERS_PATH`
//! (a `.env` file is honoured), matching the storefront binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "th-cli")]
#[command(author, version, about = "Trailhead CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect stored pre-orders
    Preorders {
        #[command(subcommand)]
        action: PreordersAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every product with its price and colors
    List {
        /// JSON catalog file (defaults to the built-in catalog)
        #[arg(short, long, env = "STOREFRONT_CATALOG_PATH")]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PreordersAction {
    /// List every stored pre-order
    List {
        /// Pre-order file
        #[arg(short, long, env = "STOREFRONT_PREORDERS_PATH", default_value = "data/preorders.json")]
        file: PathBuf,
    },
    /// Show order count, units, and revenue per product
    Summary {
        /// Pre-order file
        #[arg(short, long, env = "STOREFRONT_PREORDERS_PATH", default_value = "data/preorders.json")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed arguments
    dotenvy::dotenv().ok();

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
        Commands::Catalog { action } => match action {
            CatalogAction::List { catalog } => commands::catalog::list(catalog.as_deref())?,
        },
        Commands::Preorders { action } => match action {
            PreordersAction::List { file } => commands::preorders::list(&file).await?,
            PreordersAction::Summary { file } => commands::preorders::summary(&file).await?,
        },
    }
    Ok(())
}
