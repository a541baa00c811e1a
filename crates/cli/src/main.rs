//! Shopwindow CLI - browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Load and display the first two pages of the beauty category
//! shopwindow products --category beauty --pages 2
//!
//! # Search within the accumulated products, cheapest first
//! shopwindow products --search mascara --sort asc
//!
//! # List category names
//! shopwindow categories
//!
//! # Cart management (persists across invocations)
//! shopwindow cart add 5
//! shopwindow cart set-quantity 5 3
//! shopwindow cart show
//! shopwindow cart remove 5
//! ```
//!
//! # Commands
//!
//! - `products` - Progressively load, filter, and sort the catalog
//! - `categories` - List category names
//! - `cart` - Add/remove/re-quantify items and show priced lines

#![cfg_attr(not(test), forbid(unsafe_code))]
// Stdout is this binary's user interface.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "shopwindow")]
#[command(author, version, about = "Shopwindow storefront browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and display catalog products
    Products {
        /// Category scope ("all" for the whole catalog)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Case-insensitive title substring filter
        #[arg(short, long, default_value = "")]
        search: String,

        /// Minimum rating, 0-5 inclusive
        #[arg(short, long, default_value_t = 0.0)]
        min_rating: f64,

        /// Price sort order: asc or desc
        #[arg(long, default_value = "asc")]
        sort: String,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// List category names
    Categories,
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        id: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: i64,
    },
    /// Set the quantity for a product already in the cart
    SetQuantity {
        /// Product id
        id: i64,
        /// New quantity (minimum 1)
        quantity: u32,
    },
    /// Show priced cart lines and the grand total
    Show,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;

    match cli.command {
        Commands::Products {
            category,
            search,
            min_rating,
            sort,
            pages,
        } => {
            commands::products::browse(&config, &category, &search, min_rating, &sort, pages)
                .await?;
        }
        Commands::Categories => commands::categories::list(&config).await?,
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&config, id)?,
            CartAction::Remove { id } => commands::cart::remove(&config, id)?,
            CartAction::SetQuantity { id, quantity } => {
                commands::cart::set_quantity(&config, id, quantity)?;
            }
            CartAction::Show => commands::cart::show(&config).await?,
        },
    }
    Ok(())
}
