//! CLI administration tool for snaplink.
//!
//! Provides commands for creating links and viewing statistics without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link
//! cargo run --bin admin -- link create --url "https://example.com/very/long/path"
//!
//! # Show click statistics for a link
//! cargo run --bin admin -- link stats abc123
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL` (optional): Base URL used when printing full short links

use snaplink::application::services::{LinkService, StatsService};
use snaplink::domain::repositories::{ClickRepository, LinkRepository};
use snaplink::infrastructure::persistence::{PgClickRepository, PgLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Long URL to shorten (prompted for when omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Custom short code (optional, auto-generated if not provided)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show click statistics for a link
    Stats {
        /// Short code to look up
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let link_repo: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repo: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool.clone()));

    match action {
        LinkAction::Create { url, code } => {
            create_link(LinkService::new(link_repo), url, code).await?;
        }
        LinkAction::Stats { code } => {
            show_stats(StatsService::new(link_repo, click_repo), &code).await?;
        }
    }

    Ok(())
}

/// Creates a short link, prompting for the URL when not provided.
async fn create_link(
    service: LinkService,
    url: Option<String>,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "Create short link".bright_blue().bold());
    println!();

    let long_url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Long URL").interact_text()?,
    };

    let link = service
        .create_short_link(long_url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    println!();
    println!("{}", "Link created:".green().bold());
    println!("  Code: {}", link.code.cyan());
    println!(
        "  URL:  {}",
        format!("{}/{}", base_url.trim_end_matches('/'), link.code).bright_yellow()
    );
    println!("  Target: {}", link.long_url);

    Ok(())
}

/// Prints click statistics for a short code.
async fn show_stats(service: StatsService, code: &str) -> Result<()> {
    let stats = service
        .get_link_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to fetch statistics: {}", e))?;

    println!("{}", format!("Statistics for {}", code).bright_blue().bold());
    println!();
    println!("  Target:     {}", stats.link.long_url);
    println!(
        "  Created:    {}",
        stats.link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Clicks:     {}",
        stats.total_clicks.to_string().bright_yellow().bold()
    );

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database check failed")?;
            println!("{}", "Database connection OK".green().bold());
        }
    }

    Ok(())
}
