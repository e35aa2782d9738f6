//! CLI administration tool for snaplink.
//!
//! Runs the same link operations as the HTTP API directly against the database,
//! for operators who do not want to go through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Create a link (random code, or a custom one)
//! cargo run --bin admin -- link create https://example.com
//! cargo run --bin admin -- link create https://github.com --code github
//!
//! # Inspect links
//! cargo run --bin admin -- link list
//! cargo run --bin admin -- link show github
//!
//! # Delete a link (asks for confirmation unless --yes)
//! cargo run --bin admin -- link delete github
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`snaplink::config`].

use snaplink::application::services::LinkService;
use snaplink::config;
use snaplink::domain::entities::Link;
use snaplink::error::AppError;
use snaplink::infrastructure::persistence::PgLinkRepository;
use snaplink::server::init_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
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

    /// Show link and click totals
    Stats,

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
        /// Destination URL (absolute http/https)
        url: String,

        /// Custom short code (6-8 letters and digits)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List all links, newest first
    List,

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Delete a link and free its code
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = init_pool(&config).await?;

    let result = match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool, &config.base_url).await,
        Commands::Stats => handle_stats(&pool, &config.base_url).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, base_url: &str) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo, base_url);

    match action {
        LinkAction::Create { url, code } => create_link(&service, url, code).await,
        LinkAction::List => list_links(&service).await,
        LinkAction::Show { code } => show_link(&service, &code).await,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await,
    }
}

/// Creates a link and prints its short URL.
async fn create_link(
    service: &LinkService<PgLinkRepository>,
    url: String,
    code: Option<String>,
) -> Result<()> {
    let link = service.create_link(url, code).await.map_err(report)?;

    println!("{}", "✅ Link created".green().bold());
    println!();
    print_link(service, &link);

    Ok(())
}

/// Lists all links in a table.
///
/// # Output Format
///
/// ```text
///   Code      Clicks  Created           URL
///   ────────────────────────────────────────────────────────
///   github         3  2026-01-15 10:30  https://github.com
/// ```
async fn list_links(service: &LinkService<PgLinkRepository>) -> Result<()> {
    let links = service.list_links().await.map_err(report)?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create <URL>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:>7}  {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:>7}  {:<17} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_white(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(service: &LinkService<PgLinkRepository>, code: &str) -> Result<()> {
    let link = service.get_link(code).await.map_err(report)?;
    print_link(service, &link);

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(
    service: &LinkService<PgLinkRepository>,
    code: &str,
    skip_confirm: bool,
) -> Result<()> {
    let link = service.get_link(code).await.map_err(report)?;
    print_link(service, &link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete_link(code).await.map_err(report)?;

    println!("{}", "✅ Link deleted".green().bold());
    Ok(())
}

/// Displays totals across all links.
async fn handle_stats(pool: &PgPool, base_url: &str) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo, base_url);

    let totals = service.totals().await.map_err(report)?;

    println!("{}", "Statistics".bright_blue().bold());
    println!();
    println!("  Links:  {}", totals.links.to_string().bright_green().bold());
    println!("  Clicks: {}", totals.clicks.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

fn print_link(service: &LinkService<PgLinkRepository>, link: &Link) {
    let last_clicked = link
        .last_clicked
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:         {}", link.code.cyan().bold());
    println!("  Short URL:    {}", service.short_url(&link.code).bright_yellow());
    println!("  URL:          {}", link.url);
    println!("  Clicks:       {}", link.clicks);
    println!("  Last clicked: {}", last_clicked.bright_black());
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!();
}

/// Turns a service error into a CLI error carrying its stable code.
fn report(e: AppError) -> anyhow::Error {
    let info = e.to_error_info();
    anyhow::anyhow!("{} ({})", info.message, info.code)
}
