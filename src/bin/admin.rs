//! CLI administration tool for shortlife.
//!
//! Manages links and runs maintenance tasks directly against the configured
//! database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Create a link, prompting for a password
//! cargo run --bin admin -- links create https://example.com --path docs --protect
//!
//! # Delete a link
//! cargo run --bin admin -- links delete docs
//!
//! # Remove expired links now
//! cargo run --bin admin -- gc run
//!
//! # Show link counts
//! cargo run --bin admin -- stats
//!
//! # Check the connection / create the table
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db init
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DB_TYPE`, `DATABASE_URL`, ...).

use shortlife::api::dto::parameters::Parameters;
use shortlife::application::services::LinkService;
use shortlife::config;
use shortlife::domain::garbage_collector::GarbageCollector;
use shortlife::domain::repositories::LinkRepository;
use shortlife::infrastructure::persistence;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use std::sync::Arc;

/// CLI tool for managing shortlife.
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
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Garbage collection
    Gc {
        #[command(subcommand)]
        action: GcAction,
    },

    /// Show link counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List all links
    List,

    /// Create a link
    Create {
        /// Target URL
        url: String,

        /// Custom alias
        #[arg(short, long)]
        path: Option<String>,

        /// Generated alias length
        #[arg(short, long)]
        length: Option<usize>,

        /// Expiry offset, e.g. 30m, 12h, 7d, 2w
        #[arg(short, long)]
        expire_after: Option<String>,

        /// Prompt for a password to protect the link
        #[arg(long)]
        protect: bool,
    },

    /// Delete a link
    Delete {
        /// Alias to delete
        short: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Garbage collection subcommands.
#[derive(Subcommand)]
enum GcAction {
    /// Run one sweep now
    Run,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the links table if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let repository = persistence::connect(&config).await?;

    match cli.command {
        Commands::Links { action } => {
            let service = LinkService::new(repository, config.link_settings()?);
            handle_links_action(action, &service).await?
        }
        Commands::Gc { action } => match action {
            GcAction::Run => run_gc(repository, config.gc_interval()).await?,
        },
        Commands::Stats => handle_stats(repository).await?,
        Commands::Db { action } => handle_db_action(action, repository).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, service: &LinkService) -> Result<()> {
    match action {
        LinksAction::List => list_links(service).await?,
        LinksAction::Create {
            url,
            path,
            length,
            expire_after,
            protect,
        } => {
            let password = if protect {
                Some(
                    Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Repeat password", "Passwords do not match")
                        .interact()?,
                )
            } else {
                None
            };

            let params = Parameters {
                url,
                length,
                path,
                expire_after,
                password,
            };
            create_link(service, params).await?
        }
        LinksAction::Delete { short, yes } => delete_link(service, short, yes).await?,
    }

    Ok(())
}

/// Lists all links, marking the ones already past expiry.
///
/// # Output Format
///
/// ```text
/// Links
///
///   Short            Expires              Lock  URL
///   ─────────────────────────────────────────────────────────────
///   aB3xY9           2024-01-17 10:30           https://example.com
///   docs             2024-01-16 14:20     yes   https://docs.rs
/// ```
async fn list_links(service: &LinkService) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<16} {:<20} {:<5} {}",
        "Short".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Lock".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    let now = Utc::now();
    for link in &links {
        let expires = link.expire_at.format("%Y-%m-%d %H:%M").to_string();
        let expires = if link.is_expired_at(now) {
            expires.red()
        } else {
            expires.bright_black()
        };
        let lock = if link.is_protected() { "yes" } else { "" };

        println!(
            "  {:<16} {:<20} {:<5} {}",
            link.short.cyan(),
            expires,
            lock.yellow(),
            link.url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn create_link(service: &LinkService, params: Parameters) -> Result<()> {
    let link = service
        .create_link(params)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "Link created".green().bold());
    println!("  Short:   {}", link.short.cyan());
    println!("  URL:     {}", link.url);
    println!(
        "  Expires: {}",
        link.expire_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if link.is_protected() {
        println!("  {}", "Password protected".yellow());
    }

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, short: String, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete link '{}'?", short))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(&short)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "Link deleted".green().bold());

    Ok(())
}

/// Runs a single garbage collection sweep and prints the report.
async fn run_gc(repository: Arc<dyn LinkRepository>, interval: std::time::Duration) -> Result<()> {
    println!("{}", "Sweeping expired links...".bright_blue());

    let report = GarbageCollector::new(repository, interval)
        .sweep(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Sweep failed: {}", e))?;

    println!("  Scanned: {}", report.scanned);
    println!("  Expired: {}", report.expired);
    println!("  Deleted: {}", report.deleted.to_string().green().bold());
    if report.failed > 0 {
        println!("  Failed:  {}", report.failed.to_string().red().bold());
    }

    Ok(())
}

/// Displays total, expired and protected link counts.
async fn handle_stats(repository: Arc<dyn LinkRepository>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links = repository
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    let now = Utc::now();
    let expired = links.iter().filter(|l| l.is_expired_at(now)).count();
    let protected = links.iter().filter(|l| l.is_protected()).count();

    println!(
        "  Links:     {}",
        links.len().to_string().bright_green().bold()
    );
    println!("  Expired:   {}", expired.to_string().bright_green().bold());
    println!(
        "  Protected: {}",
        protected.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, repository: Arc<dyn LinkRepository>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            repository
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Init => {
            repository
                .ensure_schema()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create links table: {}", e))?;

            println!("{}", "Links table ready".green().bold());
        }
    }

    Ok(())
}
