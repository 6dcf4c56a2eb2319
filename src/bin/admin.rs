//! CLI administration tool for link-manager.
//!
//! Manages links and the database directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links (optionally a slice)
//! cargo run --bin admin -- link list --range "[0,9]"
//!
//! # Create a link
//! cargo run --bin admin -- link create https://example.com/long-url exmpl
//!
//! # Delete a link
//! cargo run --bin admin -- link delete 42
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (required), `BASE_URL` (optional).

use link_manager::api::dto::link::short_url;
use link_manager::api::dto::range::LinkRange;
use link_manager::api::handlers::links::fetch_page;
use link_manager::application::services::LinkService;
use link_manager::config::{self, Config};
use link_manager::domain::entities::{Link, NewLink};
use link_manager::domain::repositories::LinkRepository;
use link_manager::infrastructure::persistence::Database;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing link-manager.
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
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
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
    /// List links
    List {
        /// Inclusive slice, e.g. "[0,9]"
        #[arg(short, long)]
        range: Option<String>,
    },

    /// Show a single link
    Show {
        /// Link ID
        id: i64,
    },

    /// Create a new link
    Create {
        /// Destination URL
        original_url: String,

        /// Unique short name
        short_name: String,
    },

    /// Delete a link
    Delete {
        /// Link ID
        id: i64,

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

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let database = Database::connect(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &database, &config).await?,
        Commands::Stats => handle_stats(&database).await?,
        Commands::Db { action } => handle_db_action(action, &database).await?,
    }

    database.close().await;

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(
    action: LinkAction,
    database: &Database,
    config: &Config,
) -> Result<()> {
    let service = LinkService::new(database.link_repository());

    match action {
        LinkAction::List { range } => list_links(&service, range, &config.base_url).await?,
        LinkAction::Show { id } => {
            let link = service.get_link(id).await?;
            print_link(&link, &config.base_url);
        }
        LinkAction::Create {
            original_url,
            short_name,
        } => {
            let link = service
                .create_link(NewLink {
                    original_url,
                    short_name,
                })
                .await?;

            println!("{}", "✅ Link created".green().bold());
            print_link(&link, &config.base_url);
        }
        LinkAction::Delete { id, yes } => delete_link(&service, id, yes).await?,
    }

    Ok(())
}

/// Lists links as a table, followed by the `Content-Range` the API would send.
///
/// # Output Format
///
/// ```text
///   ID    Short name       Created            Original URL
///   ─────────────────────────────────────────────────────────────────
///   1     exmpl            2026-01-15 10:30   https://example.com/long-url
///
///   links 0-0/1
/// ```
async fn list_links(
    service: &LinkService<dyn LinkRepository>,
    range: Option<String>,
    base_url: &str,
) -> Result<()> {
    let range = range.as_deref().map(LinkRange::parse).transpose()?;

    let (links, content_range) = fetch_page(service, range).await?;

    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
    } else {
        println!(
            "  {:<5} {:<16} {:<18} {}",
            "ID".bright_white().bold(),
            "Short name".bright_white().bold(),
            "Created".bright_white().bold(),
            "Original URL".bright_white().bold()
        );
        println!("  {}", "─".repeat(75).bright_black());

        for link in &links {
            println!(
                "  {:<5} {:<16} {:<18} {}",
                link.id.to_string().bright_black(),
                link.short_name.cyan(),
                link.created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black(),
                link.original_url
            );
        }
    }

    println!();
    println!("  {}", content_range.to_string().bright_black());
    println!(
        "  Short URLs: {}",
        short_url(base_url, "<short_name>").bright_black()
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(
    service: &LinkService<dyn LinkRepository>,
    id: i64,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = service.get_link(id).await?;

    println!("  Short name: {}", link.short_name.cyan());
    println!("  URL:        {}", link.original_url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link permanently?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete_link(id).await?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

fn print_link(link: &Link, base_url: &str) {
    println!();
    println!("  ID:         {}", link.id.to_string().bright_black());
    println!("  Short name: {}", link.short_name.cyan());
    println!(
        "  Short URL:  {}",
        short_url(base_url, &link.short_name).bright_yellow()
    );
    println!("  URL:        {}", link.original_url);
    println!(
        "  Created:    {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
}

/// Displays the number of stored links.
async fn handle_stats(database: &Database) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = database.link_repository().count().await?;

    println!(
        "  Links:   {}",
        links_count.to_string().bright_white().bold()
    );
    println!("  Backend: {}", database.backend().cyan());
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, database: &Database) -> Result<()> {
    match action {
        DbAction::Check => {
            database.ping().await?;
            println!(
                "{} ({})",
                "✅ Database connection OK".green().bold(),
                database.backend()
            );
        }
        DbAction::Migrate => {
            database.migrate().await?;
            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
