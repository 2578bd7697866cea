//! CLI administration tool for shorturl-service.
//!
//! Provides commands for minting bearer tokens, viewing statistics,
//! and performing database checks without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Issue a token for the admin role
//! cargo run --bin admin -- token issue --role admin --subject ops
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `JWT_SECRET` (required for `token`): signing secret shared with the service
//! - `JWT_EXPIRY_SECONDS` (optional, default 3600, at most one year): lifetime of issued tokens
//! - `DATABASE_URL` (required for `stats` and `db`): PostgreSQL connection string

use shorturl_service::config::load_token_settings;
use shorturl_service::domain::repositories::ShortUrlRepository;
use shorturl_service::domain::token_authority::TokenAuthority;
use shorturl_service::infrastructure::auth::JwtTokenAuthority;
use shorturl_service::infrastructure::persistence::PgShortUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorturl-service.
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
    /// Manage bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a signed token carrying a role claim
    Issue {
        /// Role claim (e.g., "admin", "manager")
        #[arg(short, long)]
        role: Option<String>,

        /// Subject claim identifying the holder
        #[arg(short, long, default_value = "admin-cli")]
        subject: String,

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
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches token commands.
fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue { role, subject, yes } => issue_token(role, subject, yes),
    }
}

/// Mints a token with the service's secret and expiry.
///
/// # Flow
///
/// 1. Prompt for role (or use provided)
/// 2. Display claims
/// 3. Confirm (unless `--yes` flag)
/// 4. Sign and print the token with usage instructions
fn issue_token(role: Option<String>, subject: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔑 Issue Bearer Token".bright_blue().bold());
    println!();

    let settings = load_token_settings()?;
    let authority = JwtTokenAuthority::new(&settings.secret, settings.expiry_seconds);

    let role = match role {
        Some(r) => r,
        None => Input::new()
            .with_prompt("Role")
            .with_initial_text("admin")
            .interact_text()?,
    };

    println!("{}", "Token claims:".bright_white().bold());
    println!("  Subject: {}", subject.cyan());
    println!("  Role:    {}", role.cyan());
    println!(
        "  Expires: {}s after issue",
        authority.expiry_seconds().to_string().cyan()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Issue this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token = authority
        .issue(&subject, &role)
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!();
    println!("{}", "✅ Token issued".green().bold());
    println!();
    println!("  {}", token.bright_yellow().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -X DELETE -H \"Authorization: Bearer {}\" http://localhost:3000/url/delete/<code>",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Displays record counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgShortUrlRepository::new(Arc::new(pool.clone()));
    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count records: {}", e))?;

    let expired: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE expiry_date < NOW()")
            .fetch_one(pool)
            .await?;

    println!("  Short URLs: {}", total.to_string().bright_green().bold());
    println!("  Expired:    {}", expired.to_string().yellow().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
