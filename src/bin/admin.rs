//! CLI administration tool for linkcut.
//!
//! Inspects accounts and links and checks the database without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List registered users
//! cargo run --bin admin -- user list
//!
//! # Create a user interactively
//! cargo run --bin admin -- user create
//!
//! # List links, optionally for one owner
//! cargo run --bin admin -- link list --email user@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `BASE_URL` (optional): origin used when printing short URLs

use linkcut::application::services::{AuthService, LinkService, TokenService};
use linkcut::config::{Config, DEFAULT_BASE_URL, mask_connection_string};
use linkcut::domain::entities::{Link, normalize_email};
use linkcut::domain::repositories::{LinkRepository, UserRepository};
use linkcut::error::AppError;
use linkcut::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

/// CLI tool for managing linkcut.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect short links
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

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,

    /// Create a user account
    Create {
        /// Email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Only show links owned by this email
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    let shared = Arc::new(pool.clone());
    let repos = Repositories {
        users: Arc::new(PgUserRepository::new(shared.clone())),
        links: Arc::new(PgLinkRepository::new(shared)),
    };

    match cli.command {
        Commands::User { action } => handle_user_action(action, &repos).await?,
        Commands::Link { action } => handle_link_action(action, &repos).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &repos).await?,
    }

    Ok(())
}

fn app_error(context: &str, e: AppError) -> anyhow::Error {
    anyhow::anyhow!("{}: {}", context, e)
}

async fn handle_user_action(action: UserAction, repos: &Repositories) -> Result<()> {
    match action {
        UserAction::List => list_users(repos).await,
        UserAction::Create { email, yes } => create_user(repos, email, yes).await,
    }
}

/// Lists all accounts with their link counts.
///
/// # Output Format
///
/// ```text
/// Users
///
///   ID  Email                          Created            Links
///   -------------------------------------------------------------
///   1   user@example.com               2025-01-15 10:30   3
/// ```
async fn list_users(repos: &Repositories) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let users = repos
        .users
        .list()
        .await
        .map_err(|e| app_error("Failed to list users", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<18} {}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold(),
        "Links".bright_white().bold()
    );
    println!("  {}", "-".repeat(61).bright_black());

    let link_counts: HashMap<i64, i64> = repos
        .links
        .count_by_owner()
        .await
        .map_err(|e| app_error("Failed to count links", e))?
        .into_iter()
        .collect();

    for user in &users {
        println!(
            "  {:<4} {:<30} {:<18} {}",
            user.id.to_string().bright_black(),
            user.email.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link_counts.get(&user.id).copied().unwrap_or(0)
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates an account with the same rules as `POST /api/auth/register`.
///
/// # Flow
///
/// 1. Prompt for email (or use provided)
/// 2. Prompt for password twice
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Validate, hash with Argon2id and store
async fn create_user(repos: &Repositories, email: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    println!();
    println!("  Email: {}", normalize_email(&email).cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    // Session tokens are never issued here, so the signing secret is irrelevant.
    let service = AuthService::new(repos.users.clone(), TokenService::new("admin-cli"));

    let user = service
        .register(&email, password)
        .await
        .map_err(|e| app_error("Failed to create user", e))?;

    println!();
    println!(
        "{} {}",
        "User created with id".green().bold(),
        user.id.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_link_action(action: LinkAction, repos: &Repositories) -> Result<()> {
    match action {
        LinkAction::List { email } => list_links(repos, email).await,
    }
}

/// Lists links of one owner, or of every owner when no email is given.
async fn list_links(repos: &Repositories, email: Option<String>) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let owners = match email {
        Some(email) => {
            let user = repos
                .users
                .find_by_email(&normalize_email(&email))
                .await
                .map_err(|e| app_error("Database error", e))?
                .context("User not found")?;
            vec![user]
        }
        None => repos
            .users
            .list()
            .await
            .map_err(|e| app_error("Failed to list users", e))?,
    };

    let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let service = LinkService::new(repos.links.clone(), repos.users.clone(), base_url);

    let mut links: Vec<(String, Link)> = Vec::new();
    for owner in owners {
        let owned = service
            .list_links(owner.id)
            .await
            .map_err(|e| app_error("Failed to list links", e))?;
        links.extend(owned.into_iter().map(|link| (owner.email.clone(), link)));
    }
    links.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at));

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    for (owner, link) in &links {
        println!(
            "  {}  {}  {}",
            service.short_url(&link.code).bright_yellow(),
            format!("{} clicks", link.clicks).bright_green(),
            owner.bright_black()
        );
        println!("      {}", link.original_url.cyan());
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, repos: &Repositories) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            repos
                .links
                .ping()
                .await
                .map_err(|e| app_error("Database check failed", e))?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let users = repos
                .users
                .count()
                .await
                .map_err(|e| app_error("Failed to count users", e))?;
            let links = repos
                .links
                .count()
                .await
                .map_err(|e| app_error("Failed to count links", e))?;
            let clicks: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM links")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
