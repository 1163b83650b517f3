//! CLI administration tool for estate-api.
//!
//! Provides commands for inspecting accounts, granting subscriptions,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a user by email
//! cargo run --bin admin -- user show someone@example.com
//!
//! # List recent signups
//! cargo run --bin admin -- user list
//!
//! # Grant a subscription
//! cargo run --bin admin -- user subscribe someone@example.com
//!
//! # View record counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use estate_api::domain::listing_filter::ListingFilter;
use estate_api::domain::repositories::{ListingRepository, OutreachRepository, UserRepository};
use estate_api::infrastructure::persistence::{
    PgListingRepository, PgOutreachRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing estate-api.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// View record counts
    Stats,
    /// Database tools
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List the most recent signups
    List {
        /// Number of accounts to show
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Show one account by email
    Show { email: String },
    /// Mark an account as subscribed
    Subscribe { email: String },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check the database connection
    Check,
}

#[derive(sqlx::FromRow)]
struct UserSummaryRow {
    email: String,
    is_subscribed: bool,
    created_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => match action {
            UserAction::List { limit } => list_users(&pool, limit).await?,
            UserAction::Show { email } => show_user(pool.clone(), &email).await?,
            UserAction::Subscribe { email } => subscribe_user(pool.clone(), &email).await?,
        },
        Commands::Stats => show_stats(pool.clone()).await?,
        Commands::Db { action } => match action {
            DbAction::Check => db_check(&pool).await?,
        },
    }

    Ok(())
}

async fn list_users(pool: &Arc<PgPool>, limit: i64) -> Result<()> {
    let rows: Vec<UserSummaryRow> = sqlx::query_as(
        "SELECT email, is_subscribed, created_at FROM users ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool.as_ref())
    .await?;

    if rows.is_empty() {
        println!("{}", "No accounts found.".yellow());
        return Ok(());
    }

    println!("{}", format!("{} most recent accounts:", rows.len()).bold());
    for row in rows {
        let badge = if row.is_subscribed {
            "subscribed".green()
        } else {
            "free".normal()
        };
        println!(
            "  {}  {}  {}",
            row.created_at.format("%Y-%m-%d %H:%M"),
            row.email.cyan(),
            badge
        );
    }

    Ok(())
}

async fn show_user(pool: Arc<PgPool>, email: &str) -> Result<()> {
    let repository = PgUserRepository::new(pool);

    let Some(user) = repository.find_by_email(email).await? else {
        println!("{}", format!("No account for {}", email).red());
        return Ok(());
    };

    println!("{}", email.cyan().bold());
    println!("  id:            {}", user.id);
    println!("  name:          {}", user.name.as_deref().unwrap_or("-"));
    println!("  password set:  {}", user.has_password());
    println!("  google linked: {}", user.google_id.is_some());
    println!("  subscribed:    {}", user.is_subscribed);
    if let Some(subscription_type) = &user.subscription_type {
        println!("  plan:          {}", subscription_type);
    }
    println!("  created:       {}", user.created_at.format("%Y-%m-%d %H:%M"));

    Ok(())
}

async fn subscribe_user(pool: Arc<PgPool>, email: &str) -> Result<()> {
    let repository = PgUserRepository::new(pool);

    if repository.find_by_email(email).await?.is_none() {
        println!("{}", format!("No account for {}", email).red());
        return Ok(());
    }

    let plan: String = Input::new()
        .with_prompt("Subscription plan")
        .default("yearly".to_string())
        .interact_text()?;

    let confirmed = Confirm::new()
        .with_prompt(format!("Mark {} as subscribed ({})?", email, plan))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }

    let updated = repository
        .mark_subscribed(email, "admin_grant", Some(&plan), Utc::now())
        .await?;

    if updated > 0 {
        println!("{}", format!("✓ {} subscribed ({})", email, plan).green());
    } else {
        println!("{}", "No rows updated.".red());
    }

    Ok(())
}

async fn show_stats(pool: Arc<PgPool>) -> Result<()> {
    let listing_repository = PgListingRepository::new(pool.clone());
    let user_repository = PgUserRepository::new(pool.clone());
    let outreach_repository = PgOutreachRepository::new(pool);

    let listings = listing_repository.count(&ListingFilter::default()).await?;
    let users = user_repository.count().await?;
    let subscribers = outreach_repository.count_subscribers().await?;

    println!("{}", "Record counts:".bold());
    println!("  listings:    {}", listings.to_string().cyan());
    println!("  users:       {}", users.to_string().cyan());
    println!("  subscribers: {}", subscribers.to_string().cyan());

    Ok(())
}

async fn db_check(pool: &Arc<PgPool>) -> Result<()> {
    sqlx::query("SELECT 1").fetch_one(pool.as_ref()).await?;
    println!("{}", "✓ Database connection OK".green());

    Ok(())
}
