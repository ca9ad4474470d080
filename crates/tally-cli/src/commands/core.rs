//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `storage_config` - Resolve storage settings from flags/environment
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database

use anyhow::{Context, Result};
use tally_core::config::{StorageConfig, DATABASE_NAME_ENV, DATABASE_URL_ENV};
use tally_core::db::Database;

/// Build the storage configuration from `--database-url` / `--database-name`
/// (which fall back to `DATABASE_URL` / `DATABASE_NAME`)
pub fn storage_config(url: Option<&str>, name: Option<&str>) -> Result<StorageConfig> {
    let url = url.with_context(|| {
        format!("No storage configured: set {} or pass --database-url", DATABASE_URL_ENV)
    })?;
    let name = name.with_context(|| {
        format!("No database name: set {} or pass --database-name", DATABASE_NAME_ENV)
    })?;
    StorageConfig::new(url, name).context("Invalid storage configuration")
}

/// Open the database, creating it if needed
pub fn open_db(config: &StorageConfig) -> Result<Database> {
    tracing::debug!(path = %config.path().display(), name = %config.name, "Opening database");
    Database::open(config)
        .with_context(|| format!("Failed to open database at {}", config.path().display()))
}

pub fn cmd_init(config: &StorageConfig) -> Result<()> {
    println!("🔧 Initializing database at {}...", config.path().display());

    let db = open_db(config)?;
    let status = db.status().context("Failed to read storage status")?;

    println!("   Name: {}", status.database_name);
    println!("   Documents: {}", status.document_count);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: tally transactions add -a -42.50 -c groceries -d 2025-01-31");
    println!("  2. Set a budget: tally budgets add -c groceries -a 400");
    println!("  3. Ask: tally ask \"how am I doing?\"");

    Ok(())
}
