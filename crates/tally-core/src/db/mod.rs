//! Database access layer with connection pooling and migrations
//!
//! Storage is a small document store on SQLite: every record lives in the
//! `documents` table as JSON, tagged with its collection name.
//!
//! This module is organized by domain:
//! - `documents` - Collection-level create/list primitives and filters
//! - `transactions` - Transaction records
//! - `budgets` - Budget records
//! - `messages` - Chat history records
//! - `snapshot` - Bounded reads feeding the insight engine

use std::path::Path;

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use serde::Serialize;
use tracing::info;

use crate::config::StorageConfig;
use crate::error::Result;

mod budgets;
mod documents;
mod messages;
mod snapshot;
mod transactions;

pub use documents::{Document, Filter};
pub use snapshot::{Snapshot, SNAPSHOT_BUDGET_LIMIT, SNAPSHOT_TRANSACTION_LIMIT};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Storage diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct StorageStatus {
    pub database_name: String,
    pub path: String,
    /// Collections currently holding documents (at most 10)
    pub collections: Vec<String>,
    pub document_count: i64,
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    /// Logical database name
    name: String,
}

impl Database {
    /// Open the database described by a storage configuration
    ///
    /// Creates the parent directory if it does not exist yet.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let path = config.path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::new(&path, &config.name)
    }

    /// Create a new database connection pool and run migrations
    pub fn new(path: &Path, name: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.display().to_string(),
            name: name.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Get the logical database name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every pooled
    /// connection would otherwise see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "tally_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path, "tally_test")
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Report which collections hold data
    pub fn status(&self) -> Result<StorageStatus> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT collection FROM documents ORDER BY collection LIMIT 10",
        )?;
        let collections = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        let document_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;

        Ok(StorageStatus {
            database_name: self.name.clone(),
            path: self.db_path.clone(),
            collections,
            document_count,
        })
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Documents (every collection shares one table)
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY,
                collection TEXT NOT NULL,
                data TEXT NOT NULL CHECK (json_valid(data)),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, id);
            "#,
        )?;

        info!(path = %self.db_path, name = %self.name, "Database schema initialized");
        Ok(())
    }
}
