//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance assistant:
//! - Domain models (transactions, budgets, chat messages)
//! - Storage configuration from the environment
//! - SQLite-backed document store with collection/filter primitives
//! - Insight engine and keyword-routed query responder

pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;

pub use config::StorageConfig;
pub use db::{Database, Document, Filter, Snapshot, StorageStatus};
pub use error::{Error, Result};
pub use insights::{analyze, respond, ChatReply, Insights, Overrun, Summary};
pub use models::{Budget, BudgetPeriod, Collection, Message, MessageRole, Stored, Transaction};
