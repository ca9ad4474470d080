//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};

use tally_core::config::{DATABASE_NAME_ENV, DATABASE_URL_ENV};
use tally_core::models::BudgetPeriod;

/// Tally - Personal finance assistant
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Track transactions and budgets, and ask about your finances", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Storage location (SQLite file path, optionally prefixed with sqlite://)
    #[arg(long, env = DATABASE_URL_ENV, global = true)]
    pub database_url: Option<String>,

    /// Logical database name reported by diagnostics
    #[arg(long, env = DATABASE_NAME_ENV, global = true)]
    pub database_name: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show storage diagnostics
    Status,

    /// Record and list transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Set and list category budgets
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show summary, category totals, overruns and tips
    Insights {
        /// Print the raw insights as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a question about your finances
    Ask {
        /// Free-text question, e.g. "how am I doing?"
        question: String,

        /// Print the reply and insights as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Do not store chat questions and replies
        #[arg(long)]
        no_chat_history: bool,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// Record a transaction
    Add {
        /// Amount (positive for income, negative for expense)
        #[arg(short, long, allow_negative_numbers = true)]
        amount: f64,

        /// Category (e.g., groceries, rent, salary)
        #[arg(short, long)]
        category: String,

        /// ISO date, e.g. 2025-01-31
        #[arg(short, long)]
        date: String,

        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Account name or source
        #[arg(long)]
        account: Option<String>,
    },

    /// List transactions, oldest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// Set a budget for a category
    Add {
        /// Budget category
        #[arg(short, long)]
        category: String,

        /// Budgeted amount for the period
        #[arg(short, long, allow_negative_numbers = true)]
        amount: f64,

        /// Budget period: monthly or weekly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,
    },

    /// List budgets
    List {
        /// Number of budgets to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}
