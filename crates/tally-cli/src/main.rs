//! Tally CLI - Personal finance assistant
//!
//! Usage:
//!   tally init                                   Initialize storage
//!   tally transactions add -a -42.5 -c food -d 2025-01-31
//!   tally insights                               Show summary, overruns and tips
//!   tally ask "how am I doing?"                  Ask the assistant
//!   tally serve --port 8000                      Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let storage =
        commands::storage_config(cli.database_url.as_deref(), cli.database_name.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&storage),
        Commands::Status => commands::cmd_status(&storage),
        Commands::Transactions { action } => {
            let db = commands::open_db(&storage)?;
            match action {
                Some(TransactionsAction::Add {
                    amount,
                    category,
                    date,
                    notes,
                    account,
                }) => commands::cmd_transactions_add(&db, amount, &category, &date, notes, account),
                Some(TransactionsAction::List { limit }) => {
                    commands::cmd_transactions_list(&db, limit)
                }
                None => commands::cmd_transactions_list(&db, 20),
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&storage)?;
            match action {
                Some(BudgetsAction::Add {
                    category,
                    amount,
                    period,
                }) => commands::cmd_budgets_add(&db, &category, amount, period),
                Some(BudgetsAction::List { limit }) => commands::cmd_budgets_list(&db, limit),
                None => commands::cmd_budgets_list(&db, 20),
            }
        }
        Commands::Insights { json } => {
            let db = commands::open_db(&storage)?;
            commands::cmd_insights(&db, json)
        }
        Commands::Ask { question, json } => {
            let db = commands::open_db(&storage)?;
            commands::cmd_ask(&db, &question, json)
        }
        Commands::Serve {
            port,
            host,
            no_chat_history,
        } => commands::cmd_serve(&storage, &host, port, no_chat_history).await,
    }
}
