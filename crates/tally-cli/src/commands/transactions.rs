//! Transaction command implementations

use anyhow::{Context, Result};
use tally_core::db::Database;
use tally_core::models::Transaction;

use super::{format_amount, truncate};

pub fn cmd_transactions_add(
    db: &Database,
    amount: f64,
    category: &str,
    date: &str,
    notes: Option<String>,
    account: Option<String>,
) -> Result<()> {
    let mut tx = Transaction::new(amount, category, date);
    tx.notes = notes;
    tx.account = account;

    let id = db
        .create_transaction(&tx)
        .context("Failed to record transaction")?;

    println!(
        "✅ Recorded transaction {}: {} │ {} │ {}",
        id,
        tx.date,
        format_amount(tx.amount),
        tx.category
    );

    Ok(())
}

pub fn cmd_transactions_list(db: &Database, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(limit)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally transactions add -a -42.50 -c groceries -d 2025-01-31");
        return Ok(());
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for stored in transactions {
        let tx = &stored.record;
        println!(
            "   [{}] {} │ {:>10} │ {:<15} │ {}",
            stored.id,
            tx.date,
            format_amount(tx.amount),
            truncate(&tx.category, 15),
            truncate(tx.notes.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}
