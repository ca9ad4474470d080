//! Budget command implementations

use anyhow::{Context, Result};
use tally_core::db::Database;
use tally_core::models::{Budget, BudgetPeriod};

use super::truncate;

pub fn cmd_budgets_add(
    db: &Database,
    category: &str,
    amount: f64,
    period: BudgetPeriod,
) -> Result<()> {
    let budget = Budget::new(category, amount, period);
    let id = db.create_budget(&budget).context("Failed to set budget")?;

    println!(
        "✅ Budget {} set: {} ${:.2} {}",
        id, budget.category, budget.amount, budget.period
    );

    Ok(())
}

pub fn cmd_budgets_list(db: &Database, limit: i64) -> Result<()> {
    let budgets = db.list_budgets(limit)?;

    if budgets.is_empty() {
        println!("No budgets set. Add one with:");
        println!("  tally budgets add -c groceries -a 400");
        return Ok(());
    }

    println!();
    println!("🎯 Budgets");
    println!("   ─────────────────────────────────────────");

    for stored in budgets {
        let budget = &stored.record;
        println!(
            "   [{}] {:<20} │ ${:>10.2} │ {}",
            stored.id,
            truncate(&budget.category, 20),
            budget.amount,
            budget.period
        );
    }

    Ok(())
}
