//! Insight report and question answering

use anyhow::Result;
use tally_core::db::Database;
use tally_core::insights::{analyze, category_totals, reply};

use super::format_amount;

pub fn cmd_insights(db: &Database, json: bool) -> Result<()> {
    let snapshot = db.snapshot()?;
    let insights = analyze(&snapshot.transactions, &snapshot.budgets);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    let s = &insights.summary;
    println!();
    println!("📊 Summary");
    println!("   ─────────────────────────────");
    println!("   Income:   ${:.2}", s.income);
    println!("   Expenses: ${:.2}", s.expense);
    println!("   Net:      ${:.2}", s.net);
    if let Some(rate) = insights.savings_rate() {
        println!("   Savings rate: {:.0}%", rate * 100.0);
    }

    let totals = category_totals(&snapshot.transactions);
    if !totals.is_empty() {
        println!();
        println!("📂 By Category");
        println!("   ─────────────────────────────");
        for (category, total) in totals.iter() {
            println!("   {:<20} {:>12}", category, format_amount(total));
        }
    }

    println!();
    if insights.overs.is_empty() {
        println!("✅ Within all budgets");
    } else {
        println!("⚠️  Over Budget");
        println!("   ─────────────────────────────");
        for over in &insights.overs {
            println!(
                "   {}: spent ${:.2} vs budget ${:.2} (+${:.2})",
                over.category,
                over.spent,
                over.budget,
                over.excess()
            );
        }
    }

    if !insights.tips.is_empty() {
        println!();
        println!("💡 Tips");
        for tip in &insights.tips {
            println!("   • {}", tip);
        }
    }

    Ok(())
}

pub fn cmd_ask(db: &Database, question: &str, json: bool) -> Result<()> {
    let snapshot = db.snapshot()?;
    let answer = reply(question, analyze(&snapshot.transactions, &snapshot.budgets));

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("💬 {}", answer.reply);
    }

    Ok(())
}
