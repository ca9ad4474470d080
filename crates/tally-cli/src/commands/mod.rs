//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Storage setup (init) and shared utilities (storage_config, open_db)
//! - `status` - Storage diagnostics
//! - `transactions` - Transaction commands (add, list)
//! - `budgets` - Budget commands (add, list)
//! - `insights` - Insight report and question answering
//! - `serve` - Web server command

pub mod budgets;
pub mod core;
pub mod insights;
pub mod serve;
pub mod status;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use insights::*;
pub use serve::*;
pub use status::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a signed amount with color: red for expenses, green for income
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("\x1b[31m-${:.2}\x1b[0m", amount.abs())
    } else {
        format!("\x1b[32m+${:.2}\x1b[0m", amount)
    }
}
