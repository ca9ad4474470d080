//! Bounded reads feeding the insight engine

use super::Database;
use crate::error::Result;
use crate::models::{Budget, Transaction};

/// Most transactions read for one analysis
pub const SNAPSHOT_TRANSACTION_LIMIT: i64 = 500;

/// Most budgets read for one analysis
pub const SNAPSHOT_BUDGET_LIMIT: i64 = 100;

/// The records one analysis runs over
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

impl Database {
    /// Read the current analysis window with storage ids stripped
    ///
    /// Every stored transaction counts toward the current budget period.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let transactions = self
            .list_transactions(SNAPSHOT_TRANSACTION_LIMIT)?
            .into_iter()
            .map(|stored| stored.record)
            .collect();
        let budgets = self
            .list_budgets(SNAPSHOT_BUDGET_LIMIT)?
            .into_iter()
            .map(|stored| stored.record)
            .collect();

        Ok(Snapshot {
            transactions,
            budgets,
        })
    }
}
