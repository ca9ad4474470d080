//! Budget operations

use super::{Database, Filter};
use crate::error::Result;
use crate::models::{Budget, Collection, Stored};

impl Database {
    /// Validate and store a budget
    pub fn create_budget(&self, budget: &Budget) -> Result<i64> {
        budget.validate()?;
        self.create(Collection::Budget, budget)
    }

    /// List up to `limit` budgets, oldest first
    pub fn list_budgets(&self, limit: i64) -> Result<Vec<Stored<Budget>>> {
        self.list_records(Collection::Budget, &Filter::all(), limit)
    }
}
