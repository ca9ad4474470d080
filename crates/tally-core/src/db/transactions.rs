//! Transaction operations

use super::{Database, Filter};
use crate::error::Result;
use crate::models::{Collection, Stored, Transaction};

impl Database {
    /// Validate and store a transaction
    pub fn create_transaction(&self, tx: &Transaction) -> Result<i64> {
        tx.validate()?;
        self.create(Collection::Transaction, tx)
    }

    /// List up to `limit` transactions, oldest first
    pub fn list_transactions(&self, limit: i64) -> Result<Vec<Stored<Transaction>>> {
        self.list_records(Collection::Transaction, &Filter::all(), limit)
    }

    /// List transactions with an exact category label
    pub fn list_transactions_in_category(
        &self,
        category: &str,
        limit: i64,
    ) -> Result<Vec<Stored<Transaction>>> {
        self.list_records(
            Collection::Transaction,
            &Filter::all().field_eq("category", category),
            limit,
        )
    }
}
