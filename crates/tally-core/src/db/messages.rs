//! Chat history operations

use super::{Database, Filter};
use crate::error::Result;
use crate::models::{Collection, Message, Stored};

impl Database {
    pub fn create_message(&self, message: &Message) -> Result<i64> {
        self.create(Collection::Message, message)
    }

    /// List up to `limit` messages in the order they were written
    pub fn list_messages(&self, limit: i64) -> Result<Vec<Stored<Message>>> {
        self.list_records(Collection::Message, &Filter::all(), limit)
    }
}
