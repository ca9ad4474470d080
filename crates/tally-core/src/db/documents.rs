//! Collection-level document operations

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, types::Value as SqlValue};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Collection, Stored};

/// A raw stored document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: i64,
    pub collection: Collection,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Decode the document body into a typed record
    pub fn decode<T: DeserializeOwned>(self) -> Result<Stored<T>> {
        Ok(Stored {
            id: self.id,
            record: serde_json::from_value(self.data)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Equality constraints on top-level document fields (all must hold)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Match every document in the collection
    pub fn all() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Render the WHERE fragment and its bound parameters
    fn to_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        let mut sql = String::new();
        let mut values = Vec::new();

        for (field, value) in &self.conditions {
            if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::InvalidData(format!("invalid filter field: {:?}", field)));
            }
            let path = SqlValue::Text(format!("$.{}", field));

            match value {
                Value::Null => {
                    sql.push_str(" AND json_extract(data, ?) IS NULL");
                    values.push(path);
                }
                Value::Bool(b) => {
                    sql.push_str(" AND json_extract(data, ?) = ?");
                    values.push(path);
                    values.push(SqlValue::Integer(i64::from(*b)));
                }
                Value::Number(n) => {
                    sql.push_str(" AND json_extract(data, ?) = ?");
                    values.push(path);
                    values.push(match n.as_i64() {
                        Some(i) => SqlValue::Integer(i),
                        None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
                    });
                }
                Value::String(s) => {
                    sql.push_str(" AND json_extract(data, ?) = ?");
                    values.push(path);
                    values.push(SqlValue::Text(s.clone()));
                }
                Value::Array(_) | Value::Object(_) => {
                    return Err(Error::InvalidData(format!(
                        "filter on {:?} must compare a scalar value",
                        field
                    )));
                }
            }
        }

        Ok((sql, values))
    }
}

impl Database {
    /// Insert a document into a collection, returning its storage id
    ///
    /// The record must serialize to a JSON object.
    pub fn create<T: Serialize>(&self, collection: Collection, record: &T) -> Result<i64> {
        let data = serde_json::to_value(record)?;
        if !data.is_object() {
            return Err(Error::InvalidData(format!(
                "{} documents must be JSON objects",
                collection
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO documents (collection, data) VALUES (?, ?)",
            params![collection.as_str(), data.to_string()],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(collection = collection.as_str(), id, "Document created");
        Ok(id)
    }

    /// Fetch up to `limit` documents of a collection matching `filter`, oldest first
    pub fn list(&self, collection: Collection, filter: &Filter, limit: i64) -> Result<Vec<Document>> {
        let (conditions, mut values) = filter.to_sql()?;

        let sql = format!(
            "SELECT id, data, created_at, updated_at FROM documents \
             WHERE collection = ?{} ORDER BY id LIMIT ?",
            conditions
        );

        let mut bound = Vec::with_capacity(values.len() + 2);
        bound.push(SqlValue::Text(collection.as_str().to_string()));
        bound.append(&mut values);
        bound.push(SqlValue::Integer(limit.max(0)));

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map(params_from_iter(bound), |row| {
                let data: String = row.get(1)?;
                let created_at: String = row.get(2)?;
                let updated_at: String = row.get(3)?;
                Ok((row.get::<_, i64>(0)?, data, created_at, updated_at))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, data, created_at, updated_at)| {
                Ok(Document {
                    id,
                    collection,
                    data: serde_json::from_str(&data)?,
                    created_at: parse_datetime(&created_at),
                    updated_at: parse_datetime(&updated_at),
                })
            })
            .collect()
    }

    /// Fetch and decode records of one collection
    pub(crate) fn list_records<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: i64,
    ) -> Result<Vec<Stored<T>>> {
        self.list(collection, filter, limit)?
            .into_iter()
            .map(Document::decode)
            .collect()
    }
}
