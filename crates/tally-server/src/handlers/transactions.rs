//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, CreatedResponse, ItemsResponse, ListQuery};
use tally_core::models::{Stored, Transaction};

/// Request body for recording a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Negative = expense, positive = income
    pub amount: f64,
    pub category: String,
    pub date: String,
    pub notes: Option<String>,
    pub account: Option<String>,
}

impl From<CreateTransactionRequest> for Transaction {
    fn from(req: CreateTransactionRequest) -> Self {
        Self {
            amount: req.amount,
            category: req.category,
            date: req.date,
            notes: req.notes,
            account: req.account,
        }
    }
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let tx = Transaction::from(req);
    let id = state.db.create_transaction(&tx)?;

    tracing::debug!(id, category = %tx.category, "Transaction recorded");
    Ok(Json(CreatedResponse::new(id)))
}

/// GET /api/transactions - List transactions, oldest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ItemsResponse<Stored<Transaction>>>, AppError> {
    let items = state.db.list_transactions(params.clamped_limit())?;
    Ok(Json(ItemsResponse { items }))
}
