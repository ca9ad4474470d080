//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, CreatedResponse, ItemsResponse, ListQuery};
use tally_core::models::{Budget, BudgetPeriod, Stored};

/// Request body for setting a budget
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub period: BudgetPeriod,
}

/// POST /api/budgets - Store a category budget
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBudgetRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let budget = Budget::new(req.category, req.amount, req.period);
    let id = state.db.create_budget(&budget)?;

    tracing::debug!(id, category = %budget.category, "Budget stored");
    Ok(Json(CreatedResponse::new(id)))
}

/// GET /api/budgets - List budgets, oldest first
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ItemsResponse<Stored<Budget>>>, AppError> {
    let items = state.db.list_budgets(params.clamped_limit())?;
    Ok(Json(ItemsResponse { items }))
}
