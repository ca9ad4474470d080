//! Insight and chat handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::{AppError, AppState, ItemsResponse, ListQuery};
use tally_core::insights::{analyze, reply, ChatReply, Insights};
use tally_core::models::{Message, Stored};

/// Request body for a chat question
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns supplied by the client; accepted but not used for routing
    #[serde(default)]
    pub history: Option<Vec<Message>>,
}

/// Analyze the current snapshot of the store
fn current_insights(state: &AppState) -> Result<Insights, AppError> {
    let snapshot = state.db.snapshot()?;
    Ok(analyze(&snapshot.transactions, &snapshot.budgets))
}

/// GET /api/insights - Summary, overruns and tips for the stored data
pub async fn get_insights(State(state): State<Arc<AppState>>) -> Result<Json<Insights>, AppError> {
    Ok(Json(current_insights(&state)?))
}

/// POST /api/chat - Answer a free-text question about the stored data
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let insights = current_insights(&state)?;
    let answer = reply(&req.message, insights);

    tracing::debug!(
        history = req.history.as_ref().map_or(0, Vec::len),
        reply_len = answer.reply.len(),
        "Chat answered"
    );

    if state.config.persist_chat {
        // History is best-effort: the answer is returned either way
        if let Err(e) = persist_exchange(&state, req.message, &answer.reply) {
            warn!(error = %e, "Failed to store chat history");
        }
    }

    Ok(Json(answer))
}

fn persist_exchange(state: &AppState, question: String, answer: &str) -> tally_core::Result<()> {
    state.db.create_message(&Message::user(question))?;
    state.db.create_message(&Message::assistant(answer))?;
    Ok(())
}

/// GET /api/messages - Stored chat history, oldest first
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ItemsResponse<Stored<Message>>>, AppError> {
    let items = state.db.list_messages(params.clamped_limit())?;
    Ok(Json(ItemsResponse { items }))
}
