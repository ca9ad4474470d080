//! Service health and storage diagnostics

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::{AppState, SERVICE_NAME};

#[derive(Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET / - Liveness check
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

/// Storage diagnostics
///
/// Never fails: storage problems are reported in the `database` field.
#[derive(Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// GET /test - Report storage configuration and reachability
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<DiagnosticsResponse> {
    let mut response = DiagnosticsResponse {
        backend: "✅ Running".to_string(),
        database: "✅ Available".to_string(),
        database_url: "✅ Set".to_string(),
        database_name: state.db.name().to_string(),
        connection_status: "Connected".to_string(),
        collections: vec![],
    };

    match state.db.status() {
        Ok(status) => {
            response.collections = status.collections;
            response.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            warn!(error = %e, "Storage diagnostics failed");
            let detail: String = e.to_string().chars().take(50).collect();
            response.database = format!("⚠️  Connected but Error: {}", detail);
            response.connection_status = "Error".to_string();
        }
    }

    Json(response)
}
