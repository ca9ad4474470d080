//! Tally Web Server
//!
//! Axum-based REST API for the Tally personal finance assistant.
//!
//! - Transactions and budgets are stored as documents and listed back
//! - Insights are computed on demand from a bounded snapshot of the store
//! - `/api/chat` answers free-text questions with the keyword responder
//! - Validation failures are reported as 422, storage failures as 500

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use tally_core::db::Database;

mod handlers;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Comma-separated list of allowed CORS origins
pub const CORS_ORIGINS_ENV: &str = "TALLY_CORS_ORIGINS";

/// Set to `false` or `0` to stop storing chat history
pub const PERSIST_CHAT_ENV: &str = "TALLY_PERSIST_CHAT";

/// Service name reported by the root endpoint
pub const SERVICE_NAME: &str = "Personal Finance Assistant API";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = any origin)
    pub allowed_origins: Vec<String>,
    /// Store chat questions and replies as `message` documents
    pub persist_chat: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            persist_chat: true,
        }
    }
}

impl ServerConfig {
    /// Read `TALLY_CORS_ORIGINS` and `TALLY_PERSIST_CHAT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let allowed_origins = lookup(CORS_ORIGINS_ENV)
            .map(|v| {
                v.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let persist_chat = lookup(PERSIST_CHAT_ENV)
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(true);

        Self {
            allowed_origins,
            persist_chat,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// Query parameters shared by the list endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl ListQuery {
    /// Requested page size clamped to 1..=MAX_PAGE_LIMIT
    pub fn clamped_limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_LIMIT)
    }
}

/// Response for list endpoints
#[derive(Serialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

/// Response for create endpoints
#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub ok: bool,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self { id, ok: true }
    }
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let cors = build_cors(&config);

    let state = Arc::new(AppState { db, config });

    let api_routes = Router::new()
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/budgets",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .route("/insights", get(handlers::get_insights))
        .route("/chat", post(handlers::chat))
        .route("/messages", get(handlers::list_messages));

    Router::new()
        .route("/", get(handlers::root))
        .route("/test", get(handlers::test_database))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if config.allowed_origins.is_empty() {
        info!("CORS: allowing any origin");
    } else {
        info!(origins = ?config.allowed_origins, "CORS: restricted origins");
    }
    if !config.persist_chat {
        info!("Chat history persistence disabled");
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn unprocessable(msg: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Core validation errors map to 422
        if let Some(tally_core::Error::InvalidData(msg)) = err.downcast_ref::<tally_core::Error>() {
            return Self::unprocessable(msg);
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Storage error: {}", err),
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
