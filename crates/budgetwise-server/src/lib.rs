//! Budgetwise Web Server
//!
//! Axum-based JSON API over a single in-memory financial snapshot.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Request body size limit
//! - Security headers (CSP, nosniff, frame denial)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use budgetwise_core::{Config, FinancialSnapshot};

mod handlers;

/// Maximum request body size (1 MB)
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Message returned by data routes before a snapshot is loaded
pub const NO_SNAPSHOT_MESSAGE: &str = "No financial data loaded";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// Currently loaded snapshot, replaced wholesale by PUT /api/snapshot
    pub snapshot: RwLock<Option<FinancialSnapshot>>,
    pub config: Config,
}

impl AppState {
    pub fn new(snapshot: Option<FinancialSnapshot>, config: Config) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            config,
        }
    }

    /// Clone of the loaded snapshot, or 404 when none is loaded
    pub async fn current_snapshot(&self) -> Result<FinancialSnapshot, AppError> {
        self.snapshot
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::not_found(NO_SNAPSHOT_MESSAGE))
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, server_config: ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/snapshot",
            get(handlers::get_snapshot).put(handlers::put_snapshot),
        )
        .route("/summary", get(handlers::get_summary))
        .route("/decision", post(handlers::evaluate_purchase))
        .route("/wellness", get(handlers::get_wellness))
        .route("/trends", get(handlers::get_trends))
        .route("/investments", get(handlers::get_investments));

    // Build CORS layer
    let methods = [Method::GET, Method::POST, Method::PUT, Method::OPTIONS];
    let cors = if server_config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = server_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    };

    // Security headers
    let csp_value = HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'");

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

/// Start the server
pub async fn serve(
    snapshot: Option<FinancialSnapshot>,
    config: Config,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    serve_with_config(snapshot, config, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    snapshot: Option<FinancialSnapshot>,
    config: Config,
    host: &str,
    port: u16,
    server_config: ServerConfig,
) -> anyhow::Result<()> {
    match &snapshot {
        Some(s) => info!(
            categories = s.categories.len(),
            assets = s.assets.len(),
            "Serving loaded snapshot"
        ),
        None => info!("No snapshot loaded; waiting for PUT /api/snapshot"),
    }

    let state = Arc::new(AppState::new(snapshot, config));
    let app = create_router(state, server_config);
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
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
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

        // Validation failures from the core are the client's fault
        match err.downcast_ref::<budgetwise_core::Error>() {
            Some(budgetwise_core::Error::InvalidData(msg)) => return Self::bad_request(msg),
            Some(budgetwise_core::Error::NotFound(msg)) => return Self::not_found(msg),
            _ => {}
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
