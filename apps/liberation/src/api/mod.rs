//! # Liberation HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /paths` - Every path with its ordered stages
//! - `POST /evaluate` - Derive path, stage, status and gates for one record
//! - `POST /tracking` - Compare an expected and an actual stage
//! - `POST /auto-update` - Gate and compute automatic updates for a batch
//!
//! The server is stateless: records travel in the request body and nothing
//! is persisted.
//!
//! ## Configuration (Environment Variables)
//!
//! - `LIBERATION_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `liberation::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    auto_update_handler, evaluate_handler, health_handler, paths_handler, tracking_handler,
};
#[allow(unused_imports)]
pub use types::{
    AutoUpdateRequest, AutoUpdateResponse, EvaluateRequest, EvaluateResponse, HealthResponse,
    MAX_BATCH_RECORDS, PathLadder, PathsResponse, StageJson, TrackingRequest, TrackingResponse,
};

pub(crate) use types::parse_today;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use liberation_core::{ProgressionEngine, ProgressionError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the engine.
///
/// The engine is immutable, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ProgressionEngine>,
}

impl AppState {
    /// Create new app state around an engine.
    #[must_use]
    pub fn new(engine: ProgressionEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `LIBERATION_CORS_ORIGINS`:
/// - If "*": allows all origins
/// - If not set: localhost only
/// - Otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("LIBERATION_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (LIBERATION_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in LIBERATION_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No LIBERATION_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = [
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:5173".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:5173".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit - batches are capped at 8 MB
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/paths", get(handlers::paths_handler))
        .route("/evaluate", post(handlers::evaluate_handler))
        .route("/tracking", post(handlers::tracking_handler))
        .route("/auto-update", post(handlers::auto_update_handler))
        .layer(axum::extract::DefaultBodyLimit::max(8 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, engine: ProgressionEngine) -> Result<(), ProgressionError> {
    let state = AppState::new(engine);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ProgressionError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Liberation HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| ProgressionError::IoError(format!("Server error: {}", e)))
}
