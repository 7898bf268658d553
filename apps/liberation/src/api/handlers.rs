//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        AutoUpdateRequest, AutoUpdateResponse, EvaluateRequest, EvaluateResponse, HealthResponse,
        PathsResponse, TrackingRequest, TrackingResponse,
    },
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use liberation_core::{Evaluation, get_tracking_status};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PATHS HANDLER
// =============================================================================

/// List every path with its ladder.
pub async fn paths_handler() -> impl IntoResponse {
    Json(PathsResponse::default())
}

// =============================================================================
// EVALUATE HANDLER
// =============================================================================

/// Evaluate one record.
pub async fn evaluate_handler(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> impl IntoResponse {
    let ctx = match request.today() {
        Ok(Some(date)) => state.engine.context_on(date),
        Ok(None) => state.engine.context(),
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(EvaluateResponse::error(format!("Invalid request: {}", e))),
            );
        }
    };

    let evaluation = Evaluation::of(&request.record, &ctx);
    tracing::debug!(
        cohort_year = request.record.cohort_year,
        path = ?evaluation.path,
        stage = ?evaluation.stage,
        status = %evaluation.tracking_status,
        "Evaluated record"
    );

    (StatusCode::OK, Json(EvaluateResponse::success(evaluation)))
}

// =============================================================================
// TRACKING HANDLER
// =============================================================================

/// Compare two stages on a path.
pub async fn tracking_handler(Json(request): Json<TrackingRequest>) -> impl IntoResponse {
    let tracking_status = get_tracking_status(request.expected, request.actual, request.path);
    Json(TrackingResponse { tracking_status })
}

// =============================================================================
// AUTO-UPDATE HANDLER
// =============================================================================

/// Gate and update a batch of records.
///
/// Only records that pass the bulk gate carry an update; the caller persists
/// those and nothing else.
pub async fn auto_update_handler(
    State(state): State<AppState>,
    Json(request): Json<AutoUpdateRequest>,
) -> impl IntoResponse {
    let ctx = match request.validate() {
        Ok(Some(date)) => state.engine.context_on(date),
        Ok(None) => state.engine.context(),
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AutoUpdateResponse::error(format!("Invalid request: {}", e))),
            );
        }
    };

    let (outcomes, summary) = state.engine.run_batch(&request.records, &ctx);
    let due = outcomes.iter().filter(|o| o.due).count();
    tracing::info!(
        records = request.records.len(),
        due,
        evaluated_on = %ctx.today(),
        "Auto-update batch evaluated"
    );

    (
        StatusCode::OK,
        Json(AutoUpdateResponse::success(ctx.today(), outcomes, summary)),
    )
}
