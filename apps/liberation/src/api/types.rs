//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use chrono::NaiveDate;
use liberation_core::{
    AlumniRecord, BatchOutcome, Evaluation, Path, ProgressionError, Stage, TrackingStatus,
    TrackingSummary,
};
use serde::{Deserialize, Serialize};

/// Maximum number of records accepted by a single auto-update request.
pub const MAX_BATCH_RECORDS: usize = 10_000;

/// Parse an optional `YYYY-MM-DD` evaluation date.
///
/// Shared by the HTTP request types and the CLI `--today` flag.
pub(crate) fn parse_today(today: Option<&str>) -> Result<Option<NaiveDate>, ProgressionError> {
    today
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                ProgressionError::SerializationError(format!("Invalid date '{}': {}", raw, e))
            })
        })
        .transpose()
}

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// PATHS RESPONSE
// =============================================================================

/// One rung of a ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageJson {
    pub stage: Stage,
    pub label: String,
}

/// One path and its ordered ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathLadder {
    pub path: Path,
    pub name: String,
    pub stages: Vec<StageJson>,
}

impl PathLadder {
    pub fn of(path: Path) -> Self {
        Self {
            path,
            name: path.name().to_string(),
            stages: path
                .stages()
                .iter()
                .map(|stage| StageJson {
                    stage: *stage,
                    label: stage.label().to_string(),
                })
                .collect(),
        }
    }
}

/// Every path with its ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsResponse {
    pub paths: Vec<PathLadder>,
}

impl Default for PathsResponse {
    fn default() -> Self {
        Self {
            paths: Path::ALL.into_iter().map(PathLadder::of).collect(),
        }
    }
}

// =============================================================================
// EVALUATE REQUEST/RESPONSE
// =============================================================================

/// Evaluate one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub record: AlumniRecord,
    /// Pin the evaluation date (`YYYY-MM-DD`); defaults to today.
    #[serde(default)]
    pub today: Option<String>,
}

impl EvaluateRequest {
    pub fn today(&self) -> Result<Option<NaiveDate>, ProgressionError> {
        parse_today(self.today.as_deref())
    }
}

/// Evaluation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub success: bool,
    pub evaluation: Option<Evaluation>,
    pub error: Option<String>,
}

impl EvaluateResponse {
    pub fn success(evaluation: Evaluation) -> Self {
        Self {
            success: true,
            evaluation: Some(evaluation),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            evaluation: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// TRACKING REQUEST/RESPONSE
// =============================================================================

/// Compare two stages on a path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingRequest {
    pub expected: Option<Stage>,
    pub actual: Option<Stage>,
    pub path: Path,
}

/// Stage comparison response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingResponse {
    pub tracking_status: TrackingStatus,
}

// =============================================================================
// AUTO-UPDATE REQUEST/RESPONSE
// =============================================================================

/// Gate and update a batch of records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoUpdateRequest {
    pub records: Vec<AlumniRecord>,
    #[serde(default)]
    pub today: Option<String>,
}

impl AutoUpdateRequest {
    /// Validate the batch size and parse the evaluation date.
    pub fn validate(&self) -> Result<Option<NaiveDate>, ProgressionError> {
        if self.records.len() > MAX_BATCH_RECORDS {
            return Err(ProgressionError::SerializationError(format!(
                "Batch of {} records exceeds maximum {}",
                self.records.len(),
                MAX_BATCH_RECORDS
            )));
        }
        parse_today(self.today.as_deref())
    }
}

/// Batch response: one outcome per record, in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoUpdateResponse {
    pub success: bool,
    pub evaluated_on: Option<NaiveDate>,
    pub outcomes: Vec<BatchOutcome>,
    pub summary: TrackingSummary,
    pub error: Option<String>,
}

impl AutoUpdateResponse {
    pub fn success(
        evaluated_on: NaiveDate,
        outcomes: Vec<BatchOutcome>,
        summary: TrackingSummary,
    ) -> Self {
        Self {
            success: true,
            evaluated_on: Some(evaluated_on),
            outcomes,
            summary,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            evaluated_on: None,
            outcomes: Vec::new(),
            summary: TrackingSummary::default(),
            error: Some(msg.into()),
        }
    }
}
