//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use liberation::api::{
    AutoUpdateRequest, AutoUpdateResponse, EvaluateRequest, EvaluateResponse, HealthResponse,
    MAX_BATCH_RECORDS, PathLadder, PathsResponse, TrackingRequest, TrackingResponse,
};
use liberation_core::{AlumniRecord, Path, Stage, TrackingStatus};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.4.2".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.4.2\""));
}

// =============================================================================
// PATHS RESPONSE TESTS
// =============================================================================

#[test]
fn test_path_ladder_labels() {
    let ladder = PathLadder::of(Path::Vocation);
    assert_eq!(ladder.name, Path::Vocation.name());
    let stages: Vec<Stage> = ladder.stages.iter().map(|s| s.stage).collect();
    assert_eq!(
        stages,
        vec![
            Stage::InProgram,
            Stage::Credentialed,
            Stage::Employed,
            Stage::AboveMedian
        ]
    );
    assert!(ladder.stages.iter().all(|s| !s.label.is_empty()));
}

#[test]
fn test_paths_response_uses_wire_names() {
    let json = serde_json::to_string(&PathsResponse::default()).unwrap();
    assert!(json.contains("\"path\":\"employment\""));
    assert!(json.contains("\"stage\":\"yr5-plus\""));
    assert!(json.contains("\"stage\":\"25-percent\""));
}

// =============================================================================
// EVALUATE REQUEST/RESPONSE TESTS
// =============================================================================

#[test]
fn test_evaluate_request_without_date() {
    let json = r#"{"record":{"cohortYear":2023}}"#;
    let request: EvaluateRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.record.cohort_year, 2023);
    assert_eq!(request.today().unwrap(), None);
}

#[test]
fn test_evaluate_request_parses_date() {
    let json = r#"{"record":{"cohortYear":2023},"today":" 2025-06-01 "}"#;
    let request: EvaluateRequest = serde_json::from_str(json).unwrap();

    let today = request.today().unwrap().unwrap();
    assert_eq!(today.to_string(), "2025-06-01");
}

#[test]
fn test_evaluate_request_rejects_bad_date() {
    let request = EvaluateRequest {
        record: AlumniRecord::new(2023),
        today: Some("2025-13-01".to_string()),
    };
    assert!(request.today().is_err());
}

#[test]
fn test_evaluate_response_error() {
    let response = EvaluateResponse::error("boom");
    assert!(!response.success);
    assert!(response.evaluation.is_none());
    assert_eq!(response.error.as_deref(), Some("boom"));
}

// =============================================================================
// TRACKING REQUEST/RESPONSE TESTS
// =============================================================================

#[test]
fn test_tracking_request_deserialization() {
    let json = r#"{"expected":"50-percent","actual":"25-percent","path":"employment"}"#;
    let request: TrackingRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.expected, Some(Stage::Percent50));
    assert_eq!(request.actual, Some(Stage::Percent25));
    assert_eq!(request.path, Path::Employment);
}

#[test]
fn test_tracking_response_serialization() {
    let response = TrackingResponse {
        tracking_status: TrackingStatus::NearTrack,
    };
    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(json, r#"{"tracking_status":"near-track"}"#);
}

// =============================================================================
// AUTO-UPDATE REQUEST/RESPONSE TESTS
// =============================================================================

#[test]
fn test_auto_update_request_within_limit() {
    let request = AutoUpdateRequest {
        records: vec![AlumniRecord::new(2024); 3],
        today: None,
    };
    assert_eq!(request.validate().unwrap(), None);
}

#[test]
fn test_auto_update_request_over_limit() {
    let request = AutoUpdateRequest {
        records: vec![AlumniRecord::new(2024); MAX_BATCH_RECORDS + 1],
        today: None,
    };
    assert!(request.validate().is_err());
}

#[test]
fn test_auto_update_response_error_is_empty() {
    let response = AutoUpdateResponse::error("bad batch");
    assert!(!response.success);
    assert!(response.evaluated_on.is_none());
    assert!(response.outcomes.is_empty());
    assert_eq!(response.summary.total, 0);
}
