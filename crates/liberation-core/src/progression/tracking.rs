//! # Tracking Status
//!
//! Compares where an alumnus is against where their cohort is expected to be.
//!
//! Two entry points with different contracts:
//! - [`get_tracking_status`] compares two stages and never answers `Unknown`:
//!   missing or incomparable stages are `OffTrack`.
//! - [`calculate_suggested_tracking_status`] evaluates a whole record and
//!   answers `Unknown` when it cannot place the record at all.

use super::stage::{
    calculate_current_stage, college_timeline, employment_timeline, vocation_timeline,
};
use crate::calendar::EvaluationContext;
use crate::path::{classify_path, coerce_path_for_stage};
use crate::types::{AlumniRecord, Path, Stage, TrackingStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// STAGE COMPARISON
// =============================================================================

/// Compare an actual stage against an expected one on `path`.
///
/// | Actual vs expected | Status |
/// |--------------------|--------|
/// | either missing | off-track |
/// | on different ladders after coercion | off-track |
/// | at or beyond | on-track |
/// | one rung behind | near-track |
/// | further behind | off-track |
#[must_use]
pub fn get_tracking_status(
    expected: Option<Stage>,
    actual: Option<Stage>,
    path: Path,
) -> TrackingStatus {
    let (Some(expected), Some(actual)) = (expected, actual) else {
        return TrackingStatus::OffTrack;
    };

    let expected_path = coerce_path_for_stage(path, expected);
    let actual_path = coerce_path_for_stage(path, actual);
    if expected_path != actual_path {
        return TrackingStatus::OffTrack;
    }

    let (Some(expected_index), Some(actual_index)) = (
        expected_path.index_of(expected),
        expected_path.index_of(actual),
    ) else {
        return TrackingStatus::OffTrack;
    };

    if actual_index >= expected_index {
        TrackingStatus::OnTrack
    } else if actual_index.saturating_add(1) == expected_index {
        TrackingStatus::NearTrack
    } else {
        TrackingStatus::OffTrack
    }
}

/// Stage a cohort on `path` is expected to have reached in `college_year`.
#[must_use]
pub fn expected_stage(path: Path, college_year: i32) -> Stage {
    match path {
        Path::College => college_timeline(college_year),
        Path::Vocation => vocation_timeline(college_year),
        Path::Employment => employment_timeline(college_year),
    }
}

// =============================================================================
// RECORD EVALUATION
// =============================================================================

/// Suggested tracking status for a record.
///
/// `Unknown` when no path can be classified or no stage can be placed.
#[must_use]
pub fn calculate_suggested_tracking_status(
    record: &AlumniRecord,
    ctx: &EvaluationContext,
) -> TrackingStatus {
    tracking_for_stage(record, ctx, calculate_current_stage(record, ctx))
}

/// Suggested tracking status if the record were at `actual`.
pub(crate) fn tracking_for_stage(
    record: &AlumniRecord,
    ctx: &EvaluationContext,
    actual: Option<Stage>,
) -> TrackingStatus {
    let (Some(path), Some(actual)) = (classify_path(record), actual) else {
        return TrackingStatus::Unknown;
    };
    let expected = expected_stage(path, ctx.college_year(record.cohort_year));
    get_tracking_status(Some(expected), Some(actual), path)
}

// =============================================================================
// TRACKING SUMMARY
// =============================================================================

/// Status counts over a batch of records, for dashboard rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingSummary {
    pub total: usize,
    pub counts: BTreeMap<TrackingStatus, usize>,
}

impl TrackingSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record's status.
    pub fn record(&mut self, status: TrackingStatus) {
        self.total = self.total.saturating_add(1);
        let count = self.counts.entry(status).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Number of records with `status`.
    #[must_use]
    pub fn count(&self, status: TrackingStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

impl FromIterator<TrackingStatus> for TrackingSummary {
    fn from_iter<I: IntoIterator<Item = TrackingStatus>>(iter: I) -> Self {
        let mut summary = Self::new();
        for status in iter {
            summary.record(status);
        }
        summary
    }
}

// =============================================================================
// TESTS
// =============================================================================
