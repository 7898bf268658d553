//! # Auto-Advancement
//!
//! Decides whether a record is due for its yearly automatic promotion, and
//! computes what such a promotion would write back.
//!
//! A record is promoted at most once per academic year: the first time it is
//! touched on or after the cutoff month, provided it was last persisted before
//! that cutoff. Records never persisted are always due.
//!
//! Two gates exist because path and stage can be frozen independently:
//! - [`should_auto_advance_stage`] guards stage recalculation on save;
//! - [`should_auto_update`] guards the bulk suggestion run, which also writes
//!   the path, and so additionally respects `path_type_modified`.

use super::stage::calculate_auto_stage;
use super::tracking::tracking_for_stage;
use crate::calendar::EvaluationContext;
use crate::path::infer_path;
use crate::types::{AlumniRecord, PathType, Stage, TrackingStatus};
use serde::{Deserialize, Serialize};

// =============================================================================
// GATES
// =============================================================================

/// Whether the stage of `record` should be recalculated automatically.
#[must_use]
pub fn should_auto_advance_stage(record: &AlumniRecord, ctx: &EvaluationContext) -> bool {
    if record.current_stage_modified {
        return false;
    }
    match record.updated_at {
        None => true,
        Some(updated_at) => ctx.calendar.predates_promotion(updated_at),
    }
}

/// Whether the bulk run should write suggestions for `record`.
#[must_use]
pub fn should_auto_update(record: &AlumniRecord, ctx: &EvaluationContext) -> bool {
    !record.path_type_modified && should_auto_advance_stage(record, ctx)
}

// =============================================================================
// AUTO UPDATE
// =============================================================================

/// Fields an automatic update would write. `None` leaves a field unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoUpdate {
    /// Inferred category, only for records with no path type and no override.
    pub path_type: Option<PathType>,
    /// Recalculated stage; withheld while a manual stage is in force
    /// (the modified flag set and a stage present).
    pub current_stage: Option<Stage>,
    pub tracking_status: TrackingStatus,
}

/// Compute the automatic update for a record.
///
/// Pure: it does not consult the gates. Callers run [`should_auto_update`]
/// first and persist only when it allows.
#[must_use]
pub fn calculate_auto_update(record: &AlumniRecord, ctx: &EvaluationContext) -> AutoUpdate {
    let path_type = if !record.path_type_modified && record.path_type.is_none() {
        infer_path(record).map(|path| path.to_path_type())
    } else {
        None
    };

    let (current_stage, effective_stage) = match record.current_stage {
        Some(manual) if record.current_stage_modified => (None, Some(manual)),
        _ => {
            let stage = calculate_auto_stage(record, ctx);
            (stage, stage)
        }
    };

    AutoUpdate {
        path_type,
        current_stage,
        tracking_status: tracking_for_stage(record, ctx, effective_stage),
    }
}

// =============================================================================
// TESTS
// =============================================================================
