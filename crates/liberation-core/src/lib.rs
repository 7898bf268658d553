//! # liberation-core
//!
//! The alumni progression engine for Liberation - THE RULES.
//!
//! Given a plain alumni record, the engine derives:
//! - the life path the alumnus is on (college, vocation, employment),
//! - the stage reached on that path's ladder,
//! - a tracking status comparing that stage with the cohort's expected stage,
//! - whether the yearly automatic advancement is due.
//!
//! ## Architectural Constraints
//!
//! - Pure: no I/O, no async, no shared mutable state
//! - Clock-injected: "today" enters through [`Clock`] or an explicit
//!   [`EvaluationContext`], read once per top-level call
//! - Total: every operation returns a value; "cannot tell" is `None` or
//!   [`TrackingStatus::Unknown`], never a panic

// =============================================================================
// MODULES
// =============================================================================

pub mod calendar;
pub mod clock;
pub mod config;
pub mod engine;
pub mod path;
pub mod primitives;
pub mod progression;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AlumniRecord, Amount, EmploymentEntry, EnrollmentStatus, EntryKind, Path, PathType,
    ProgressionError, Stage, TrackingStatus,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use calendar::{AcademicCalendar, EvaluationContext};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{BatchOutcome, Evaluation, ProgressionEngine};
pub use path::{classify_path, coerce_path_for_stage, infer_path};

// =============================================================================
// RE-EXPORTS: Progression (from progression module)
// =============================================================================

pub use progression::{
    AutoUpdate, StageResolution, TrackingSummary, calculate_auto_stage, calculate_auto_update,
    calculate_current_stage, calculate_suggested_tracking_status, expected_stage,
    get_tracking_status, resolve_annual_salary, resolve_stage_and_path, should_auto_advance_stage,
    should_auto_update, stage_percent,
};
