//! # Path Classification
//!
//! Maps the persisted path category onto the engine's three internal paths,
//! infers a path for records that have none, and owns the stage ladders.
//!
//! ## Ladders
//!
//! | Path | Stages (ordered) |
//! |------|------------------|
//! | college | yr1-enrolled, yr2, yr3, yr4, yr5-plus, graduated, employed, above-median |
//! | vocation | in-program, credentialed, employed, above-median |
//! | employment | 25-percent, 50-percent, 75-percent, above-median |

use crate::types::{AlumniRecord, Path, PathType, Stage};

// =============================================================================
// STAGE LADDERS
// =============================================================================

/// College ladder.
pub const COLLEGE_STAGES: [Stage; 8] = [
    Stage::Yr1Enrolled,
    Stage::Yr2,
    Stage::Yr3,
    Stage::Yr4,
    Stage::Yr5Plus,
    Stage::Graduated,
    Stage::Employed,
    Stage::AboveMedian,
];

/// Vocational training ladder.
pub const VOCATION_STAGES: [Stage; 4] = [
    Stage::InProgram,
    Stage::Credentialed,
    Stage::Employed,
    Stage::AboveMedian,
];

/// Straight-to-work ladder, binned by income against the median.
pub const EMPLOYMENT_STAGES: [Stage; 4] = [
    Stage::Percent25,
    Stage::Percent50,
    Stage::Percent75,
    Stage::AboveMedian,
];

impl Path {
    /// The ordered stages of this path.
    #[must_use]
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Path::College => &COLLEGE_STAGES,
            Path::Vocation => &VOCATION_STAGES,
            Path::Employment => &EMPLOYMENT_STAGES,
        }
    }

    /// Whether `stage` is on this path's ladder.
    #[must_use]
    pub fn contains(&self, stage: Stage) -> bool {
        self.stages().contains(&stage)
    }

    /// Ordinal of `stage` on this path's ladder.
    #[must_use]
    pub fn index_of(&self, stage: Stage) -> Option<usize> {
        self.stages().iter().position(|s| *s == stage)
    }

    /// The rung after `stage`, if `stage` is on this ladder and not the top.
    #[must_use]
    pub fn next_stage(&self, stage: Stage) -> Option<Stage> {
        let index = self.index_of(stage)?;
        self.stages().get(index.saturating_add(1)).copied()
    }

    /// Persisted category to store for an inferred path.
    #[must_use]
    pub fn to_path_type(&self) -> PathType {
        match self {
            Path::College => PathType::College,
            Path::Vocation => PathType::Training,
            Path::Employment => PathType::Work,
        }
    }
}

impl PathType {
    /// Internal path for a persisted category.
    ///
    /// Total: military and other are both treated as employment.
    #[must_use]
    pub fn to_path(&self) -> Path {
        match self {
            PathType::College => Path::College,
            PathType::Training => Path::Vocation,
            PathType::Work | PathType::Military | PathType::Other => Path::Employment,
        }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Resolve the internal path of a record.
///
/// A persisted `path_type` always wins. Otherwise the first matching rule
/// applies: college data, then training data, then employment data.
/// `None` means there is not enough data; callers must not default a path.
#[must_use]
pub fn classify_path(record: &AlumniRecord) -> Option<Path> {
    if let Some(path_type) = record.path_type {
        return Some(path_type.to_path());
    }
    infer_path(record)
}

/// Infer a path from the record's fields alone, ignoring `path_type`.
#[must_use]
pub fn infer_path(record: &AlumniRecord) -> Option<Path> {
    if record.has_college_data() {
        Some(Path::College)
    } else if record.has_training_program() || record.has_credential() {
        Some(Path::Vocation)
    } else if record.has_employment_data() {
        Some(Path::Employment)
    } else {
        None
    }
}

// =============================================================================
// COERCION
// =============================================================================

/// Pick the path a stage should be displayed or compared on.
///
/// Keeps `fallback` when its ladder holds `stage`; otherwise the first of
/// college, vocation, employment that does. If no ladder holds it the
/// fallback is returned unchanged.
#[must_use]
pub fn coerce_path_for_stage(fallback: Path, stage: Stage) -> Path {
    if fallback.contains(stage) {
        return fallback;
    }
    Path::ALL
        .into_iter()
        .find(|path| path.contains(stage))
        .unwrap_or(fallback)
}

// =============================================================================
// TESTS
// =============================================================================
