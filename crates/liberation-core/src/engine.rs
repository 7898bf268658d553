//! # Progression Engine
//!
//! Facade over the pure functions in [`crate::progression`] that owns a
//! [`Clock`] and an [`EngineConfig`].
//!
//! Each public method reads the clock exactly once and builds a single
//! [`EvaluationContext`] for the whole call, so composed helpers never see
//! two different dates.

use crate::calendar::EvaluationContext;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::path::classify_path;
use crate::progression::{
    AutoUpdate, StageResolution, TrackingSummary, calculate_auto_update,
    calculate_current_stage, calculate_suggested_tracking_status, expected_stage,
    resolve_stage_and_path, should_auto_advance_stage, should_auto_update, stage_percent,
};
use crate::types::{AlumniRecord, Path, ProgressionError, Stage, TrackingStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// EVALUATION
// =============================================================================

/// Every derived field for one record, computed against one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub evaluated_on: NaiveDate,
    pub college_year: i32,
    pub path: Option<Path>,
    pub stage: Option<Stage>,
    pub stage_index: usize,
    pub expected_stage: Option<Stage>,
    pub next_stage: Option<Stage>,
    /// Share of the ladder completed, in `[0, 1]`.
    pub percent_complete: f64,
    pub tracking_status: TrackingStatus,
    pub should_auto_advance: bool,
    pub should_auto_update: bool,
}

impl Evaluation {
    /// Evaluate a record against a fixed context.
    #[must_use]
    pub fn of(record: &AlumniRecord, ctx: &EvaluationContext) -> Self {
        let college_year = ctx.college_year(record.cohort_year);
        let resolution = resolve_stage_and_path(record, ctx);
        let path = resolution.map(|r| r.path);
        let stage = resolution.and_then(|r| r.stage);

        Self {
            evaluated_on: ctx.today(),
            college_year,
            path,
            stage,
            stage_index: resolution.map(|r| r.stage_index).unwrap_or(0),
            expected_stage: classify_path(record).map(|p| expected_stage(p, college_year)),
            next_stage: path.zip(stage).and_then(|(p, s)| p.next_stage(s)),
            percent_complete: path
                .zip(stage)
                .map(|(p, s)| stage_percent(p, s))
                .unwrap_or(0.0),
            tracking_status: calculate_suggested_tracking_status(record, ctx),
            should_auto_advance: should_auto_advance_stage(record, ctx),
            should_auto_update: should_auto_update(record, ctx),
        }
    }
}

/// Result of gating and updating one record in a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub due: bool,
    /// Present only when `due`.
    pub update: Option<AutoUpdate>,
}

// =============================================================================
// ENGINE
// =============================================================================

/// The progression engine bound to a clock.
#[derive(Debug, Clone)]
pub struct ProgressionEngine<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
}

impl Default for ProgressionEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionEngine<SystemClock> {
    /// Engine on the system clock with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> ProgressionEngine<C> {
    /// Engine with a specific clock and a validated configuration.
    pub fn with_clock(clock: C, config: EngineConfig) -> Result<Self, ProgressionError> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Freeze the clock for one evaluation.
    #[must_use]
    pub fn context(&self) -> EvaluationContext {
        self.context_on(self.clock.today())
    }

    /// Context for an explicit date, bypassing the clock.
    #[must_use]
    pub fn context_on(&self, today: NaiveDate) -> EvaluationContext {
        EvaluationContext::new(today, &self.config)
    }

    #[must_use]
    pub fn calculate_current_stage(&self, record: &AlumniRecord) -> Option<Stage> {
        calculate_current_stage(record, &self.context())
    }

    #[must_use]
    pub fn resolve_stage_and_path(&self, record: &AlumniRecord) -> Option<StageResolution> {
        resolve_stage_and_path(record, &self.context())
    }

    #[must_use]
    pub fn suggested_tracking_status(&self, record: &AlumniRecord) -> TrackingStatus {
        calculate_suggested_tracking_status(record, &self.context())
    }

    #[must_use]
    pub fn should_auto_advance_stage(&self, record: &AlumniRecord) -> bool {
        should_auto_advance_stage(record, &self.context())
    }

    #[must_use]
    pub fn should_auto_update(&self, record: &AlumniRecord) -> bool {
        should_auto_update(record, &self.context())
    }

    #[must_use]
    pub fn calculate_auto_update(&self, record: &AlumniRecord) -> AutoUpdate {
        calculate_auto_update(record, &self.context())
    }

    /// Every derived field for one record.
    #[must_use]
    pub fn evaluate(&self, record: &AlumniRecord) -> Evaluation {
        Evaluation::of(record, &self.context())
    }

    /// Gate and update a batch of records against one shared date.
    ///
    /// The summary counts the suggested status of every record, due or not.
    #[must_use]
    pub fn run_batch(
        &self,
        records: &[AlumniRecord],
        ctx: &EvaluationContext,
    ) -> (Vec<BatchOutcome>, TrackingSummary) {
        let mut summary = TrackingSummary::new();
        let outcomes = records
            .iter()
            .map(|record| {
                let due = should_auto_update(record, ctx);
                let update = due.then(|| calculate_auto_update(record, ctx));
                summary.record(
                    update
                        .map(|u| u.tracking_status)
                        .unwrap_or_else(|| calculate_suggested_tracking_status(record, ctx)),
                );
                BatchOutcome { due, update }
            })
            .collect();
        (outcomes, summary)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::types::{EnrollmentStatus, PathType};

    fn engine_on(y: i32, m: u32, d: u32) -> ProgressionEngine<FixedClock> {
        let date = NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
        ProgressionEngine::with_clock(FixedClock::on(date), EngineConfig::default())
            .expect("default config is valid")
    }

    fn enrolled(cohort_year: i32) -> AlumniRecord {
        AlumniRecord {
            path_type: Some(PathType::College),
            enrollment_status: Some(EnrollmentStatus::Enrolled),
            ..AlumniRecord::new(cohort_year)
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let config = EngineConfig {
            academic_cutoff_month: 0,
            ..EngineConfig::default()
        };
        assert!(ProgressionEngine::with_clock(SystemClock, config).is_err());
    }

    #[test]
    fn evaluation_of_second_year_student() {
        let engine = engine_on(2024, 7, 1);
        let evaluation = engine.evaluate(&enrolled(2023));

        assert_eq!(evaluation.college_year, 2);
        assert_eq!(evaluation.path, Some(Path::College));
        assert_eq!(evaluation.stage, Some(Stage::Yr2));
        assert_eq!(evaluation.stage_index, 1);
        assert_eq!(evaluation.expected_stage, Some(Stage::Yr2));
        assert_eq!(evaluation.next_stage, Some(Stage::Yr3));
        assert_eq!(evaluation.tracking_status, TrackingStatus::OnTrack);
        assert!(evaluation.should_auto_advance);
        assert!(evaluation.percent_complete > 0.0);
    }

    #[test]
    fn custom_cutoff_moves_the_academic_year() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).expect("valid date");
        let config = EngineConfig {
            academic_cutoff_month: 9,
            ..EngineConfig::default()
        };
        let engine =
            ProgressionEngine::with_clock(FixedClock::on(date), config).expect("valid config");
        assert_eq!(
            engine.calculate_current_stage(&enrolled(2023)),
            Some(Stage::Yr1Enrolled)
        );
    }

    #[test]
    fn batch_only_updates_due_records() {
        let engine = engine_on(2024, 7, 1);
        let frozen = AlumniRecord {
            path_type_modified: true,
            ..enrolled(2023)
        };
        let records = vec![enrolled(2023), frozen, AlumniRecord::new(2023)];

        let (outcomes, summary) = engine.run_batch(&records, &engine.context());

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].due && outcomes[0].update.is_some());
        assert!(!outcomes[1].due && outcomes[1].update.is_none());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(TrackingStatus::OnTrack), 2);
        assert_eq!(summary.count(TrackingStatus::Unknown), 1);
    }
}
