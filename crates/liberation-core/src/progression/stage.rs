//! # Stage Resolution
//!
//! Places an alumnus on a rung of their path's ladder.
//!
//! ## Precedence
//!
//! 1. A manual override (`current_stage_modified` with a stage set) is
//!    returned verbatim.
//! 2. Otherwise the path is classified and the per-path rules below apply,
//!    driven by the college year of the cohort.
//!
//! ## College
//!
//! | Condition | Stage |
//! |-----------|-------|
//! | enrolled | by college year: yr1-enrolled .. yr5-plus |
//! | graduated, employed | above-median if on course or income > median, else employed |
//! | graduated, not employed | graduated |
//! | dropped out, in a training program | in-program |
//! | dropped out, employed | employed |
//! | anything else | college timeline |
//!
//! ## Vocation
//!
//! Credential recorded: employed / above-median / credentialed. Program
//! recorded: in-program. Otherwise the vocation timeline.
//!
//! ## Employment
//!
//! Binned by annual salary against the median. Unemployed alumni with no
//! salary are not placed (`None`).

use crate::calendar::EvaluationContext;
use crate::path::{classify_path, coerce_path_for_stage};
use crate::primitives::{FIFTH_YEAR, INCOME_BIN_PERCENTS, LAST_EXTENDED_YEAR};
use crate::types::{AlumniRecord, Amount, EnrollmentStatus, Path, Stage};
use serde::{Deserialize, Serialize};

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Current stage of a record, honoring a manual override.
#[must_use]
pub fn calculate_current_stage(record: &AlumniRecord, ctx: &EvaluationContext) -> Option<Stage> {
    if record.current_stage_modified
        && let Some(stage) = record.current_stage
    {
        return Some(stage);
    }
    calculate_auto_stage(record, ctx)
}

/// Stage the rules would assign, ignoring any manual override.
#[must_use]
pub fn calculate_auto_stage(record: &AlumniRecord, ctx: &EvaluationContext) -> Option<Stage> {
    let path = classify_path(record)?;
    stage_on_path(path, record, ctx)
}

/// Apply one path's rules to a record.
#[must_use]
pub fn stage_on_path(path: Path, record: &AlumniRecord, ctx: &EvaluationContext) -> Option<Stage> {
    let college_year = ctx.college_year(record.cohort_year);
    match path {
        Path::College => Some(college_stage(
            college_year,
            record,
            ctx.national_median_income,
        )),
        Path::Vocation => Some(vocation_stage(college_year, record)),
        Path::Employment => employment_stage(record, ctx.national_median_income),
    }
}

// =============================================================================
// COLLEGE
// =============================================================================

fn college_stage(college_year: i32, record: &AlumniRecord, median: u64) -> Stage {
    match record.enrollment_status {
        Some(EnrollmentStatus::Enrolled) => enrolled_stage(college_year),
        Some(EnrollmentStatus::Graduated) => {
            if !record.employed {
                Stage::Graduated
            } else if record.on_course_economic_liberation
                || latest_income(record).is_some_and(|income| income > median)
            {
                Stage::AboveMedian
            } else {
                Stage::Employed
            }
        }
        Some(EnrollmentStatus::DroppedOut) if record.has_training_program() => Stage::InProgram,
        Some(EnrollmentStatus::DroppedOut) if record.employed => Stage::Employed,
        _ => college_timeline(college_year),
    }
}

fn enrolled_stage(college_year: i32) -> Stage {
    match college_year {
        ..=1 => Stage::Yr1Enrolled,
        2 => Stage::Yr2,
        3 => Stage::Yr3,
        4 => Stage::Yr4,
        _ => Stage::Yr5Plus,
    }
}

/// Where a college-bound cohort is expected to be in a given year.
pub(crate) fn college_timeline(college_year: i32) -> Stage {
    match college_year {
        year if year < FIFTH_YEAR => enrolled_stage(year),
        year if year <= LAST_EXTENDED_YEAR => Stage::Yr5Plus,
        8 => Stage::Graduated,
        9 => Stage::Employed,
        _ => Stage::AboveMedian,
    }
}

fn latest_income(record: &AlumniRecord) -> Option<u64> {
    record
        .latest_annual_income
        .as_ref()
        .and_then(Amount::whole_dollars)
}

// =============================================================================
// VOCATION
// =============================================================================

fn vocation_stage(college_year: i32, record: &AlumniRecord) -> Stage {
    if record.has_credential() {
        match (record.employed, record.on_course_economic_liberation) {
            (true, true) => Stage::AboveMedian,
            (true, false) => Stage::Employed,
            (false, _) => Stage::Credentialed,
        }
    } else if record.has_training_program() {
        Stage::InProgram
    } else {
        vocation_timeline(college_year)
    }
}

/// Where a vocation-bound cohort is expected to be in a given year.
pub(crate) fn vocation_timeline(college_year: i32) -> Stage {
    match college_year {
        ..=1 => Stage::InProgram,
        2 => Stage::Credentialed,
        3 => Stage::Employed,
        _ => Stage::AboveMedian,
    }
}

// =============================================================================
// EMPLOYMENT
// =============================================================================

fn employment_stage(record: &AlumniRecord, median: u64) -> Option<Stage> {
    let binned = resolve_annual_salary(record).and_then(|salary| income_bin(salary, median));
    match binned {
        Some(stage) => Some(stage),
        None if record.employed => Some(Stage::Percent25),
        None => None,
    }
}

/// Where a work-bound cohort is expected to be in a given year.
pub(crate) fn employment_timeline(college_year: i32) -> Stage {
    match college_year {
        ..=1 => Stage::Percent25,
        2 => Stage::Percent50,
        3 => Stage::Percent75,
        _ => Stage::AboveMedian,
    }
}

/// Best available annual salary in whole dollars.
///
/// The current job's salary comes first, then `latest_annual_income`, then
/// `current_salary`. The first usable figure wins.
#[must_use]
pub fn resolve_annual_salary(record: &AlumniRecord) -> Option<u64> {
    record
        .current_job()
        .and_then(|job| job.annual_salary.as_ref())
        .and_then(Amount::whole_dollars)
        .or_else(|| latest_income(record))
        .or_else(|| {
            record
                .current_salary
                .as_ref()
                .and_then(Amount::whole_dollars)
        })
}

/// Highest income bin a salary reaches, or `None` below 25% of the median.
#[must_use]
pub fn income_bin(salary: u64, median: u64) -> Option<Stage> {
    const BIN_STAGES: [Stage; 4] = [
        Stage::AboveMedian,
        Stage::Percent75,
        Stage::Percent50,
        Stage::Percent25,
    ];

    INCOME_BIN_PERCENTS
        .into_iter()
        .zip(BIN_STAGES)
        .find(|(percent, _)| salary.saturating_mul(100) >= median.saturating_mul(*percent))
        .map(|(_, stage)| stage)
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// A stage paired with the path whose ladder it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResolution {
    pub path: Path,
    pub stage: Option<Stage>,
    /// Ordinal of `stage` on `path`'s ladder; 0 when there is no stage.
    pub stage_index: usize,
}

/// Resolve a record's stage and the path to show it on.
///
/// The path is coerced so that the stage always belongs to its ladder.
/// `None` only when neither a path nor a stage can be determined.
#[must_use]
pub fn resolve_stage_and_path(
    record: &AlumniRecord,
    ctx: &EvaluationContext,
) -> Option<StageResolution> {
    let classified = classify_path(record);
    let stage = calculate_current_stage(record, ctx);

    let path = match (classified, stage) {
        (Some(path), Some(stage)) => coerce_path_for_stage(path, stage),
        (None, Some(stage)) => Path::ALL.into_iter().find(|path| path.contains(stage))?,
        (Some(path), None) => path,
        (None, None) => return None,
    };

    Some(StageResolution {
        path,
        stage,
        stage_index: stage.and_then(|s| path.index_of(s)).unwrap_or(0),
    })
}

/// Fraction of `path`'s ladder completed at `stage`, in `[0, 1]`.
///
/// A stage that is not on the ladder counts as the first rung.
#[must_use]
#[allow(clippy::float_arithmetic)]
pub fn stage_percent(path: Path, stage: Stage) -> f64 {
    let stages = path.stages();
    let index = path.index_of(stage).unwrap_or(0);
    let span = stages.len().saturating_sub(1).max(1);
    (index as f64 / span as f64).clamp(0.0, 1.0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::NATIONAL_MEDIAN_INCOME;
    use crate::types::{EmploymentEntry, PathType};
    use chrono::NaiveDate;

    fn ctx(y: i32, m: u32, d: u32) -> EvaluationContext {
        EvaluationContext::on(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
    }

    fn college(cohort_year: i32, status: EnrollmentStatus) -> AlumniRecord {
        AlumniRecord {
            path_type: Some(PathType::College),
            enrollment_status: Some(status),
            ..AlumniRecord::new(cohort_year)
        }
    }

    #[test]
    fn enrolled_second_year_after_cutoff() {
        let record = college(2023, EnrollmentStatus::Enrolled);
        assert_eq!(
            calculate_current_stage(&record, &ctx(2024, 7, 1)),
            Some(Stage::Yr2)
        );
    }

    #[test]
    fn enrolled_before_cutoff_is_still_previous_year() {
        let record = college(2023, EnrollmentStatus::Enrolled);
        assert_eq!(
            calculate_current_stage(&record, &ctx(2024, 5, 31)),
            Some(Stage::Yr1Enrolled)
        );
    }

    #[test]
    fn enrolled_long_term_caps_at_fifth_year() {
        let record = college(2015, EnrollmentStatus::Enrolled);
        assert_eq!(
            calculate_current_stage(&record, &ctx(2024, 9, 1)),
            Some(Stage::Yr5Plus)
        );
    }

    #[test]
    fn override_wins() {
        let record = AlumniRecord {
            current_stage: Some(Stage::Credentialed),
            current_stage_modified: true,
            ..college(2023, EnrollmentStatus::Enrolled)
        };
        assert_eq!(
            calculate_current_stage(&record, &ctx(2024, 7, 1)),
            Some(Stage::Credentialed)
        );
        assert_eq!(
            calculate_auto_stage(&record, &ctx(2024, 7, 1)),
            Some(Stage::Yr2)
        );
    }

    #[test]
    fn stored_stage_without_override_flag_is_ignored() {
        let record = AlumniRecord {
            current_stage: Some(Stage::Yr4),
            ..college(2023, EnrollmentStatus::Enrolled)
        };
        assert_eq!(
            calculate_current_stage(&record, &ctx(2024, 7, 1)),
            Some(Stage::Yr2)
        );
    }

    #[test]
    fn graduate_branches() {
        let today = ctx(2024, 7, 1);
        let mut record = college(2018, EnrollmentStatus::Graduated);
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::Graduated));

        record.employed = true;
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::Employed));

        record.latest_annual_income = Some(Amount::from("74580"));
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::Employed));

        record.latest_annual_income = Some(Amount::from("$74,581"));
        assert_eq!(
            calculate_current_stage(&record, &today),
            Some(Stage::AboveMedian)
        );

        record.latest_annual_income = None;
        record.on_course_economic_liberation = true;
        assert_eq!(
            calculate_current_stage(&record, &today),
            Some(Stage::AboveMedian)
        );
    }

    #[test]
    fn dropout_branches() {
        let today = ctx(2024, 7, 1);
        let mut record = college(2022, EnrollmentStatus::DroppedOut);
        record.employed = true;
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::Employed));

        record.training_program_name = Some("HVAC".to_string());
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::InProgram));

        record.training_program_name = None;
        record.employed = false;
        // Falls through to the timeline: 2024 - 2022 + 1 = 3
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::Yr3));
    }

    #[test]
    fn college_timeline_bands() {
        let expected = [
            (-2, Stage::Yr1Enrolled),
            (1, Stage::Yr1Enrolled),
            (2, Stage::Yr2),
            (3, Stage::Yr3),
            (4, Stage::Yr4),
            (5, Stage::Yr5Plus),
            (7, Stage::Yr5Plus),
            (8, Stage::Graduated),
            (9, Stage::Employed),
            (10, Stage::AboveMedian),
            (25, Stage::AboveMedian),
        ];
        for (year, stage) in expected {
            assert_eq!(college_timeline(year), stage, "college year {year}");
        }
    }

    #[test]
    fn vocation_rules() {
        let today = ctx(2024, 7, 1);
        let mut record = AlumniRecord {
            path_type: Some(PathType::Training),
            ..AlumniRecord::new(2024)
        };
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::InProgram));

        record.cohort_year = 2020;
        assert_eq!(
            calculate_current_stage(&record, &today),
            Some(Stage::AboveMedian)
        );

        record.training_start_date = NaiveDate::from_ymd_opt(2023, 1, 9);
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::InProgram));

        record.training_degree_certification = Some("CDL Class A".to_string());
        assert_eq!(
            calculate_current_stage(&record, &today),
            Some(Stage::Credentialed)
        );

        record.employed = true;
        assert_eq!(calculate_current_stage(&record, &today), Some(Stage::Employed));

        record.on_course_economic_liberation = true;
        assert_eq!(
            calculate_current_stage(&record, &today),
            Some(Stage::AboveMedian)
        );
    }

    #[test]
    fn current_job_salary_above_median() {
        let record = AlumniRecord {
            employed: true,
            employment_history: vec![EmploymentEntry::current_job("80000")],
            ..AlumniRecord::new(2020)
        };
        assert_eq!(
            calculate_current_stage(&record, &ctx(2024, 7, 1)),
            Some(Stage::AboveMedian)
        );
    }

    #[test]
    fn unemployed_worker_is_not_placed() {
        let record = AlumniRecord {
            path_type: Some(PathType::Work),
            ..AlumniRecord::new(2020)
        };
        assert_eq!(calculate_current_stage(&record, &ctx(2024, 7, 1)), None);
    }

    #[test]
    fn employed_without_salary_defaults_to_lowest_bin() {
        let record = AlumniRecord {
            path_type: Some(PathType::Work),
            employed: true,
            current_salary: Some(Amount::from("ask later")),
            ..AlumniRecord::new(2020)
        };
        assert_eq!(
            calculate_current_stage(&record, &ctx(2024, 7, 1)),
            Some(Stage::Percent25)
        );
    }

    #[test]
    fn salary_priority() {
        let mut record = AlumniRecord {
            latest_annual_income: Some(Amount::from("40000")),
            current_salary: Some(Amount::from("60000")),
            employment_history: vec![EmploymentEntry::current_job("n/a")],
            ..AlumniRecord::new(2020)
        };
        assert_eq!(resolve_annual_salary(&record), Some(40_000));

        record.latest_annual_income = None;
        assert_eq!(resolve_annual_salary(&record), Some(60_000));

        record.employment_history = vec![EmploymentEntry::current_job("$58,000")];
        assert_eq!(resolve_annual_salary(&record), Some(58_000));
    }

    #[test]
    fn income_bins_against_median() {
        let median = NATIONAL_MEDIAN_INCOME;
        assert_eq!(income_bin(74_580, median), Some(Stage::AboveMedian));
        assert_eq!(income_bin(74_579, median), Some(Stage::Percent75));
        assert_eq!(income_bin(55_935, median), Some(Stage::Percent75));
        assert_eq!(income_bin(55_934, median), Some(Stage::Percent50));
        assert_eq!(income_bin(37_290, median), Some(Stage::Percent50));
        assert_eq!(income_bin(18_645, median), Some(Stage::Percent25));
        assert_eq!(income_bin(18_644, median), None);
    }

    #[test]
    fn low_salary_unemployed_is_not_placed() {
        let record = AlumniRecord {
            path_type: Some(PathType::Work),
            latest_annual_income: Some(Amount::from("9000")),
            ..AlumniRecord::new(2020)
        };
        assert_eq!(calculate_current_stage(&record, &ctx(2024, 7, 1)), None);
    }

    #[test]
    fn no_path_no_stage() {
        let record = AlumniRecord::new(2022);
        assert_eq!(calculate_current_stage(&record, &ctx(2024, 7, 1)), None);
        assert_eq!(resolve_stage_and_path(&record, &ctx(2024, 7, 1)), None);
    }

    #[test]
    fn resolution_coerces_off_ladder_stage() {
        let record = AlumniRecord {
            employed: false,
            training_program_name: Some("Coding bootcamp".to_string()),
            ..college(2022, EnrollmentStatus::DroppedOut)
        };
        let resolution = resolve_stage_and_path(&record, &ctx(2024, 7, 1));
        assert_eq!(
            resolution,
            Some(StageResolution {
                path: Path::Vocation,
                stage: Some(Stage::InProgram),
                stage_index: 0,
            })
        );
    }

    #[test]
    fn resolution_without_stage_keeps_classified_path() {
        let record = AlumniRecord {
            path_type: Some(PathType::Military),
            ..AlumniRecord::new(2022)
        };
        let resolution = resolve_stage_and_path(&record, &ctx(2024, 7, 1));
        assert_eq!(
            resolution,
            Some(StageResolution {
                path: Path::Employment,
                stage: None,
                stage_index: 0,
            })
        );
    }

    #[test]
    fn resolution_with_override_and_no_path() {
        let record = AlumniRecord {
            current_stage: Some(Stage::Percent50),
            current_stage_modified: true,
            ..AlumniRecord::new(2022)
        };
        let resolution = resolve_stage_and_path(&record, &ctx(2024, 7, 1));
        assert_eq!(resolution.map(|r| (r.path, r.stage_index)), Some((Path::Employment, 1)));
    }

    #[test]
    #[allow(clippy::float_arithmetic, clippy::float_cmp)]
    fn percent_endpoints() {
        assert_eq!(stage_percent(Path::College, Stage::Yr1Enrolled), 0.0);
        assert_eq!(stage_percent(Path::College, Stage::AboveMedian), 1.0);
        assert_eq!(stage_percent(Path::Vocation, Stage::Yr3), 0.0);
        let credentialed = stage_percent(Path::Vocation, Stage::Credentialed);
        assert!((credentialed - 1.0 / 3.0).abs() < 1e-9);
    }
}
