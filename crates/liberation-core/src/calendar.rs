//! # Academic Calendar
//!
//! All stage math is anchored on the academic year, which starts in the
//! cutoff month (June by default) rather than in January.
//!
//! An [`EvaluationContext`] freezes "today" and the configuration for one
//! evaluation, so that every helper composed inside a single call sees the
//! same date.

use crate::config::EngineConfig;
use chrono::{DateTime, Datelike, NaiveDate, Utc};

// =============================================================================
// ACADEMIC CALENDAR
// =============================================================================

/// A calendar date viewed through the academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicCalendar {
    today: NaiveDate,
    cutoff_month: u32,
}

impl AcademicCalendar {
    #[must_use]
    pub fn new(today: NaiveDate, cutoff_month: u32) -> Self {
        Self {
            today,
            cutoff_month,
        }
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn cutoff_month(&self) -> u32 {
        self.cutoff_month
    }

    /// Whether today falls on or after the cutoff month of its calendar year.
    #[must_use]
    pub fn is_past_cutoff(&self) -> bool {
        self.today.month() >= self.cutoff_month
    }

    /// Calendar year in which the current academic year started.
    #[must_use]
    pub fn academic_year(&self) -> i32 {
        if self.is_past_cutoff() {
            self.today.year()
        } else {
            self.today.year().saturating_sub(1)
        }
    }

    /// 1-based college year of a cohort that graduated high school in
    /// `cohort_year`. Zero or negative before the cohort has graduated.
    #[must_use]
    pub fn college_year(&self, cohort_year: i32) -> i32 {
        self.academic_year()
            .saturating_sub(cohort_year)
            .saturating_add(1)
    }

    /// Whether an instant precedes the start of the current promotion window.
    ///
    /// Before the cutoff there is no open window, so nothing is stale.
    #[must_use]
    pub fn predates_promotion(&self, instant: DateTime<Utc>) -> bool {
        if !self.is_past_cutoff() {
            return false;
        }
        let year = self.today.year();
        instant.year() < year || (instant.year() == year && instant.month() < self.cutoff_month)
    }
}

// =============================================================================
// EVALUATION CONTEXT
// =============================================================================

/// Everything one evaluation needs besides the record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    pub calendar: AcademicCalendar,
    pub national_median_income: u64,
}

impl EvaluationContext {
    #[must_use]
    pub fn new(today: NaiveDate, config: &EngineConfig) -> Self {
        Self {
            calendar: AcademicCalendar::new(today, config.academic_cutoff_month),
            national_median_income: config.national_median_income,
        }
    }

    /// Context with the default configuration.
    #[must_use]
    pub fn on(today: NaiveDate) -> Self {
        Self::new(today, &EngineConfig::default())
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.calendar.today()
    }

    #[must_use]
    pub fn college_year(&self, cohort_year: i32) -> i32 {
        self.calendar.college_year(cohort_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn academic_year_rolls_over_in_june() {
        assert_eq!(AcademicCalendar::new(date(2024, 5, 31), 6).academic_year(), 2023);
        assert_eq!(AcademicCalendar::new(date(2024, 6, 1), 6).academic_year(), 2024);
    }

    #[test]
    fn first_college_year_starts_the_june_of_graduation() {
        let calendar = AcademicCalendar::new(date(2023, 9, 1), 6);
        assert_eq!(calendar.college_year(2023), 1);
        assert_eq!(calendar.college_year(2024), 0);
    }

    #[test]
    fn promotion_window() {
        let july = AcademicCalendar::new(date(2024, 7, 1), 6);
        let last_may = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).single();
        let this_june = Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).single();
        assert_eq!(last_may.map(|t| july.predates_promotion(t)), Some(true));
        assert_eq!(this_june.map(|t| july.predates_promotion(t)), Some(false));

        let march = AcademicCalendar::new(date(2024, 3, 1), 6);
        assert_eq!(last_may.map(|t| march.predates_promotion(t)), Some(false));
    }
}
