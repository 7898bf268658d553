//! # Innate Primitives
//!
//! Hardcoded reference values for the progression engine.
//!
//! These are the defaults behind [`crate::EngineConfig`]. A deployment may
//! override the median and the cutoff month; the ladders and the timeline
//! boundaries are fixed.

/// National median annual income in whole dollars.
///
/// Every income threshold (above-median, 75/50/25 percent bins) is a
/// fraction of this figure.
pub const NATIONAL_MEDIAN_INCOME: u64 = 74_580;

/// First month of the academic year (1-based, June).
///
/// A cohort that graduates high school in year `Y` is in college year 1
/// from June of `Y` until the end of May of `Y + 1`.
pub const ACADEMIC_CUTOFF_MONTH: u32 = 6;

/// Income bins on the employment ladder, as percentages of the median.
///
/// Ordered from highest to lowest; the first bin the salary reaches wins.
pub const INCOME_BIN_PERCENTS: [u64; 4] = [100, 75, 50, 25];

/// College year from which an enrolled student is placed on `yr5-plus`.
pub const FIFTH_YEAR: i32 = 5;

/// Last college year of the `yr5-plus` band on the college timeline.
///
/// Years 5 to 7 stay on `yr5-plus`; year 8 is assumed graduated.
pub const LAST_EXTENDED_YEAR: i32 = 7;
