//! # Engine Configuration
//!
//! The two tunables of the engine: the median income every threshold is a
//! fraction of, and the month the academic year starts. Both default to the
//! values in [`crate::primitives`].
//!
//! Hosts load this from a file of their choosing; the struct derives serde
//! with `#[serde(default)]` so a partial table is valid.

use crate::primitives::{ACADEMIC_CUTOFF_MONTH, NATIONAL_MEDIAN_INCOME};
use crate::types::ProgressionError;
use serde::{Deserialize, Serialize};

/// Tunable reference values for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Median annual income in whole dollars.
    pub national_median_income: u64,
    /// First month of the academic year, 1-based.
    pub academic_cutoff_month: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            national_median_income: NATIONAL_MEDIAN_INCOME,
            academic_cutoff_month: ACADEMIC_CUTOFF_MONTH,
        }
    }
}

impl EngineConfig {
    /// Check that the values can drive the engine.
    pub fn validate(&self) -> Result<(), ProgressionError> {
        if self.national_median_income == 0 {
            return Err(ProgressionError::InvalidConfig(
                "national_median_income must be greater than zero".to_string(),
            ));
        }
        if !(1..=12).contains(&self.academic_cutoff_month) {
            return Err(ProgressionError::InvalidConfig(format!(
                "academic_cutoff_month must be between 1 and 12, got {}",
                self.academic_cutoff_month
            )));
        }
        Ok(())
    }
}
