//! # Record Shapes
//!
//! The alumni record and employment history entries, as supplied by the
//! console. The engine treats them as read-only input.
//!
//! Deserialization is forgiving on purpose of the values, not the shape:
//! an unrecognized enum string or an unparseable date becomes `None`,
//! and `null` in a boolean or list field becomes its default.

use super::{EnrollmentStatus, EntryKind, PathType, Stage, TrackingStatus};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::str::FromStr;

// =============================================================================
// AMOUNT
// =============================================================================

/// A money figure as entered in a form: a JSON number or free text such as
/// `"$80,000"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Amount(String);

impl Amount {
    /// Create an amount from its raw textual form.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw text as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the figure as whole dollars.
    ///
    /// Every non-digit character is stripped before parsing. An empty
    /// result, an overflow, or zero means there is no usable figure.
    #[must_use]
    pub fn whole_dollars(&self) -> Option<u64> {
        let digits: String = self.0.chars().filter(char::is_ascii_digit).collect();
        digits.parse::<u64>().ok().filter(|dollars| *dollars > 0)
    }
}

impl From<&str> for Amount {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for Amount {
    fn from(dollars: u64) -> Self {
        Self(dollars.to_string())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a number or a string holding a money figure")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            // Fractional dollars are dropped before the digit strip so that
            // 80000.5 reads as 80000, not 800005.
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                Ok(Amount((v as i64).to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

// =============================================================================
// EMPLOYMENT ENTRY
// =============================================================================

/// One job or training stint in an alumnus' employment history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentEntry {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<EntryKind>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_current: bool,
    #[serde(default)]
    pub annual_salary: Option<Amount>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_date: Option<NaiveDate>,
}

impl EmploymentEntry {
    /// A current job paying the given salary.
    #[must_use]
    pub fn current_job(annual_salary: impl Into<Amount>) -> Self {
        Self {
            kind: Some(EntryKind::Job),
            is_current: true,
            annual_salary: Some(annual_salary.into()),
            ..Self::default()
        }
    }

    /// Whether this entry is the alumnus' current job.
    #[must_use]
    pub fn is_current_job(&self) -> bool {
        self.is_current && self.kind == Some(EntryKind::Job)
    }
}

// =============================================================================
// ALUMNI RECORD
// =============================================================================

/// The fields of an alumni record the engine reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniRecord {
    /// Year the alumnus' cohort graduated high school.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cohort_year: i32,

    #[serde(default, deserialize_with = "lenient")]
    pub path_type: Option<PathType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_type_modified: bool,

    /// Only authoritative while `current_stage_modified` is set.
    #[serde(default, deserialize_with = "lenient")]
    pub current_stage: Option<Stage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_stage_modified: bool,

    #[serde(default, deserialize_with = "lenient")]
    pub tracking_status: Option<TrackingStatus>,

    #[serde(default, deserialize_with = "lenient")]
    pub enrollment_status: Option<EnrollmentStatus>,
    #[serde(default)]
    pub college_attending: Option<String>,
    #[serde(default)]
    pub college_attended: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub employed: bool,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub latest_annual_income: Option<Amount>,
    #[serde(default)]
    pub current_salary: Option<Amount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub on_course_economic_liberation: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employment_history: Vec<EmploymentEntry>,

    #[serde(default)]
    pub training_program_name: Option<String>,
    #[serde(default)]
    pub training_degree_certification: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub training_start_date: Option<NaiveDate>,

    /// Last time the record was persisted.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AlumniRecord {
    /// Create an empty record for a cohort.
    #[must_use]
    pub fn new(cohort_year: i32) -> Self {
        Self {
            cohort_year,
            ..Self::default()
        }
    }

    /// Any college field is filled in.
    #[must_use]
    pub fn has_college_data(&self) -> bool {
        self.enrollment_status.is_some()
            || is_filled(self.college_attending.as_deref())
            || is_filled(self.college_attended.as_deref())
    }

    /// A training program is underway or recorded (name or start date).
    #[must_use]
    pub fn has_training_program(&self) -> bool {
        is_filled(self.training_program_name.as_deref()) || self.training_start_date.is_some()
    }

    /// A credential from a training program is recorded.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        is_filled(self.training_degree_certification.as_deref())
    }

    /// Any employment signal: the flag, a salary field, or any history.
    #[must_use]
    pub fn has_employment_data(&self) -> bool {
        self.employed
            || self.current_salary.is_some()
            || self.latest_annual_income.is_some()
            || !self.employment_history.is_empty()
    }

    /// The entry for the alumnus' current job, if any.
    ///
    /// Only the first matching entry is considered.
    #[must_use]
    pub fn current_job(&self) -> Option<&EmploymentEntry> {
        self.employment_history
            .iter()
            .find(|entry| entry.is_current_job())
    }
}

fn is_filled(field: Option<&str>) -> bool {
    field.is_some_and(|value| !value.trim().is_empty())
}

// =============================================================================
// DESERIALIZATION HELPERS
// =============================================================================

/// Parse an optional string field, mapping anything unparseable to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Parse an optional timestamp, mapping anything unparseable to `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// RFC 3339 first, then database-style timestamps. A short offset such as
/// `+00` is accepted; a missing offset means UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];
    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        .map(|instant| instant.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|naive| naive.and_utc())
        })
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// TESTS
// =============================================================================
