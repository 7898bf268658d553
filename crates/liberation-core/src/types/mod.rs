//! # Core Type Definitions
//!
//! This module contains the closed vocabularies the engine works with:
//! - Internal life paths (`Path`) and the persisted category (`PathType`)
//! - Ladder positions (`Stage`)
//! - Derived comparison results (`TrackingStatus`)
//! - Enrollment states and employment entry kinds
//! - Error types (`ProgressionError`)
//!
//! The record shapes the engine reads live in the `record` submodule.
//!
//! ## Wire Names
//!
//! Every enum serializes with the kebab-case names stored by the admin
//! console (`yr1-enrolled`, `dropped-out`, `on-track`, ...). Each also
//! implements `FromStr` with the same names so callers holding raw strings
//! get a typed value or an error, never a silent default.

mod record;

pub use record::{AlumniRecord, Amount, EmploymentEntry};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// PATHS
// =============================================================================

/// Internal life path the engine places an alumnus on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Path {
    /// Two- or four-year college.
    College,
    /// Trade school, apprenticeship or certificate program.
    Vocation,
    /// Straight into the workforce.
    Employment,
}

impl Path {
    /// Every path, in coercion scan order.
    pub const ALL: [Path; 3] = [Path::College, Path::Vocation, Path::Employment];

    /// Wire name of this path.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Path::College => "college",
            Path::Vocation => "vocation",
            Path::Employment => "employment",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Path::College => "College",
            Path::Vocation => "Vocational Training",
            Path::Employment => "Employment",
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Path {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "college" => Ok(Path::College),
            "vocation" => Ok(Path::Vocation),
            "employment" => Ok(Path::Employment),
            other => Err(ProgressionError::UnknownPath(other.to_string())),
        }
    }
}

/// Path category as persisted on the alumni record.
///
/// Uses the console's vocabulary, which differs from [`Path`]. See
/// [`PathType::to_path`] for the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathType {
    College,
    Work,
    Training,
    Military,
    Other,
}

impl PathType {
    /// Wire name of this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PathType::College => "college",
            PathType::Work => "work",
            PathType::Training => "training",
            PathType::Military => "military",
            PathType::Other => "other",
        }
    }
}

impl FromStr for PathType {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "college" => Ok(PathType::College),
            "work" => Ok(PathType::Work),
            "training" => Ok(PathType::Training),
            "military" => Ok(PathType::Military),
            "other" => Ok(PathType::Other),
            other => Err(ProgressionError::UnknownPath(other.to_string())),
        }
    }
}

// =============================================================================
// STAGES
// =============================================================================

/// A position on one (or more) of the path ladders.
///
/// `Employed` and `AboveMedian` appear on several ladders; the other stages
/// belong to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "yr1-enrolled")]
    Yr1Enrolled,
    #[serde(rename = "yr2")]
    Yr2,
    #[serde(rename = "yr3")]
    Yr3,
    #[serde(rename = "yr4")]
    Yr4,
    #[serde(rename = "yr5-plus")]
    Yr5Plus,
    #[serde(rename = "graduated")]
    Graduated,
    #[serde(rename = "employed")]
    Employed,
    #[serde(rename = "above-median")]
    AboveMedian,
    #[serde(rename = "in-program")]
    InProgram,
    #[serde(rename = "credentialed")]
    Credentialed,
    #[serde(rename = "25-percent")]
    Percent25,
    #[serde(rename = "50-percent")]
    Percent50,
    #[serde(rename = "75-percent")]
    Percent75,
}

impl Stage {
    /// Every stage, in declaration order.
    pub const ALL: [Stage; 13] = [
        Stage::Yr1Enrolled,
        Stage::Yr2,
        Stage::Yr3,
        Stage::Yr4,
        Stage::Yr5Plus,
        Stage::Graduated,
        Stage::Employed,
        Stage::AboveMedian,
        Stage::InProgram,
        Stage::Credentialed,
        Stage::Percent25,
        Stage::Percent50,
        Stage::Percent75,
    ];

    /// Wire name of this stage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Yr1Enrolled => "yr1-enrolled",
            Stage::Yr2 => "yr2",
            Stage::Yr3 => "yr3",
            Stage::Yr4 => "yr4",
            Stage::Yr5Plus => "yr5-plus",
            Stage::Graduated => "graduated",
            Stage::Employed => "employed",
            Stage::AboveMedian => "above-median",
            Stage::InProgram => "in-program",
            Stage::Credentialed => "credentialed",
            Stage::Percent25 => "25-percent",
            Stage::Percent50 => "50-percent",
            Stage::Percent75 => "75-percent",
        }
    }

    /// Label shown next to progress bars.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Yr1Enrolled => "Year 1 (Enrolled)",
            Stage::Yr2 => "Year 2",
            Stage::Yr3 => "Year 3",
            Stage::Yr4 => "Year 4",
            Stage::Yr5Plus => "Year 5+",
            Stage::Graduated => "Graduated",
            Stage::Employed => "Employed",
            Stage::AboveMedian => "Above Median Income",
            Stage::InProgram => "In Program",
            Stage::Credentialed => "Credentialed",
            Stage::Percent25 => "25% of Median",
            Stage::Percent50 => "50% of Median",
            Stage::Percent75 => "75% of Median",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| ProgressionError::UnknownStage(s.to_string()))
    }
}

// =============================================================================
// TRACKING STATUS
// =============================================================================

/// How an alumnus' actual stage compares with the stage expected for their
/// cohort.
///
/// `Unknown` means "cannot evaluate"; `OffTrack` means "evaluated and behind".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingStatus {
    OnTrack,
    NearTrack,
    OffTrack,
    Unknown,
}

impl TrackingStatus {
    /// Wire name of this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStatus::OnTrack => "on-track",
            TrackingStatus::NearTrack => "near-track",
            TrackingStatus::OffTrack => "off-track",
            TrackingStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingStatus {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-track" => Ok(TrackingStatus::OnTrack),
            "near-track" => Ok(TrackingStatus::NearTrack),
            "off-track" => Ok(TrackingStatus::OffTrack),
            "unknown" => Ok(TrackingStatus::Unknown),
            other => Err(ProgressionError::UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// ENROLLMENT & EMPLOYMENT
// =============================================================================

/// College enrollment state recorded by tutors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrollmentStatus {
    Enrolled,
    Graduated,
    DroppedOut,
    Transferred,
    GapYear,
    Deferred,
}

impl FromStr for EnrollmentStatus {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enrolled" => Ok(EnrollmentStatus::Enrolled),
            "graduated" => Ok(EnrollmentStatus::Graduated),
            "dropped-out" => Ok(EnrollmentStatus::DroppedOut),
            "transferred" => Ok(EnrollmentStatus::Transferred),
            "gap-year" => Ok(EnrollmentStatus::GapYear),
            "deferred" => Ok(EnrollmentStatus::Deferred),
            other => Err(ProgressionError::UnknownStatus(other.to_string())),
        }
    }
}

/// Kind of an employment history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    #[default]
    Job,
    Training,
}

impl FromStr for EntryKind {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job" => Ok(EntryKind::Job),
            "training" => Ok(EntryKind::Training),
            other => Err(ProgressionError::UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur around the progression engine.
///
/// The engine's derivations never fail; these cover parsing raw strings,
/// validating configuration, and the I/O performed by hosts.
#[derive(Debug, Error)]
pub enum ProgressionError {
    /// A path name outside both path vocabularies.
    #[error("Unknown path: {0}")]
    UnknownPath(String),

    /// A stage name that appears on no ladder.
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// An unrecognized tracking, enrollment or entry status.
    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    /// Engine configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
