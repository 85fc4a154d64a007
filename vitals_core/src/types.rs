//! Core domain types for the vitals tools.
//!
//! This module defines the fundamental types used throughout the system:
//! - Readings and their normalized form
//! - Classification status and options
//! - Drugs for dose calculation
//! - Blood pressure risk levels and age groups

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ============================================================================
// Readings
// ============================================================================

/// A single heart rate / SpO2 reading
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    /// Heart rate in beats per minute
    pub heart_rate: f64,
    /// Peripheral oxygen saturation in percent
    pub spo2: f64,
}

impl Reading {
    pub fn new(heart_rate: f64, spo2: f64) -> Self {
        Self { heart_rate, spo2 }
    }
}

/// Inclusive bounds used to rescale a signal into [0, 1]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct NormalizationRange {
    pub min: f64,
    pub max: f64,
}

impl NormalizationRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Default heart rate bounds, in bpm
    pub const HEART_RATE: Self = Self::new(40.0, 180.0);

    /// Default SpO2 bounds, in percent
    pub const SPO2: Self = Self::new(0.0, 100.0);
}

/// Both signals of a reading rescaled into [0, 1]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct NormalizedReading {
    pub heart_rate: f64,
    pub spo2: f64,
}

// ============================================================================
// Classification
// ============================================================================

/// Outcome of a vital-status classification
///
/// `Override` carries an operator-supplied status verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Severe,
    Critical,
    Error,
    Override(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Severe => "SEVERE",
            Status::Critical => "CRITICAL",
            Status::Error => "ERROR",
            Status::Override(s) => s,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Per-call switches for classification
#[derive(Clone, Debug)]
pub struct ClassifyOptions {
    /// Append a record to the log sink
    pub log: bool,
    /// Operator status returned instead of the computed one
    pub override_status: Option<String>,
    /// Emit trace lines before and after classification
    pub verbose: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            log: true,
            override_status: None,
            verbose: false,
        }
    }
}

impl ClassifyOptions {
    /// Options with logging switched off
    pub fn quiet() -> Self {
        Self {
            log: false,
            ..Self::default()
        }
    }

    /// The override, if one was given and is non-empty
    pub fn effective_override(&self) -> Option<&str> {
        self.override_status.as_deref().filter(|s| !s.is_empty())
    }
}

/// Full result of classifying a numeric reading
#[derive(Clone, Debug, Serialize)]
pub struct Assessment {
    pub reading: Reading,
    pub normalized: NormalizedReading,
    pub status: Status,
}

// ============================================================================
// Dosing
// ============================================================================

/// Drugs known to the dose table
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Drug {
    DrugA,
    DrugB,
    DrugC,
}

impl Drug {
    pub const ALL: [Drug; 3] = [Drug::DrugA, Drug::DrugB, Drug::DrugC];

    /// Dose rate in mg per kg of body weight
    pub fn mg_per_kg(self) -> f64 {
        match self {
            Drug::DrugA => 2.0,
            Drug::DrugB => 0.5,
            Drug::DrugC => 1.2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Drug::DrugA => "DRUG_A",
            Drug::DrugB => "DRUG_B",
            Drug::DrugC => "DRUG_C",
        }
    }
}

impl FromStr for Drug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Drug::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown drug name: {}", s)))
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Blood pressure triage
// ============================================================================

/// Blood pressure risk tier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Invalid,
    Normal,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Invalid => "INVALID",
            RiskLevel::Normal => "NORMAL",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// Age bracket of a validated patient
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Minor,
    Adult,
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeGroup::Minor => f.write_str("minor"),
            AgeGroup::Adult => f.write_str("adult"),
        }
    }
}
