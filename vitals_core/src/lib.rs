#![forbid(unsafe_code)]

//! Core domain model and calculators for the vitals tools.
//!
//! This crate provides:
//! - Domain types (readings, statuses, drugs, risk levels)
//! - Signal normalization
//! - Vital-status classification with override and logging
//! - Medication dose calculation
//! - Blood pressure triage
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod normalize;
pub mod sink;
pub mod classifier;
pub mod dose;
pub mod blood_pressure;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{
    default_config, AgeConfig, BloodPressureConfig, Config, DosingConfig, LogConfig,
    RangeConfig, ThresholdConfig,
};
pub use normalize::normalize;
pub use sink::{LogRecord, LogSink, MemorySink, TextLogSink};
pub use classifier::{classify, VitalStatusClassifier};
pub use dose::{calc_dose, calc_dose_with};
pub use blood_pressure::{classify_blood_pressure, validate_age};
