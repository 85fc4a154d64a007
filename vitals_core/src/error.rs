//! Error types for the vitals_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vitals_core operations
///
/// These are the rejecting failures. Soft failures (unreadable vitals,
/// negative blood pressure) are reported through `Status::Error` and
/// `RiskLevel::Invalid` instead and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Value lies outside its physiological bounds
    #[error("Invalid {signal} range: {value} is outside [{min}, {max}]")]
    Range {
        signal: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Normalization range with identical bounds
    #[error("Degenerate {signal} range: min and max cannot be equal ({bound})")]
    DegenerateRange { signal: String, bound: f64 },

    /// Rejected argument (dose calculation, age validation)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
