//! Configuration file support for the vitals tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/vitals/config.toml`.
//! Every section is optional; missing values fall back to the hospital
//! policy defaults below.

use crate::{Error, NormalizationRange, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cached default configuration, shared by callers that never load a file
static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Get a reference to the cached default configuration
pub fn default_config() -> &'static Config {
    &DEFAULT_CONFIG
}

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub ranges: RangeConfig,

    #[serde(default)]
    pub thresholds: ThresholdConfig,

    #[serde(default)]
    pub dosing: DosingConfig,

    #[serde(default)]
    pub blood_pressure: BloodPressureConfig,

    #[serde(default)]
    pub age: AgeConfig,
}

/// Classification log sink configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: PathBuf,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            enabled: true,
        }
    }
}

/// Normalization bounds per signal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RangeConfig {
    #[serde(default = "default_hr_range")]
    pub heart_rate: NormalizationRange,

    #[serde(default = "default_spo2_range")]
    pub spo2: NormalizationRange,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            heart_rate: default_hr_range(),
            spo2: default_spo2_range(),
        }
    }
}

/// Tiered status thresholds
///
/// The `critical_*` and `warning_*` values apply to normalized readings,
/// the `severe_*` values to raw ones.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ThresholdConfig {
    #[serde(default = "default_critical_norm_hr")]
    pub critical_norm_hr: f64,

    #[serde(default = "default_critical_norm_spo2")]
    pub critical_norm_spo2: f64,

    #[serde(default = "default_warning_norm_hr")]
    pub warning_norm_hr: f64,

    #[serde(default = "default_severe_spo2")]
    pub severe_spo2: f64,

    #[serde(default = "default_severe_hr")]
    pub severe_hr: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            critical_norm_hr: default_critical_norm_hr(),
            critical_norm_spo2: default_critical_norm_spo2(),
            warning_norm_hr: default_warning_norm_hr(),
            severe_spo2: default_severe_spo2(),
            severe_hr: default_severe_hr(),
        }
    }
}

/// Pediatric dose adjustment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DosingConfig {
    #[serde(default = "default_minor_age_threshold")]
    pub minor_age_threshold: f64,

    #[serde(default = "default_minor_dose_factor")]
    pub minor_dose_factor: f64,
}

impl Default for DosingConfig {
    fn default() -> Self {
        Self {
            minor_age_threshold: default_minor_age_threshold(),
            minor_dose_factor: default_minor_dose_factor(),
        }
    }
}

/// Blood pressure risk thresholds, in mmHg
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BloodPressureConfig {
    #[serde(default = "default_systolic_high")]
    pub systolic_high: i32,

    #[serde(default = "default_diastolic_high")]
    pub diastolic_high: i32,

    #[serde(default = "default_systolic_medium")]
    pub systolic_medium: i32,
}

impl Default for BloodPressureConfig {
    fn default() -> Self {
        Self {
            systolic_high: default_systolic_high(),
            diastolic_high: default_diastolic_high(),
            systolic_medium: default_systolic_medium(),
        }
    }
}

/// Accepted patient ages, in years
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AgeConfig {
    #[serde(default = "default_min_age")]
    pub min: i32,

    #[serde(default = "default_max_age")]
    pub max: i32,

    #[serde(default = "default_adult_age")]
    pub adult: i32,
}

impl Default for AgeConfig {
    fn default() -> Self {
        Self {
            min: default_min_age(),
            max: default_max_age(),
            adult: default_adult_age(),
        }
    }
}

// Default value functions
fn default_log_path() -> PathBuf {
    PathBuf::from("vitals_log.txt")
}

fn default_true() -> bool {
    true
}

fn default_hr_range() -> NormalizationRange {
    NormalizationRange::HEART_RATE
}

fn default_spo2_range() -> NormalizationRange {
    NormalizationRange::SPO2
}

fn default_critical_norm_hr() -> f64 {
    0.7
}

fn default_critical_norm_spo2() -> f64 {
    0.3
}

fn default_warning_norm_hr() -> f64 {
    0.4
}

fn default_severe_spo2() -> f64 {
    88.0
}

fn default_severe_hr() -> f64 {
    200.0
}

fn default_minor_age_threshold() -> f64 {
    12.0
}

fn default_minor_dose_factor() -> f64 {
    0.8
}

fn default_systolic_high() -> i32 {
    150
}

fn default_diastolic_high() -> i32 {
    95
}

fn default_systolic_medium() -> i32 {
    130
}

fn default_min_age() -> i32 {
    0
}

fn default_max_age() -> i32 {
    130
}

fn default_adult_age() -> i32 {
    18
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("vitals").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Reject settings that would make the calculators ill-defined
    pub fn validate(&self) -> Result<()> {
        for (name, range) in [
            ("ranges.heart_rate", &self.ranges.heart_rate),
            ("ranges.spo2", &self.ranges.spo2),
        ] {
            if range.min == range.max {
                return Err(Error::Config(format!(
                    "{}: min and max cannot be equal ({})",
                    name, range.min
                )));
            }
            if range.min > range.max {
                return Err(Error::Config(format!(
                    "{}: min {} is greater than max {}",
                    name, range.min, range.max
                )));
            }
        }

        if self.age.min > self.age.max {
            return Err(Error::Config(format!(
                "age: min {} is greater than max {}",
                self.age.min, self.age.max
            )));
        }

        if !(0.0..=1.0).contains(&self.dosing.minor_dose_factor) {
            return Err(Error::Config(format!(
                "dosing.minor_dose_factor must be within [0, 1], got {}",
                self.dosing.minor_dose_factor
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log.path, PathBuf::from("vitals_log.txt"));
        assert!(config.log.enabled);
        assert_eq!(config.ranges.heart_rate, NormalizationRange::new(40.0, 180.0));
        assert_eq!(config.ranges.spo2, NormalizationRange::new(0.0, 100.0));
        assert_eq!(config.thresholds.critical_norm_hr, 0.7);
        assert_eq!(config.thresholds.warning_norm_hr, 0.4);
        assert_eq!(config.thresholds.severe_spo2, 88.0);
        assert_eq!(config.thresholds.severe_hr, 200.0);
        assert_eq!(config.blood_pressure.systolic_high, 150);
        assert!(config.validate().is_ok());
        assert_eq!(default_config(), &config);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[thresholds]
severe_hr = 190

[ranges]
heart_rate = { min = 30, max = 220 }
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.thresholds.severe_hr, 190.0);
        assert_eq!(config.thresholds.severe_spo2, 88.0); // default
        assert_eq!(config.ranges.heart_rate.max, 220.0);
        assert_eq!(config.ranges.spo2, NormalizationRange::SPO2);
    }

    #[test]
    fn test_degenerate_range_rejected() {
        let toml_str = r#"
[ranges]
spo2 = { min = 50, max = 50 }
"#;
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, toml_str).unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.log.enabled = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.log.enabled);
    }
}
