//! Vital-status classification.
//!
//! A reading is normalized against the configured ranges and run through a
//! tiered threshold policy, first match wins:
//!
//! 1. normalized HR above the critical gate and normalized SpO2 below its
//!    gate → CRITICAL
//! 2. normalized HR above the warning gate and raw SpO2 or raw HR past the
//!    severe cutoffs → SEVERE
//! 3. normalized HR above the warning gate → WARNING
//! 4. otherwise → OK
//!
//! Tiers 2 and 3 share the normalized gate and then refine on raw values.

use crate::normalize::normalize_reading;
use crate::{
    default_config, Assessment, ClassifyOptions, Config, LogRecord, LogSink,
    NormalizedReading, RangeConfig, Reading, Result, Status, TextLogSink, ThresholdConfig,
};

/// Apply the threshold policy to an already normalized reading
pub fn status_for(
    reading: Reading,
    normalized: NormalizedReading,
    thresholds: &ThresholdConfig,
) -> Status {
    if normalized.heart_rate > thresholds.critical_norm_hr
        && normalized.spo2 < thresholds.critical_norm_spo2
    {
        Status::Critical
    } else if normalized.heart_rate > thresholds.warning_norm_hr {
        if reading.spo2 < thresholds.severe_spo2 || reading.heart_rate > thresholds.severe_hr {
            Status::Severe
        } else {
            Status::Warning
        }
    } else {
        Status::Ok
    }
}

/// Parse a vital value supplied as text
///
/// Returns `None` for anything that is not a finite number.
pub fn parse_vital(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Classifier bound to a threshold policy and a log sink
pub struct VitalStatusClassifier<S: LogSink = TextLogSink> {
    ranges: RangeConfig,
    thresholds: ThresholdConfig,
    sink: S,
}

impl VitalStatusClassifier<TextLogSink> {
    /// Classifier with the given policy, logging to the configured file
    pub fn from_config(config: &Config) -> Self {
        Self::with_sink(config, TextLogSink::new(&config.log.path))
    }
}

impl Default for VitalStatusClassifier<TextLogSink> {
    fn default() -> Self {
        Self::from_config(default_config())
    }
}

impl<S: LogSink> VitalStatusClassifier<S> {
    pub fn with_sink(config: &Config, sink: S) -> Self {
        Self {
            ranges: config.ranges.clone(),
            thresholds: config.thresholds.clone(),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Classify a numeric reading and return only the status
    ///
    /// Non-finite input yields `Status::Error`. Out-of-range input is
    /// rejected with a range error, even when an override is supplied.
    pub fn classify(&mut self, hr: f64, spo2: f64, options: &ClassifyOptions) -> Result<Status> {
        if !hr.is_finite() || !spo2.is_finite() {
            if options.verbose {
                tracing::info!("Analyzing vital data: HR={}, SpO2={}", hr, spo2);
            }
            return Ok(Self::invalid_input());
        }

        let assessment = self.assess(Reading::new(hr, spo2), options)?;
        Ok(assessment.status)
    }

    /// Classify vitals supplied as text, such as CLI arguments or form fields
    pub fn classify_input(
        &mut self,
        hr: &str,
        spo2: &str,
        options: &ClassifyOptions,
    ) -> Result<Status> {
        match (parse_vital(hr), parse_vital(spo2)) {
            (Some(hr), Some(spo2)) => self.classify(hr, spo2, options),
            _ => {
                if options.verbose {
                    tracing::info!("Analyzing vital data: HR={}, SpO2={}", hr, spo2);
                }
                Ok(Self::invalid_input())
            }
        }
    }

    /// Classify a numeric reading, returning the intermediate values as well
    ///
    /// Unlike [`classify`](Self::classify), non-finite values are not
    /// softened here and fail the range check.
    pub fn assess(&mut self, reading: Reading, options: &ClassifyOptions) -> Result<Assessment> {
        if options.verbose {
            tracing::info!(
                "Analyzing vital data: HR={}, SpO2={}",
                reading.heart_rate,
                reading.spo2
            );
        }

        let normalized = normalize_reading(reading, &self.ranges)?;

        let status = match options.effective_override() {
            Some(manual) => {
                tracing::debug!("Status overridden to {:?}", manual);
                Status::Override(manual.to_string())
            }
            None => status_for(reading, normalized, &self.thresholds),
        };

        if options.log {
            let record = LogRecord {
                reading,
                normalized,
                status: status.clone(),
            };
            if let Err(e) = self.sink.append(&record) {
                tracing::error!("Error writing to log file: {}", e);
            }
        }

        if options.verbose {
            tracing::info!("Status is: {}", status);
        }

        Ok(Assessment {
            reading,
            normalized,
            status,
        })
    }

    fn invalid_input() -> Status {
        tracing::error!("Error: Invalid input types for HR or SpO2");
        Status::Error
    }
}

/// Classify with the default policy, logging to `vitals_log.txt` when enabled
pub fn classify(hr: f64, spo2: f64, options: &ClassifyOptions) -> Result<Status> {
    VitalStatusClassifier::<TextLogSink>::default().classify(hr, spo2, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MemorySink, NormalizationRange};

    fn memory_classifier() -> VitalStatusClassifier<MemorySink> {
        VitalStatusClassifier::with_sink(&Config::default(), MemorySink::default())
    }

    fn quiet(hr: f64, spo2: f64) -> Status {
        memory_classifier()
            .classify(hr, spo2, &ClassifyOptions::quiet())
            .unwrap()
    }

    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_critical() {
        assert_eq!(quiet(160.0, 25.0), Status::Critical);
    }

    #[test]
    fn test_warning_when_severe_cutoffs_not_met() {
        assert_eq!(quiet(150.0, 95.0), Status::Warning);
        assert_eq!(quiet(100.0, 98.0), Status::Warning);
    }

    #[test]
    fn test_severe_on_low_raw_spo2() {
        // normHR ~0.57 is under the critical gate, raw SpO2 87 < 88
        assert_eq!(quiet(120.0, 87.0), Status::Severe);
        // normHR ~0.86 with normSpO2 0.5 misses CRITICAL, falls to SEVERE
        assert_eq!(quiet(160.0, 50.0), Status::Severe);
    }

    #[test]
    fn test_severe_on_high_raw_hr() {
        let mut config = Config::default();
        config.ranges.heart_rate = NormalizationRange::new(40.0, 250.0);
        let mut classifier = VitalStatusClassifier::with_sink(&config, MemorySink::default());

        let status = classifier
            .classify(210.0, 95.0, &ClassifyOptions::quiet())
            .unwrap();
        assert_eq!(status, Status::Severe);
    }

    #[test]
    fn test_high_raw_hr_rejected_by_default_range() {
        let result = memory_classifier().classify(210.0, 95.0, &ClassifyOptions::quiet());
        assert!(matches!(result, Err(Error::Range { .. })));
    }

    #[test]
    fn test_warning_gate_is_strict() {
        // (96 - 40) / 140 == 0.4 exactly
        assert_eq!(crate::normalize::normalize(96.0, 40.0, 180.0).unwrap(), 0.4);
        assert_eq!(quiet(96.0, 98.0), Status::Ok);
        assert_eq!(quiet(60.0, 20.0), Status::Ok);
    }

    #[test]
    fn test_override_returned_and_logged() {
        let mut classifier = memory_classifier();
        let options = ClassifyOptions {
            override_status: Some("MANUAL_HOLD".into()),
            ..ClassifyOptions::default()
        };

        let status = classifier.classify(160.0, 25.0, &options).unwrap();
        assert_eq!(status.to_string(), "MANUAL_HOLD");

        let records = &classifier.sink().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, Status::Override("MANUAL_HOLD".into()));
        assert_eq!(records[0].normalized.spo2, 0.25);
    }

    #[test]
    fn test_empty_override_falls_through() {
        let options = ClassifyOptions {
            log: false,
            override_status: Some(String::new()),
            verbose: false,
        };
        let status = memory_classifier().classify(160.0, 25.0, &options).unwrap();
        assert_eq!(status, Status::Critical);
    }

    #[test]
    fn test_override_does_not_bypass_range_check() {
        let options = ClassifyOptions {
            log: false,
            override_status: Some("MANUAL_HOLD".into()),
            verbose: false,
        };
        assert!(memory_classifier().classify(999.0, -3.0, &options).is_err());
    }

    #[test]
    fn test_non_numeric_input_is_soft_error() {
        let mut classifier = memory_classifier();
        let options = ClassifyOptions::default();

        assert_eq!(
            classifier.classify_input("abc", "95", &options).unwrap(),
            Status::Error
        );
        assert_eq!(
            classifier.classify(f64::NAN, 95.0, &options).unwrap(),
            Status::Error
        );
        assert!(classifier.sink().records.is_empty());
    }

    #[test]
    fn test_classify_input_parses_numbers() {
        let status = memory_classifier()
            .classify_input(" 160 ", "25.0", &ClassifyOptions::quiet())
            .unwrap();
        assert_eq!(status, Status::Critical);
        assert_eq!(parse_vital("inf"), None);
        assert_eq!(parse_vital("98.5"), Some(98.5));
    }

    #[test]
    fn test_sink_failure_does_not_change_status() {
        crate::logging::init_test();
        let mut classifier = VitalStatusClassifier::with_sink(&Config::default(), BrokenSink);
        let status = classifier
            .classify(160.0, 25.0, &ClassifyOptions::default())
            .unwrap();
        assert_eq!(status, Status::Critical);
    }

    #[test]
    fn test_logging_disabled_is_idempotent() {
        let mut classifier = memory_classifier();
        let options = ClassifyOptions {
            verbose: true,
            ..ClassifyOptions::quiet()
        };

        let first = classifier.classify(130.0, 92.0, &options).unwrap();
        for _ in 0..5 {
            assert_eq!(classifier.classify(130.0, 92.0, &options).unwrap(), first);
        }
        assert!(classifier.sink().records.is_empty());
    }

    #[test]
    fn test_default_policy_entry_point() {
        assert_eq!(
            classify(160.0, 25.0, &ClassifyOptions::quiet()).unwrap(),
            Status::Critical
        );
        assert!(classify(39.0, 95.0, &ClassifyOptions::quiet()).is_err());
    }

    #[test]
    fn test_text_sink_receives_formatted_line() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.log.path = temp_dir.path().join("vitals_log.txt");

        let mut classifier = VitalStatusClassifier::from_config(&config);
        let assessment = classifier
            .assess(Reading::new(110.0, 50.0), &ClassifyOptions::default())
            .unwrap();
        assert_eq!(assessment.status, Status::Severe);

        let contents = std::fs::read_to_string(&config.log.path).unwrap();
        assert_eq!(
            contents,
            "HR=110, SpO2=50, NormHR=0.50, NormSpO2=0.50, STATUS=SEVERE\n"
        );
    }
}
