//! Linear rescaling of bounded physiological signals into [0, 1].

use crate::{Error, NormalizationRange, NormalizedReading, RangeConfig, Reading, Result};

/// Rescale `value` from `[min, max]` into `[0, 1]`
///
/// Fails if the value lies outside the inclusive bounds (NaN included) or if
/// the bounds are equal.
pub fn normalize(value: f64, min: f64, max: f64) -> Result<f64> {
    normalize_signal("value", value, NormalizationRange::new(min, max))
}

/// Same as [`normalize`], naming the signal in the error
pub fn normalize_signal(signal: &str, value: f64, range: NormalizationRange) -> Result<f64> {
    if !(range.min..=range.max).contains(&value) {
        return Err(Error::Range {
            signal: signal.to_string(),
            value,
            min: range.min,
            max: range.max,
        });
    }

    if range.max == range.min {
        return Err(Error::DegenerateRange {
            signal: signal.to_string(),
            bound: range.min,
        });
    }

    Ok((value - range.min) / (range.max - range.min))
}

/// Normalize both signals of a reading against the configured ranges
pub fn normalize_reading(reading: Reading, ranges: &RangeConfig) -> Result<NormalizedReading> {
    Ok(NormalizedReading {
        heart_rate: normalize_signal("heart rate", reading.heart_rate, ranges.heart_rate)?,
        spo2: normalize_signal("SpO2", reading.spo2, ranges.spo2)?,
    })
}
