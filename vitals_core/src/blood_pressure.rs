//! Patient age validation and blood pressure risk triage.

use crate::{AgeConfig, AgeGroup, BloodPressureConfig, Error, Result, RiskLevel};

/// Validate a patient's age and place them in an age group
///
/// Ages outside the configured limits reject the patient.
pub fn validate_age(age: i32, limits: &AgeConfig) -> Result<AgeGroup> {
    if age < limits.min || age > limits.max {
        tracing::warn!("Invalid age: {}", age);
        return Err(Error::Range {
            signal: "age".into(),
            value: f64::from(age),
            min: f64::from(limits.min),
            max: f64::from(limits.max),
        });
    }

    let group = if age < limits.adult {
        AgeGroup::Minor
    } else {
        AgeGroup::Adult
    };
    tracing::debug!("Patient age {} is {}", age, group);
    Ok(group)
}

/// Classify a systolic/diastolic pair into a risk tier
///
/// Negative readings yield `RiskLevel::Invalid` rather than an error.
pub fn classify_blood_pressure(
    systolic: i32,
    diastolic: i32,
    thresholds: &BloodPressureConfig,
) -> RiskLevel {
    if systolic < 0 || diastolic < 0 {
        tracing::warn!("Invalid blood pressure reading {}/{}", systolic, diastolic);
        return RiskLevel::Invalid;
    }

    if systolic > thresholds.systolic_high && diastolic > thresholds.diastolic_high {
        RiskLevel::High
    } else if systolic > thresholds.systolic_medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(systolic: i32, diastolic: i32) -> RiskLevel {
        classify_blood_pressure(systolic, diastolic, &BloodPressureConfig::default())
    }

    #[test]
    fn test_risk_tiers() {
        assert_eq!(bp(160, 100), RiskLevel::High);
        // High systolic alone is only medium
        assert_eq!(bp(160, 90), RiskLevel::Medium);
        assert_eq!(bp(131, 80), RiskLevel::Medium);
        assert_eq!(bp(130, 80), RiskLevel::Normal);
        // Strict comparisons at the high tier
        assert_eq!(bp(150, 96), RiskLevel::Medium);
        assert_eq!(bp(151, 95), RiskLevel::Medium);
    }

    #[test]
    fn test_negative_reading_is_invalid() {
        assert_eq!(bp(-1, 80), RiskLevel::Invalid);
        assert_eq!(bp(120, -5), RiskLevel::Invalid);
        assert_eq!(bp(0, 0), RiskLevel::Normal);
    }

    #[test]
    fn test_validate_age() {
        let limits = AgeConfig::default();
        assert_eq!(validate_age(0, &limits).unwrap(), AgeGroup::Minor);
        assert_eq!(validate_age(17, &limits).unwrap(), AgeGroup::Minor);
        assert_eq!(validate_age(18, &limits).unwrap(), AgeGroup::Adult);
        assert_eq!(validate_age(130, &limits).unwrap(), AgeGroup::Adult);
        assert!(matches!(validate_age(-1, &limits), Err(Error::Range { .. })));
        assert!(validate_age(131, &limits).is_err());
    }
}
