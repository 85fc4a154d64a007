//! Weight-based medication dose calculation.
//!
//! Dose rules:
//! 1. `dose = weight_kg * mg_per_kg` from the fixed drug table
//! 2. Patients younger than the minor threshold (default 12) get a reduced
//!    dose (default factor 0.8)
//! 3. Result is rounded to 2 decimals, exact ties to even
//!
//! No allergy or interaction checks are performed.

use crate::{default_config, DosingConfig, Drug, Error, Result};

/// Calculate a dose in mg with the default dosing policy
///
/// `urgent` is accepted for call compatibility and currently has no effect.
pub fn calc_dose(weight_kg: f64, age_years: f64, drug_name: &str, urgent: bool) -> Result<f64> {
    calc_dose_with(&default_config().dosing, weight_kg, age_years, drug_name, urgent)
}

/// Calculate a dose in mg with an explicit dosing policy
pub fn calc_dose_with(
    policy: &DosingConfig,
    weight_kg: f64,
    age_years: f64,
    drug_name: &str,
    _urgent: bool,
) -> Result<f64> {
    // Negated comparisons so NaN is rejected too
    if !(weight_kg > 0.0) {
        return Err(Error::InvalidArgument("Weight must be positive".into()));
    }

    if !(age_years >= 0.0) {
        return Err(Error::InvalidArgument("Age cannot be negative".into()));
    }

    let drug: Drug = drug_name.parse()?;

    let mut dose = weight_kg * drug.mg_per_kg();

    if age_years < policy.minor_age_threshold {
        dose *= policy.minor_dose_factor;
        tracing::debug!(
            "Applied minor dose factor {} for age {}",
            policy.minor_dose_factor,
            age_years
        );
    }

    Ok(round_to_cents(dose))
}

/// Round to 2 decimals, exact ties going to the even cent
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
