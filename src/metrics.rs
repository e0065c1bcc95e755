//! Metric primitives for the statistics engine
//!
//! Pure functions over raw numbers: BMI and its category, weight delta,
//! and the zero-guarded rate/average helpers every aggregate builds on.
//! Missing or non-positive inputs degrade to a `0.0` sentinel instead of
//! failing; the engine never rejects input here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BMI categories using the thresholds 18.5 / 24.0 / 28.0
///
/// All comparisons are strict-less-than on the upper bound, so a BMI of
/// exactly 18.5 is `Normal`, 24.0 is `Overweight` and 28.0 is `Obese`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI undefined (height or weight missing/non-positive)
    Undefined,
    /// BMI below 18.5
    Underweight,
    /// BMI in [18.5, 24.0)
    Normal,
    /// BMI in [24.0, 28.0)
    Overweight,
    /// BMI of 28.0 or above
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Undefined => write!(f, "undefined"),
            BmiCategory::Underweight => write!(f, "underweight"),
            BmiCategory::Normal => write!(f, "normal"),
            BmiCategory::Overweight => write!(f, "overweight"),
            BmiCategory::Obese => write!(f, "obese"),
        }
    }
}

impl BmiCategory {
    /// Classify a BMI value
    ///
    /// A BMI of `0.0` (or below) is the "undefined" sentinel produced by
    /// [`compute_bmi`] for missing measurements.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi <= 0.0 {
            BmiCategory::Undefined
        } else if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.0 {
            BmiCategory::Normal
        } else if bmi < 28.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// Compute Body Mass Index from height in centimeters and weight in kilograms
///
/// Returns `0.0` when either operand is non-positive, the sentinel for
/// "undefined" rather than an error.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Weight change over a window: `last - first`
///
/// Positive means gain, negative means loss, exactly zero means stable.
pub fn weight_change(first_kg: f64, last_kg: f64) -> f64 {
    last_kg - first_kg
}

/// Completion rate as a percentage, `0.0` when nothing was planned
pub fn completion_rate(completed: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Record frequency as a percentage of days in the window that have records
pub fn frequency(days_with_records: u32, total_days: u32) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    days_with_records as f64 / total_days as f64 * 100.0
}

/// Average items per active day, `0.0` when there are no active days
pub fn average_per_day(total_items: f64, active_days: u32) -> f64 {
    if active_days == 0 {
        return 0.0;
    }
    total_items / active_days as f64
}
