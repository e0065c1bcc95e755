//! Threshold classifiers mapping numeric metrics to ordinal grades
//!
//! Every table is evaluated strictest-bound first so the first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade summarizing logging regularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegularityGrade {
    A,
    B,
    C,
    D,
}

impl fmt::Display for RegularityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegularityGrade::A => write!(f, "A"),
            RegularityGrade::B => write!(f, "B"),
            RegularityGrade::C => write!(f, "C"),
            RegularityGrade::D => write!(f, "D"),
        }
    }
}

impl RegularityGrade {
    /// Grade a composite regularity score: A >= 90, B >= 80, C >= 70, else D
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            RegularityGrade::A
        } else if score >= 80.0 {
            RegularityGrade::B
        } else if score >= 70.0 {
            RegularityGrade::C
        } else {
            RegularityGrade::D
        }
    }

    /// Short reading of what the grade means
    pub fn description(&self) -> &'static str {
        match self {
            RegularityGrade::A => "very regular logging habit",
            RegularityGrade::B => "mostly regular logging habit",
            RegularityGrade::C => "somewhat irregular logging habit",
            RegularityGrade::D => "irregular logging habit",
        }
    }
}

/// Quality tier used for frequency and completion readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityTier::Excellent => write!(f, "excellent"),
            QualityTier::Good => write!(f, "good"),
            QualityTier::Fair => write!(f, "fair"),
            QualityTier::Poor => write!(f, "poor"),
        }
    }
}

impl QualityTier {
    /// Tier a percentage: excellent >= 90, good >= 70, fair >= 50, else poor
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            QualityTier::Excellent
        } else if percent >= 70.0 {
            QualityTier::Good
        } else if percent >= 50.0 {
            QualityTier::Fair
        } else {
            QualityTier::Poor
        }
    }
}

/// Composite regularity score from logging behavior over a window
///
/// Weighted blend of record frequency (40%), items per active day scaled
/// against a 3-per-day target (30%) and the trailing streak scaled against
/// a 30-day target (30%). Each sub-term is capped at 100 before weighting,
/// so the score itself stays within 0-100.
pub fn regularity_score(frequency: f64, avg_per_day: f64, consecutive_days: u32) -> f64 {
    let freq_term = frequency.min(100.0).max(0.0);
    let avg_term = (avg_per_day / 3.0 * 100.0).min(100.0).max(0.0);
    let streak_term = (consecutive_days as f64 / 30.0 * 100.0).min(100.0);

    freq_term * 0.4 + avg_term * 0.3 + streak_term * 0.3
}
