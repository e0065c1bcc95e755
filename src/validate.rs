//! Input-range validation, decoupled from the stats engine
//!
//! The engine trusts its input and computes over whatever it is given;
//! range checks belong to the ingestion surface. This module reports
//! every issue found instead of stopping at the first, so a caller can
//! show the full list to the user.

use std::fmt;

use crate::models::{DailyRecord, ExercisePlan, Profile};

/// A single validation finding on one field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Field the issue was found on
    pub field: &'static str,

    /// What is wrong with it
    pub reason: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Outcome of validating one entity: empty issue list means valid
pub type ValidationResult = std::result::Result<(), Vec<ValidationIssue>>;

fn check(issues: &mut Vec<ValidationIssue>, ok: bool, field: &'static str, reason: String) {
    if !ok {
        issues.push(ValidationIssue { field, reason });
    }
}

/// Validate a profile's measurements
pub fn validate_profile(profile: &Profile) -> ValidationResult {
    let mut issues = Vec::new();

    check(
        &mut issues,
        !profile.name.trim().is_empty(),
        "name",
        "must not be blank".to_string(),
    );
    check(
        &mut issues,
        profile.height_cm > 0.0,
        "height_cm",
        format!("must be positive, got {}", profile.height_cm),
    );
    check(
        &mut issues,
        profile.weight_kg > 0.0,
        "weight_kg",
        format!("must be positive, got {}", profile.weight_kg),
    );
    check(
        &mut issues,
        profile.target_weight_kg > 0.0,
        "target_weight_kg",
        format!("must be positive, got {}", profile.target_weight_kg),
    );

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate a daily record's hour ranges and weight
pub fn validate_daily_record(record: &DailyRecord) -> ValidationResult {
    let mut issues = Vec::new();

    check(
        &mut issues,
        record.weight_kg > 0.0,
        "weight_kg",
        format!("must be positive, got {}", record.weight_kg),
    );
    check(
        &mut issues,
        (0.0..=24.0).contains(&record.exercise_hours),
        "exercise_hours",
        format!("must be within 0-24, got {}", record.exercise_hours),
    );
    check(
        &mut issues,
        (0.0..=24.0).contains(&record.sleep_hours),
        "sleep_hours",
        format!("must be within 0-24, got {}", record.sleep_hours),
    );

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate an exercise plan's durations
pub fn validate_exercise_plan(plan: &ExercisePlan) -> ValidationResult {
    let mut issues = Vec::new();

    check(
        &mut issues,
        !plan.exercise_types.trim().is_empty(),
        "exercise_types",
        "must name at least one exercise type".to_string(),
    );
    check(
        &mut issues,
        (0.0..=24.0).contains(&plan.planned_hours),
        "planned_hours",
        format!("must be within 0-24, got {}", plan.planned_hours),
    );
    if let Some(actual) = plan.actual_hours {
        check(
            &mut issues,
            (0.0..=24.0).contains(&actual),
            "actual_hours",
            format!("must be within 0-24, got {}", actual),
        );
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
