//! Exercise plan statistics
//!
//! Folds a user's date-ascending exercise plans into completion figures,
//! duration totals and type/intensity distributions, then runs the
//! exercise recommendation rules over the result.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    clip_window, completion_counts, consecutive_day_streak, Distribution, RangeSummary,
};
use crate::grading::QualityTier;
use crate::metrics::completion_rate;
use crate::models::ExercisePlan;

/// Derived exercise statistics for one user over a window
///
/// A fresh value object per computation; nothing here refers back to the
/// input plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStats {
    /// User the stats were computed for
    pub user: String,

    /// Total plans in the window
    pub total_plans: u32,

    /// Plans marked completed
    pub completed_plans: u32,

    /// Completion percentage (0 when no plans)
    pub completion_rate: f64,

    /// Sum of exercised hours (actual when recorded, planned otherwise)
    pub total_hours: f64,

    /// Average hours per plan (0 when no plans)
    pub avg_hours: f64,

    /// Occurrences per exercise type
    pub type_distribution: Distribution,

    /// Occurrences per intensity level
    pub intensity_distribution: Distribution,

    /// Distinct days with at least one plan
    pub active_days: u32,

    /// Trailing consecutive-day streak of planned days
    pub consecutive_days: u32,

    /// Most planned exercise types, highest count first
    pub top_types: Vec<String>,

    /// Advisory strings from the exercise rule set
    pub recommendations: Vec<String>,

    /// Window start (earliest plan when no explicit window)
    pub window_start: Option<NaiveDate>,

    /// Window end (latest plan when no explicit window)
    pub window_end: Option<NaiveDate>,

    /// When this result was computed
    pub computed_at: DateTime<Utc>,
}

impl ExerciseStats {
    /// Completion figure with its quality tier, e.g. "75.0% (good)"
    pub fn completion_summary(&self) -> String {
        format!(
            "{:.1}% ({})",
            self.completion_rate,
            QualityTier::from_percent(self.completion_rate)
        )
    }

    /// One-line duration reading for presentation
    pub fn duration_summary(&self) -> String {
        format!(
            "{:.1}h over {} plans (avg {:.1}h)",
            self.total_hours, self.total_plans, self.avg_hours
        )
    }
}

/// Hours attributed to a plan: actual duration when recorded, planned otherwise
fn plan_hours(plan: &ExercisePlan) -> f64 {
    plan.actual_hours.unwrap_or(plan.planned_hours)
}

/// Compute exercise statistics from a date-ascending plan sequence
///
/// Pure over its inputs apart from the embedded computation timestamp.
/// An empty sequence degrades to zeroed figures, empty distributions and
/// a single "no data yet" recommendation.
pub fn compute_exercise_stats(
    user: &str,
    plans: &[ExercisePlan],
    window: Option<(NaiveDate, NaiveDate)>,
) -> ExerciseStats {
    // Out-of-window plans must not reach any aggregate
    let plans = clip_window(plans, |p| p.date, window);
    let dates: Vec<NaiveDate> = plans.iter().map(|p| p.date).collect();
    let range = RangeSummary::from_dates(&dates, window);
    let counts = completion_counts(plans);

    let mut type_distribution = Distribution::new();
    let mut intensity_distribution = Distribution::new();
    let mut total_hours = 0.0;

    for plan in plans {
        for label in plan.type_labels() {
            type_distribution.record(label);
        }
        intensity_distribution.record(plan.intensity.to_string());
        total_hours += plan_hours(plan);
    }

    let rate = completion_rate(counts.completed, counts.total);
    let avg_hours = if counts.total == 0 {
        0.0
    } else {
        total_hours / counts.total as f64
    };
    let top_types = type_distribution
        .top_n(3)
        .into_iter()
        .map(|(label, _)| label)
        .collect();

    let stats = ExerciseStats {
        user: user.to_string(),
        total_plans: counts.total,
        completed_plans: counts.completed,
        completion_rate: rate,
        total_hours,
        avg_hours,
        type_distribution,
        intensity_distribution,
        active_days: range.active_days,
        consecutive_days: consecutive_day_streak(&dates),
        top_types,
        recommendations: Vec::new(),
        window_start: window.map(|(s, _)| s).or(range.earliest),
        window_end: window.map(|(_, e)| e).or(range.latest),
        computed_at: Utc::now(),
    };

    let recommendations = generate_recommendations(&stats);
    ExerciseStats {
        recommendations,
        ..stats
    }
}

/// Evaluate the exercise rule set in declared order
///
/// Every firing rule contributes; when nothing fires a single positive
/// string is emitted instead.
fn generate_recommendations(stats: &ExerciseStats) -> Vec<String> {
    if stats.total_plans == 0 {
        return vec![
            "No exercise plans yet - schedule your first session to start tracking".to_string(),
        ];
    }

    let mut recommendations = Vec::new();

    if stats.completion_rate < 70.0 {
        recommendations.push(
            "Completion rate is below 70% - plan fewer or shorter sessions you can finish"
                .to_string(),
        );
    }

    if stats.avg_hours < 0.5 {
        recommendations
            .push("Average session is under 30 minutes - try longer sessions".to_string());
    }

    if stats.active_days < 3 {
        recommendations
            .push("Fewer than 3 active days - spread sessions across the week".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Exercise habit looks solid - keep it up".to_string());
    }

    recommendations
}
