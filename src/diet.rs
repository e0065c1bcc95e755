//! Diet record statistics
//!
//! Folds a user's date-ascending diet records into meal-slot counters,
//! a food-preference distribution and logging-regularity figures, then
//! runs the diet recommendation rules over the result.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    clip_window, consecutive_day_streak, food_tokens, meal_logged, Distribution, RangeSummary,
};
use crate::grading::{regularity_score, QualityTier, RegularityGrade};
use crate::metrics::{average_per_day, frequency};
use crate::models::DietRecord;

/// Logged-meal counts per slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealCompletion {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
}

impl MealCompletion {
    /// Total logged meal slots across the window
    pub fn total(&self) -> u32 {
        self.breakfast + self.lunch + self.dinner
    }

    /// Most logged slot name, ties broken in slot order
    /// (breakfast, lunch, dinner)
    pub fn most_logged(&self) -> Option<&'static str> {
        if self.total() == 0 {
            return None;
        }
        let mut best = ("breakfast", self.breakfast);
        if self.lunch > best.1 {
            best = ("lunch", self.lunch);
        }
        if self.dinner > best.1 {
            best = ("dinner", self.dinner);
        }
        Some(best.0)
    }
}

/// Derived diet statistics for one user over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietStats {
    /// User the stats were computed for
    pub user: String,

    /// Total diet records in the window
    pub total_records: u32,

    /// Distinct days with a record
    pub days_with_records: u32,

    /// Percentage of window days with a record (0 when window empty)
    pub record_frequency: f64,

    /// Logged-meal counts per slot
    pub meal_completion: MealCompletion,

    /// Occurrences per food token
    pub food_distribution: Distribution,

    /// Trailing consecutive-day streak of record days
    pub consecutive_days: u32,

    /// Average logged meals per active day
    pub avg_meals_per_day: f64,

    /// Regularity grade from the composite logging score
    pub regularity_grade: RegularityGrade,

    /// Advisory strings from the diet rule set
    pub recommendations: Vec<String>,

    /// Window start (earliest record when no explicit window)
    pub window_start: Option<NaiveDate>,

    /// Window end (latest record when no explicit window)
    pub window_end: Option<NaiveDate>,

    /// When this result was computed
    pub computed_at: DateTime<Utc>,
}

impl DietStats {
    /// Frequency figure with its quality tier, e.g. "85.7% (good)"
    pub fn frequency_summary(&self) -> String {
        format!(
            "{:.1}% ({})",
            self.record_frequency,
            QualityTier::from_percent(self.record_frequency)
        )
    }

    /// Regularity grade with its reading, e.g. "A - very regular logging habit"
    pub fn regularity_summary(&self) -> String {
        format!(
            "{} - {}",
            self.regularity_grade,
            self.regularity_grade.description()
        )
    }

    /// Most preferred food token, ties broken alphabetically
    pub fn favorite_food(&self) -> Option<&str> {
        self.food_distribution.top().map(|(label, _)| label)
    }
}

/// Compute diet statistics from a date-ascending record sequence
///
/// Pure over its inputs apart from the embedded computation timestamp.
/// An empty sequence degrades to zeroed figures, empty distributions and
/// a single "no data yet" recommendation.
pub fn compute_diet_stats(
    user: &str,
    records: &[DietRecord],
    window: Option<(NaiveDate, NaiveDate)>,
) -> DietStats {
    // Out-of-window records must not reach any aggregate
    let records = clip_window(records, |r| r.date, window);
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    let range = RangeSummary::from_dates(&dates, window);

    let mut meal_completion = MealCompletion::default();
    let mut food_distribution = Distribution::new();

    for record in records {
        for (slot, content) in record.meals() {
            if !meal_logged(content) {
                continue;
            }
            match slot {
                "breakfast" => meal_completion.breakfast += 1,
                "lunch" => meal_completion.lunch += 1,
                _ => meal_completion.dinner += 1,
            }
            for token in food_tokens(content) {
                food_distribution.record(token);
            }
        }
    }

    let record_frequency = frequency(range.active_days, range.total_days);
    let avg_meals_per_day =
        average_per_day(meal_completion.total() as f64, range.active_days);
    let consecutive_days = consecutive_day_streak(&dates);
    let score = regularity_score(record_frequency, avg_meals_per_day, consecutive_days);

    let stats = DietStats {
        user: user.to_string(),
        total_records: records.len() as u32,
        days_with_records: range.active_days,
        record_frequency,
        meal_completion,
        food_distribution,
        consecutive_days,
        avg_meals_per_day,
        regularity_grade: RegularityGrade::from_score(score),
        recommendations: Vec::new(),
        window_start: window.map(|(s, _)| s).or(range.earliest),
        window_end: window.map(|(_, e)| e).or(range.latest),
        computed_at: Utc::now(),
    };

    let recommendations = generate_recommendations(&stats);
    DietStats {
        recommendations,
        ..stats
    }
}

/// Evaluate the diet rule set in declared order
fn generate_recommendations(stats: &DietStats) -> Vec<String> {
    if stats.total_records == 0 {
        return vec![
            "No diet records yet - log your first meal to start tracking".to_string(),
        ];
    }

    let mut recommendations = Vec::new();

    if stats.record_frequency < 70.0 {
        recommendations.push(
            "Diet logging frequency is below 70% - try to log every day".to_string(),
        );
    }

    if stats.avg_meals_per_day < 2.0 {
        recommendations.push(
            "Fewer than 2 meals logged per day on average - log more meals per day".to_string(),
        );
    }

    if stats.consecutive_days < 7 {
        recommendations.push(
            "Logging streak is under a week - log for at least one consecutive week".to_string(),
        );
    }

    if stats.food_distribution.distinct() < 5 {
        recommendations.push(
            "Fewer than 5 distinct foods recorded - increase food variety".to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push("Diet logging looks great - keep the habit going".to_string());
    }

    recommendations
}
