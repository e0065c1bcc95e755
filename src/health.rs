//! Overall health statistics
//!
//! Combines the profile with daily, exercise and diet records into one
//! health summary: BMI and its category, weight trend against the goal,
//! cross-domain completion/frequency figures and a regularity grade,
//! plus the health recommendation rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{clip_window, completion_counts, consecutive_day_streak, RangeSummary};
use crate::grading::{regularity_score, RegularityGrade};
use crate::metrics::{
    average_per_day, completion_rate, compute_bmi, frequency, weight_change, BmiCategory,
};
use crate::models::{DailyRecord, DietRecord, ExercisePlan, Profile};

/// Derived health statistics for one user over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStats {
    /// User the stats were computed for
    pub user: String,

    /// Current BMI, `0.0` when height or weight is missing
    pub bmi: f64,

    /// BMI category for the current BMI
    pub bmi_category: BmiCategory,

    /// Weight change over the window (last - first recorded weight)
    pub weight_change_kg: f64,

    /// Progress toward the target weight as a percentage, clamped to 0-100
    pub goal_progress: f64,

    /// Exercise plan completion percentage over the window
    pub exercise_completion_rate: f64,

    /// Diet record frequency percentage over the window
    pub diet_record_frequency: f64,

    /// Regularity grade from daily-record logging behavior
    pub regularity_grade: RegularityGrade,

    /// Advisory strings from the health rule set
    pub recommendations: Vec<String>,

    /// Window start (earliest daily record when no explicit window)
    pub window_start: Option<NaiveDate>,

    /// Window end (latest daily record when no explicit window)
    pub window_end: Option<NaiveDate>,

    /// When this result was computed
    pub computed_at: DateTime<Utc>,
}

impl HealthStats {
    /// BMI with its category, e.g. "BMI 23.4 (normal)"
    pub fn bmi_summary(&self) -> String {
        format!("BMI {:.1} ({})", self.bmi, self.bmi_category)
    }

    /// Weight trend reading, e.g. "-1.5 kg over the window"
    pub fn weight_summary(&self) -> String {
        if self.weight_change_kg == 0.0 {
            "weight stable over the window".to_string()
        } else {
            format!("{:+.1} kg over the window", self.weight_change_kg)
        }
    }

    /// Goal progress reading, e.g. "goal progress 40% (lose weight)"
    pub fn goal_summary(&self, profile: &Profile) -> String {
        format!("goal progress {:.0}% ({})", self.goal_progress, profile.goal)
    }
}

/// Progress from the first recorded weight toward the target, 0-100
///
/// `achieved / required * 100` with `required = target - first` and
/// `achieved = last - first`. Already at the target reports 100; moving
/// away from it clamps to 0.
fn goal_progress(first_kg: f64, last_kg: f64, target_kg: f64) -> f64 {
    let required = target_kg - first_kg;
    if required == 0.0 {
        return 100.0;
    }
    let achieved = last_kg - first_kg;
    (achieved / required * 100.0).clamp(0.0, 100.0)
}

/// Compute health statistics from a profile and the user's record collections
///
/// All sequences must be date-ascending. Pure over its inputs apart from
/// the embedded computation timestamp; missing measurements degrade to
/// sentinels, never errors.
pub fn compute_health_stats(
    profile: &Profile,
    daily: &[DailyRecord],
    plans: &[ExercisePlan],
    diet: &[DietRecord],
    window: Option<(NaiveDate, NaiveDate)>,
) -> HealthStats {
    // Out-of-window records must not reach any aggregate
    let daily = clip_window(daily, |r| r.date, window);
    let plans = clip_window(plans, |p| p.date, window);
    let diet = clip_window(diet, |r| r.date, window);

    let daily_dates: Vec<NaiveDate> = daily.iter().map(|r| r.date).collect();
    let daily_range = RangeSummary::from_dates(&daily_dates, window);

    // Latest logged weight wins over the (possibly stale) profile weight
    let current_weight = daily.last().map(|r| r.weight_kg).unwrap_or(profile.weight_kg);
    let bmi = compute_bmi(profile.height_cm, current_weight);

    let (change, progress) = match (daily.first(), daily.last()) {
        (Some(first), Some(last)) => (
            weight_change(first.weight_kg, last.weight_kg),
            goal_progress(first.weight_kg, last.weight_kg, profile.target_weight_kg),
        ),
        _ => (0.0, 0.0),
    };

    let plan_counts = completion_counts(plans);
    let exercise_completion = completion_rate(plan_counts.completed, plan_counts.total);

    let diet_dates: Vec<NaiveDate> = diet.iter().map(|r| r.date).collect();
    let diet_range = RangeSummary::from_dates(&diet_dates, window);
    let diet_frequency = frequency(diet_range.active_days, diet_range.total_days);

    let daily_frequency = frequency(daily_range.active_days, daily_range.total_days);
    let records_per_day = average_per_day(daily.len() as f64, daily_range.active_days);
    let streak = consecutive_day_streak(&daily_dates);
    let score = regularity_score(daily_frequency, records_per_day, streak);

    let stats = HealthStats {
        user: profile.name.clone(),
        bmi,
        bmi_category: BmiCategory::from_bmi(bmi),
        weight_change_kg: change,
        goal_progress: progress,
        exercise_completion_rate: exercise_completion,
        diet_record_frequency: diet_frequency,
        regularity_grade: RegularityGrade::from_score(score),
        recommendations: Vec::new(),
        window_start: window.map(|(s, _)| s).or(daily_range.earliest),
        window_end: window.map(|(_, e)| e).or(daily_range.latest),
        computed_at: Utc::now(),
    };

    let no_data = daily.is_empty() && plans.is_empty() && diet.is_empty();
    let recommendations = generate_recommendations(&stats, no_data);
    HealthStats {
        recommendations,
        ..stats
    }
}

/// Evaluate the health rule set in declared order
fn generate_recommendations(stats: &HealthStats, no_data: bool) -> Vec<String> {
    if no_data {
        return vec![
            "No records yet - start with a daily log to build your health picture".to_string(),
        ];
    }

    let mut recommendations = Vec::new();

    match stats.bmi_category {
        BmiCategory::Underweight => recommendations.push(
            "BMI is in the underweight range - consider a higher calorie intake".to_string(),
        ),
        BmiCategory::Overweight | BmiCategory::Obese => recommendations.push(
            "BMI is above the normal range - add regular exercise and watch calorie intake"
                .to_string(),
        ),
        _ => {}
    }

    if stats.exercise_completion_rate < 70.0 {
        recommendations.push(
            "Exercise completion is below 70% - finish more of your planned sessions".to_string(),
        );
    }

    if stats.diet_record_frequency < 70.0 {
        recommendations
            .push("Diet logging is below 70% of days - log meals more often".to_string());
    }

    if matches!(
        stats.regularity_grade,
        RegularityGrade::C | RegularityGrade::D
    ) {
        recommendations
            .push("Logging is irregular - add a daily record at a fixed time".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("All health indicators look good - keep it up".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FitnessGoal, Gender, Intensity, Mood};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn profile() -> Profile {
        Profile {
            name: "alice".to_string(),
            age: 30,
            gender: Gender::Female,
            height_cm: 165.0,
            weight_kg: 62.0,
            target_weight_kg: 58.0,
            goal: FitnessGoal::LoseWeight,
        }
    }

    fn daily(d: u32, weight: f64) -> DailyRecord {
        DailyRecord {
            user: "alice".to_string(),
            date: date(d),
            weight_kg: weight,
            exercise: "jogging".to_string(),
            exercise_hours: 0.5,
            sleep_hours: 7.0,
            mood: Mood::Good,
            note: String::new(),
        }
    }

    fn plan(d: u32, completed: bool) -> ExercisePlan {
        ExercisePlan {
            user: "alice".to_string(),
            date: date(d),
            exercise_types: "jogging".to_string(),
            planned_hours: 0.5,
            intensity: Intensity::Medium,
            completed,
            actual_hours: None,
            notes: String::new(),
        }
    }

    fn diet(d: u32) -> DietRecord {
        DietRecord {
            user: "alice".to_string(),
            date: date(d),
            breakfast: "toast".to_string(),
            lunch: "rice".to_string(),
            dinner: "soup".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_goal_progress_basic() {
        // 62 -> 60 toward a 58 target: 2 of 4 kg achieved
        assert_eq!(goal_progress(62.0, 60.0, 58.0), 50.0);
    }

    #[test]
    fn test_goal_progress_clamped() {
        // Overshot the target
        assert_eq!(goal_progress(62.0, 56.0, 58.0), 100.0);
        // Moving away from the target
        assert_eq!(goal_progress(62.0, 64.0, 58.0), 0.0);
    }

    #[test]
    fn test_goal_progress_already_at_target() {
        assert_eq!(goal_progress(58.0, 58.0, 58.0), 100.0);
    }

    #[test]
    fn test_compute_health_stats_basic() {
        let daily: Vec<DailyRecord> = (1..=7)
            .map(|d| daily(d, 62.0 - 0.2 * (d - 1) as f64))
            .collect();
        let plans: Vec<ExercisePlan> = (1..=7).map(|d| plan(d, d != 3)).collect();
        let diet: Vec<DietRecord> = (1..=7).map(diet).collect();

        let stats = compute_health_stats(&profile(), &daily, &plans, &diet, None);

        assert_eq!(stats.user, "alice");
        // Latest logged weight (60.8) drives the BMI, not the profile weight
        let expected_bmi = compute_bmi(165.0, 60.8);
        assert!((stats.bmi - expected_bmi).abs() < 1e-9);
        assert_eq!(stats.bmi_category, BmiCategory::Normal);
        assert!((stats.weight_change_kg - (-1.2)).abs() < 1e-9);
        assert!((stats.goal_progress - 30.0).abs() < 1e-9);
        assert!((stats.exercise_completion_rate - (6.0 / 7.0 * 100.0)).abs() < 1e-9);
        assert_eq!(stats.diet_record_frequency, 100.0);
        assert_eq!(stats.window_start, Some(date(1)));
        assert_eq!(stats.window_end, Some(date(7)));
    }

    #[test]
    fn test_narrow_window_scopes_weight_and_completion() {
        // Weight drops to 60.0 on day 10; a window over days 1-5 must not
        // see it, for the weight trend or for the BMI weight
        let records = vec![daily(1, 62.0), daily(3, 61.5), daily(5, 61.0), daily(10, 60.0)];
        let plans = vec![plan(2, true), plan(4, true), plan(9, false), plan(10, false)];

        let stats =
            compute_health_stats(&profile(), &records, &plans, &[], Some((date(1), date(5))));

        assert!((stats.weight_change_kg - (-1.0)).abs() < 1e-9);
        let expected_bmi = compute_bmi(165.0, 61.0);
        assert!((stats.bmi - expected_bmi).abs() < 1e-9);
        // Only the two completed plans fall inside the window
        assert_eq!(stats.exercise_completion_rate, 100.0);
    }

    #[test]
    fn test_bmi_sentinel_when_height_missing() {
        let mut p = profile();
        p.height_cm = 0.0;

        let stats = compute_health_stats(&p, &[], &[], &[], None);
        assert_eq!(stats.bmi, 0.0);
        assert_eq!(stats.bmi_category, BmiCategory::Undefined);
        assert_eq!(stats.bmi_summary(), "BMI 0.0 (undefined)");
    }

    #[test]
    fn test_empty_records_no_data_guidance() {
        let stats = compute_health_stats(&profile(), &[], &[], &[], None);

        assert_eq!(stats.weight_change_kg, 0.0);
        assert_eq!(stats.goal_progress, 0.0);
        assert_eq!(stats.exercise_completion_rate, 0.0);
        assert_eq!(stats.diet_record_frequency, 0.0);
        assert_eq!(stats.regularity_grade, RegularityGrade::D);
        assert_eq!(stats.recommendations.len(), 1);
        assert!(stats.recommendations[0].contains("No records yet"));
    }

    #[test]
    fn test_overweight_rule_fires() {
        let mut p = profile();
        p.weight_kg = 80.0; // BMI ~29.4

        let daily = vec![daily(1, 80.0)];
        let stats = compute_health_stats(&p, &daily, &[], &[], None);

        assert_eq!(stats.bmi_category, BmiCategory::Obese);
        assert!(stats
            .recommendations
            .iter()
            .any(|r| r.contains("above the normal range")));
    }

    #[test]
    fn test_underweight_rule_fires() {
        let daily = vec![daily(1, 48.0)]; // BMI ~17.6
        let stats = compute_health_stats(&profile(), &daily, &[], &[], None);

        assert_eq!(stats.bmi_category, BmiCategory::Underweight);
        assert!(stats
            .recommendations
            .iter()
            .any(|r| r.contains("underweight range")));
    }

    #[test]
    fn test_low_exercise_completion_rule_fires() {
        let daily = vec![daily(1, 62.0)];
        let plans = vec![plan(1, false), plan(2, false), plan(3, true)];
        let stats = compute_health_stats(&profile(), &daily, &plans, &[], None);

        assert!(stats
            .recommendations
            .iter()
            .any(|r| r.contains("Exercise completion is below 70%")));
    }

    #[test]
    fn test_irregular_logging_rule_fires() {
        // Sparse daily logging over a long window grades C or worse
        let daily = vec![daily(1, 62.0), daily(20, 61.5)];
        let window = Some((date(1), date(30)));
        let stats = compute_health_stats(&profile(), &daily, &[], &[], window);

        assert!(matches!(
            stats.regularity_grade,
            RegularityGrade::C | RegularityGrade::D
        ));
        assert!(stats
            .recommendations
            .iter()
            .any(|r| r.contains("Logging is irregular")));
    }

    #[test]
    fn test_weight_summary_text() {
        let records = vec![daily(1, 62.0), daily(2, 61.0)];
        let stats = compute_health_stats(&profile(), &records, &[], &[], None);
        assert_eq!(stats.weight_summary(), "-1.0 kg over the window");

        let records = vec![daily(1, 62.0), daily(2, 62.0)];
        let stats = compute_health_stats(&profile(), &records, &[], &[], None);
        assert_eq!(stats.weight_summary(), "weight stable over the window");
    }

    #[test]
    fn test_repeat_computation_identical_except_timestamp() {
        let daily = vec![daily(1, 62.0), daily(2, 61.5)];
        let a = compute_health_stats(&profile(), &daily, &[], &[], None);
        let mut b = compute_health_stats(&profile(), &daily, &[], &[], None);
        b.computed_at = a.computed_at;
        assert_eq!(a, b);
    }
}
