//! Aggregators folding ordered record sequences into counts and ranges
//!
//! Everything here consumes date-ascending sequences for a single user and
//! produces the intermediate figures the classifiers and recommendation
//! rules work from: date-range bookkeeping, the trailing consecutive-day
//! streak, categorical distributions and plan-completion counts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ExercisePlan, NO_PLAN};

/// Date-range bookkeeping over a record sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSummary {
    /// Earliest record date, if any records exist
    pub earliest: Option<NaiveDate>,

    /// Latest record date, if any records exist
    pub latest: Option<NaiveDate>,

    /// Count of distinct dates with at least one record
    pub active_days: u32,

    /// Inclusive day span of the analysis window
    pub total_days: u32,
}

impl RangeSummary {
    /// Build range bookkeeping from a date-ascending sequence of record dates
    ///
    /// `window` is the caller-supplied (start, end) pair; when absent the
    /// window spans from the earliest to the latest record. Dates may
    /// repeat (multiple records on one day); only distinct dates count
    /// toward `active_days`.
    pub fn from_dates(dates: &[NaiveDate], window: Option<(NaiveDate, NaiveDate)>) -> Self {
        let earliest = dates.first().copied();
        let latest = dates.last().copied();

        let mut active_days = 0u32;
        let mut previous: Option<NaiveDate> = None;
        for &date in dates {
            if previous != Some(date) {
                active_days += 1;
            }
            previous = Some(date);
        }

        let span = window.or(earliest.zip(latest));
        let total_days = match span {
            Some((start, end)) if end >= start => {
                (end.signed_duration_since(start).num_days() + 1) as u32
            }
            _ => 0,
        };

        RangeSummary {
            earliest,
            latest,
            active_days,
            total_days,
        }
    }
}

/// Narrow a date-ascending record slice to the records inside a window
///
/// Aggregation is scoped to the window: records outside a caller-supplied
/// `(start, end)` pair must not contribute to counts, streaks or
/// distributions. Relies on the slice being sorted ascending by date.
pub fn clip_window<T>(
    records: &[T],
    date_of: impl Fn(&T) -> NaiveDate,
    window: Option<(NaiveDate, NaiveDate)>,
) -> &[T] {
    match window {
        Some((start, end)) => {
            let lo = records.partition_point(|r| date_of(r) < start);
            let hi = records.partition_point(|r| date_of(r) <= end);
            &records[lo..hi.max(lo)]
        }
        None => records,
    }
}

/// Trailing consecutive-day streak ending at the latest record date
///
/// Scans ascending dates and reports the length of the gap-free run that
/// ends at the most recent record. A calendar gap resets the count to the
/// new run's length, so records on Jan 1-3 followed by Jan 10 report a
/// streak of 1, not 3. Duplicate dates within a day do not extend the run.
pub fn consecutive_day_streak(dates: &[NaiveDate]) -> u32 {
    let mut streak = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        match previous {
            Some(prev) if date == prev => continue,
            Some(prev) if date.signed_duration_since(prev).num_days() == 1 => streak += 1,
            _ => streak = 1,
        }
        previous = Some(date);
    }

    streak
}

/// Occurrence counts per categorical label
///
/// Backed by a `BTreeMap` so iteration order is the label order; the
/// "most frequent" lookup keeps the first strictly-greater count, which
/// makes ties resolve to the alphabetically smallest label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    counts: BTreeMap<String, u32>,
}

impl Distribution {
    pub fn new() -> Self {
        Distribution::default()
    }

    /// Increment the count for a label
    pub fn record<S: Into<String>>(&mut self, label: S) {
        *self.counts.entry(label.into()).or_insert(0) += 1;
    }

    /// Number of distinct labels seen
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total occurrences across all labels
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for one label, zero if never recorded
    pub fn count(&self, label: &str) -> u32 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Most frequent label, ties broken toward the alphabetically smallest
    pub fn top(&self) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (label, &count) in &self.counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((label.as_str(), count)),
            }
        }
        best
    }

    /// Labels with the highest counts, descending; equal counts stay in
    /// label order
    pub fn top_n(&self, n: usize) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> =
            self.counts.iter().map(|(l, &c)| (l.clone(), c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// Iterate labels and counts in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(l, &c)| (l.as_str(), c))
    }
}

/// Completed vs total plan counts for a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCounts {
    pub completed: u32,
    pub total: u32,
}

/// Count completed plans against the total
pub fn completion_counts(plans: &[ExercisePlan]) -> CompletionCounts {
    CompletionCounts {
        completed: plans.iter().filter(|p| p.completed).count() as u32,
        total: plans.len() as u32,
    }
}

/// Split a meal-content string into trimmed food tokens
///
/// Blank content and the literal `"no plan"` sentinel yield no tokens;
/// the sentinel still counts the slot as logged, which is the caller's
/// concern, not this function's.
pub fn food_tokens(content: &str) -> Vec<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed == NO_PLAN {
        return Vec::new();
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whether a meal-content string counts the slot as logged
///
/// Any non-blank content counts, including the `"no plan"` sentinel.
pub fn meal_logged(content: &str) -> bool {
    !content.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intensity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(d: NaiveDate, completed: bool) -> ExercisePlan {
        ExercisePlan {
            user: "test".to_string(),
            date: d,
            exercise_types: "running".to_string(),
            planned_hours: 1.0,
            intensity: Intensity::Medium,
            completed,
            actual_hours: None,
            notes: String::new(),
        }
    }

    #[test]
    fn test_range_summary_from_records() {
        let dates = vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 5)];
        let summary = RangeSummary::from_dates(&dates, None);

        assert_eq!(summary.earliest, Some(date(2024, 1, 1)));
        assert_eq!(summary.latest, Some(date(2024, 1, 5)));
        assert_eq!(summary.active_days, 3);
        // Inclusive span Jan 1..=Jan 5
        assert_eq!(summary.total_days, 5);
    }

    #[test]
    fn test_range_summary_explicit_window() {
        let dates = vec![date(2024, 1, 3), date(2024, 1, 4)];
        let window = Some((date(2024, 1, 1), date(2024, 1, 10)));
        let summary = RangeSummary::from_dates(&dates, window);

        assert_eq!(summary.total_days, 10);
        assert_eq!(summary.active_days, 2);
    }

    #[test]
    fn test_range_summary_empty() {
        let summary = RangeSummary::from_dates(&[], None);
        assert_eq!(summary.earliest, None);
        assert_eq!(summary.latest, None);
        assert_eq!(summary.active_days, 0);
        assert_eq!(summary.total_days, 0);
    }

    #[test]
    fn test_range_summary_duplicate_dates() {
        let dates = vec![date(2024, 1, 1), date(2024, 1, 1), date(2024, 1, 2)];
        let summary = RangeSummary::from_dates(&dates, None);
        assert_eq!(summary.active_days, 2);
        assert_eq!(summary.total_days, 2);
    }

    #[test]
    fn test_clip_window_narrower_than_records() {
        let dates: Vec<NaiveDate> = (1..=10).map(|d| date(2024, 1, d)).collect();
        let clipped = clip_window(&dates, |d| *d, Some((date(2024, 1, 3), date(2024, 1, 6))));
        assert_eq!(clipped, &[date(2024, 1, 3), date(2024, 1, 4), date(2024, 1, 5), date(2024, 1, 6)]);
    }

    #[test]
    fn test_clip_window_none_keeps_everything() {
        let dates = vec![date(2024, 1, 1), date(2024, 1, 5)];
        assert_eq!(clip_window(&dates, |d| *d, None).len(), 2);
    }

    #[test]
    fn test_clip_window_disjoint_is_empty() {
        let dates = vec![date(2024, 1, 1), date(2024, 1, 2)];
        let clipped = clip_window(&dates, |d| *d, Some((date(2024, 2, 1), date(2024, 2, 7))));
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_clip_window_inclusive_bounds() {
        let dates = vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)];
        let clipped = clip_window(&dates, |d| *d, Some((date(2024, 1, 1), date(2024, 1, 3))));
        assert_eq!(clipped.len(), 3);
    }

    #[test]
    fn test_streak_with_gap_reports_trailing_run() {
        let dates = vec![
            date(2024, 1, 1),
            date(2024, 1, 2),
            date(2024, 1, 3),
            date(2024, 1, 10),
        ];
        assert_eq!(consecutive_day_streak(&dates), 1);
    }

    #[test]
    fn test_streak_unbroken() {
        let dates: Vec<NaiveDate> = (1..=7).map(|d| date(2024, 1, d)).collect();
        assert_eq!(consecutive_day_streak(&dates), 7);
    }

    #[test]
    fn test_streak_gap_resets_to_new_run_length() {
        let dates = vec![
            date(2024, 1, 1),
            date(2024, 1, 5),
            date(2024, 1, 6),
            date(2024, 1, 7),
        ];
        assert_eq!(consecutive_day_streak(&dates), 3);
    }

    #[test]
    fn test_streak_empty_and_single() {
        assert_eq!(consecutive_day_streak(&[]), 0);
        assert_eq!(consecutive_day_streak(&[date(2024, 1, 1)]), 1);
    }

    #[test]
    fn test_streak_ignores_duplicate_dates() {
        let dates = vec![date(2024, 1, 1), date(2024, 1, 1), date(2024, 1, 2)];
        assert_eq!(consecutive_day_streak(&dates), 2);
    }

    #[test]
    fn test_distribution_counts() {
        let mut dist = Distribution::new();
        dist.record("running");
        dist.record("running");
        dist.record("yoga");

        assert_eq!(dist.count("running"), 2);
        assert_eq!(dist.count("yoga"), 1);
        assert_eq!(dist.count("swimming"), 0);
        assert_eq!(dist.distinct(), 2);
        assert_eq!(dist.total(), 3);
    }

    #[test]
    fn test_distribution_top_tie_breaks_alphabetically() {
        let mut dist = Distribution::new();
        dist.record("yoga");
        dist.record("running");

        assert_eq!(dist.top(), Some(("running", 1)));
    }

    #[test]
    fn test_distribution_top_n_order() {
        let mut dist = Distribution::new();
        dist.record("a");
        dist.record("b");
        dist.record("b");
        dist.record("c");
        dist.record("c");
        dist.record("c");

        let top = dist.top_n(2);
        assert_eq!(top, vec![("c".to_string(), 3), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_distribution_empty_top() {
        assert_eq!(Distribution::new().top(), None);
    }

    #[test]
    fn test_completion_counts() {
        let plans = vec![
            plan(date(2024, 1, 1), true),
            plan(date(2024, 1, 2), false),
            plan(date(2024, 1, 3), true),
            plan(date(2024, 1, 4), true),
        ];
        let counts = completion_counts(&plans);
        assert_eq!(counts.completed, 3);
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn test_food_tokens_split_and_trim() {
        assert_eq!(food_tokens("rice, egg , toast"), vec!["rice", "egg", "toast"]);
        assert_eq!(food_tokens("soup"), vec!["soup"]);
    }

    #[test]
    fn test_food_tokens_sentinel_and_blank() {
        assert!(food_tokens("no plan").is_empty());
        assert!(food_tokens("  no plan  ").is_empty());
        assert!(food_tokens("").is_empty());
        assert!(food_tokens("   ").is_empty());
    }

    #[test]
    fn test_meal_logged() {
        assert!(meal_logged("rice"));
        assert!(meal_logged("no plan"));
        assert!(!meal_logged(""));
        assert!(!meal_logged("  "));
    }
}
