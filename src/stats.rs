//! Stats facade orchestrating the per-domain computations
//!
//! [`StatsEngine`] holds an explicit reference to the Record Store it
//! reads from; callers pass the user and window per query. Each method
//! fetches a snapshot, hands it to the matching pure `compute_*`
//! function and returns the fully populated result. The engine keeps no
//! state between calls and is safe to use concurrently across users or
//! statistic kinds.

use chrono::NaiveDate;
use tracing::debug;

use crate::diet::{compute_diet_stats, DietStats};
use crate::error::{Result, VitalogError};
use crate::exercise::{compute_exercise_stats, ExerciseStats};
use crate::health::{compute_health_stats, HealthStats};
use crate::store::RecordStore;

/// Facade over a Record Store reference
pub struct StatsEngine<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> StatsEngine<'a> {
    /// Create an engine reading from the given store
    pub fn new(store: &'a dyn RecordStore) -> Self {
        StatsEngine { store }
    }

    /// Health statistics for a user over an optional window
    ///
    /// Fails only when the user has no profile; record collections may
    /// be empty and degrade to sentinel metrics.
    pub fn health_stats(
        &self,
        user: &str,
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<HealthStats> {
        let profile = self
            .store
            .get_profile(user)
            .ok_or_else(|| VitalogError::ProfileNotFound {
                user: user.to_string(),
            })?;
        let daily = self.store.list_daily_records(user);
        let plans = self.store.list_exercise_plans(user);
        let diet = self.store.list_diet_records(user);
        debug!(
            user,
            daily = daily.len(),
            plans = plans.len(),
            diet = diet.len(),
            "computing health stats"
        );

        Ok(compute_health_stats(&profile, &daily, &plans, &diet, window))
    }

    /// Exercise statistics for a user over an optional window
    pub fn exercise_stats(
        &self,
        user: &str,
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> ExerciseStats {
        let plans = self.store.list_exercise_plans(user);
        debug!(user, plans = plans.len(), "computing exercise stats");
        compute_exercise_stats(user, &plans, window)
    }

    /// Diet statistics for a user over an optional window
    pub fn diet_stats(&self, user: &str, window: Option<(NaiveDate, NaiveDate)>) -> DietStats {
        let records = self.store.list_diet_records(user);
        debug!(user, records = records.len(), "computing diet stats");
        compute_diet_stats(user, &records, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DailyRecord, DietRecord, ExercisePlan, FitnessGoal, Gender, Intensity, Mood, Profile,
    };
    use crate::store::MemoryStore;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.put_profile(Profile {
            name: "alice".to_string(),
            age: 30,
            gender: Gender::Female,
            height_cm: 165.0,
            weight_kg: 62.0,
            target_weight_kg: 58.0,
            goal: FitnessGoal::LoseWeight,
        });
        for d in 1..=5 {
            store.put_daily_record(DailyRecord {
                user: "alice".to_string(),
                date: date(d),
                weight_kg: 62.0 - 0.1 * d as f64,
                exercise: "jogging".to_string(),
                exercise_hours: 0.5,
                sleep_hours: 7.5,
                mood: Mood::Good,
                note: String::new(),
            });
            store.put_exercise_plan(ExercisePlan {
                user: "alice".to_string(),
                date: date(d),
                exercise_types: "jogging".to_string(),
                planned_hours: 0.5,
                intensity: Intensity::Medium,
                completed: true,
                actual_hours: Some(0.5),
                notes: String::new(),
            });
            store.put_diet_record(DietRecord {
                user: "alice".to_string(),
                date: date(d),
                breakfast: "toast, egg".to_string(),
                lunch: "rice".to_string(),
                dinner: "soup".to_string(),
                notes: String::new(),
            });
        }
        store
    }

    #[test]
    fn test_health_stats_via_facade() {
        let store = seeded_store();
        let engine = StatsEngine::new(&store);

        let stats = engine.health_stats("alice", None).unwrap();
        assert_eq!(stats.user, "alice");
        assert_eq!(stats.exercise_completion_rate, 100.0);
        assert_eq!(stats.diet_record_frequency, 100.0);
    }

    #[test]
    fn test_health_stats_missing_profile_errors() {
        let store = MemoryStore::new();
        let engine = StatsEngine::new(&store);

        let err = engine.health_stats("nobody", None).unwrap_err();
        assert!(matches!(err, VitalogError::ProfileNotFound { .. }));
    }

    #[test]
    fn test_exercise_and_diet_stats_via_facade() {
        let store = seeded_store();
        let engine = StatsEngine::new(&store);

        let exercise = engine.exercise_stats("alice", None);
        assert_eq!(exercise.total_plans, 5);
        assert_eq!(exercise.completion_rate, 100.0);

        let diet = engine.diet_stats("alice", None);
        assert_eq!(diet.total_records, 5);
        assert_eq!(diet.meal_completion.breakfast, 5);
    }

    #[test]
    fn test_facade_matches_direct_computation() {
        let store = seeded_store();
        let engine = StatsEngine::new(&store);

        let via_facade = engine.diet_stats("alice", None);
        let records = store.list_diet_records("alice");
        let mut direct = compute_diet_stats("alice", &records, None);
        direct.computed_at = via_facade.computed_at;
        assert_eq!(via_facade, direct);
    }

    #[test]
    fn test_unknown_user_degrades_not_errors() {
        let store = seeded_store();
        let engine = StatsEngine::new(&store);

        let exercise = engine.exercise_stats("nobody", None);
        assert_eq!(exercise.total_plans, 0);
        assert!(!exercise.recommendations.is_empty());
    }
}
