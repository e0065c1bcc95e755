//! Record Store contract and the in-memory implementation
//!
//! The stats engine consumes whatever implements [`RecordStore`]; it never
//! reaches for ambient state. Implementations must hand back sequences
//! sorted ascending by date with at most one record per user + date, the
//! two invariants the streak and range computations rely on.
//! [`MemoryStore`] upholds both by keying records on `(user, date)` in a
//! `BTreeMap`; real persistence lives outside this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{DailyRecord, DietRecord, ExercisePlan, Profile};

/// Read access to a user's record collections
pub trait RecordStore {
    /// Profile for a user, if one exists
    fn get_profile(&self, user: &str) -> Option<Profile>;

    /// Daily records for a user, ascending by date
    fn list_daily_records(&self, user: &str) -> Vec<DailyRecord>;

    /// Exercise plans for a user, ascending by date
    fn list_exercise_plans(&self, user: &str) -> Vec<ExercisePlan>;

    /// Diet records for a user, ascending by date
    fn list_diet_records(&self, user: &str) -> Vec<DietRecord>;
}

/// In-memory record store keyed by user and date
///
/// Inserting a second record for the same user + date replaces the first,
/// matching the uniqueness rule of the record collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profiles: BTreeMap<String, Profile>,
    daily: BTreeMap<(String, NaiveDate), DailyRecord>,
    plans: BTreeMap<(String, NaiveDate), ExercisePlan>,
    diet: BTreeMap<(String, NaiveDate), DietRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn put_profile(&mut self, profile: Profile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    pub fn put_daily_record(&mut self, record: DailyRecord) {
        self.daily
            .insert((record.user.clone(), record.date), record);
    }

    pub fn put_exercise_plan(&mut self, plan: ExercisePlan) {
        self.plans.insert((plan.user.clone(), plan.date), plan);
    }

    pub fn put_diet_record(&mut self, record: DietRecord) {
        self.diet.insert((record.user.clone(), record.date), record);
    }

    /// All user names with any data, in name order
    pub fn users(&self) -> Vec<String> {
        let mut users: Vec<String> = self.profiles.keys().cloned().collect();
        for (user, _) in self
            .daily
            .keys()
            .chain(self.plans.keys())
            .chain(self.diet.keys())
        {
            if !users.contains(user) {
                users.push(user.clone());
            }
        }
        users.sort();
        users
    }
}

/// Serializable snapshot of a store's contents
///
/// The store itself keys records on `(user, date)` pairs, which JSON
/// cannot represent as map keys; the snapshot flattens everything into
/// record lists for import and export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub profiles: Vec<Profile>,

    #[serde(default)]
    pub daily_records: Vec<DailyRecord>,

    #[serde(default)]
    pub exercise_plans: Vec<ExercisePlan>,

    #[serde(default)]
    pub diet_records: Vec<DietRecord>,
}

impl Snapshot {
    /// Capture the full contents of a store
    pub fn from_store(store: &MemoryStore) -> Self {
        Snapshot {
            profiles: store.profiles.values().cloned().collect(),
            daily_records: store.daily.values().cloned().collect(),
            exercise_plans: store.plans.values().cloned().collect(),
            diet_records: store.diet.values().cloned().collect(),
        }
    }

    /// Build a store from the snapshot, re-keying every record
    pub fn into_store(self) -> MemoryStore {
        let mut store = MemoryStore::new();
        for profile in self.profiles {
            store.put_profile(profile);
        }
        for record in self.daily_records {
            store.put_daily_record(record);
        }
        for plan in self.exercise_plans {
            store.put_exercise_plan(plan);
        }
        for record in self.diet_records {
            store.put_diet_record(record);
        }
        store
    }
}

impl RecordStore for MemoryStore {
    fn get_profile(&self, user: &str) -> Option<Profile> {
        self.profiles.get(user).cloned()
    }

    fn list_daily_records(&self, user: &str) -> Vec<DailyRecord> {
        self.daily
            .values()
            .filter(|r| r.user == user)
            .cloned()
            .collect()
    }

    fn list_exercise_plans(&self, user: &str) -> Vec<ExercisePlan> {
        self.plans
            .values()
            .filter(|p| p.user == user)
            .cloned()
            .collect()
    }

    fn list_diet_records(&self, user: &str) -> Vec<DietRecord> {
        self.diet
            .values()
            .filter(|r| r.user == user)
            .cloned()
            .collect()
    }
}
