use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender options recorded on a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Fitness goals a user can work toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessGoal {
    LoseWeight,
    GainWeight,
    Maintain,
    BuildMuscle,
    ImproveStamina,
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitnessGoal::LoseWeight => write!(f, "lose weight"),
            FitnessGoal::GainWeight => write!(f, "gain weight"),
            FitnessGoal::Maintain => write!(f, "maintain weight"),
            FitnessGoal::BuildMuscle => write!(f, "build muscle"),
            FitnessGoal::ImproveStamina => write!(f, "improve stamina"),
        }
    }
}

/// Mood recorded on a daily log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Great,
    Good,
    Neutral,
    Tired,
    Bad,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Great => write!(f, "great"),
            Mood::Good => write!(f, "good"),
            Mood::Neutral => write!(f, "neutral"),
            Mood::Tired => write!(f, "tired"),
            Mood::Bad => write!(f, "bad"),
        }
    }
}

/// Exercise intensity levels for planned sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intensity::Low => write!(f, "low"),
            Intensity::Medium => write!(f, "medium"),
            Intensity::High => write!(f, "high"),
        }
    }
}

/// User profile containing body measurements and goals
///
/// The name acts as the unique key across all record collections.
/// Height and weight must both be positive for BMI to be defined;
/// the stats engine reports a `0.0` sentinel otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique user name
    pub name: String,

    /// Age in years
    pub age: u8,

    /// Gender
    pub gender: Gender,

    /// Height in centimeters
    pub height_cm: f64,

    /// Current weight in kilograms
    pub weight_kg: f64,

    /// Target weight in kilograms
    pub target_weight_kg: f64,

    /// Fitness goal
    pub goal: FitnessGoal,
}

/// One daily log entry: weight, exercise, sleep and mood for a single date
///
/// Unique per user + date. Collections handed to the stats engine must be
/// sorted ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Owning user name
    pub user: String,

    /// Record date (unique per user)
    pub date: NaiveDate,

    /// Weight in kilograms on this date
    pub weight_kg: f64,

    /// Free-text description of exercise done
    pub exercise: String,

    /// Exercise duration in hours (expected range 0-24)
    pub exercise_hours: f64,

    /// Sleep duration in hours (expected range 0-24)
    pub sleep_hours: f64,

    /// Mood for the day
    pub mood: Mood,

    /// Free-text note
    pub note: String,
}

/// A planned exercise session and its completion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePlan {
    /// Owning user name
    pub user: String,

    /// Plan date (unique per user)
    pub date: NaiveDate,

    /// Exercise types, comma-joined when multiple were selected
    pub exercise_types: String,

    /// Planned duration in hours
    pub planned_hours: f64,

    /// Planned intensity
    pub intensity: Intensity,

    /// Whether the plan was completed
    pub completed: bool,

    /// Actual duration in hours, when recorded
    pub actual_hours: Option<f64>,

    /// Free-text notes
    pub notes: String,
}

/// Meal content sentinel meaning a slot was deliberately left unplanned
///
/// Counts toward slot completion but never toward the food distribution.
pub const NO_PLAN: &str = "no plan";

/// One day's diet log: content strings for the three meal slots
///
/// Each meal content is either a comma-joined food list, a free-text
/// entry, or the literal [`NO_PLAN`] sentinel. Blank content means the
/// slot was not logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietRecord {
    /// Owning user name
    pub user: String,

    /// Record date (unique per user)
    pub date: NaiveDate,

    /// Breakfast content
    pub breakfast: String,

    /// Lunch content
    pub lunch: String,

    /// Dinner content
    pub dinner: String,

    /// Free-text notes
    pub notes: String,
}

impl ExercisePlan {
    /// Split the comma-joined type field into trimmed type labels
    pub fn type_labels(&self) -> Vec<String> {
        self.exercise_types
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl DietRecord {
    /// Meal slot contents in fixed slot order (breakfast, lunch, dinner)
    pub fn meals(&self) -> [(&'static str, &str); 3] {
        [
            ("breakfast", self.breakfast.as_str()),
            ("lunch", self.lunch.as_str()),
            ("dinner", self.dinner.as_str()),
        ]
    }
}
