// Library interface for the vitalog statistics engine
// This allows integration tests to access the core functionality

pub mod aggregate;
pub mod config;
pub mod diet;
pub mod error;
pub mod exercise;
pub mod grading;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod stats;
pub mod store;
pub mod validate;

// Re-export commonly used types for convenience
pub use models::*;
pub use diet::{compute_diet_stats, DietStats};
pub use exercise::{compute_exercise_stats, ExerciseStats};
pub use health::{compute_health_stats, HealthStats};
pub use metrics::{compute_bmi, BmiCategory};
pub use grading::{QualityTier, RegularityGrade};
pub use stats::StatsEngine;
pub use store::{MemoryStore, RecordStore, Snapshot};
pub use error::{Result, VitalogError};
pub use logging::{LogConfig, LogFormat, LogLevel};
