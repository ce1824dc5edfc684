// Library interface for coachplan modules
// The CLI and the integration tests both build on this crate

pub mod access;
pub mod adaptive;
pub mod batch;
pub mod block;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod nutrition_plan;
pub mod nutrition_rules;
mod rounding;
pub mod training_plan;
pub mod training_rules;

// Re-export commonly used types for convenience
pub use access::{week_access, WeekAccess};
pub use adaptive::{adaptive_suggestion, adherence_summary, consistency_streak, AdaptiveAction};
pub use block::{GenerationMode, PlanBlock, ReviewOutcome};
pub use catalog::{Catalog, CatalogProvider, OverlayCatalog};
pub use error::{CoachPlanError, ProgressionError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::*;
pub use nutrition_plan::{NutritionPlan, NutritionPlanGenerator};
pub use training_plan::{TrainingPlan, TrainingPlanGenerator};
