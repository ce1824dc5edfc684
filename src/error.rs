//! Unified error hierarchy for coachplan
//!
//! The plan engines themselves never fail: every degraded input resolves to a
//! deterministic fallback. Errors only arise at the boundaries around them,
//! i.e. reading input documents, loading catalog overrides and driving the
//! block extension state machine.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all coachplan operations
#[derive(Debug, Error)]
pub enum CoachPlanError {
    /// Block extension guard violations
    #[error("Progression error: {0}")]
    Progression(#[from] ProgressionError),

    /// Catalog override errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Invalid input documents
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised when a review cannot advance a plan block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    /// Review arrived for a week the plan has not reached yet
    #[error("Review for week {week} arrived before week {expected}")]
    OutOfOrder { expected: u32, week: u32 },

    /// The week following this review has already been generated
    #[error("Week {week} was already extended")]
    AlreadyExtended { week: u32 },

    /// A review for this week was already recorded
    #[error("Duplicate review for week {week}")]
    DuplicateReview { week: u32 },

    /// Week number outside the block
    #[error("Invalid week number {week} (expected 1-{max})")]
    InvalidWeek { week: u32, max: u32 },
}

/// Catalog override loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Override file not found
    #[error("Catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Override file could not be parsed
    #[error("Invalid catalog {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Input document errors
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Document could not be parsed
    #[error("Could not parse {kind} from {path}: {reason}")]
    Parse {
        kind: String,
        path: PathBuf,
        reason: String,
    },
}

/// Result type alias for coachplan operations
pub type Result<T> = std::result::Result<T, CoachPlanError>;

impl CoachPlanError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoachPlanError::Progression(ProgressionError::DuplicateReview { .. }) => {
                ErrorSeverity::Info
            }
            CoachPlanError::Progression(_) => ErrorSeverity::Warning,
            CoachPlanError::Catalog(CatalogError::FileNotFound { .. }) => ErrorSeverity::Warning,
            CoachPlanError::Profile(_) => ErrorSeverity::Error,
            CoachPlanError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CoachPlanError::Progression(ProgressionError::OutOfOrder { expected, .. }) => {
                format!("Please submit the review for week {} first.", expected)
            }
            CoachPlanError::Progression(ProgressionError::AlreadyExtended { week })
            | CoachPlanError::Progression(ProgressionError::DuplicateReview { week }) => {
                format!("Week {} has already been reviewed.", week)
            }
            CoachPlanError::Catalog(CatalogError::FileNotFound { path }) => {
                format!("Could not find catalog file: {}", path.display())
            }
            CoachPlanError::Profile(ProfileError::Parse { kind, path, .. }) => {
                format!("The {} in {} is not valid JSON for this tool.", kind, path.display())
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
