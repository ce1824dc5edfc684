//! Plan blocks and review-driven progression
//!
//! A block pairs the nutrition and training plan generated from one intake
//! snapshot. In progressive mode the nutrition plan starts with a single week
//! and every review for the newest week appends the next one:
//!
//! ```text
//! weeks=1 --review(1)--> weeks=2 --review(2)--> weeks=3
//!         --review(3)--> weeks=4 --review(4)--> completed
//! ```
//!
//! Reviews that arrive out of order, twice, or for a week that was already
//! extended are rejected with a [`ProgressionError`] and leave the block
//! untouched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::access::{week_access, WeekAccess};
use crate::adaptive::{adaptive_suggestion, consistency_streak, AdaptiveSuggestion};
use crate::catalog::CatalogProvider;
use crate::error::ProgressionError;
use crate::models::{IntakeProfile, SubscriptionTier, WeeklyReview, BLOCK_WEEKS};
use crate::nutrition_plan::{NutritionPlan, NutritionPlanGenerator};
use crate::training_plan::{TrainingPlan, TrainingPlanGenerator};

/// How many nutrition weeks are generated up front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// All four weeks at once
    #[default]
    Full,
    /// Week 1 only, later weeks follow the reviews
    Progressive,
}

impl GenerationMode {
    fn initial_weeks(&self) -> u32 {
        match self {
            GenerationMode::Full => BLOCK_WEEKS,
            GenerationMode::Progressive => 1,
        }
    }
}

/// Result of an accepted review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReviewOutcome {
    /// The review produced the next nutrition week
    Extended { week: u32 },
    /// Review stored, the week it follows already existed
    Recorded { week: u32 },
    /// Review for the last week of the block
    Completed,
}

/// One nutrition plan and one training plan from a single intake snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBlock {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub mode: GenerationMode,
    pub profile: IntakeProfile,
    pub nutrition: NutritionPlan,
    pub training: TrainingPlan,
    #[serde(default)]
    pub reviews: Vec<WeeklyReview>,
}

impl PlanBlock {
    /// Generate both plans for a profile
    pub fn generate(
        profile: IntakeProfile,
        mode: GenerationMode,
        catalog: &dyn CatalogProvider,
    ) -> Self {
        let nutrition =
            NutritionPlanGenerator::generate_weeks(&profile, catalog, mode.initial_weeks());
        let training = TrainingPlanGenerator::generate_plan(&profile, catalog);
        let block = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            mode,
            profile,
            nutrition,
            training,
            reviews: Vec::new(),
        };

        info!(
            block_id = %block.id,
            mode = ?mode,
            nutrition_weeks = block.nutrition.weeks.len(),
            "Generated plan block"
        );
        block
    }

    /// Number of nutrition weeks generated so far
    pub fn current_weeks(&self) -> u32 {
        self.nutrition.weeks.len() as u32
    }

    pub fn reviewed_weeks(&self) -> Vec<u32> {
        self.reviews.iter().map(|r| r.week_number).collect()
    }

    pub fn is_completed(&self) -> bool {
        self.reviews.iter().any(|r| r.week_number == BLOCK_WEEKS)
    }

    /// Record a review and extend the nutrition plan when it covers the newest week
    pub fn submit_review(
        &mut self,
        review: WeeklyReview,
        catalog: &dyn CatalogProvider,
    ) -> Result<ReviewOutcome, ProgressionError> {
        let week = review.week_number;
        let current = self.current_weeks();

        if !(1..=BLOCK_WEEKS).contains(&week) {
            return Err(ProgressionError::InvalidWeek {
                week,
                max: BLOCK_WEEKS,
            });
        }
        if self.reviews.iter().any(|r| r.week_number == week) {
            return Err(ProgressionError::DuplicateReview { week });
        }
        if week > current {
            return Err(ProgressionError::OutOfOrder {
                expected: current,
                week,
            });
        }

        let outcome = if week == BLOCK_WEEKS {
            ReviewOutcome::Completed
        } else if week < current {
            if self.mode == GenerationMode::Progressive {
                return Err(ProgressionError::AlreadyExtended { week });
            }
            ReviewOutcome::Recorded { week }
        } else {
            let Some(previous) = self.nutrition.week(week) else {
                return Err(ProgressionError::OutOfOrder {
                    expected: current,
                    week,
                });
            };
            let next = NutritionPlanGenerator::build_next_week(
                &self.nutrition,
                &self.profile,
                previous,
                &review,
                week + 1,
                catalog,
            );
            self.nutrition.weeks.push(next);
            ReviewOutcome::Extended { week: week + 1 }
        };

        info!(block_id = %self.id, week, outcome = ?outcome, "Review accepted");
        self.reviews.push(review);
        Ok(outcome)
    }

    /// Suggestion for the next block from the reviews so far
    pub fn suggestion(&self) -> AdaptiveSuggestion {
        adaptive_suggestion(&self.reviews, self.training.days_per_week)
    }

    pub fn streak(&self, threshold: Decimal) -> u32 {
        consistency_streak(&self.reviews, threshold)
    }

    pub fn access(&self, tier: SubscriptionTier) -> WeekAccess {
        week_access(tier, &self.reviewed_weeks())
    }
}
