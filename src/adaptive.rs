//! Adaptive rules over weekly reviews
//!
//! [`adaptive_suggestion`] is a priority-ordered decision tree: the first
//! matching rule wins, so low completion always dominates the energy and
//! difficulty signals.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{WeeklyReview, BLOCK_WEEKS};

/// Default completion ratio a week needs to extend the streak
pub const DEFAULT_STREAK_THRESHOLD: Decimal = dec!(0.7);

/// Rating assumed when a review leaves energy or difficulty empty
const NEUTRAL_RATING: Decimal = dec!(3);

const REDUCE_VOLUME_BELOW: Decimal = dec!(0.6);
const SIMPLIFY_ENERGY_BELOW: Decimal = dec!(2.5);
const SIMPLIFY_DIFFICULTY_ABOVE: Decimal = dec!(3.5);
const INTENSIFY_COMPLETION_FROM: Decimal = dec!(0.9);
const INTENSIFY_ENERGY_FROM: Decimal = dec!(4);

/// Recommendation for the next block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveAction {
    Maintain,
    ReduceVolume,
    Simplify,
    IncreaseIntensity,
}

impl fmt::Display for AdaptiveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdaptiveAction::Maintain => write!(f, "maintain"),
            AdaptiveAction::ReduceVolume => write!(f, "reduce_volume"),
            AdaptiveAction::Simplify => write!(f, "simplify"),
            AdaptiveAction::IncreaseIntensity => write!(f, "increase_intensity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveSuggestion {
    pub action: AdaptiveAction,
    pub message: String,
}

/// Aggregates the decision tree works on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdherenceSummary {
    pub reviews: usize,
    pub completed_sessions: u32,
    pub planned_sessions: u32,
    /// Completed over planned, 1.0 when nothing was planned
    pub completion_rate: Decimal,
    pub mean_energy: Decimal,
    pub mean_difficulty: Decimal,
}

/// Aggregate completion and ratings across reviews
///
/// The planned total sums the reviews that report one; when none do it
/// defaults to `planned_per_week` for every week of a block.
pub fn adherence_summary(reviews: &[WeeklyReview], planned_per_week: u32) -> AdherenceSummary {
    let completed = reviews
        .iter()
        .filter_map(|r| r.completed_sessions)
        .fold(0u32, u32::saturating_add);
    let reported: Vec<u32> = reviews.iter().filter_map(|r| r.planned_sessions).collect();
    let planned = if reported.is_empty() {
        planned_per_week.saturating_mul(BLOCK_WEEKS)
    } else {
        reported.into_iter().fold(0u32, u32::saturating_add)
    };

    let completion_rate = if planned == 0 {
        Decimal::ONE
    } else {
        Decimal::from(completed) / Decimal::from(planned)
    };

    AdherenceSummary {
        reviews: reviews.len(),
        completed_sessions: completed,
        planned_sessions: planned,
        completion_rate,
        mean_energy: mean_rating(reviews.iter().map(|r| r.energy)),
        mean_difficulty: mean_rating(reviews.iter().map(|r| r.difficulty)),
    }
}

fn mean_rating(ratings: impl ExactSizeIterator<Item = Option<u8>>) -> Decimal {
    let count = ratings.len();
    if count == 0 {
        return NEUTRAL_RATING;
    }
    let total: Decimal = ratings
        .map(|r| r.map(Decimal::from).unwrap_or(NEUTRAL_RATING))
        .sum();
    total / Decimal::from(count)
}

/// Recommend how the next block should change
pub fn adaptive_suggestion(reviews: &[WeeklyReview], planned_per_week: u32) -> AdaptiveSuggestion {
    if reviews.is_empty() {
        return AdaptiveSuggestion {
            action: AdaptiveAction::Maintain,
            message: "No data yet: keep the current plan until the first review is in.".to_string(),
        };
    }

    let summary = adherence_summary(reviews, planned_per_week);
    let percent = (summary.completion_rate * Decimal::ONE_HUNDRED).round();

    if summary.completion_rate < REDUCE_VOLUME_BELOW {
        return AdaptiveSuggestion {
            action: AdaptiveAction::ReduceVolume,
            message: format!(
                "Only {}% of the planned sessions were completed. Reduce the volume so the plan fits your week.",
                percent
            ),
        };
    }

    if summary.mean_energy < SIMPLIFY_ENERGY_BELOW
        && summary.mean_difficulty > SIMPLIFY_DIFFICULTY_ABOVE
    {
        return AdaptiveSuggestion {
            action: AdaptiveAction::Simplify,
            message: "Energy is low while the sessions feel hard. Simplify the exercises and focus on recovery."
                .to_string(),
        };
    }

    if summary.completion_rate >= INTENSIFY_COMPLETION_FROM
        && summary.mean_energy >= INTENSIFY_ENERGY_FROM
    {
        return AdaptiveSuggestion {
            action: AdaptiveAction::IncreaseIntensity,
            message: format!(
                "{}% completion with plenty of energy. You are ready for a step up in intensity.",
                percent
            ),
        };
    }

    AdaptiveSuggestion {
        action: AdaptiveAction::Maintain,
        message: format!(
            "{}% completion. Keep the current structure and build consistency.",
            percent
        ),
    }
}

/// Number of consecutive weeks from week 1 meeting the completion threshold
///
/// A missing planned count counts as one planned session. The run ends at the
/// first failing week or at a gap in the week numbers.
pub fn consistency_streak(reviews: &[WeeklyReview], threshold: Decimal) -> u32 {
    let mut sorted: Vec<&WeeklyReview> = reviews.iter().collect();
    sorted.sort_by_key(|r| r.week_number);

    let mut streak = 0;
    for review in sorted {
        if review.week_number != streak + 1 {
            break;
        }
        let planned = review.planned_sessions.unwrap_or(1).max(1);
        let completed = review.completed_sessions.unwrap_or(0);
        let ratio = Decimal::from(completed) / Decimal::from(planned);
        if ratio < threshold {
            break;
        }
        streak += 1;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_reviews_maintains() {
        let suggestion = adaptive_suggestion(&[], 3);
        assert_eq!(suggestion.action, AdaptiveAction::Maintain);
        assert!(suggestion.message.contains("No data"));
    }

    #[test]
    fn test_completion_dominates() {
        let reviews = vec![WeeklyReview::new(1).with_sessions(2, 4).with_ratings(5, 1)];
        let suggestion = adaptive_suggestion(&reviews, 4);
        assert_eq!(suggestion.action, AdaptiveAction::ReduceVolume);
        assert!(suggestion.message.contains("50%"));
    }

    #[test]
    fn test_simplify() {
        let reviews = vec![
            WeeklyReview::new(1).with_sessions(3, 3).with_ratings(2, 4),
            WeeklyReview::new(2).with_sessions(3, 3).with_ratings(2, 5),
        ];
        assert_eq!(adaptive_suggestion(&reviews, 3).action, AdaptiveAction::Simplify);
    }

    #[test]
    fn test_increase_intensity() {
        let reviews = vec![WeeklyReview::new(1).with_sessions(3, 3).with_ratings(4, 2)];
        assert_eq!(
            adaptive_suggestion(&reviews, 3).action,
            AdaptiveAction::IncreaseIntensity
        );
    }

    #[test]
    fn test_missing_ratings_are_neutral() {
        let reviews = vec![WeeklyReview::new(1).with_sessions(3, 3)];
        let summary = adherence_summary(&reviews, 3);
        assert_eq!(summary.mean_energy, dec!(3));
        assert_eq!(summary.mean_difficulty, dec!(3));
        assert_eq!(adaptive_suggestion(&reviews, 3).action, AdaptiveAction::Maintain);
    }

    #[test]
    fn test_planned_default_denominator() {
        let mut review = WeeklyReview::new(1);
        review.completed_sessions = Some(6);
        let summary = adherence_summary(&[review], 3);
        assert_eq!(summary.planned_sessions, 12);
        assert_eq!(summary.completion_rate, dec!(0.5));

        let summary = adherence_summary(&[WeeklyReview::new(1)], 0);
        assert_eq!(summary.completion_rate, Decimal::ONE);
    }

    #[test]
    fn test_session_counts_saturate() {
        let reviews = vec![
            WeeklyReview::new(1).with_sessions(u32::MAX, 3),
            WeeklyReview::new(2).with_sessions(5, 3),
        ];
        let summary = adherence_summary(&reviews, 3);
        assert_eq!(summary.completed_sessions, u32::MAX);
        assert_eq!(summary.planned_sessions, 6);
        assert_eq!(
            adaptive_suggestion(&reviews, 3).action,
            AdaptiveAction::Maintain
        );

        let summary = adherence_summary(&[WeeklyReview::new(1)], u32::MAX);
        assert_eq!(summary.planned_sessions, u32::MAX);
    }

    #[test]
    fn test_streak_stops_at_first_failure() {
        let reviews = vec![
            WeeklyReview::new(3).with_sessions(5, 10),
            WeeklyReview::new(1).with_sessions(8, 10),
            WeeklyReview::new(2).with_sessions(9, 10),
        ];
        assert_eq!(consistency_streak(&reviews, DEFAULT_STREAK_THRESHOLD), 2);
    }

    #[test]
    fn test_streak_requires_week_one() {
        let reviews = vec![WeeklyReview::new(2).with_sessions(3, 3)];
        assert_eq!(consistency_streak(&reviews, DEFAULT_STREAK_THRESHOLD), 0);

        let gap = vec![
            WeeklyReview::new(1).with_sessions(3, 3),
            WeeklyReview::new(3).with_sessions(3, 3),
        ];
        assert_eq!(consistency_streak(&gap, DEFAULT_STREAK_THRESHOLD), 1);
    }

    #[test]
    fn test_streak_missing_planned_counts_as_one() {
        let mut review = WeeklyReview::new(1);
        review.completed_sessions = Some(1);
        assert_eq!(consistency_streak(&[review], DEFAULT_STREAK_THRESHOLD), 1);
    }
}
