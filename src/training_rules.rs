//! Training rules: split selection, periodization, intensity and rest
//!
//! Periodization follows a simple 4-week wave: a base week, two progressive
//! overload weeks and then, depending on the goal, either a deload week at 75%
//! volume or a hold week at base volume.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::ExerciseBlockKey;
use crate::models::TrainingGoal;

/// Weekly rotation pattern of session archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    FullBody,
    UpperLower,
    PushPullLegs,
    Rotating,
}

impl SplitType {
    /// Session archetypes cycled through the training days
    pub fn rotation(&self) -> &'static [ExerciseBlockKey] {
        match self {
            SplitType::FullBody => &[ExerciseBlockKey::FullBody],
            SplitType::UpperLower => &[ExerciseBlockKey::Upper, ExerciseBlockKey::Lower],
            SplitType::PushPullLegs => &[
                ExerciseBlockKey::Push,
                ExerciseBlockKey::Pull,
                ExerciseBlockKey::Legs,
            ],
            SplitType::Rotating => &[
                ExerciseBlockKey::Push,
                ExerciseBlockKey::Pull,
                ExerciseBlockKey::Legs,
                ExerciseBlockKey::Upper,
                ExerciseBlockKey::Lower,
            ],
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitType::FullBody => write!(f, "full body"),
            SplitType::UpperLower => write!(f, "upper/lower"),
            SplitType::PushPullLegs => write!(f, "push/pull/legs"),
            SplitType::Rotating => write!(f, "rotating"),
        }
    }
}

/// Target intensity range on the RPE scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpeTarget {
    pub min: u8,
    pub max: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RpeTarget {
    fn new(min: u8, max: u8, note: Option<&str>) -> Self {
        Self {
            min,
            max,
            note: note.map(str::to_string),
        }
    }
}

impl fmt::Display for RpeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPE {}-{}", self.min, self.max)
    }
}

pub fn split_type(days_per_week: u32) -> SplitType {
    match days_per_week {
        0..=2 => SplitType::FullBody,
        3..=4 => SplitType::UpperLower,
        5..=6 => SplitType::PushPullLegs,
        _ => SplitType::Rotating,
    }
}

/// Volume multipliers for weeks 1-4
///
/// Goals with a deload get `[1.0, 1.07, 1.07, 0.75]`; all other goals,
/// unknown ones included, get `[1.0, 1.05, 1.05, 1.0]`.
pub fn week_volume_multipliers(goal: Option<TrainingGoal>) -> [Decimal; 4] {
    if goal.is_some_and(|g| g.has_deload()) {
        [dec!(1.0), dec!(1.07), dec!(1.07), dec!(0.75)]
    } else {
        [dec!(1.0), dec!(1.05), dec!(1.05), dec!(1.0)]
    }
}

/// RPE range for a focus label, matched on keywords
pub fn rpe_for_phase(focus: &str, week_number: u32) -> RpeTarget {
    let focus = focus.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| focus.contains(k));

    if has(&["deload", "taper", "stabiliz", "stabilis", "afbouw"]) {
        RpeTarget::new(6, 7, Some("Recovery week: keep 3-4 reps in reserve"))
    } else if has(&["techni", "basis", "basic"]) {
        let note = if week_number == 1 {
            "Learn the movement patterns before adding load"
        } else {
            "Quality of movement over load"
        };
        RpeTarget::new(6, 7, Some(note))
    } else if has(&["volume"]) {
        RpeTarget::new(7, 8, Some("Leave 2-3 reps in reserve on the last set"))
    } else if has(&["intens"]) {
        RpeTarget::new(8, 9, Some("Heavy but clean, stop the set when form breaks down"))
    } else if week_number == 1 {
        RpeTarget::new(7, 8, Some("Use this week to find your working weights"))
    } else {
        RpeTarget::new(7, 8, None)
    }
}

/// Rest between sets in seconds, matched on the session type label
///
/// Endurance work is continuous, so it gets zero rest.
pub fn rest_seconds(session_type: &str) -> u32 {
    let label = session_type.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| label.contains(k));

    if has(&["strength", "volume", "kracht"]) {
        90
    } else if has(&["metabolic", "metabol", "interval", "circuit"]) {
        30
    } else if has(&["endurance", "duur"]) {
        0
    } else {
        60
    }
}

/// Explanatory sentence for a training week
pub fn week_rationale(
    week_number: u32,
    focus: &str,
    volume_minutes: u32,
    volume_multiplier: Decimal,
    goal_label: &str,
    days_per_week: u32,
) -> String {
    let split = split_type(days_per_week);
    let is_deload = volume_multiplier < Decimal::ONE;

    if is_deload {
        return format!(
            "Week {}: {} - planned deload at about {} minutes in total. Volume drops so your body can absorb the previous weeks before the next block.",
            week_number, focus, volume_minutes
        );
    }

    match week_number {
        1 => format!(
            "Week 1: {} - {} days in a {} split, about {} minutes in total. This sets the baseline for your {} goal.",
            focus, days_per_week, split, volume_minutes, goal_label
        ),
        2 | 3 => format!(
            "Week {}: {} - volume rises to about {} minutes over {} days ({} split) for progressive overload.",
            week_number, focus, volume_minutes, days_per_week, split
        ),
        _ => format!(
            "Week {}: {} - volume holds at about {} minutes over {} days ({} split) to consolidate.",
            week_number, focus, volume_minutes, days_per_week, split
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lookup() {
        assert_eq!(split_type(1), SplitType::FullBody);
        assert_eq!(split_type(2), SplitType::FullBody);
        assert_eq!(split_type(3), SplitType::UpperLower);
        assert_eq!(split_type(4), SplitType::UpperLower);
        assert_eq!(split_type(5), SplitType::PushPullLegs);
        assert_eq!(split_type(6), SplitType::PushPullLegs);
        assert_eq!(split_type(7), SplitType::Rotating);
        assert_eq!(SplitType::Rotating.rotation().len(), 5);
    }

    #[test]
    fn test_volume_multipliers() {
        let deload = week_volume_multipliers(Some(TrainingGoal::Maintenance));
        assert_eq!(deload[3], dec!(0.75));
        assert_eq!(deload[1], dec!(1.07));

        let hold = week_volume_multipliers(Some(TrainingGoal::FatLoss));
        assert_eq!(hold, [dec!(1.0), dec!(1.05), dec!(1.05), dec!(1.0)]);

        assert_eq!(week_volume_multipliers(None), hold);
    }

    #[test]
    fn test_rpe_keywords() {
        let deload = rpe_for_phase("Deload", 4);
        assert_eq!((deload.min, deload.max), (6, 7));

        let taper = rpe_for_phase("Taper", 4);
        assert_eq!((taper.min, taper.max), (6, 7));

        let basis = rpe_for_phase("Basis full body", 1);
        assert_eq!((basis.min, basis.max), (6, 7));

        let volume = rpe_for_phase("Volume build-up", 2);
        assert_eq!((volume.min, volume.max), (7, 8));

        let intensity = rpe_for_phase("Intensity + long run", 3);
        assert_eq!((intensity.min, intensity.max), (8, 9));

        let other = rpe_for_phase("Build-up", 2);
        assert_eq!((other.min, other.max), (7, 8));
        assert!(other.note.is_none());
    }

    #[test]
    fn test_rest_keywords() {
        assert_eq!(rest_seconds("Full body strength"), 90);
        assert_eq!(rest_seconds("Volume strength"), 90);
        assert_eq!(rest_seconds("Metabolic circuit"), 30);
        assert_eq!(rest_seconds("Interval run"), 30);
        assert_eq!(rest_seconds("Endurance run"), 0);
        assert_eq!(rest_seconds("Deload full body"), 60);
    }

    #[test]
    fn test_week_rationale_mentions_deload() {
        let text = week_rationale(4, "Deload", 135, dec!(0.75), "onderhoud", 3);
        assert!(text.contains("deload"));

        let text = week_rationale(1, "Full body basis", 180, dec!(1.0), "onderhoud", 3);
        assert!(text.contains("upper/lower"));
        assert!(text.contains("180"));
    }
}
