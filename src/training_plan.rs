use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{CatalogProvider, Exercise, ExerciseBlockKey};
use crate::models::{ExperienceLevel, IntakeProfile, TrainingGoal, MAX_SESSION_MINUTES};
use crate::rounding::round_whole;
use crate::training_rules::{
    self, rest_seconds, rpe_for_phase, split_type, week_volume_multipliers, RpeTarget, SplitType,
};

/// Type label used when the catalog has no block at all for a session
const FALLBACK_TYPE_LABEL: &str = "Full body strength";

/// Exercise archetype a week's focus trains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    FullBody,
    Volume,
    TechniqueBasis,
    Intensity,
    Metabolic,
    Intervals,
    Endurance,
    Hybrid,
    Deload,
    Taper,
}

impl BlockKind {
    /// Kinds whose sessions are spread across the split rotation
    pub fn supports_split(&self) -> bool {
        matches!(self, Self::FullBody | Self::Volume | Self::TechniqueBasis)
    }

    pub fn block_key(&self) -> ExerciseBlockKey {
        match self {
            Self::FullBody => ExerciseBlockKey::FullBody,
            Self::Volume => ExerciseBlockKey::Volume,
            Self::TechniqueBasis => ExerciseBlockKey::TechniqueBasis,
            Self::Intensity => ExerciseBlockKey::Intensity,
            Self::Metabolic => ExerciseBlockKey::Metabolic,
            Self::Intervals => ExerciseBlockKey::Intervals,
            Self::Endurance => ExerciseBlockKey::Endurance,
            Self::Hybrid => ExerciseBlockKey::Hybrid,
            Self::Deload => ExerciseBlockKey::Deload,
            Self::Taper => ExerciseBlockKey::Taper,
        }
    }
}

/// Focus of one week: the label shown to the client and the block it trains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekFocus {
    pub label: &'static str,
    pub kind: BlockKind,
}

const fn focus(label: &'static str, kind: BlockKind) -> WeekFocus {
    WeekFocus { label, kind }
}

const MAINTENANCE_FOCUS: [WeekFocus; 4] = [
    focus("Full body basis", BlockKind::FullBody),
    focus("Full body progression", BlockKind::FullBody),
    focus("Full body progression", BlockKind::FullBody),
    focus("Deload", BlockKind::Deload),
];

/// Resolve goal aliases that share another goal's focus and volume tables
pub fn fold_goal_alias(goal: TrainingGoal) -> TrainingGoal {
    match goal {
        TrainingGoal::StrengthEndurance | TrainingGoal::Event => TrainingGoal::Performance,
        other => other,
    }
}

/// Four-week focus sequence for a goal; unknown goals get the maintenance sequence
pub fn focus_sequence(goal: Option<TrainingGoal>) -> [WeekFocus; 4] {
    use BlockKind::*;

    match goal.map(fold_goal_alias) {
        Some(TrainingGoal::Marathon) => [
            focus("Endurance base", Endurance),
            focus("Volume long run", Endurance),
            focus("Intensity + long run", Intervals),
            focus("Taper", Taper),
        ],
        Some(TrainingGoal::Hyrox) => [
            focus("Basis full body", TechniqueBasis),
            focus("Volume hybrid", Hybrid),
            focus("Intensity race simulation", Hybrid),
            focus("Deload", Deload),
        ],
        Some(TrainingGoal::Performance) | Some(TrainingGoal::MuscleGain) => [
            focus("Volume build-up", Volume),
            focus("Volume progression", Volume),
            focus("Intensity", Intensity),
            focus("Deload", Deload),
        ],
        Some(TrainingGoal::FatLoss) => [
            focus("Basis full body", FullBody),
            focus("Metabolic conditioning", Metabolic),
            focus("Metabolic + strength", Metabolic),
            focus("Volume progression", Volume),
        ],
        Some(TrainingGoal::FitnessFromScratch) => [
            focus("Basic full body", TechniqueBasis),
            focus("Build-up", FullBody),
            focus("Build-up", FullBody),
            focus("Stabilization", Deload),
        ],
        Some(TrainingGoal::Conditioning) => [
            focus("Technique & basis", TechniqueBasis),
            focus("Metabolic conditioning", Metabolic),
            focus("Interval intensity", Intervals),
            focus("Deload", Deload),
        ],
        _ => MAINTENANCE_FOCUS,
    }
}

/// One training day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    /// "Dag N"
    pub day_label: String,
    pub session_type: String,
    pub duration_minutes: u32,
    pub rpe: RpeTarget,
    pub rest_seconds: u32,
    pub exercises: Vec<Exercise>,
}

/// One week of a training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingWeek {
    pub week_number: u32,
    pub focus: String,
    pub block_kind: BlockKind,
    pub volume_minutes: u32,
    pub intensity: RpeTarget,
    pub rest_seconds: u32,
    pub rationale: String,
    /// Set on reduced-volume weeks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub sessions: Vec<TrainingSession>,
}

/// Generated training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub generated_at: DateTime<Utc>,
    /// Goal label as submitted on the intake
    pub goal: String,
    /// Goal the focus and volume tables were looked up with
    pub resolved_goal: Option<TrainingGoal>,
    pub level: ExperienceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_sport: Option<String>,
    pub days_per_week: u32,
    pub session_minutes: u32,
    pub split: SplitType,
    pub weeks: Vec<TrainingWeek>,
}

impl TrainingPlan {
    pub fn total_minutes(&self) -> u32 {
        self.weeks.iter().map(|w| w.volume_minutes).sum()
    }

    pub fn session_count(&self) -> usize {
        self.weeks.iter().map(|w| w.sessions.len()).sum()
    }
}

/// Training plan generator
pub struct TrainingPlanGenerator;

impl TrainingPlanGenerator {
    /// Generate a 4-week training plan
    pub fn generate_plan(profile: &IntakeProfile, catalog: &dyn CatalogProvider) -> TrainingPlan {
        let resolved_goal = profile.training_goal().map(fold_goal_alias);
        if resolved_goal.is_none() {
            debug!(goal = %profile.goal, "Unknown training goal, using maintenance sequence");
        }

        let days = profile.training_days();
        let minutes = profile.session_length();
        let split = split_type(days);
        let base_volume = days * minutes;
        let multipliers = week_volume_multipliers(resolved_goal);
        let sequence = focus_sequence(resolved_goal);

        debug!(
            goal = %profile.goal,
            days,
            minutes,
            split = %split,
            "Generating training plan"
        );

        let weeks = sequence
            .iter()
            .zip(multipliers)
            .enumerate()
            .map(|(index, (week_focus, multiplier))| {
                Self::create_week(
                    index as u32 + 1,
                    week_focus,
                    base_volume,
                    multiplier,
                    days,
                    split,
                    &profile.goal,
                    catalog,
                )
            })
            .collect();

        TrainingPlan {
            generated_at: Utc::now(),
            goal: profile.goal.clone(),
            resolved_goal,
            level: profile.experience_level(),
            main_sport: profile.main_sport.clone(),
            days_per_week: days,
            session_minutes: minutes,
            split,
            weeks,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_week(
        week_number: u32,
        week_focus: &WeekFocus,
        base_volume: u32,
        multiplier: Decimal,
        days: u32,
        split: SplitType,
        goal_label: &str,
        catalog: &dyn CatalogProvider,
    ) -> TrainingWeek {
        let volume_minutes = round_whole(Decimal::from(base_volume) * multiplier)
            .min(days * MAX_SESSION_MINUTES);
        let duration = round_whole(Decimal::from(volume_minutes) / Decimal::from(days))
            .min(MAX_SESSION_MINUTES);
        let intensity = rpe_for_phase(week_focus.label, week_number);

        let sessions: Vec<TrainingSession> = (0..days)
            .map(|day| {
                let key = Self::session_key(week_focus.kind, split, day as usize);
                let (session_type, exercises) = Self::resolve_block(key, catalog);
                TrainingSession {
                    day_label: format!("Dag {}", day + 1),
                    rest_seconds: rest_seconds(&session_type),
                    session_type,
                    duration_minutes: duration,
                    rpe: intensity.clone(),
                    exercises,
                }
            })
            .collect();

        let note = (multiplier < Decimal::ONE).then(|| {
            format!(
                "Deload week: volume is reduced to {}% so you recover before the next block.",
                round_whole(multiplier * Decimal::ONE_HUNDRED)
            )
        });

        TrainingWeek {
            week_number,
            focus: week_focus.label.to_string(),
            block_kind: week_focus.kind,
            volume_minutes,
            rest_seconds: sessions.first().map(|s| s.rest_seconds).unwrap_or(0),
            rationale: training_rules::week_rationale(
                week_number,
                week_focus.label,
                volume_minutes,
                multiplier,
                goal_label,
                days,
            ),
            intensity,
            note,
            sessions,
        }
    }

    /// Catalog key for a training day
    fn session_key(kind: BlockKind, split: SplitType, day_index: usize) -> ExerciseBlockKey {
        if kind.supports_split() && split != SplitType::FullBody {
            let rotation = split.rotation();
            rotation[day_index % rotation.len()]
        } else {
            kind.block_key()
        }
    }

    /// Type label and exercises for a key, falling back to the full body block
    fn resolve_block(
        key: ExerciseBlockKey,
        catalog: &dyn CatalogProvider,
    ) -> (String, Vec<Exercise>) {
        let block = catalog
            .exercise_block(key)
            .or_else(|| catalog.exercise_block(ExerciseBlockKey::FullBody));

        match block {
            Some(block) => (block.type_label.clone(), block.exercises.clone()),
            None => {
                warn!(key = ?key, "No exercise block in catalog, session left empty");
                (FALLBACK_TYPE_LABEL.to_string(), Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn labels(plan: &TrainingPlan) -> Vec<&str> {
        plan.weeks.iter().map(|w| w.focus.as_str()).collect()
    }

    #[test]
    fn test_plan_generation() {
        let profile = IntakeProfile::new("onderhoud", 3, 60);
        let plan = TrainingPlanGenerator::generate_plan(&profile, Catalog::builtin());

        assert_eq!(plan.weeks.len(), 4);
        assert_eq!(plan.split, SplitType::UpperLower);
        let volumes: Vec<u32> = plan.weeks.iter().map(|w| w.volume_minutes).collect();
        // 180 x [1.0, 1.07, 1.07, 0.75]
        assert_eq!(volumes, vec![180, 193, 193, 135]);
        assert!(plan.weeks[3].note.is_some());
        assert!(plan.weeks[0].note.is_none());
    }

    #[test]
    fn test_goal_alias_keeps_original_label() {
        let profile = IntakeProfile::new("kracht_endurance", 4, 60);
        let plan = TrainingPlanGenerator::generate_plan(&profile, Catalog::builtin());

        assert_eq!(plan.goal, "kracht_endurance");
        assert_eq!(plan.resolved_goal, Some(TrainingGoal::Performance));
        assert_eq!(
            labels(&plan),
            vec!["Volume build-up", "Volume progression", "Intensity", "Deload"]
        );
    }

    #[test]
    fn test_unknown_goal_uses_maintenance_sequence() {
        let profile = IntakeProfile::new("unknown_goal_xyz", 3, 60);
        let plan = TrainingPlanGenerator::generate_plan(&profile, Catalog::builtin());

        assert_eq!(plan.resolved_goal, None);
        let expected: Vec<&str> = MAINTENANCE_FOCUS.iter().map(|f| f.label).collect();
        assert_eq!(labels(&plan), expected);
    }

    #[test]
    fn test_split_rotation_for_volume_weeks() {
        let profile = IntakeProfile::new("prestatie", 5, 60);
        let plan = TrainingPlanGenerator::generate_plan(&profile, Catalog::builtin());
        let types: Vec<&str> = plan.weeks[0]
            .sessions
            .iter()
            .map(|s| s.session_type.as_str())
            .collect();

        assert_eq!(
            types,
            vec![
                "Push strength",
                "Pull strength",
                "Legs strength",
                "Push strength",
                "Pull strength"
            ]
        );
        // intensity week does not rotate
        assert!(plan.weeks[2]
            .sessions
            .iter()
            .all(|s| s.session_type == "Heavy strength"));
    }

    #[test]
    fn test_full_body_split_keeps_block() {
        let profile = IntakeProfile::new("prestatie", 2, 60);
        let plan = TrainingPlanGenerator::generate_plan(&profile, Catalog::builtin());
        assert!(plan.weeks[0]
            .sessions
            .iter()
            .all(|s| s.session_type == "Volume strength"));
    }

    #[test]
    fn test_marathon_rest_and_intensity() {
        let profile = IntakeProfile::new("marathon", 4, 45);
        let plan = TrainingPlanGenerator::generate_plan(&profile, Catalog::builtin());

        assert_eq!(plan.weeks[0].sessions[0].session_type, "Endurance run");
        assert_eq!(plan.weeks[0].rest_seconds, 0);
        assert_eq!(plan.weeks[2].rest_seconds, 30);
        assert_eq!((plan.weeks[2].intensity.min, plan.weeks[2].intensity.max), (8, 9));
        assert_eq!((plan.weeks[3].intensity.min, plan.weeks[3].intensity.max), (6, 7));
    }

    #[test]
    fn test_clamped_inputs() {
        let profile = IntakeProfile::new("prestatie", 30, 9999);
        let plan = TrainingPlanGenerator::generate_plan(&profile, Catalog::builtin());

        assert_eq!(plan.days_per_week, 7);
        assert_eq!(plan.session_minutes, 180);
        for week in &plan.weeks {
            assert_eq!(week.sessions.len(), 7);
            assert!(week.sessions.iter().all(|s| s.duration_minutes <= 180));
        }
    }

    #[test]
    fn test_capped_volume_matches_sessions() {
        let profile = IntakeProfile::new("prestatie", 30, 9999);
        let plan = TrainingPlanGenerator::generate_plan(&profile, Catalog::builtin());

        for week in &plan.weeks {
            let session_sum: u32 = week.sessions.iter().map(|s| s.duration_minutes).sum();
            assert!(week.volume_minutes <= 7 * MAX_SESSION_MINUTES);
            if week.volume_minutes == 7 * MAX_SESSION_MINUTES {
                assert_eq!(session_sum, week.volume_minutes, "week {}", week.week_number);
            }
        }
        assert_eq!(plan.weeks[1].volume_minutes, 1260);
    }

    #[test]
    fn test_missing_block_falls_back_to_full_body() {
        let mut catalog = Catalog::builtin().clone();
        catalog.exercises.remove(&ExerciseBlockKey::Metabolic);

        let profile = IntakeProfile::new("vetverlies", 3, 60);
        let plan = TrainingPlanGenerator::generate_plan(&profile, &catalog);
        assert_eq!(plan.weeks[1].sessions[0].session_type, "Full body strength");
        assert!(!plan.weeks[1].sessions[0].exercises.is_empty());
    }

    #[test]
    fn test_empty_catalog_never_fails() {
        let profile = IntakeProfile::new("hyrox", 3, 60);
        let plan = TrainingPlanGenerator::generate_plan(&profile, &Catalog::default());

        assert_eq!(plan.weeks.len(), 4);
        assert!(plan
            .weeks
            .iter()
            .flat_map(|w| w.sessions.iter())
            .all(|s| s.exercises.is_empty() && s.session_type == FALLBACK_TYPE_LABEL));
    }
}
