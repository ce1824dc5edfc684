use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest number of training days a plan is built for
pub const MIN_TRAINING_DAYS: u32 = 1;
/// Highest number of training days a plan is built for
pub const MAX_TRAINING_DAYS: u32 = 7;
/// Shortest session the engines will schedule, in minutes
pub const MIN_SESSION_MINUTES: u32 = 15;
/// Longest session the engines will schedule, in minutes
pub const MAX_SESSION_MINUTES: u32 = 180;
/// Number of weeks in a freshly generated block
pub const BLOCK_WEEKS: u32 = 4;

/// Biological sex category used to pick the BMR formula variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "m", alias = "man")]
    Male,
    #[serde(alias = "f", alias = "v", alias = "vrouw", alias = "woman")]
    Female,
    #[serde(alias = "x", alias = "anders")]
    Other,
}

/// Training experience of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    #[serde(alias = "gemiddeld")]
    Intermediate,
    #[serde(alias = "gevorderd")]
    Advanced,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Beginner => write!(f, "beginner"),
            ExperienceLevel::Intermediate => write!(f, "intermediate"),
            ExperienceLevel::Advanced => write!(f, "advanced"),
        }
    }
}

/// Training goals understood by the training engine
///
/// Intake forms submit free-text goal keys (Dutch and English variants are
/// both in circulation), so goals are parsed leniently with
/// [`TrainingGoal::from_label`] instead of being deserialized directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    Marathon,
    Hyrox,
    Performance,
    FatLoss,
    Maintenance,
    FitnessFromScratch,
    StrengthEndurance,
    Event,
    MuscleGain,
    Conditioning,
}

impl TrainingGoal {
    /// Parse a goal key, returning `None` for labels the engine does not know
    pub fn from_label(label: &str) -> Option<Self> {
        let key = normalize_label(label);
        match key.as_str() {
            "marathon" => Some(Self::Marathon),
            "hyrox" => Some(Self::Hyrox),
            "prestatie" | "performance" => Some(Self::Performance),
            "vetverlies" | "fat_loss" | "weight_loss" => Some(Self::FatLoss),
            "onderhoud" | "maintenance" => Some(Self::Maintenance),
            "fit_vanaf_nul" | "fitness_from_scratch" | "from_scratch" => {
                Some(Self::FitnessFromScratch)
            }
            "kracht_endurance" | "strength_endurance" => Some(Self::StrengthEndurance),
            "event" | "evenement" => Some(Self::Event),
            "spiermassa" | "muscle_gain" => Some(Self::MuscleGain),
            "conditie" | "conditioning" => Some(Self::Conditioning),
            _ => None,
        }
    }

    /// Goals whose fourth week is a deload week
    pub fn has_deload(&self) -> bool {
        !matches!(self, Self::FatLoss)
    }
}

impl fmt::Display for TrainingGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Marathon => "marathon",
            Self::Hyrox => "hyrox",
            Self::Performance => "performance",
            Self::FatLoss => "fat loss",
            Self::Maintenance => "maintenance",
            Self::FitnessFromScratch => "fitness from scratch",
            Self::StrengthEndurance => "strength endurance",
            Self::Event => "event",
            Self::MuscleGain => "muscle gain",
            Self::Conditioning => "conditioning",
        };
        write!(f, "{}", label)
    }
}

/// Nutrition goal driving energy direction and macro split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionGoal {
    Performance,
    #[default]
    Maintenance,
    FatLoss,
}

impl NutritionGoal {
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label).as_str() {
            "prestatie" | "performance" => Some(Self::Performance),
            "onderhoud" | "maintenance" => Some(Self::Maintenance),
            "vetverlies" | "fat_loss" | "weight_loss" => Some(Self::FatLoss),
            _ => None,
        }
    }
}

impl fmt::Display for NutritionGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutritionGoal::Performance => write!(f, "performance"),
            NutritionGoal::Maintenance => write!(f, "maintenance"),
            NutritionGoal::FatLoss => write!(f, "fat loss"),
        }
    }
}

/// Energy tier of a nutrition week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyDirection {
    Low,
    Medium,
    High,
}

impl EnergyDirection {
    /// One tier up, saturating at `High`
    pub fn step_up(self) -> Self {
        match self {
            EnergyDirection::Low => EnergyDirection::Medium,
            EnergyDirection::Medium | EnergyDirection::High => EnergyDirection::High,
        }
    }
}

impl fmt::Display for EnergyDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyDirection::Low => write!(f, "low"),
            EnergyDirection::Medium => write!(f, "medium"),
            EnergyDirection::High => write!(f, "high"),
        }
    }
}

/// Subscription tier used by the plan access policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Starter,
    Pro,
    Premium,
}

impl SubscriptionTier {
    /// Parse a tier label; anything unrecognised is treated as `Starter`
    pub fn from_label(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "premium" => SubscriptionTier::Premium,
            "pro" => SubscriptionTier::Pro,
            _ => SubscriptionTier::Starter,
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionTier::Starter => write!(f, "starter"),
            SubscriptionTier::Pro => write!(f, "pro"),
            SubscriptionTier::Premium => write!(f, "premium"),
        }
    }
}

/// Client intake questionnaire, the only input of the plan engines
///
/// Numeric body data is optional: formulas that need it return `None` and the
/// engines fall back to fixed baselines. Out-of-range training availability is
/// clamped where it is consumed, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeProfile {
    /// Client identifier assigned by the storage layer
    #[serde(default)]
    pub client_id: Option<String>,

    /// Age in years
    #[serde(default)]
    pub age: Option<u16>,

    /// Height in centimeters
    #[serde(default)]
    pub height_cm: Option<Decimal>,

    /// Weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<Decimal>,

    #[serde(default)]
    pub sex: Option<Sex>,

    /// Training goal key as submitted (kept verbatim in plan output)
    #[serde(default)]
    pub goal: String,

    #[serde(default)]
    pub level: Option<ExperienceLevel>,

    /// Main sport, free text
    #[serde(default)]
    pub main_sport: Option<String>,

    /// Days per week available for training (1-7 after clamping)
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,

    /// Minutes per session (15-180 after clamping)
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,

    /// Nutrition goal key as submitted
    #[serde(default)]
    pub nutrition_goal: Option<String>,

    /// Dietary preference tags (vegetarian, lactose-free, ...)
    #[serde(default)]
    pub dietary_preferences: Vec<String>,

    /// Free-text restrictions and allergies
    #[serde(default)]
    pub restrictions: Option<String>,
}

fn default_days_per_week() -> u32 {
    3
}

fn default_session_minutes() -> u32 {
    60
}

impl IntakeProfile {
    /// Minimal profile with a goal and availability, everything else unset
    pub fn new(goal: impl Into<String>, days_per_week: u32, session_minutes: u32) -> Self {
        Self {
            client_id: None,
            age: None,
            height_cm: None,
            weight_kg: None,
            sex: None,
            goal: goal.into(),
            level: None,
            main_sport: None,
            days_per_week,
            session_minutes,
            nutrition_goal: None,
            dietary_preferences: Vec::new(),
            restrictions: None,
        }
    }

    pub fn training_goal(&self) -> Option<TrainingGoal> {
        TrainingGoal::from_label(&self.goal)
    }

    /// Nutrition goal, defaulting to maintenance when missing or unknown
    pub fn nutrition_goal(&self) -> NutritionGoal {
        self.nutrition_goal
            .as_deref()
            .and_then(NutritionGoal::from_label)
            .unwrap_or_default()
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.level.unwrap_or_default()
    }

    /// Training days clamped to 1-7
    pub fn training_days(&self) -> u32 {
        self.days_per_week.clamp(MIN_TRAINING_DAYS, MAX_TRAINING_DAYS)
    }

    /// Session length clamped to 15-180 minutes
    pub fn session_length(&self) -> u32 {
        self.session_minutes
            .clamp(MIN_SESSION_MINUTES, MAX_SESSION_MINUTES)
    }

    /// Dietary note copied into the nutrition plan envelope
    pub fn dietary_note(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.dietary_preferences.is_empty() {
            parts.push(self.dietary_preferences.join(", "));
        }
        if let Some(restrictions) = self.restrictions.as_deref() {
            let trimmed = restrictions.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

/// Weekly check-in submitted by a client, owned by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReview {
    /// Week of the block this review covers (1-based)
    pub week_number: u32,

    /// Qualitative "how did it go" answer
    #[serde(default)]
    pub rating: Option<String>,

    #[serde(default)]
    pub completed_sessions: Option<u32>,

    #[serde(default)]
    pub planned_sessions: Option<u32>,

    /// Energy rating 1-5
    #[serde(default)]
    pub energy: Option<u8>,

    /// Perceived difficulty 1-5
    #[serde(default)]
    pub difficulty: Option<u8>,

    /// Hunger rating 1-5
    #[serde(default)]
    pub hunger: Option<u8>,

    /// Client asked for a follow-up block
    #[serde(default)]
    pub wants_follow_up: bool,

    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl WeeklyReview {
    pub fn new(week_number: u32) -> Self {
        Self {
            week_number,
            rating: None,
            completed_sessions: None,
            planned_sessions: None,
            energy: None,
            difficulty: None,
            hunger: None,
            wants_follow_up: false,
            submitted_at: None,
        }
    }

    /// Builder-style helper for session counts
    pub fn with_sessions(mut self, completed: u32, planned: u32) -> Self {
        self.completed_sessions = Some(completed);
        self.planned_sessions = Some(planned);
        self
    }

    /// Builder-style helper for energy and difficulty ratings
    pub fn with_ratings(mut self, energy: u8, difficulty: u8) -> Self {
        self.energy = Some(energy);
        self.difficulty = Some(difficulty);
        self
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .replace(['-', ' '], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_training_goal_parsing() {
        assert_eq!(TrainingGoal::from_label("marathon"), Some(TrainingGoal::Marathon));
        assert_eq!(TrainingGoal::from_label("Prestatie"), Some(TrainingGoal::Performance));
        assert_eq!(TrainingGoal::from_label("fat-loss"), Some(TrainingGoal::FatLoss));
        assert_eq!(
            TrainingGoal::from_label("kracht_endurance"),
            Some(TrainingGoal::StrengthEndurance)
        );
        assert_eq!(TrainingGoal::from_label("unknown_goal_xyz"), None);
    }

    #[test]
    fn test_deload_goals() {
        assert!(TrainingGoal::Maintenance.has_deload());
        assert!(TrainingGoal::Hyrox.has_deload());
        assert!(!TrainingGoal::FatLoss.has_deload());
    }

    #[test]
    fn test_nutrition_goal_defaults_to_maintenance() {
        let mut profile = IntakeProfile::new("onderhoud", 3, 60);
        assert_eq!(profile.nutrition_goal(), NutritionGoal::Maintenance);

        profile.nutrition_goal = Some("something else".to_string());
        assert_eq!(profile.nutrition_goal(), NutritionGoal::Maintenance);

        profile.nutrition_goal = Some("vetverlies".to_string());
        assert_eq!(profile.nutrition_goal(), NutritionGoal::FatLoss);
    }

    #[test]
    fn test_availability_clamping() {
        let profile = IntakeProfile::new("onderhoud", 30, 9999);
        assert_eq!(profile.training_days(), 7);
        assert_eq!(profile.session_length(), 180);

        let profile = IntakeProfile::new("onderhoud", 0, 5);
        assert_eq!(profile.training_days(), 1);
        assert_eq!(profile.session_length(), 15);
    }

    #[test]
    fn test_profile_deserialization_with_aliases() {
        let json = r#"{
            "age": 30,
            "height_cm": 175,
            "weight_kg": 70.5,
            "sex": "m",
            "goal": "marathon",
            "level": "gevorderd",
            "days_per_week": 4,
            "session_minutes": 45
        }"#;
        let profile: IntakeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.sex, Some(Sex::Male));
        assert_eq!(profile.level, Some(ExperienceLevel::Advanced));
        assert_eq!(profile.weight_kg, Some(dec!(70.5)));
        assert!(profile.dietary_preferences.is_empty());
    }

    #[test]
    fn test_dietary_note() {
        let mut profile = IntakeProfile::new("onderhoud", 3, 60);
        assert_eq!(profile.dietary_note(), None);

        profile.dietary_preferences = vec!["vegetarian".to_string()];
        profile.restrictions = Some("  no nuts ".to_string());
        assert_eq!(profile.dietary_note(), Some("vegetarian; no nuts".to_string()));
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!(SubscriptionTier::from_label("PRO"), SubscriptionTier::Pro);
        assert_eq!(SubscriptionTier::from_label("premium"), SubscriptionTier::Premium);
        assert_eq!(SubscriptionTier::from_label("gold"), SubscriptionTier::Starter);
    }
}
