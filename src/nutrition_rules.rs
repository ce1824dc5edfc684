//! Nutrition rules: energy expenditure, goal adjustment and macro splits
//!
//! # Energy expenditure
//!
//! - **BMR**: Mifflin-St Jeor (1990),
//!   `10 x weight + 6.25 x height - 5 x age + s` with `s = +5` for men and
//!   `s = -161` for women. For the "other" category the two variants are
//!   averaged.
//! - **TDEE**: `BMR x activity multiplier + weekly training expenditure / 7`,
//!   where training expenditure is a flat 6 kcal per training minute.
//!
//! Every formula that needs body data returns `None` when the data is
//! incomplete or outside a plausible human range. Callers treat that as
//! "cannot personalise" and fall back to the fixed baseline; nothing in this
//! module fails.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{EnergyDirection, IntakeProfile, NutritionGoal, Sex};
use crate::rounding::round_whole;

/// Energy cost of training, kcal per minute
pub const TRAINING_KCAL_PER_MINUTE: u32 = 6;

/// kcal per gram of protein and carbohydrate
pub const KCAL_PER_GRAM_PROTEIN_CARBS: u32 = 4;

/// kcal per gram of fat
pub const KCAL_PER_GRAM_FAT: u32 = 9;

/// Upper bounds for body data; anything beyond is treated as missing
pub const MAX_WEIGHT_KG: Decimal = dec!(500);
pub const MAX_HEIGHT_CM: Decimal = dec!(300);
pub const MAX_AGE: u16 = 130;

/// Daily macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl MacroTarget {
    /// Energy represented by these macros
    pub fn kcal(&self) -> u32 {
        self.protein_g
            .saturating_add(self.carbs_g)
            .saturating_mul(KCAL_PER_GRAM_PROTEIN_CARBS)
            .saturating_add(self.fat_g.saturating_mul(KCAL_PER_GRAM_FAT))
    }
}

/// Calorie factor applied for a nutrition goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAdjustment {
    pub factor: Decimal,
    /// Display label such as "-18%"
    pub label: String,
    pub rationale: String,
}

/// Protein and fat allowance per kg of body weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRulesPerKg {
    pub protein_per_kg: Decimal,
    pub fat_per_kg: Decimal,
}

/// Carbohydrate multipliers for training and rest days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbCycleFactors {
    pub training_day: Decimal,
    pub rest_day: Decimal,
}

/// Basal metabolic rate (Mifflin-St Jeor), `None` when body data is missing
/// or implausible
///
/// A missing sex category is treated like "other" and uses the averaged
/// formula.
pub fn compute_bmr(
    weight_kg: Option<Decimal>,
    height_cm: Option<Decimal>,
    age: Option<u16>,
    sex: Option<Sex>,
) -> Option<Decimal> {
    let weight = weight_kg.filter(|w| *w > Decimal::ZERO && *w <= MAX_WEIGHT_KG)?;
    let height = height_cm.filter(|h| *h > Decimal::ZERO && *h <= MAX_HEIGHT_CM)?;
    let age = age.filter(|a| (1..=MAX_AGE).contains(a))?;

    let base = dec!(10) * weight + dec!(6.25) * height - dec!(5) * Decimal::from(age);
    let male = base + dec!(5);
    let female = base - dec!(161);

    Some(match sex.unwrap_or(Sex::Other) {
        Sex::Male => male,
        Sex::Female => female,
        Sex::Other => (male + female) / dec!(2),
    })
}

/// Activity multiplier banded by training days per week
pub fn activity_multiplier(days_per_week: u32) -> Decimal {
    match days_per_week.min(7) {
        0..=1 => dec!(1.2),
        2 => dec!(1.375),
        3..=4 => dec!(1.55),
        5..=6 => dec!(1.725),
        _ => dec!(1.9),
    }
}

/// Weekly training energy cost in kcal
pub fn weekly_training_expenditure(session_minutes: u32, sessions_per_week: u32) -> u32 {
    session_minutes.min(180) * sessions_per_week.min(7) * TRAINING_KCAL_PER_MINUTE
}

/// Total daily energy expenditure, `None` when BMR cannot be computed
pub fn compute_tdee(profile: &IntakeProfile) -> Option<u32> {
    let bmr = compute_bmr(profile.weight_kg, profile.height_cm, profile.age, profile.sex)?;
    let training =
        weekly_training_expenditure(profile.session_minutes, profile.days_per_week);

    let tdee = bmr * activity_multiplier(profile.days_per_week)
        + Decimal::from(training) / dec!(7);
    Some(round_whole(tdee))
}

pub fn goal_calorie_adjustment(goal: NutritionGoal) -> GoalAdjustment {
    match goal {
        NutritionGoal::FatLoss => GoalAdjustment {
            factor: dec!(0.82),
            label: "-18%".to_string(),
            rationale: "a moderate deficit supports fat loss while protecting training quality"
                .to_string(),
        },
        NutritionGoal::Performance => GoalAdjustment {
            factor: dec!(1.10),
            label: "+10%".to_string(),
            rationale: "a small surplus fuels hard sessions and recovery".to_string(),
        },
        NutritionGoal::Maintenance => GoalAdjustment {
            factor: dec!(1.0),
            label: "0%".to_string(),
            rationale: "intake matches expenditure so body weight stays stable".to_string(),
        },
    }
}

pub fn macro_rules_per_kg(goal: NutritionGoal) -> MacroRulesPerKg {
    let protein_per_kg = match goal {
        NutritionGoal::FatLoss | NutritionGoal::Performance => dec!(2.0),
        NutritionGoal::Maintenance => dec!(1.8),
    };

    MacroRulesPerKg {
        protein_per_kg,
        fat_per_kg: dec!(0.9),
    }
}

/// Protein and fat from body weight, carbohydrates fill the remaining energy
pub fn macros_from_calories_and_weight(
    daily_kcal: u32,
    weight_kg: Decimal,
    goal: NutritionGoal,
) -> MacroTarget {
    let rules = macro_rules_per_kg(goal);
    let grams = |per_kg: Decimal| {
        per_kg
            .checked_mul(weight_kg)
            .map(round_whole)
            .unwrap_or(u32::MAX)
    };
    let protein_g = grams(rules.protein_per_kg);
    let fat_g = grams(rules.fat_per_kg);

    let used = protein_g
        .saturating_mul(KCAL_PER_GRAM_PROTEIN_CARBS)
        .saturating_add(fat_g.saturating_mul(KCAL_PER_GRAM_FAT));
    let remaining = daily_kcal.saturating_sub(used);
    let carbs_g =
        round_whole(Decimal::from(remaining) / Decimal::from(KCAL_PER_GRAM_PROTEIN_CARBS));

    MacroTarget {
        protein_g,
        carbs_g,
        fat_g,
    }
}

/// Carb cycling multipliers, informational only
///
/// The generated example day is a single representative day per week, so the
/// engine does not apply these factors itself.
pub fn carb_cycle_factors(days_per_week: u32) -> CarbCycleFactors {
    let (training_day, rest_day) = if days_per_week >= 5 {
        (dec!(1.12), dec!(0.88))
    } else if days_per_week >= 3 {
        (dec!(1.10), dec!(0.90))
    } else {
        (dec!(1.05), dec!(0.95))
    };

    CarbCycleFactors {
        training_day,
        rest_day,
    }
}

/// Explanatory sentence for a nutrition week
pub fn week_rationale(
    week_number: u32,
    goal: NutritionGoal,
    direction: EnergyDirection,
    daily_kcal: u32,
    tdee: Option<u32>,
    adjustment: &GoalAdjustment,
) -> String {
    let need = match tdee {
        Some(tdee) => format!(
            "Your estimated daily need is about {} kcal; for a {} goal we adjust by {} ({}).",
            tdee, goal, adjustment.label, adjustment.rationale
        ),
        None => format!(
            "Without complete body data we work from a standard baseline; for a {} goal we adjust by {}.",
            goal, adjustment.label
        ),
    };

    match week_number {
        1 => format!(
            "Week 1 is about settling in: roughly {} kcal per day ({} energy) so the structure becomes routine. {}",
            daily_kcal, direction, need
        ),
        2 => format!(
            "Week 2 continues at roughly {} kcal per day ({} energy) now that the meals are familiar. {}",
            daily_kcal, direction, need
        ),
        3 => format!(
            "Week 3 moves to roughly {} kcal per day ({} energy) to match the training block. {}",
            daily_kcal, direction, need
        ),
        4 => format!(
            "Week 4 closes the block at roughly {} kcal per day ({} energy); a good moment to evaluate with your coach. {}",
            daily_kcal, direction, need
        ),
        n => format!(
            "Week {} continues at roughly {} kcal per day ({} energy). {}",
            n, daily_kcal, direction, need
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> IntakeProfile {
        let mut profile = IntakeProfile::new("onderhoud", 3, 60);
        profile.weight_kg = Some(dec!(70));
        profile.height_cm = Some(dec!(175));
        profile.age = Some(30);
        profile.sex = Some(Sex::Male);
        profile
    }

    #[test]
    fn test_bmr_male_exact() {
        let bmr = compute_bmr(Some(dec!(70)), Some(dec!(175)), Some(30), Some(Sex::Male));
        assert_eq!(bmr, Some(dec!(1648.75)));
    }

    #[test]
    fn test_bmr_female_and_other() {
        let female = compute_bmr(Some(dec!(70)), Some(dec!(175)), Some(30), Some(Sex::Female));
        assert_eq!(female, Some(dec!(1482.75)));

        let other = compute_bmr(Some(dec!(70)), Some(dec!(175)), Some(30), Some(Sex::Other));
        assert_eq!(other, Some(dec!(1565.75)));

        let unspecified = compute_bmr(Some(dec!(70)), Some(dec!(175)), Some(30), None);
        assert_eq!(unspecified, other);
    }

    #[test]
    fn test_bmr_missing_inputs() {
        assert_eq!(compute_bmr(None, Some(dec!(175)), Some(30), Some(Sex::Male)), None);
        assert_eq!(compute_bmr(Some(dec!(70)), None, Some(30), Some(Sex::Male)), None);
        assert_eq!(compute_bmr(Some(dec!(70)), Some(dec!(175)), None, Some(Sex::Male)), None);
    }

    #[test]
    fn test_bmr_rejects_implausible_body_data() {
        let male = Some(Sex::Male);
        assert_eq!(compute_bmr(Some(dec!(1000000000)), Some(dec!(175)), Some(30), male), None);
        assert_eq!(compute_bmr(Some(dec!(70)), Some(dec!(301)), Some(30), male), None);
        assert_eq!(compute_bmr(Some(dec!(70)), Some(dec!(175)), Some(131), male), None);
        assert_eq!(compute_bmr(Some(dec!(-70)), Some(dec!(175)), Some(30), male), None);
        let edge = compute_bmr(Some(MAX_WEIGHT_KG), Some(MAX_HEIGHT_CM), Some(MAX_AGE), male);
        assert!(edge.is_some());
    }

    #[test]
    fn test_activity_multiplier_bands() {
        assert_eq!(activity_multiplier(0), dec!(1.2));
        assert_eq!(activity_multiplier(1), dec!(1.2));
        assert_eq!(activity_multiplier(2), dec!(1.375));
        assert_eq!(activity_multiplier(3), dec!(1.55));
        assert_eq!(activity_multiplier(4), dec!(1.55));
        assert_eq!(activity_multiplier(6), dec!(1.725));
        assert_eq!(activity_multiplier(7), dec!(1.9));
        assert_eq!(activity_multiplier(30), dec!(1.9));
    }

    #[test]
    fn test_training_expenditure_clamps() {
        assert_eq!(weekly_training_expenditure(60, 3), 1080);
        assert_eq!(weekly_training_expenditure(9999, 30), 180 * 7 * 6);
    }

    #[test]
    fn test_tdee() {
        // 1648.75 x 1.55 + 1080 / 7 = 2555.5625 + 154.2857...
        assert_eq!(compute_tdee(&sample_profile()), Some(2710));

        let mut incomplete = sample_profile();
        incomplete.weight_kg = None;
        assert_eq!(compute_tdee(&incomplete), None);
    }

    #[test]
    fn test_goal_adjustments() {
        assert_eq!(goal_calorie_adjustment(NutritionGoal::FatLoss).factor, dec!(0.82));
        assert_eq!(goal_calorie_adjustment(NutritionGoal::Performance).label, "+10%");
        assert_eq!(goal_calorie_adjustment(NutritionGoal::Maintenance).factor, dec!(1.0));
    }

    #[test]
    fn test_macros_from_weight() {
        let macros = macros_from_calories_and_weight(2500, dec!(70), NutritionGoal::FatLoss);
        assert_eq!(macros.protein_g, 140);
        assert_eq!(macros.fat_g, 63);
        // 2500 - 560 - 567 = 1373 kcal left for carbs
        assert_eq!(macros.carbs_g, 343);

        let maintenance =
            macros_from_calories_and_weight(2500, dec!(70), NutritionGoal::Maintenance);
        assert_eq!(maintenance.protein_g, 126);
    }

    #[test]
    fn test_macros_never_negative() {
        let macros = macros_from_calories_and_weight(500, dec!(120), NutritionGoal::Performance);
        assert_eq!(macros.carbs_g, 0);
    }

    #[test]
    fn test_macros_saturate_on_extreme_weight() {
        let macros =
            macros_from_calories_and_weight(2500, dec!(1000000000), NutritionGoal::Performance);
        assert_eq!(macros.protein_g, 2_000_000_000);
        assert_eq!(macros.carbs_g, 0);
        assert_eq!(macros.kcal(), u32::MAX);

        let huge = macros_from_calories_and_weight(2500, Decimal::MAX, NutritionGoal::FatLoss);
        assert_eq!(huge.protein_g, u32::MAX);
        assert_eq!(huge.fat_g, u32::MAX);
    }

    #[test]
    fn test_carb_cycle_bands() {
        assert_eq!(carb_cycle_factors(6).training_day, dec!(1.12));
        assert_eq!(carb_cycle_factors(3).rest_day, dec!(0.90));
        assert_eq!(carb_cycle_factors(1).training_day, dec!(1.05));
    }

    #[test]
    fn test_week_rationale_is_deterministic() {
        let adjustment = goal_calorie_adjustment(NutritionGoal::FatLoss);
        let goal = NutritionGoal::FatLoss;
        let a = week_rationale(1, goal, EnergyDirection::Low, 1700, Some(2710), &adjustment);
        let b = week_rationale(1, goal, EnergyDirection::Low, 1700, Some(2710), &adjustment);
        assert_eq!(a, b);
        assert!(a.contains("1700"));
        assert!(a.contains("2710"));

        let degraded = week_rationale(2, goal, EnergyDirection::Low, 1700, None, &adjustment);
        assert!(degraded.contains("standard baseline"));
    }
}
