//! Nutrition plan generation
//!
//! Builds a 4-week nutrition plan from an intake profile. Each week gets an
//! energy direction from the nutrition goal, a calorie target derived from a
//! fixed 2000 kcal baseline, a macro split, and a representative example day
//! picked from the catalog.
//!
//! The calorie target is deliberately not personalised: TDEE is computed for
//! the rationale text and the informational reference block only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{CatalogProvider, Meal, MealSlot};
use crate::models::{EnergyDirection, IntakeProfile, NutritionGoal, WeeklyReview, BLOCK_WEEKS};
use crate::nutrition_rules::{
    self, carb_cycle_factors, compute_bmr, compute_tdee, goal_calorie_adjustment,
    macros_from_calories_and_weight, CarbCycleFactors, GoalAdjustment, MacroTarget,
    KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN_CARBS,
};
use crate::rounding::round_whole;

/// Daily calorie baseline every week target is derived from
pub const BASELINE_KCAL: u32 = 2000;

/// Example-day total below this share of the target counts as under-shooting
const UNDERSHOOT_RATIO: Decimal = dec!(0.9);

/// Meals chosen for one slot of the example day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotMeals {
    pub slot: MealSlot,
    /// Empty when the catalog has nothing for this slot
    pub items: Vec<Meal>,
}

/// Representative day of a nutrition week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleDay {
    pub meals: Vec<SlotMeals>,
    pub total_kcal: u32,
    pub totals: MacroTarget,
}

impl ExampleDay {
    fn from_slots(meals: Vec<SlotMeals>) -> Self {
        let mut day = ExampleDay {
            meals,
            total_kcal: 0,
            totals: MacroTarget {
                protein_g: 0,
                carbs_g: 0,
                fat_g: 0,
            },
        };
        day.recalculate();
        day
    }

    fn recalculate(&mut self) {
        let items = self.meals.iter().flat_map(|slot| slot.items.iter());
        let (kcal, protein, carbs, fat) = items.fold((0, 0, 0, 0), |(k, p, c, f), meal| {
            (
                u32::saturating_add(k, meal.kcal),
                u32::saturating_add(p, meal.protein_g),
                u32::saturating_add(c, meal.carbs_g),
                u32::saturating_add(f, meal.fat_g),
            )
        });
        self.total_kcal = kcal;
        self.totals = MacroTarget {
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
        };
    }

    fn contains(&self, name: &str) -> bool {
        self.meals
            .iter()
            .flat_map(|slot| slot.items.iter())
            .any(|meal| meal.name == name)
    }

    pub fn item_count(&self) -> usize {
        self.meals.iter().map(|slot| slot.items.len()).sum()
    }
}

/// One week of a nutrition plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionWeek {
    pub week_number: u32,
    pub direction: EnergyDirection,
    pub average_calories_per_day: u32,
    pub macros: MacroTarget,
    pub rationale: String,
    pub tip: String,
    pub example_day: ExampleDay,
    /// Set when an extension added a meal to correct the previous week
    #[serde(default)]
    pub extra_meal_added: bool,
}

/// Personalised figures shown alongside the plan, not used for targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionReference {
    pub bmr: Option<Decimal>,
    pub tdee: Option<u32>,
    pub goal_adjustment: GoalAdjustment,
    /// TDEE after the goal adjustment
    pub adjusted_kcal: Option<u32>,
    /// Per-kg macros at the adjusted calorie level
    pub per_kg_macros: Option<MacroTarget>,
    pub carb_cycle: CarbCycleFactors,
}

/// Generated nutrition plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub generated_at: DateTime<Utc>,
    pub nutrition_goal: NutritionGoal,
    pub dietary_note: Option<String>,
    pub reference: NutritionReference,
    /// Append-only: later weeks never rewrite earlier ones
    pub weeks: Vec<NutritionWeek>,
}

impl NutritionPlan {
    pub fn week(&self, week_number: u32) -> Option<&NutritionWeek> {
        self.weeks.iter().find(|w| w.week_number == week_number)
    }

    pub fn last_week(&self) -> Option<&NutritionWeek> {
        self.weeks.last()
    }
}

/// Nutrition plan generator
pub struct NutritionPlanGenerator;

impl NutritionPlanGenerator {
    /// Generate the full 4-week plan
    pub fn generate_plan(profile: &IntakeProfile, catalog: &dyn CatalogProvider) -> NutritionPlan {
        Self::generate_weeks(profile, catalog, BLOCK_WEEKS)
    }

    /// Generate a plan with its first `count` weeks (clamped to 1-4)
    ///
    /// Progressive plans start with one week and grow through
    /// [`NutritionPlanGenerator::build_next_week`].
    pub fn generate_weeks(
        profile: &IntakeProfile,
        catalog: &dyn CatalogProvider,
        count: u32,
    ) -> NutritionPlan {
        let goal = profile.nutrition_goal();
        let reference = Self::reference(profile, goal);

        debug!(
            goal = %goal,
            tdee = ?reference.tdee,
            weeks = count,
            "Generating nutrition plan"
        );

        let weeks = (1..=count.clamp(1, BLOCK_WEEKS))
            .map(|week_number| {
                let direction = Self::direction_for_week(goal, week_number);
                Self::create_week(
                    week_number,
                    goal,
                    direction,
                    direction,
                    reference.tdee,
                    &reference.goal_adjustment,
                    catalog,
                )
            })
            .collect();

        NutritionPlan {
            generated_at: Utc::now(),
            nutrition_goal: goal,
            dietary_note: profile.dietary_note(),
            reference,
            weeks,
        }
    }

    /// Build week `week_number` after a review of the previous week
    ///
    /// Uses the same direction and macro derivation as the initial
    /// generation. The review can bias the example day: low energy moves the
    /// snacks one tier up, and hunger or an example day that under-shot its
    /// target adds an extra meal (flagged with `extra_meal_added`).
    pub fn build_next_week(
        existing_plan: &NutritionPlan,
        profile: &IntakeProfile,
        previous_week: &NutritionWeek,
        previous_review: &WeeklyReview,
        week_number: u32,
        catalog: &dyn CatalogProvider,
    ) -> NutritionWeek {
        let goal = existing_plan.nutrition_goal;
        let direction = Self::direction_for_week(goal, week_number);

        let low_energy = previous_review.energy.is_some_and(|e| e <= 2);
        let snack_tier = if low_energy {
            direction.step_up()
        } else {
            direction
        };

        let mut week = Self::create_week(
            week_number,
            goal,
            direction,
            snack_tier,
            compute_tdee(profile),
            &existing_plan.reference.goal_adjustment,
            catalog,
        );

        let undershot = Decimal::from(previous_week.example_day.total_kcal)
            < Decimal::from(previous_week.average_calories_per_day) * UNDERSHOOT_RATIO;
        let hungry = previous_review.hunger.is_some_and(|h| h >= 4);

        if undershot || hungry {
            if let Some(extra) = Self::extra_meal(&week.example_day, direction, catalog) {
                debug!(
                    week = week_number,
                    undershot,
                    hungry,
                    meal = %extra.name,
                    "Adding extra meal"
                );
                if let Some(snacks) = week
                    .example_day
                    .meals
                    .iter_mut()
                    .find(|slot| slot.slot == MealSlot::Snack)
                {
                    snacks.items.push(extra);
                }
                week.example_day.recalculate();
                week.extra_meal_added = true;
                week.tip = format!(
                    "{} An extra snack was added because last week {}.",
                    week.tip,
                    if hungry {
                        "you reported being hungry"
                    } else {
                        "the example day fell short of the target"
                    }
                );
            }
        }

        if low_energy {
            week.tip = format!(
                "{} Your energy was low last week, so the snacks are a little richer.",
                week.tip
            );
        }

        week
    }

    /// Energy direction sequence for weeks 1-4
    pub fn energy_directions(goal: NutritionGoal) -> [EnergyDirection; 4] {
        use EnergyDirection::*;
        match goal {
            NutritionGoal::FatLoss => [Low, Low, Medium, Medium],
            NutritionGoal::Performance => [Medium, High, High, Medium],
            NutritionGoal::Maintenance => [Medium, Medium, Medium, Medium],
        }
    }

    /// Direction for any week number; weeks past 4 cycle the sequence
    pub fn direction_for_week(goal: NutritionGoal, week_number: u32) -> EnergyDirection {
        let index = (week_number.saturating_sub(1) % BLOCK_WEEKS) as usize;
        Self::energy_directions(goal)[index]
    }

    /// Daily calorie target for an energy direction
    pub fn daily_calories(direction: EnergyDirection) -> u32 {
        let factor = match direction {
            EnergyDirection::Low => dec!(0.85),
            EnergyDirection::Medium => dec!(1.0),
            EnergyDirection::High => dec!(1.15),
        };
        round_whole(Decimal::from(BASELINE_KCAL) * factor)
    }

    /// Protein/carbs/fat share of energy
    pub fn macro_split(goal: NutritionGoal) -> (Decimal, Decimal, Decimal) {
        match goal {
            NutritionGoal::FatLoss => (dec!(0.35), dec!(0.40), dec!(0.25)),
            NutritionGoal::Performance => (dec!(0.25), dec!(0.50), dec!(0.25)),
            NutritionGoal::Maintenance => (dec!(0.30), dec!(0.45), dec!(0.25)),
        }
    }

    /// Macro grams for a calorie target
    pub fn macros_for(daily_kcal: u32, goal: NutritionGoal) -> MacroTarget {
        let (protein, carbs, fat) = Self::macro_split(goal);
        let kcal = Decimal::from(daily_kcal);
        let per_gram = Decimal::from(KCAL_PER_GRAM_PROTEIN_CARBS);

        MacroTarget {
            protein_g: round_whole(kcal * protein / per_gram),
            carbs_g: round_whole(kcal * carbs / per_gram),
            fat_g: round_whole(kcal * fat / Decimal::from(KCAL_PER_GRAM_FAT)),
        }
    }

    fn reference(profile: &IntakeProfile, goal: NutritionGoal) -> NutritionReference {
        let goal_adjustment = goal_calorie_adjustment(goal);
        let tdee = compute_tdee(profile);
        let adjusted_kcal = tdee.map(|t| round_whole(Decimal::from(t) * goal_adjustment.factor));
        let per_kg_macros = match (adjusted_kcal, profile.weight_kg) {
            (Some(kcal), Some(weight)) => Some(macros_from_calories_and_weight(kcal, weight, goal)),
            _ => None,
        };

        NutritionReference {
            bmr: compute_bmr(profile.weight_kg, profile.height_cm, profile.age, profile.sex),
            tdee,
            goal_adjustment,
            adjusted_kcal,
            per_kg_macros,
            carb_cycle: carb_cycle_factors(profile.training_days()),
        }
    }

    fn create_week(
        week_number: u32,
        goal: NutritionGoal,
        direction: EnergyDirection,
        snack_tier: EnergyDirection,
        tdee: Option<u32>,
        adjustment: &GoalAdjustment,
        catalog: &dyn CatalogProvider,
    ) -> NutritionWeek {
        let daily_kcal = Self::daily_calories(direction);

        NutritionWeek {
            week_number,
            direction,
            average_calories_per_day: daily_kcal,
            macros: Self::macros_for(daily_kcal, goal),
            rationale: nutrition_rules::week_rationale(
                week_number,
                goal,
                direction,
                daily_kcal,
                tdee,
                adjustment,
            ),
            tip: Self::tip(direction).to_string(),
            example_day: Self::example_day(catalog, direction, snack_tier),
            extra_meal_added: false,
        }
    }

    /// First-choice meals per slot plus two snacks
    fn example_day(
        catalog: &dyn CatalogProvider,
        direction: EnergyDirection,
        snack_tier: EnergyDirection,
    ) -> ExampleDay {
        let slots = [
            (MealSlot::Breakfast, direction, 1),
            (MealSlot::Lunch, direction, 1),
            (MealSlot::Dinner, direction, 1),
            (MealSlot::Snack, snack_tier, 2),
        ];

        let meals = slots
            .into_iter()
            .map(|(slot, tier, count)| SlotMeals {
                slot,
                items: Self::candidates(catalog, slot, tier)
                    .iter()
                    .take(count)
                    .cloned()
                    .collect(),
            })
            .collect();

        ExampleDay::from_slots(meals)
    }

    /// Candidates for a slot and tier, falling back to the medium tier
    fn candidates(
        catalog: &dyn CatalogProvider,
        slot: MealSlot,
        tier: EnergyDirection,
    ) -> &[Meal] {
        let meals = catalog.meals(slot, tier);
        if !meals.is_empty() {
            return meals;
        }

        let fallback = catalog.meals(slot, EnergyDirection::Medium);
        if fallback.is_empty() {
            warn!(slot = %slot, tier = %tier, "No catalog meals for slot");
        }
        fallback
    }

    /// Next richer snack that is not on the day yet
    fn extra_meal(
        day: &ExampleDay,
        direction: EnergyDirection,
        catalog: &dyn CatalogProvider,
    ) -> Option<Meal> {
        [direction.step_up(), direction]
            .into_iter()
            .flat_map(|tier| Self::candidates(catalog, MealSlot::Snack, tier).iter())
            .find(|meal| !day.contains(&meal.name))
            .cloned()
    }

    fn tip(direction: EnergyDirection) -> &'static str {
        match direction {
            EnergyDirection::Low => {
                "Lower energy week: build every meal around a protein source to stay full and protect muscle."
            }
            EnergyDirection::Medium => {
                "Balanced week: the example day is a guide, swap meals freely as long as the totals stay similar."
            }
            EnergyDirection::High => {
                "Higher energy week: time most of your carbohydrates around training sessions."
            }
        }
    }
}
