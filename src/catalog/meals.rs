//! Built-in meal table, grouped by slot and energy tier.
//!
//! The first entry of each list is the engine's default pick; later entries
//! serve as swaps and as extra meals.

use std::collections::BTreeMap;

use super::{Meal, MealSlot};
use crate::models::EnergyDirection;

type MealTable = BTreeMap<MealSlot, BTreeMap<EnergyDirection, Vec<Meal>>>;

pub fn builtin_meals() -> MealTable {
    let mut table: MealTable = BTreeMap::new();

    let mut add = |slot: MealSlot, tier: EnergyDirection, meals: Vec<Meal>| {
        table.entry(slot).or_default().insert(tier, meals);
    };

    // Breakfast
    add(
        MealSlot::Breakfast,
        EnergyDirection::Low,
        vec![
            Meal::from_macros("Greek yogurt with berries, oats and walnuts", 30, 35, 10),
            Meal::from_macros("Vegetable omelette with rye bread", 28, 30, 14),
        ],
    );
    add(
        MealSlot::Breakfast,
        EnergyDirection::Medium,
        vec![
            Meal::from_macros("Overnight oats with whey and banana", 32, 60, 11),
            Meal::from_macros("Wholegrain toast with eggs and avocado", 26, 45, 20),
        ],
    );
    add(
        MealSlot::Breakfast,
        EnergyDirection::High,
        vec![
            Meal::from_macros("Oatmeal with peanut butter, banana and milk", 28, 75, 16),
            Meal::from_macros("Bagel with scrambled eggs and orange juice", 30, 80, 14),
        ],
    );

    // Lunch
    add(
        MealSlot::Lunch,
        EnergyDirection::Low,
        vec![
            Meal::from_macros("Chicken salad with quinoa and feta", 40, 40, 12),
            Meal::from_macros("Lentil soup with cottage cheese and rye", 32, 50, 8),
        ],
    );
    add(
        MealSlot::Lunch,
        EnergyDirection::Medium,
        vec![
            Meal::from_macros("Wholegrain wrap with turkey and hummus", 38, 60, 16),
            Meal::from_macros("Tuna pasta salad with vegetables", 38, 65, 14),
        ],
    );
    add(
        MealSlot::Lunch,
        EnergyDirection::High,
        vec![
            Meal::from_macros("Rice bowl with chicken, beans and avocado", 42, 85, 16),
            Meal::from_macros("Pasta pesto with chicken and spinach", 42, 90, 18),
        ],
    );

    // Dinner
    add(
        MealSlot::Dinner,
        EnergyDirection::Low,
        vec![
            Meal::from_macros("Salmon with green vegetables and baby potatoes", 38, 40, 18),
            Meal::from_macros("Turkey stir-fry with vegetables and brown rice", 42, 45, 12),
        ],
    );
    add(
        MealSlot::Dinner,
        EnergyDirection::Medium,
        vec![
            Meal::from_macros("Chicken with sweet potato and broccoli", 45, 70, 15),
            Meal::from_macros("Lean beef chili with rice", 42, 72, 16),
        ],
    );
    add(
        MealSlot::Dinner,
        EnergyDirection::High,
        vec![
            Meal::from_macros("Salmon with rice, vegetables and olive oil", 45, 85, 20),
            Meal::from_macros("Wholegrain pasta bolognese", 46, 95, 18),
        ],
    );

    // Snacks
    add(
        MealSlot::Snack,
        EnergyDirection::Low,
        vec![
            Meal::from_macros("Skyr with cinnamon and blueberries", 18, 15, 1),
            Meal::from_macros("Apple with two boiled eggs", 13, 20, 10),
            Meal::from_macros("Cucumber and carrot with cottage cheese", 14, 10, 3),
        ],
    );
    add(
        MealSlot::Snack,
        EnergyDirection::Medium,
        vec![
            Meal::from_macros("Protein shake with banana", 27, 32, 3),
            Meal::from_macros("Rice cakes with peanut butter", 8, 25, 10),
            Meal::from_macros("Handful of almonds and a pear", 7, 25, 14),
        ],
    );
    add(
        MealSlot::Snack,
        EnergyDirection::High,
        vec![
            Meal::from_macros("Trail mix and a banana", 6, 35, 10),
            Meal::from_macros("Quark with granola and honey", 22, 35, 5),
            Meal::from_macros("Bagel with jam and quark", 20, 60, 3),
        ],
    );

    table
}
