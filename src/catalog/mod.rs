//! Content catalog: candidate meals and exercise blocks
//!
//! The engines only read the catalog through [`CatalogProvider`]. The built-in
//! catalog is a static table; callers that maintain coach-edited content wrap
//! it in an [`OverlayCatalog`] so overrides win and the built-in entries remain
//! the fallback.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::CatalogError;
use crate::models::EnergyDirection;
use crate::nutrition_rules::MacroTarget;

pub mod exercises;
pub mod meals;

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSlot::Breakfast => write!(f, "Breakfast"),
            MealSlot::Lunch => write!(f, "Lunch"),
            MealSlot::Dinner => write!(f, "Dinner"),
            MealSlot::Snack => write!(f, "Snack"),
        }
    }
}

/// A catalog meal with its nutritional values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub kcal: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl Meal {
    /// Build a meal whose energy is derived from its macros (4/4/9 kcal per gram)
    pub fn from_macros(name: &str, protein_g: u32, carbs_g: u32, fat_g: u32) -> Self {
        let macros = MacroTarget {
            protein_g,
            carbs_g,
            fat_g,
        };
        Self {
            name: name.to_string(),
            kcal: macros.kcal(),
            protein_g,
            carbs_g,
            fat_g,
        }
    }
}

/// Exercise archetype an exercise block belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseBlockKey {
    FullBody,
    Volume,
    TechniqueBasis,
    Upper,
    Lower,
    Push,
    Pull,
    Legs,
    Intensity,
    Metabolic,
    Intervals,
    Endurance,
    Hybrid,
    Deload,
    Taper,
}

/// A prescribed exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Repetitions or a duration, e.g. "8-10" or "40 min"
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Interchangeable exercises the client may swap in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

/// Exercises making up one session archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseBlock {
    /// Session type label shown to the client
    pub type_label: String,
    pub exercises: Vec<Exercise>,
}

/// Read-only access to catalog content
pub trait CatalogProvider: Send + Sync {
    /// Candidate meals for a slot and energy tier, in preference order
    fn meals(&self, slot: MealSlot, tier: EnergyDirection) -> &[Meal];

    /// Exercise block for an archetype, if the catalog defines one
    fn exercise_block(&self, key: ExerciseBlockKey) -> Option<&ExerciseBlock>;
}

/// A concrete catalog table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub meals: BTreeMap<MealSlot, BTreeMap<EnergyDirection, Vec<Meal>>>,
    #[serde(default)]
    pub exercises: BTreeMap<ExerciseBlockKey, ExerciseBlock>,
}

static BUILTIN_CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    meals: meals::builtin_meals(),
    exercises: exercises::builtin_exercise_blocks(),
});

impl Catalog {
    /// The catalog shipped with the engine
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    /// Load a catalog (typically an override table) from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|_| CatalogError::FileNotFound {
            path: path.to_path_buf(),
        })?;

        serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn meal_count(&self) -> usize {
        self.meals
            .values()
            .flat_map(|tiers| tiers.values())
            .map(Vec::len)
            .sum()
    }
}

impl CatalogProvider for Catalog {
    fn meals(&self, slot: MealSlot, tier: EnergyDirection) -> &[Meal] {
        self.meals
            .get(&slot)
            .and_then(|tiers| tiers.get(&tier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn exercise_block(&self, key: ExerciseBlockKey) -> Option<&ExerciseBlock> {
        self.exercises.get(&key)
    }
}

/// Override entries layered over a fallback catalog
///
/// Overrides win per slot/tier and per exercise block, but only when they are
/// non-empty.
pub struct OverlayCatalog<'a> {
    overrides: Catalog,
    fallback: &'a dyn CatalogProvider,
}

impl<'a> OverlayCatalog<'a> {
    pub fn new(overrides: Catalog, fallback: &'a dyn CatalogProvider) -> Self {
        Self {
            overrides,
            fallback,
        }
    }

    /// Overlay on top of the built-in catalog
    pub fn over_builtin(overrides: Catalog) -> OverlayCatalog<'static> {
        OverlayCatalog::new(overrides, Catalog::builtin())
    }
}

impl CatalogProvider for OverlayCatalog<'_> {
    fn meals(&self, slot: MealSlot, tier: EnergyDirection) -> &[Meal] {
        let overridden = self.overrides.meals(slot, tier);
        if overridden.is_empty() {
            self.fallback.meals(slot, tier)
        } else {
            overridden
        }
    }

    fn exercise_block(&self, key: ExerciseBlockKey) -> Option<&ExerciseBlock> {
        match self.overrides.exercise_block(key) {
            Some(block) if !block.exercises.is_empty() => Some(block),
            _ => self.fallback.exercise_block(key),
        }
    }
}
