//! Built-in exercise blocks, one per session archetype.

use std::collections::BTreeMap;

use super::{Exercise, ExerciseBlock, ExerciseBlockKey};

fn exercise(
    name: &str,
    sets: u32,
    reps: &str,
    note: Option<&str>,
    alternatives: &[&str],
) -> Exercise {
    Exercise {
        name: name.to_string(),
        sets,
        reps: reps.to_string(),
        note: note.map(str::to_string),
        alternatives: alternatives.iter().map(|a| a.to_string()).collect(),
    }
}

fn block(type_label: &str, exercises: Vec<Exercise>) -> ExerciseBlock {
    ExerciseBlock {
        type_label: type_label.to_string(),
        exercises,
    }
}

pub fn builtin_exercise_blocks() -> BTreeMap<ExerciseBlockKey, ExerciseBlock> {
    let mut blocks = BTreeMap::new();

    blocks.insert(
        ExerciseBlockKey::FullBody,
        block(
            "Full body strength",
            vec![
                exercise("Goblet squat", 3, "10-12", None, &["Leg press", "Box squat"]),
                exercise(
                    "Dumbbell bench press",
                    3,
                    "8-12",
                    None,
                    &["Push-up", "Machine chest press"],
                ),
                exercise("Seated cable row", 3, "10-12", None, &["Dumbbell row", "Inverted row"]),
                exercise(
                    "Romanian deadlift",
                    3,
                    "8-10",
                    Some("Neutral spine, hinge at the hips"),
                    &["Hip thrust", "Kettlebell deadlift"],
                ),
                exercise("Plank", 3, "30-45 s", None, &["Dead bug"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Volume,
        block(
            "Volume strength",
            vec![
                exercise("Back squat", 4, "8-10", None, &["Front squat", "Leg press"]),
                exercise(
                    "Incline dumbbell press",
                    4,
                    "10-12",
                    None,
                    &["Push-up", "Machine incline press"],
                ),
                exercise("Lat pulldown", 4, "10-12", None, &["Pull-up", "Band pulldown"]),
                exercise("Walking lunge", 3, "12 per leg", None, &["Split squat", "Step-up"]),
                exercise("Cable face pull", 3, "15", None, &["Band pull-apart"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::TechniqueBasis,
        block(
            "Technique and basis",
            vec![
                exercise(
                    "Bodyweight squat",
                    3,
                    "12",
                    Some("Slow tempo, full depth"),
                    &["Box squat"],
                ),
                exercise("Incline push-up", 3, "8-12", None, &["Wall push-up", "Knee push-up"]),
                exercise("Band row", 3, "12-15", None, &["Dumbbell row"]),
                exercise("Glute bridge", 3, "12-15", None, &["Hip thrust"]),
                exercise("Bird dog", 2, "8 per side", Some("Keep the hips level"), &["Dead bug"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Upper,
        block(
            "Upper body strength",
            vec![
                exercise("Bench press", 4, "6-8", None, &["Dumbbell bench press", "Push-up"]),
                exercise("Barbell row", 4, "8-10", None, &["Seated cable row", "Dumbbell row"]),
                exercise("Overhead press", 3, "8-10", None, &["Dumbbell shoulder press"]),
                exercise("Pull-up", 3, "6-10", Some("Use a band if needed"), &["Lat pulldown"]),
                exercise("Biceps curl", 2, "12", None, &["Hammer curl"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Lower,
        block(
            "Lower body strength",
            vec![
                exercise("Back squat", 4, "6-8", None, &["Front squat", "Leg press"]),
                exercise("Romanian deadlift", 3, "8-10", None, &["Hip thrust", "Good morning"]),
                exercise("Bulgarian split squat", 3, "10 per leg", None, &["Reverse lunge"]),
                exercise("Leg curl", 3, "12", None, &["Nordic curl", "Swiss ball curl"]),
                exercise("Calf raise", 3, "15", None, &["Single-leg calf raise"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Push,
        block(
            "Push strength",
            vec![
                exercise("Bench press", 4, "6-8", None, &["Dumbbell bench press"]),
                exercise("Overhead press", 3, "8-10", None, &["Dumbbell shoulder press"]),
                exercise("Incline dumbbell press", 3, "10-12", None, &["Push-up"]),
                exercise("Lateral raise", 3, "12-15", None, &["Cable lateral raise"]),
                exercise("Triceps pushdown", 3, "12", None, &["Dips", "Close-grip push-up"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Pull,
        block(
            "Pull strength",
            vec![
                exercise(
                    "Deadlift",
                    3,
                    "5",
                    Some("Stop two reps short of failure"),
                    &["Trap bar deadlift"],
                ),
                exercise("Pull-up", 4, "6-10", None, &["Lat pulldown"]),
                exercise("Seated cable row", 3, "10-12", None, &["Dumbbell row"]),
                exercise("Cable face pull", 3, "15", None, &["Band pull-apart"]),
                exercise("Hammer curl", 3, "12", None, &["Biceps curl"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Legs,
        block(
            "Legs strength",
            vec![
                exercise("Front squat", 4, "6-8", None, &["Back squat", "Goblet squat"]),
                exercise("Hip thrust", 3, "8-10", None, &["Glute bridge"]),
                exercise("Walking lunge", 3, "12 per leg", None, &["Step-up"]),
                exercise("Leg extension", 3, "12-15", None, &["Spanish squat"]),
                exercise("Hanging knee raise", 3, "10-12", None, &["Reverse crunch"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Intensity,
        block(
            "Heavy strength",
            vec![
                exercise(
                    "Back squat",
                    5,
                    "3-5",
                    Some("Work up to a heavy triple"),
                    &["Front squat"],
                ),
                exercise("Bench press", 5, "3-5", None, &["Floor press"]),
                exercise("Deadlift", 3, "3", None, &["Trap bar deadlift"]),
                exercise("Weighted pull-up", 3, "5", None, &["Heavy lat pulldown"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Metabolic,
        block(
            "Metabolic circuit",
            vec![
                exercise("Kettlebell swing", 4, "15", None, &["Dumbbell swing", "Hip thrust"]),
                exercise("Thruster", 4, "12", None, &["Squat to press"]),
                exercise("Renegade row", 4, "8 per side", None, &["Dumbbell row"]),
                exercise("Mountain climbers", 4, "30 s", None, &["Burpee", "Plank jacks"]),
                exercise("Rowing ergometer", 4, "250 m", None, &["Assault bike 30 s"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Intervals,
        block(
            "Interval run",
            vec![
                exercise("Easy warm-up jog", 1, "10 min", None, &["Bike warm-up"]),
                exercise(
                    "Threshold intervals",
                    5,
                    "4 min",
                    Some("2 min easy jog between reps"),
                    &["Bike intervals"],
                ),
                exercise("Strides", 4, "20 s", None, &[]),
                exercise("Cool-down jog", 1, "10 min", None, &["Walk"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Endurance,
        block(
            "Endurance run",
            vec![
                exercise(
                    "Easy run",
                    1,
                    "30-60 min",
                    Some("Conversational pace (zone 2)"),
                    &["Bike ride", "Elliptical"],
                ),
                exercise("Hip mobility flow", 1, "8 min", None, &["Yoga flow"]),
                exercise("Single-leg calf raise", 2, "15 per leg", None, &["Calf raise"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Hybrid,
        block(
            "Hyrox interval circuit",
            vec![
                exercise("Run", 4, "1 km", Some("Race pace"), &["Rowing ergometer 1 km"]),
                exercise("Sled push", 4, "20 m", None, &["Heavy prowler walk", "Wall sit"]),
                exercise("Wall balls", 4, "20", None, &["Thruster"]),
                exercise("Farmer carry", 4, "50 m", None, &["Kettlebell carry"]),
                exercise("Burpee broad jump", 3, "10", None, &["Burpee"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Deload,
        block(
            "Deload full body",
            vec![
                exercise(
                    "Goblet squat",
                    2,
                    "10",
                    Some("Leave 3-4 reps in reserve"),
                    &["Box squat"],
                ),
                exercise("Push-up", 2, "8-10", None, &["Incline push-up"]),
                exercise("Dumbbell row", 2, "10", None, &["Band row"]),
                exercise("Mobility flow", 1, "10 min", None, &["Yoga flow"]),
            ],
        ),
    );

    blocks.insert(
        ExerciseBlockKey::Taper,
        block(
            "Taper endurance",
            vec![
                exercise("Easy run", 1, "20-40 min", Some("Keep it relaxed"), &["Bike ride"]),
                exercise("Race-pace pickups", 4, "1 min", None, &["Strides"]),
                exercise("Mobility flow", 1, "10 min", None, &["Foam rolling"]),
            ],
        ),
    );

    blocks
}
