use coachplan::block::{GenerationMode, PlanBlock, ReviewOutcome};
use coachplan::catalog::Catalog;
use coachplan::error::ProgressionError;
use coachplan::export::json::{read_document, write_document};
use coachplan::models::{EnergyDirection, IntakeProfile, SubscriptionTier, WeeklyReview};
use tempfile::tempdir;

/// Integration tests for review-driven block progression

fn create_test_block(nutrition_goal: &str) -> PlanBlock {
    let mut profile = IntakeProfile::new("prestatie", 4, 60);
    profile.nutrition_goal = Some(nutrition_goal.to_string());
    PlanBlock::generate(profile, GenerationMode::Progressive, Catalog::builtin())
}

#[test]
fn test_full_progression_through_block() {
    let mut block = create_test_block("vetverlies");
    let catalog = Catalog::builtin();

    for week in 1..=3 {
        let outcome = block
            .submit_review(WeeklyReview::new(week).with_sessions(4, 4), catalog)
            .unwrap();
        assert_eq!(outcome, ReviewOutcome::Extended { week: week + 1 });
    }
    let outcome = block
        .submit_review(WeeklyReview::new(4).with_sessions(4, 4), catalog)
        .unwrap();
    assert_eq!(outcome, ReviewOutcome::Completed);
    assert!(block.is_completed());

    let directions: Vec<EnergyDirection> =
        block.nutrition.weeks.iter().map(|w| w.direction).collect();
    assert_eq!(
        directions,
        vec![
            EnergyDirection::Low,
            EnergyDirection::Low,
            EnergyDirection::Medium,
            EnergyDirection::Medium
        ]
    );
    assert_eq!(block.streak(rust_decimal_macros::dec!(0.7)), 4);
}

#[test]
fn test_extension_never_rewrites_earlier_weeks() {
    let mut block = create_test_block("onderhoud");
    let first_week = block.nutrition.weeks[0].clone();

    let mut review = WeeklyReview::new(1);
    review.hunger = Some(5);
    review.energy = Some(1);
    block.submit_review(review, Catalog::builtin()).unwrap();

    assert_eq!(block.nutrition.weeks[0], first_week);
    assert!(block.nutrition.weeks[1].extra_meal_added);
}

#[test]
fn test_guards_leave_block_untouched() {
    let mut block = create_test_block("onderhoud");
    block
        .submit_review(WeeklyReview::new(1), Catalog::builtin())
        .unwrap();
    let snapshot = block.clone();

    assert_eq!(
        block.submit_review(WeeklyReview::new(1), Catalog::builtin()),
        Err(ProgressionError::DuplicateReview { week: 1 })
    );
    assert_eq!(
        block.submit_review(WeeklyReview::new(4), Catalog::builtin()),
        Err(ProgressionError::OutOfOrder { expected: 2, week: 4 })
    );
    assert_eq!(
        block.submit_review(WeeklyReview::new(5), Catalog::builtin()),
        Err(ProgressionError::InvalidWeek { week: 5, max: 4 })
    );
    assert_eq!(block, snapshot);
}

#[test]
fn test_block_access_and_suggestion() {
    let mut block = create_test_block("onderhoud");
    block
        .submit_review(WeeklyReview::new(1).with_sessions(1, 4), Catalog::builtin())
        .unwrap();

    let access = block.access(SubscriptionTier::Pro);
    assert_eq!(access.clickable, vec![1, 2, 3]);
    assert_eq!(
        block.suggestion().action,
        coachplan::adaptive::AdaptiveAction::ReduceVolume
    );
}

#[test]
fn test_saved_block_can_be_extended() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("block.json");

    let block = create_test_block("prestatie");
    write_document(&block, &path).unwrap();

    let mut restored: PlanBlock = read_document(&path, "plan block").unwrap();
    assert_eq!(restored.id, block.id);

    let outcome = restored
        .submit_review(WeeklyReview::new(1), Catalog::builtin())
        .unwrap();
    assert_eq!(outcome, ReviewOutcome::Extended { week: 2 });
    assert_eq!(restored.nutrition.weeks[1].direction, EnergyDirection::High);
}
