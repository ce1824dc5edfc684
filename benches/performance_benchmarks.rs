use coachplan::batch::{BatchConfig, BatchGenerator};
use coachplan::block::{GenerationMode, PlanBlock};
use coachplan::catalog::Catalog;
use coachplan::models::{IntakeProfile, Sex, WeeklyReview};
use coachplan::nutrition_plan::NutritionPlanGenerator;
use coachplan::training_plan::TrainingPlanGenerator;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal_macros::dec;

/// Performance benchmarks for plan generation
///
/// Single-plan generation is measured per goal; batch generation with
/// growing profile counts checks that parallel generation scales.

const GOALS: [&str; 6] = ["marathon", "hyrox", "prestatie", "vetverlies", "onderhoud", "conditie"];

fn create_benchmark_profile(goal: &str, days: u32) -> IntakeProfile {
    let mut profile = IntakeProfile::new(goal, days, 60);
    profile.age = Some(35);
    profile.height_cm = Some(dec!(180));
    profile.weight_kg = Some(dec!(78));
    profile.sex = Some(Sex::Female);
    profile.nutrition_goal = Some("prestatie".to_string());
    profile
}

fn create_profile_dataset(size: usize) -> Vec<IntakeProfile> {
    (0..size)
        .map(|i| create_benchmark_profile(GOALS[i % GOALS.len()], (i % 7) as u32 + 1))
        .collect()
}

fn bench_plan_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Plan Generation");

    for goal in GOALS {
        let profile = create_benchmark_profile(goal, 5);

        group.bench_with_input(BenchmarkId::new("nutrition", goal), &profile, |b, profile| {
            b.iter(|| {
                NutritionPlanGenerator::generate_plan(black_box(profile), Catalog::builtin())
            });
        });
        group.bench_with_input(BenchmarkId::new("training", goal), &profile, |b, profile| {
            b.iter(|| TrainingPlanGenerator::generate_plan(black_box(profile), Catalog::builtin()));
        });
    }

    group.finish();
}

fn bench_block_progression(c: &mut Criterion) {
    let profile = create_benchmark_profile("prestatie", 4);

    c.bench_function("progressive block with 4 reviews", |b| {
        b.iter(|| {
            let mut block = PlanBlock::generate(
                profile.clone(),
                GenerationMode::Progressive,
                Catalog::builtin(),
            );
            for week in 1..=4 {
                let review = WeeklyReview::new(week).with_sessions(3, 4).with_ratings(3, 3);
                let _ = block.submit_review(review, Catalog::builtin());
            }
            black_box(block)
        });
    });
}

fn bench_batch_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Generation");
    let generator = BatchGenerator::with_config(BatchConfig::default());

    for &size in &[10, 100, 1000] {
        let profiles = create_profile_dataset(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("generate", size), &profiles, |b, profiles| {
            b.iter(|| generator.generate(black_box(profiles), Catalog::builtin()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_plan_generation,
    bench_block_progression,
    bench_batch_generation
);
criterion_main!(benches);
