use colored::*;
use std::io::{self, Write};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::access::WeekAccess;
use crate::adaptive::{AdaptiveAction, AdaptiveSuggestion, AdherenceSummary};
use crate::batch::BatchSummary;
use crate::block::PlanBlock;
use crate::models::{SubscriptionTier, BLOCK_WEEKS};
use crate::nutrition_plan::NutritionPlan;
use crate::training_plan::TrainingPlan;

#[derive(Tabled)]
struct NutritionRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Energy")]
    energy: String,
    #[tabled(rename = "kcal/day")]
    kcal: u32,
    #[tabled(rename = "Protein (g)")]
    protein: u32,
    #[tabled(rename = "Carbs (g)")]
    carbs: u32,
    #[tabled(rename = "Fat (g)")]
    fat: u32,
    #[tabled(rename = "Example day")]
    example_kcal: String,
}

#[derive(Tabled)]
struct TrainingRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Focus")]
    focus: String,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "Intensity")]
    intensity: String,
    #[tabled(rename = "Rest (s)")]
    rest: u32,
    #[tabled(rename = "Sessions")]
    sessions: usize,
}

#[derive(Tabled)]
struct SessionRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Type")]
    session_type: String,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "Exercises")]
    exercises: String,
}

#[derive(Tabled)]
struct BatchRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Block")]
    block: String,
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title.bold().cyan())?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

/// Write a nutrition plan as a week table plus rationale and example days
pub fn write_nutrition_plan<W: Write>(out: &mut W, plan: &NutritionPlan) -> io::Result<()> {
    heading(out, "NUTRITION PLAN")?;
    writeln!(out, "Goal: {}", plan.nutrition_goal)?;
    if let Some(note) = &plan.dietary_note {
        writeln!(out, "Dietary note: {}", note)?;
    }
    if let Some(tdee) = plan.reference.tdee {
        writeln!(
            out,
            "Estimated daily need: {} kcal ({} for this goal)",
            tdee, plan.reference.goal_adjustment.label
        )?;
    }
    writeln!(out)?;

    let rows: Vec<NutritionRow> = plan
        .weeks
        .iter()
        .map(|w| NutritionRow {
            week: w.week_number,
            energy: w.direction.to_string(),
            kcal: w.average_calories_per_day,
            protein: w.macros.protein_g,
            carbs: w.macros.carbs_g,
            fat: w.macros.fat_g,
            example_kcal: if w.extra_meal_added {
                format!("{} (+meal)", w.example_day.total_kcal)
            } else {
                w.example_day.total_kcal.to_string()
            },
        })
        .collect();
    writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;

    for week in &plan.weeks {
        writeln!(out)?;
        writeln!(out, "{}", format!("Week {}", week.week_number).bold())?;
        writeln!(out, "{}", week.rationale)?;
        writeln!(out, "Tip: {}", week.tip)?;
        for slot in &week.example_day.meals {
            let names: Vec<&str> = slot.items.iter().map(|m| m.name.as_str()).collect();
            let names = if names.is_empty() {
                "no example available".to_string()
            } else {
                names.join(", ")
            };
            writeln!(out, "  {:<10} {}", slot.slot.to_string(), names)?;
        }
    }
    Ok(())
}

/// Write a training plan as a week table plus the sessions of every week
pub fn write_training_plan<W: Write>(out: &mut W, plan: &TrainingPlan) -> io::Result<()> {
    heading(out, "TRAINING PLAN")?;
    writeln!(
        out,
        "Goal: {} | Level: {} | {} days x {} min | Split: {}",
        plan.goal, plan.level, plan.days_per_week, plan.session_minutes, plan.split
    )?;
    if let Some(sport) = &plan.main_sport {
        writeln!(out, "Main sport: {}", sport)?;
    }
    writeln!(out)?;

    let rows: Vec<TrainingRow> = plan
        .weeks
        .iter()
        .map(|w| TrainingRow {
            week: w.week_number,
            focus: w.focus.clone(),
            minutes: w.volume_minutes,
            intensity: w.intensity.to_string(),
            rest: w.rest_seconds,
            sessions: w.sessions.len(),
        })
        .collect();
    writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;
    writeln!(
        out,
        "Block total: {} min over {} sessions",
        plan.total_minutes(),
        plan.session_count()
    )?;

    for week in &plan.weeks {
        writeln!(out)?;
        writeln!(out, "{}", format!("Week {}: {}", week.week_number, week.focus).bold())?;
        writeln!(out, "{}", week.rationale)?;
        if let Some(note) = &week.note {
            writeln!(out, "{}", note.yellow())?;
        }
        if let Some(note) = &week.intensity.note {
            writeln!(out, "{}: {}", week.intensity, note)?;
        }

        let sessions: Vec<SessionRow> = week
            .sessions
            .iter()
            .map(|s| SessionRow {
                day: s.day_label.clone(),
                session_type: s.session_type.clone(),
                minutes: s.duration_minutes,
                exercises: s
                    .exercises
                    .iter()
                    .map(|e| format!("{} {}x{}", e.name, e.sets, e.reps))
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect();
        writeln!(out, "{}", Table::new(sessions).with(Style::sharp()))?;
    }
    Ok(())
}

/// Write both plans of a block with its review progress
pub fn write_block<W: Write>(out: &mut W, block: &PlanBlock) -> io::Result<()> {
    writeln!(out, "{} {}", "Block".bold(), block.id)?;
    writeln!(
        out,
        "Created: {} | Nutrition weeks: {}/{} | Reviews: {}",
        block.created_at.format("%Y-%m-%d %H:%M UTC"),
        block.current_weeks(),
        BLOCK_WEEKS,
        block.reviews.len()
    )?;
    writeln!(out)?;
    write_nutrition_plan(out, &block.nutrition)?;
    writeln!(out)?;
    write_training_plan(out, &block.training)
}

pub fn write_suggestion<W: Write>(
    out: &mut W,
    suggestion: &AdaptiveSuggestion,
    summary: &AdherenceSummary,
    streak: u32,
) -> io::Result<()> {
    let action = match suggestion.action {
        AdaptiveAction::ReduceVolume => suggestion.action.to_string().red(),
        AdaptiveAction::Simplify => suggestion.action.to_string().yellow(),
        AdaptiveAction::IncreaseIntensity => suggestion.action.to_string().green(),
        AdaptiveAction::Maintain => suggestion.action.to_string().normal(),
    };

    heading(out, "NEXT BLOCK")?;
    writeln!(out, "Suggestion: {}", action.bold())?;
    writeln!(out, "{}", suggestion.message)?;
    writeln!(out)?;
    writeln!(out, "Reviews: {}", summary.reviews)?;
    writeln!(
        out,
        "Sessions: {}/{} ({:.0}%)",
        summary.completed_sessions,
        summary.planned_sessions,
        summary.completion_rate * rust_decimal::Decimal::ONE_HUNDRED
    )?;
    writeln!(out, "Mean energy: {:.1}", summary.mean_energy)?;
    writeln!(out, "Mean difficulty: {:.1}", summary.mean_difficulty)?;
    writeln!(out, "Consistency streak: {} week(s)", streak)
}

pub fn write_access<W: Write>(
    out: &mut W,
    tier: SubscriptionTier,
    access: &WeekAccess,
) -> io::Result<()> {
    heading(out, "PLAN ACCESS")?;
    writeln!(out, "Tier: {}", tier)?;
    for week in 1..=BLOCK_WEEKS {
        let state = if access.clickable.contains(&week) {
            "open".green()
        } else if access.visible.contains(&week) {
            "locked".yellow()
        } else {
            "hidden".dimmed()
        };
        writeln!(out, "  Week {}: {}", week, state)?;
    }
    Ok(())
}

pub fn write_batch_summary<W: Write>(out: &mut W, summary: &BatchSummary) -> io::Result<()> {
    heading(out, "BATCH GENERATION")?;
    writeln!(
        out,
        "Total: {} | Generated: {} | Failed: {} | {:.2}s ({:.1} blocks/sec)",
        summary.total,
        summary.generated,
        summary.failed,
        summary.duration_ms as f64 / 1000.0,
        summary.throughput()
    )?;

    let rows: Vec<BatchRow> = summary
        .items
        .iter()
        .map(|item| BatchRow {
            source: item.source.clone(),
            status: if item.block.is_some() {
                "ok".to_string()
            } else {
                item.error.clone().unwrap_or_else(|| "failed".to_string())
            },
            block: item
                .block
                .as_ref()
                .map(|b| b.id.to_string())
                .unwrap_or_default(),
        })
        .collect();
    writeln!(out, "{}", Table::new(rows).with(Style::rounded()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::week_access;
    use crate::block::GenerationMode;
    use crate::catalog::Catalog;
    use crate::models::IntakeProfile;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_block_text() {
        let block = PlanBlock::generate(
            IntakeProfile::new("vetverlies", 3, 60),
            GenerationMode::Full,
            Catalog::builtin(),
        );
        let text = render(|out| write_block(out, &block));

        assert!(text.contains("NUTRITION PLAN"));
        assert!(text.contains("TRAINING PLAN"));
        assert!(text.contains("Dag 1"));
        assert!(text.contains("Metabolic conditioning"));
        assert!(text.contains(&format!(
            "Block total: {} min over 12 sessions",
            block.training.total_minutes()
        )));
    }

    #[test]
    fn test_access_text() {
        let access = week_access(SubscriptionTier::Pro, &[]);
        let text = render(|out| write_access(out, SubscriptionTier::Pro, &access));
        assert!(text.contains("Week 3"));
        assert!(text.contains("locked"));
    }
}
