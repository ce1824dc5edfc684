use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use coachplan::adaptive::{adaptive_suggestion, adherence_summary, consistency_streak};
use coachplan::batch::{BatchConfig, BatchGenerator};
use coachplan::config::AppConfig;
use coachplan::export::json::{read_document, write_document};
use coachplan::export::{text, OutputFormat};
use coachplan::logging::init_logging;
use coachplan::{
    week_access, CoachPlanError, GenerationMode, IntakeProfile, PlanBlock, SubscriptionTier,
    WeeklyReview,
};

/// coachplan - rule-based nutrition and training plans
///
/// Generates deterministic 4-week nutrition and training plans from an intake
/// profile, extends them from weekly reviews and suggests how the next block
/// should change.
#[derive(Parser)]
#[command(name = "coachplan")]
#[command(version)]
#[command(about = "Rule-based coaching plan engine", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format (json, text); defaults to the configured format
    #[arg(short = 'f', long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a plan block from an intake profile
    Generate {
        /// Intake profile (JSON)
        #[arg(short, long)]
        profile: PathBuf,

        /// Generate week 1 only and extend from reviews
        #[arg(long)]
        progressive: bool,

        /// Save the block as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Submit a weekly review to a saved block
    Extend {
        /// Saved block (JSON), updated in place unless --output is given
        #[arg(short, long)]
        block: PathBuf,

        /// Weekly review (JSON)
        #[arg(short, long)]
        review: PathBuf,

        /// Write the updated block here instead
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Suggest how the next block should change
    Suggest {
        /// Saved block whose reviews are used
        #[arg(short, long, conflicts_with = "reviews")]
        block: Option<PathBuf>,

        /// JSON array of weekly reviews
        #[arg(short, long)]
        reviews: Option<PathBuf>,

        /// Planned sessions per week when reviews omit it
        #[arg(short, long, default_value_t = 3)]
        planned: u32,

        /// Streak threshold; defaults to the configured threshold
        #[arg(short, long)]
        threshold: Option<Decimal>,
    },

    /// Show which plan weeks a tier can open
    Access {
        /// Subscription tier (starter, pro, premium)
        #[arg(short, long)]
        tier: Option<String>,

        /// Reviewed week numbers
        #[arg(short, long, value_delimiter = ',')]
        reviewed: Vec<u32>,

        /// Take the reviewed weeks from a saved block
        #[arg(short, long)]
        block: Option<PathBuf>,
    },

    /// Generate blocks for many profiles in parallel
    Batch {
        /// Intake profile files (JSON)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Worker threads
        #[arg(short, long)]
        threads: Option<usize>,

        /// Directory to save generated blocks in
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (key=value)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CoachPlanError>() {
            Some(coach_err) => {
                tracing::debug!(
                    severity = ?coach_err.severity(),
                    error = %coach_err,
                    "Command failed"
                );
                eprintln!("{} {}", "Error:".red().bold(), coach_err.user_message());
            }
            None => eprintln!("{} {:#}", "Error:".red().bold(), err),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone();
    if let Commands::Config { init: true, .. } = cli.command {
        return init_config(config_path);
    }

    let mut config = AppConfig::load_or_default(config_path.as_deref())?;

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    init_logging(&log_config)?;

    let format = cli.format.unwrap_or(config.settings.output_format);
    let catalog = config.catalog()?;

    match cli.command {
        Commands::Generate {
            profile,
            progressive,
            output,
        } => {
            let profile: IntakeProfile = read_document(&profile, "intake profile")?;
            let mode = if progressive {
                GenerationMode::Progressive
            } else {
                config.settings.generation_mode
            };

            let block = PlanBlock::generate(profile, mode, &catalog);
            if let Some(path) = output {
                write_document(&block, &path)?;
                eprintln!("{} {}", "✓ Block saved to".green(), path.display());
            }
            emit(format, &block, |out| text::write_block(out, &block))?;
        }

        Commands::Extend {
            block,
            review,
            output,
        } => {
            let mut plan_block: PlanBlock = read_document(&block, "plan block")?;
            let review: WeeklyReview = read_document(&review, "weekly review")?;

            let outcome = plan_block
                .submit_review(review, &catalog)
                .map_err(CoachPlanError::from)?;

            let target = output.unwrap_or(block);
            write_document(&plan_block, &target)?;
            eprintln!("{} {:?} ({})", "✓".green(), outcome, target.display());
            emit(format, &outcome, |out| {
                match plan_block.nutrition.last_week() {
                    Some(week) => writeln!(
                        out,
                        "Week {}: {} kcal/day ({} energy){}",
                        week.week_number,
                        week.average_calories_per_day,
                        week.direction,
                        if week.extra_meal_added { ", extra meal added" } else { "" }
                    ),
                    None => Ok(()),
                }
            })?;
        }

        Commands::Suggest {
            block,
            reviews,
            planned,
            threshold,
        } => {
            let (reviews, planned) = match (block, reviews) {
                (Some(path), _) => {
                    let plan_block: PlanBlock = read_document(&path, "plan block")?;
                    let days = plan_block.training.days_per_week;
                    (plan_block.reviews, days)
                }
                (None, Some(path)) => {
                    let reviews: Vec<WeeklyReview> = read_document(&path, "weekly reviews")?;
                    (reviews, planned)
                }
                (None, None) => bail!("Pass --block or --reviews"),
            };

            let threshold = threshold.unwrap_or(config.settings.streak_threshold);
            let suggestion = adaptive_suggestion(&reviews, planned);
            let summary = adherence_summary(&reviews, planned);
            let streak = consistency_streak(&reviews, threshold);

            #[derive(Serialize)]
            struct SuggestReport<'a> {
                suggestion: &'a coachplan::adaptive::AdaptiveSuggestion,
                summary: &'a coachplan::adaptive::AdherenceSummary,
                streak: u32,
            }
            let report = SuggestReport {
                suggestion: &suggestion,
                summary: &summary,
                streak,
            };
            emit(format, &report, |out| {
                text::write_suggestion(out, &suggestion, &summary, streak)
            })?;
        }

        Commands::Access {
            tier,
            reviewed,
            block,
        } => {
            let tier = tier
                .as_deref()
                .map(SubscriptionTier::from_label)
                .unwrap_or(config.settings.default_tier);
            let reviewed = match block {
                Some(path) => {
                    let plan_block: PlanBlock = read_document(&path, "plan block")?;
                    plan_block.reviewed_weeks()
                }
                None => reviewed,
            };

            let access = week_access(tier, &reviewed);
            emit(format, &access, |out| text::write_access(out, tier, &access))?;
        }

        Commands::Batch {
            inputs,
            threads,
            output_dir,
        } => {
            let generator = BatchGenerator::with_config(BatchConfig {
                num_threads: threads,
                mode: config.settings.generation_mode,
            });
            let summary = generator.generate_from_files(&inputs, &catalog)?;

            if let Some(dir) = output_dir {
                save_blocks(&dir, summary.blocks())?;
            }
            emit(format, &summary, |out| text::write_batch_summary(out, &summary))?;
        }

        Commands::Config { list, set, get, .. } => {
            let path = config_path.unwrap_or_else(AppConfig::default_config_path);

            if let Some(key_value) = set {
                let (key, value) = key_value
                    .split_once('=')
                    .context("Expected key=value")?;
                config.set_value(key.trim(), value)?;
                config.save_to_file(&path)?;
                println!("{} {} = {}", "✓".green(), key.trim(), value.trim());
            } else if let Some(key) = get {
                match config.get_value(&key) {
                    Some(value) => println!("{}", value),
                    None => bail!("Unknown configuration key: {}", key),
                }
            } else if list {
                println!("{}", format!("Configuration ({})", path.display()).bold());
                for (key, value) in config.list_values() {
                    println!("  {:<28} {}", key, value);
                }
            } else {
                println!("Use --list, --get, --set or --init");
            }
        }
    }

    Ok(())
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(AppConfig::default_config_path);
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    AppConfig::default().save_to_file(&path)?;
    println!("{} {}", "✓ Configuration written to".green(), path.display());
    Ok(())
}

/// Print a result as JSON or through its text renderer
fn emit<T, F>(format: OutputFormat, value: &T, render_text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>,
{
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputFormat::Text => render_text(&mut out)?,
    }
    Ok(())
}

fn save_blocks<'a>(dir: &Path, blocks: impl Iterator<Item = &'a PlanBlock>) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    for block in blocks {
        write_document(block, dir.join(format!("{}.json", block.id)))?;
    }
    Ok(())
}
