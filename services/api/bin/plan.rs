//! Command-line learning-path generator.
//!
//! Runs the engine once for the given profile and prints the result as JSON.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use studypath_core::{
    ScheduleBuilder,
    curriculum::CatalogRepository,
    predictor::{FileModelLoader, LazyPredictor},
    profile::{ProfileInput, ProfileValidator},
    schedule::StudyDays,
};
use tracing_subscriber::EnvFilter;

/// Generate a personalised study schedule
#[derive(Parser, Debug)]
#[command(name = "plan", version, about)]
struct PlanArgs {
    /// Subject (math, physics, chemistry)
    #[arg(long)]
    subject: String,

    /// Grade band (thcs, thpt)
    #[arg(long)]
    grade: String,

    /// Current score on the 0-10 scale
    #[arg(long)]
    current: f64,

    /// Target score on the 0-10 scale
    #[arg(long)]
    target: f64,

    /// Number of weeks to plan
    #[arg(long)]
    weeks: i64,

    /// Daily study hours
    #[arg(long)]
    hours: f64,

    /// Learning style (practical, theory, combined)
    #[arg(long, default_value = "combined")]
    style: String,

    /// First day of week 1 (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Only draw new lessons Monday to Friday of each plan week
    #[arg(long)]
    weekdays: bool,

    /// Curriculum catalog JSON; defaults to the embedded catalog
    #[arg(long)]
    curriculum: Option<PathBuf>,

    /// Success model parameters JSON; defaults to the built-in parameters
    #[arg(long)]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = PlanArgs::parse();

    let input = ProfileInput {
        subject: args.subject,
        grade: args.grade,
        current_score: args.current,
        target_score: args.target,
        duration_weeks: args.weeks,
        daily_study_hours: args.hours,
        learning_style: args.style,
    };
    let profile = ProfileValidator::validate_input(&input)?;

    let curriculum = CatalogRepository::load(args.curriculum.as_deref())
        .context("Failed to load curriculum catalog")?;
    let predictor = LazyPredictor::initialize(FileModelLoader::new(args.model)).await?;

    let study_days = if args.weekdays {
        StudyDays::Weekdays
    } else {
        StudyDays::AllWeek
    };
    let mut builder = ScheduleBuilder::new(Arc::new(predictor), Arc::new(curriculum))
        .with_study_days(study_days);
    if let Some(start) = args.start {
        builder = builder.with_start_date(start);
    }

    let learning_path = builder.generate_learning_path(&profile).await?;
    println!("{}", serde_json::to_string_pretty(&learning_path)?);
    Ok(())
}
