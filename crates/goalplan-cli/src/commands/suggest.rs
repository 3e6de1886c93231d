use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use goalplan_core::schedule::clock;
use goalplan_core::{Config, Goal, SuggestionEngine, TimeBlock};

use super::{parse_date_arg, print_json, read_json, CommandResult};

#[derive(Args)]
pub struct SuggestArgs {
    /// User the suggestions are for
    #[arg(long)]
    user: String,
    /// JSON file with an array of blocks
    #[arg(long)]
    schedules: PathBuf,
    /// JSON file with an array of goals
    #[arg(long)]
    goals: PathBuf,
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,
}

pub fn run(args: SuggestArgs) -> CommandResult {
    let config = Config::load_or_default();
    let schedules: Vec<TimeBlock> = read_json(&args.schedules)?;
    let goals: Vec<Goal> = read_json(&args.goals)?;
    let today = args.today.unwrap_or_else(clock::today);

    let engine = SuggestionEngine::with_config(config.suggestions, config.detector);
    let suggestions = engine.generate_suggestions(&args.user, &schedules, &goals, today);
    print_json(&suggestions)
}
