use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use goalplan_core::schedule::clock;
use goalplan_core::{Config, Goal, GoalScheduler};

use super::{availability_from, parse_date_arg, print_json, read_json, CommandResult};

#[derive(Args)]
pub struct PlanArgs {
    /// Goal JSON file (milestones inline)
    #[arg(long)]
    goal: PathBuf,
    /// Availability JSON file; defaults to the configured profile
    #[arg(long)]
    availability: Option<PathBuf>,
    /// First schedulable date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,
}

pub fn run(args: PlanArgs) -> CommandResult {
    let config = Config::load_or_default();
    let goal: Goal = read_json(&args.goal)?;
    goal.validate()?;
    let availability = availability_from(args.availability.as_deref(), &config)?;
    let today = args.today.unwrap_or_else(clock::today);

    let blocks = GoalScheduler::with_config(config.allocation)
        .generate_schedule(&goal, &availability, today);
    print_json(&blocks)
}
