use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use goalplan_core::{find_open_slots, Config, TimeBlock};

use super::{availability_from, parse_date_arg, print_json, read_json, CommandResult};

#[derive(Args)]
pub struct SlotsArgs {
    /// Date to search (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    date: NaiveDate,
    /// Minimum slot length in minutes
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    minutes: i64,
    /// JSON file with an array of existing blocks
    #[arg(long)]
    existing: PathBuf,
    /// Availability JSON file; defaults to the configured profile
    #[arg(long)]
    availability: Option<PathBuf>,
}

pub fn run(args: SlotsArgs) -> CommandResult {
    let config = Config::load_or_default();
    let existing: Vec<TimeBlock> = read_json(&args.existing)?;
    let availability = availability_from(args.availability.as_deref(), &config)?;

    let slots = find_open_slots(args.date, args.minutes, &existing, &availability);
    print_json(&slots)
}
