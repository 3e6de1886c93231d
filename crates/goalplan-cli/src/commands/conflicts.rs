use std::path::PathBuf;

use clap::Args;
use goalplan_core::{Config, ConflictDetector, TimeBlock};

use super::{print_json, read_json, CommandResult};

#[derive(Args)]
pub struct ConflictsArgs {
    /// Candidate block JSON file
    #[arg(long)]
    candidate: PathBuf,
    /// JSON file with an array of existing blocks
    #[arg(long)]
    existing: PathBuf,
}

pub fn run(args: ConflictsArgs) -> CommandResult {
    let config = Config::load_or_default();
    let candidate: TimeBlock = read_json(&args.candidate)?;
    candidate.validate()?;
    let existing: Vec<TimeBlock> = read_json(&args.existing)?;

    let conflicts = ConflictDetector::with_config(config.detector).detect_conflicts(&candidate, &existing);
    print_json(&conflicts)
}
