use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "goalplan", version, about = "Goal scheduling CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate work sessions for a goal
    Plan(commands::plan::PlanArgs),
    /// Check a block against existing blocks
    Conflicts(commands::conflicts::ConflictsArgs),
    /// Generate suggestions for a user's schedules and goals
    Suggest(commands::suggest::SuggestArgs),
    /// List open slots on a date
    Slots(commands::slots::SlotsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("GOALPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Conflicts(args) => commands::conflicts::run(args),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
