pub mod config;
pub mod conflicts;
pub mod plan;
pub mod slots;
pub mod suggest;

use std::path::Path;

use chrono::NaiveDate;
use goalplan_core::schedule::clock;
use goalplan_core::{AvailabilityModel, Config, CoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Read and decode a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    tracing::debug!(path = %path.display(), "reading input");
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("invalid JSON in {}: {e}", path.display()))?;
    Ok(value)
}

/// Availability from `path`, or the configured default profile.
pub fn availability_from(
    path: Option<&Path>,
    config: &Config,
) -> Result<AvailabilityModel, Box<dyn std::error::Error>> {
    let availability = match path {
        Some(path) => read_json(path)?,
        None => config.availability.clone(),
    };
    availability.validate()?;
    Ok(availability)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// clap value parser for `YYYY-MM-DD`.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, CoreError> {
    Ok(clock::parse_date(value)?)
}
