//! On-disk settings.

mod config;

pub use config::Config;

use std::path::PathBuf;

use crate::error::{ConfigError, CoreError};

/// Returns `~/.config/goalplan[-dev]/`, creating it if needed.
///
/// `GOALPLAN_ENV=dev` selects the development directory.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?.join(".config");

    let env = std::env::var("GOALPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("goalplan-dev")
    } else {
        base_dir.join("goalplan")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
