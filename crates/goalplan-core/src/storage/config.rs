//! TOML-based settings for the planner.
//!
//! Stores:
//! - the default availability profile
//! - allocation tuning (milestone session length)
//! - conflict buffers
//! - suggestion thresholds and keyword lists
//!
//! Configuration is stored at `~/.config/goalplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::availability::AvailabilityModel;
use crate::conflict::DetectorConfig;
use crate::error::{ConfigError, CoreError, ValidationError};
use crate::scheduler::AllocationConfig;
use crate::suggestion::SuggestionConfig;

/// Planner configuration.
///
/// Serialized to/from TOML. Missing sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub availability: AvailabilityModel,
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

/// Optional fields that are omitted from the file while unset.
const OPTIONAL_KEYS: [(&str, &str); 3] = [
    ("availability", "minimum_sleep_hours"),
    ("availability", "sleep_time"),
    ("availability", "wake_time"),
];

impl Config {
    /// JSON view used for dot-path access; unset optional fields appear as `null`.
    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut json = serde_json::to_value(self)?;
        for (section, field) in OPTIONAL_KEYS {
            if let Some(obj) = json.get_mut(section).and_then(|v| v.as_object_mut()) {
                obj.entry(field).or_insert(serde_json::Value::Null);
            }
        }
        Ok(json)
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                // unset optional: numbers and `null` as JSON, anything else as text
                serde_json::Value::Null => serde_json::from_str(value)
                    .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Location of the user's config file.
    pub fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the user's config file, writing defaults if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed,
    /// or if the default config cannot be written.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        if path.exists() {
            return Self::load_from(&path);
        }
        let cfg = Self::default();
        cfg.save_to(&path)?;
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    }

    /// Persist to the user's config file.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Check cross-field constraints of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.availability.validate()?;
        self.suggestions.validate()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = self.to_json().ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not fit the
    /// field (including times that are not `HH:mm`), or the result fails
    /// [`validate`](Self::validate).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut json = self.to_json()?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate().map_err(|e| invalid(e.to_string()))?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let parsed: Config = toml::from_str("[detector]\ntransition_buffer_minutes = 45\n").unwrap();
        assert_eq!(parsed.detector.transition_buffer_minutes, 45);
        assert_eq!(parsed.detector.preparation_buffer_minutes, 15);
        assert_eq!(parsed.allocation.milestone_session_hours, 2);
        assert_eq!(parsed.suggestions.overload_threshold, 30);
        assert_eq!(parsed.availability, AvailabilityModel::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("availability.work_start_time").as_deref(), Some("09:00"));
        assert_eq!(cfg.get("detector.transition_buffer_minutes").as_deref(), Some("30"));
        assert_eq!(cfg.get("availability.allow_weekend_work").as_deref(), Some("false"));
        assert!(cfg.get("detector.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("allocation.milestone_session_hours", "3").unwrap();
        cfg.set("availability.allow_weekend_work", "true").unwrap();
        cfg.set("availability.work_end_time", "17:30").unwrap();
        cfg.set("suggestions.behind_progress_percent", "62.5").unwrap();
        cfg.set("availability.preferred_work_days", r#"["MON","SAT"]"#).unwrap();

        assert_eq!(cfg.allocation.milestone_session_hours, 3);
        assert!(cfg.availability.allow_weekend_work);
        assert_eq!(cfg.get("availability.work_end_time").as_deref(), Some("17:30"));
        assert_eq!(cfg.suggestions.behind_progress_percent, 62.5);
        assert_eq!(cfg.availability.work_days_per_week(), 2);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("detector.nonexistent", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
        assert!(cfg.set("", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("availability.allow_weekend_work", "sometimes").is_err());
        assert!(cfg.set("detector.transition_buffer_minutes", "half an hour").is_err());
        assert!(cfg.set("availability.work_start_time", "9am").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("detector.preparation_buffer_minutes", "10").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.detector.preparation_buffer_minutes, 10);
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn optional_profile_fields_can_be_set_and_cleared() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("availability.sleep_time").as_deref(), Some("null"));

        cfg.set("availability.sleep_time", "23:00").unwrap();
        cfg.set("availability.wake_time", "07:00").unwrap();
        cfg.set("availability.minimum_sleep_hours", "7").unwrap();
        assert_eq!(cfg.get("availability.sleep_time").as_deref(), Some("23:00"));
        assert_eq!(cfg.availability.minimum_sleep_hours, Some(7));

        cfg.set("availability.sleep_time", "null").unwrap();
        assert!(cfg.availability.sleep_time.is_none());
        assert!(cfg.set("availability.wake_time", "early").is_err());
    }

    #[test]
    fn workload_window_must_be_a_sane_range() {
        let mut cfg = Config::default();
        for value in ["9000000000000", "0", "-7", "367"] {
            let err = cfg.set("suggestions.workload_window_days", value).unwrap_err();
            assert!(matches!(err, CoreError::Config(ConfigError::InvalidValue { .. })));
        }
        cfg.set("suggestions.workload_window_days", "14").unwrap();
        assert_eq!(cfg.suggestions.workload_window_days, 14);
    }

    #[test]
    fn load_from_rejects_invalid_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[suggestions]\nworkload_window_days = 9000000000000\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }
}
