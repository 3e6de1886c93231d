//! Per-user working-time preferences used to constrain allocation.
//!
//! Defaults: 09:00-18:00 workday, 2 hours per day, 15 break minutes,
//! Monday to Friday, no weekend work.

use chrono::{Datelike, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schedule::clock;

const DEFAULT_WORK_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Working-hours and preferred-days profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityModel {
    #[serde(default = "default_work_start", with = "clock::hhmm")]
    pub work_start_time: NaiveTime,
    #[serde(default = "default_work_end", with = "clock::hhmm")]
    pub work_end_time: NaiveTime,
    #[serde(default = "default_hours_per_day")]
    pub preferred_work_hours_per_day: u32,
    #[serde(default = "default_break_minutes")]
    pub preferred_break_minutes: u32,
    /// Empty means Monday to Friday.
    #[serde(default = "default_work_days", with = "clock::weekdays")]
    pub preferred_work_days: Vec<Weekday>,
    #[serde(default)]
    pub allow_weekend_work: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_sleep_hours: Option<u32>,
    #[serde(
        default,
        with = "clock::hhmm_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleep_time: Option<NaiveTime>,
    #[serde(
        default,
        with = "clock::hhmm_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub wake_time: Option<NaiveTime>,
}

fn default_work_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}
fn default_work_end() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN)
}
fn default_hours_per_day() -> u32 {
    2
}
fn default_break_minutes() -> u32 {
    15
}
fn default_work_days() -> Vec<Weekday> {
    DEFAULT_WORK_DAYS.to_vec()
}

impl Default for AvailabilityModel {
    fn default() -> Self {
        Self {
            work_start_time: default_work_start(),
            work_end_time: default_work_end(),
            preferred_work_hours_per_day: default_hours_per_day(),
            preferred_break_minutes: default_break_minutes(),
            preferred_work_days: default_work_days(),
            allow_weekend_work: false,
            minimum_sleep_hours: None,
            sleep_time: None,
            wake_time: None,
        }
    }
}

impl AvailabilityModel {
    /// Whether `day` is one of the preferred work days (Mon-Fri when none are set).
    pub fn is_work_day(&self, day: impl Datelike) -> bool {
        let weekday = day.weekday();
        if self.preferred_work_days.is_empty() {
            return DEFAULT_WORK_DAYS.contains(&weekday);
        }
        self.preferred_work_days.contains(&weekday)
    }

    /// Number of distinct preferred days; 5 when none are set.
    pub fn work_days_per_week(&self) -> u32 {
        let mask = self
            .preferred_work_days
            .iter()
            .fold(0u8, |acc, d| acc | (1 << d.num_days_from_monday()));
        match mask.count_ones() {
            0 => DEFAULT_WORK_DAYS.len() as u32,
            n => n,
        }
    }

    /// Per-day effort cap; 2 when the profile carries zero.
    pub fn hours_per_day(&self) -> u32 {
        if self.preferred_work_hours_per_day > 0 {
            self.preferred_work_hours_per_day
        } else {
            default_hours_per_day()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.preferred_work_hours_per_day == 0 {
            return Err(ValidationError::InvalidValue {
                field: "preferred_work_hours_per_day".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.work_start_time >= self.work_end_time {
            return Err(ValidationError::InvalidTimeRange {
                start: self.work_start_time,
                end: self.work_end_time,
            });
        }
        Ok(())
    }
}
