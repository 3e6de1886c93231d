//! Schedule types: the [`TimeBlock`] unit produced by the allocation engine
//! and consumed by the conflict detector.

pub mod clock;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::goal::GoalPriority;

/// Priority tag carried by a time block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlockPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl From<GoalPriority> for BlockPriority {
    fn from(priority: GoalPriority) -> Self {
        match priority {
            GoalPriority::High => BlockPriority::High,
            GoalPriority::Medium => BlockPriority::Medium,
            GoalPriority::Low => BlockPriority::Low,
        }
    }
}

/// Lifecycle state of a block on the user's calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlockStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Who put the block on the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreatedBy {
    #[default]
    User,
    Ai,
}

/// The goal (and optionally milestone) a generated block serves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockOrigin {
    pub goal_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
}

/// A single scheduled, time-bounded activity on a calendar date.
///
/// Blocks are same-day: `end_time` is on `date`. A block without a start or
/// end time is treated as occupying the whole day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(
        default,
        with = "clock::hhmm_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveTime>,
    #[serde(
        default,
        with = "clock::hhmm_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub priority: BlockPriority,
    #[serde(default)]
    pub status: BlockStatus,
    #[serde(default)]
    pub created_by: CreatedBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<BlockOrigin>,
}

impl TimeBlock {
    /// Create an all-day block with default bookkeeping fields.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            date,
            start_time: None,
            end_time: None,
            priority: BlockPriority::default(),
            status: BlockStatus::default(),
            created_by: CreatedBy::default(),
            origin: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: BlockPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_origin(mut self, origin: BlockOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// True when either bound is missing.
    pub fn is_all_day(&self) -> bool {
        self.start_time.is_none() || self.end_time.is_none()
    }

    /// Start as a date+time composite; midnight when no start time is set.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time.unwrap_or(NaiveTime::MIN))
    }

    /// End as a date+time composite; the following midnight when no end time is set.
    pub fn end_datetime(&self) -> NaiveDateTime {
        match self.end_time {
            Some(end) => self.date.and_time(end),
            None => self.date.and_time(NaiveTime::MIN) + Duration::days(1),
        }
    }

    /// Get total duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_datetime() - self.start_datetime()).num_minutes()
    }

    /// Check the block invariants: non-blank title, and `start < end` when both are set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title".to_string()));
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start >= end {
                return Err(ValidationError::InvalidTimeRange { start, end });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether `date` lies in `[from, from + days)`.
    ///
    /// A window reaching past the last representable date is open-ended.
    pub fn falls_within(&self, from: NaiveDate, days: i64) -> bool {
        if self.date < from {
            return false;
        }
        match Duration::try_days(days).and_then(|d| from.checked_add_signed(d)) {
            Some(until) => self.date < until,
            None => days > 0,
        }
    }
}
