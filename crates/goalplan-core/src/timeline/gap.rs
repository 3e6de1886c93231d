//! Open-slot detection between time blocks.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityModel;
use crate::schedule::{clock, TimeBlock};

/// A free interval on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSlot {
    pub date: NaiveDate,
    #[serde(with = "clock::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "clock::hhmm")]
    pub end_time: NaiveTime,
}

impl OpenSlot {
    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Check if this slot can hold a block of the given length
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes() >= minutes
    }

    /// The leading `minutes` of this slot.
    pub fn trimmed_to(&self, minutes: i64) -> Self {
        Self {
            date: self.date,
            start_time: self.start_time,
            end_time: self.start_time + Duration::minutes(minutes.min(self.duration_minutes())),
        }
    }
}

/// Finder for open slots inside the working window of a date.
#[derive(Debug, Clone)]
pub struct OpenSlotFinder {
    /// Minimum slot length to report (minutes)
    min_slot_minutes: i64,
}

impl OpenSlotFinder {
    /// Create a finder that reports any non-empty slot
    pub fn new() -> Self {
        Self { min_slot_minutes: 1 }
    }

    /// Set the minimum slot length
    pub fn with_min_slot(mut self, minutes: i64) -> Self {
        self.min_slot_minutes = minutes.max(1);
        self
    }

    /// Find free slots on `date` between the work start and end times.
    ///
    /// Blocks without times occupy the whole date. Blocks on other dates are
    /// ignored.
    ///
    /// # Returns
    /// Slots sorted by start time
    pub fn find_slots(
        &self,
        date: NaiveDate,
        existing: &[TimeBlock],
        availability: &AvailabilityModel,
    ) -> Vec<OpenSlot> {
        let window_start = date.and_time(availability.work_start_time);
        let window_end = date.and_time(availability.work_end_time);
        if window_end <= window_start {
            return Vec::new();
        }

        let mut busy: Vec<(NaiveDateTime, NaiveDateTime)> = existing
            .iter()
            .map(|b| (b.start_datetime(), b.end_datetime()))
            .filter(|(start, end)| *start < window_end && *end > window_start)
            .collect();
        busy.sort_by_key(|(start, _)| *start);

        let mut slots = Vec::new();
        let mut cursor = window_start;

        for (start, end) in busy {
            if end <= cursor {
                continue;
            }
            if start > cursor {
                self.push_slot(&mut slots, date, cursor, start.min(window_end));
            }
            cursor = end.min(window_end);
            if cursor >= window_end {
                break;
            }
        }

        if cursor < window_end {
            self.push_slot(&mut slots, date, cursor, window_end);
        }

        slots
    }

    fn push_slot(
        &self,
        slots: &mut Vec<OpenSlot>,
        date: NaiveDate,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) {
        let slot = OpenSlot {
            date,
            start_time: start.time(),
            end_time: end.time(),
        };
        if slot.can_fit(self.min_slot_minutes) {
            slots.push(slot);
        }
    }
}

impl Default for OpenSlotFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Open slots on `date` long enough for `duration_minutes`.
pub fn find_open_slots(
    date: NaiveDate,
    duration_minutes: i64,
    existing: &[TimeBlock],
    availability: &AvailabilityModel,
) -> Vec<OpenSlot> {
    OpenSlotFinder::new()
        .with_min_slot(duration_minutes)
        .find_slots(date, existing, availability)
}

/// The earliest slot on `date`, trimmed to exactly `duration_minutes`.
pub fn first_open_slot(
    date: NaiveDate,
    duration_minutes: i64,
    existing: &[TimeBlock],
    availability: &AvailabilityModel,
) -> Option<OpenSlot> {
    find_open_slots(date, duration_minutes, existing, availability)
        .first()
        .map(|slot| slot.trimmed_to(duration_minutes))
}
