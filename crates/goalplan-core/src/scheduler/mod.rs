//! Goal allocation engine.
//!
//! Turns a goal's remaining effort into same-day time blocks:
//! - Goals with incomplete milestones get fixed-length sessions per milestone,
//!   one per preferred work day up to the milestone's target date
//! - Other goals are spread first-fit over the preferred work days between
//!   today and the deadline, capped at the preferred hours per day
//!
//! The walk is greedy and deterministic for a fixed `today`. It does not
//! consult existing calendar blocks; callers compose it with the conflict
//! detector.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityModel;
use crate::goal::{Goal, Milestone};
use crate::schedule::{clock, BlockOrigin, BlockPriority, CreatedBy, TimeBlock};

/// Allocation policy knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Fixed session length for milestone work (hours)
    #[serde(default = "default_milestone_session_hours")]
    pub milestone_session_hours: u32,
}

fn default_milestone_session_hours() -> u32 {
    2
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            milestone_session_hours: default_milestone_session_hours(),
        }
    }
}

/// Greedy goal-to-calendar allocator.
#[derive(Debug, Clone, Default)]
pub struct GoalScheduler {
    config: AllocationConfig,
}

impl GoalScheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: AllocationConfig) -> Self {
        Self { config }
    }

    /// Generate work sessions for `goal`, starting on `today`.
    ///
    /// # Arguments
    /// * `goal` - Goal with its deadline, effort budget and milestones
    /// * `availability` - Working-hours profile constraining the sessions
    /// * `today` - First date a session may be placed on
    ///
    /// # Returns
    /// Blocks ordered by date within each milestone (milestones in
    /// `order_index` order). Units that cannot be scheduled contribute nothing.
    pub fn generate_schedule(
        &self,
        goal: &Goal,
        availability: &AvailabilityModel,
        today: NaiveDate,
    ) -> Vec<TimeBlock> {
        tracing::info!(goal = %goal.title, %today, "generating schedule");

        let milestones = goal.incomplete_milestones();
        let blocks: Vec<TimeBlock> = if milestones.is_empty() {
            self.allocate_goal(goal, availability, today)
        } else {
            milestones
                .into_iter()
                .flat_map(|m| self.allocate_milestone(goal, m, availability, today))
                .collect()
        };

        tracing::info!(goal = %goal.title, blocks = blocks.len(), "schedule generated");
        blocks
    }

    /// Same as [`generate_schedule`](Self::generate_schedule) with today's local date.
    pub fn generate_schedule_from_today(
        &self,
        goal: &Goal,
        availability: &AvailabilityModel,
    ) -> Vec<TimeBlock> {
        self.generate_schedule(goal, availability, clock::today())
    }

    /// Fixed-length sessions for one milestone, one per work day.
    fn allocate_milestone(
        &self,
        goal: &Goal,
        milestone: &Milestone,
        availability: &AvailabilityModel,
        today: NaiveDate,
    ) -> Vec<TimeBlock> {
        if milestone.target_date < today {
            tracing::warn!(
                milestone = %milestone.title,
                target = %milestone.target_date,
                "milestone target date is in the past; skipping"
            );
            return Vec::new();
        }

        let session_hours = self.config.milestone_session_hours.max(1);
        let total_sessions = milestone.estimated_hours.div_ceil(session_hours);
        let start = availability.work_start_time;
        let Some(end) = session_end(start, session_hours) else {
            tracing::warn!(
                milestone = %milestone.title,
                start = %clock::format_time(start),
                "session would cross midnight; skipping"
            );
            return Vec::new();
        };

        let title = format!("{} - {}", goal.title, milestone.title);
        let origin = BlockOrigin {
            goal_id: goal.id.clone(),
            milestone_id: Some(milestone.id.clone()),
        };

        let mut blocks = Vec::new();
        for date in work_days(today, milestone.target_date, availability) {
            if blocks.len() as u32 >= total_sessions {
                break;
            }
            let session = blocks.len() as u32 + 1;
            blocks.push(
                session_block(&title, goal, date, start, end, origin.clone())
                    .with_description(format!(
                        "Work session {session}/{total_sessions} toward the goal"
                    )),
            );
        }

        if (blocks.len() as u32) < total_sessions {
            tracing::debug!(
                milestone = %milestone.title,
                placed = blocks.len(),
                wanted = total_sessions,
                "ran out of work days before the target date"
            );
        }
        blocks
    }

    /// First-fit spread of the goal's remaining hours up to the deadline.
    fn allocate_goal(
        &self,
        goal: &Goal,
        availability: &AvailabilityModel,
        today: NaiveDate,
    ) -> Vec<TimeBlock> {
        let remaining = goal.remaining_hours();

        if goal.deadline < today {
            tracing::warn!(goal = %goal.title, deadline = %goal.deadline, "deadline is in the past");
            return Vec::new();
        }
        if remaining == 0 {
            tracing::warn!(goal = %goal.title, "no remaining hours to schedule");
            return Vec::new();
        }

        let days_until_deadline = (goal.deadline - today).num_days();
        let work_days_per_week = availability.work_days_per_week() as i64;
        let total_work_days = (days_until_deadline * work_days_per_week / 7).max(1);
        let per_day_cap = availability.hours_per_day() as i64;
        let hours_per_session = ((remaining as i64 + total_work_days - 1) / total_work_days)
            .min(per_day_cap) as u32;

        tracing::debug!(
            days_until_deadline,
            work_days_per_week,
            total_work_days,
            hours_per_session,
            "allocation parameters"
        );

        let start = availability.work_start_time;
        let origin = BlockOrigin {
            goal_id: goal.id.clone(),
            milestone_id: None,
        };

        let mut blocks = Vec::new();
        let mut allocated = 0u32;
        for date in work_days(today, goal.deadline, availability) {
            if allocated >= remaining {
                break;
            }
            let hours = hours_per_session.min(remaining - allocated);
            let Some(end) = session_end(start, hours) else {
                tracing::warn!(
                    goal = %goal.title,
                    start = %clock::format_time(start),
                    "session would cross midnight; stopping"
                );
                break;
            };

            allocated += hours;
            blocks.push(
                session_block(&goal.title, goal, date, start, end, origin.clone()).with_description(
                    format!("Goal work ({allocated}/{} hours)", goal.estimated_hours),
                ),
            );
            tracing::debug!(%date, hours, allocated, remaining, "session placed");
        }

        blocks
    }
}

/// Convenience function to allocate with default config
pub fn generate_schedule(
    goal: &Goal,
    availability: &AvailabilityModel,
    today: NaiveDate,
) -> Vec<TimeBlock> {
    GoalScheduler::new().generate_schedule(goal, availability, today)
}

/// Preferred work days in `[from, until]`, ascending.
fn work_days(
    from: NaiveDate,
    until: NaiveDate,
    availability: &AvailabilityModel,
) -> impl Iterator<Item = NaiveDate> + '_ {
    from.iter_days()
        .take_while(move |d| *d <= until)
        .filter(move |d| availability.is_work_day(*d))
}

/// `start + hours`, or `None` when that would not end on the same day.
fn session_end(start: NaiveTime, hours: u32) -> Option<NaiveTime> {
    let (end, wrapped) = start.overflowing_add_signed(Duration::hours(hours as i64));
    (wrapped == 0 && end > start).then_some(end)
}

fn session_block(
    title: &str,
    goal: &Goal,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    origin: BlockOrigin,
) -> TimeBlock {
    let mut block = TimeBlock::new(title, date)
        .with_times(start, end)
        .with_priority(BlockPriority::from(goal.priority))
        .with_origin(origin);
    block.created_by = CreatedBy::Ai;
    block
}
