//! Goals and their milestones.
//!
//! A [`Goal`] owns its [`Milestone`]s by value; there is no back-pointer from
//! a milestone to its goal beyond the stored `goal_id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Goal priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// Goal category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalCategory {
    Work,
    Study,
    Health,
    Personal,
    Hobby,
    #[default]
    Other,
}

/// Goal status.
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    OnTrack,
    AtRisk,
    Delayed,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GoalStatus::Completed | GoalStatus::Cancelled)
    }
}

/// A checkpoint on the way to a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_hours: u32,
    #[serde(default)]
    pub order_index: u32,
}

impl Milestone {
    /// Mark the milestone completed on `on`.
    ///
    /// `completed_date` is only set on the false → true transition.
    pub fn mark_completed(&mut self, on: NaiveDate) {
        if !self.completed {
            self.completed = true;
            self.completed_date = Some(on);
        }
    }
}

/// A target outcome with a deadline and an effort budget in hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub estimated_hours: u32,
    #[serde(default)]
    pub completed_hours: u32,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        deadline: NaiveDate,
        estimated_hours: u32,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            deadline,
            priority: GoalPriority::default(),
            category: GoalCategory::default(),
            status: GoalStatus::default(),
            estimated_hours,
            completed_hours: 0,
            milestones: Vec::new(),
        }
    }

    /// `max(0, estimated - completed)`
    pub fn remaining_hours(&self) -> u32 {
        self.estimated_hours.saturating_sub(self.completed_hours)
    }

    /// Completed share of the estimate in percent; 0 when nothing is estimated.
    pub fn progress_percentage(&self) -> f64 {
        if self.estimated_hours == 0 {
            return 0.0;
        }
        self.completed_hours as f64 / self.estimated_hours as f64 * 100.0
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Milestones not yet completed, in `order_index` order (stable for ties).
    pub fn incomplete_milestones(&self) -> Vec<&Milestone> {
        let mut pending: Vec<&Milestone> =
            self.milestones.iter().filter(|m| !m.completed).collect();
        pending.sort_by_key(|m| m.order_index);
        pending
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title".to_string()));
        }
        if self.completed_hours > self.estimated_hours {
            return Err(ValidationError::EffortExceeded {
                completed: self.completed_hours,
                estimated: self.estimated_hours,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn milestone(id: &str, order: u32, completed: bool) -> Milestone {
        Milestone {
            id: id.to_string(),
            goal_id: "g".to_string(),
            title: id.to_string(),
            description: None,
            target_date: date(2025, 2, 1),
            completed,
            completed_date: None,
            estimated_hours: 4,
            order_index: order,
        }
    }

    #[test]
    fn remaining_and_progress() {
        let mut goal = Goal::new("g", "u", "Learn Rust", date(2025, 3, 1), 40);
        goal.completed_hours = 10;
        assert_eq!(goal.remaining_hours(), 30);
        assert_eq!(goal.progress_percentage(), 25.0);

        goal.estimated_hours = 0;
        goal.completed_hours = 0;
        assert_eq!(goal.progress_percentage(), 0.0);
        assert_eq!(goal.remaining_hours(), 0);
    }

    #[test]
    fn remaining_saturates_when_overshot() {
        let mut goal = Goal::new("g", "u", "Run", date(2025, 3, 1), 5);
        goal.completed_hours = 8;
        assert_eq!(goal.remaining_hours(), 0);
        assert_eq!(
            goal.validate(),
            Err(ValidationError::EffortExceeded { completed: 8, estimated: 5 })
        );
    }

    #[test]
    fn terminal_statuses() {
        assert!(GoalStatus::Completed.is_terminal());
        assert!(GoalStatus::Cancelled.is_terminal());
        assert!(!GoalStatus::AtRisk.is_terminal());
        assert!(!GoalStatus::NotStarted.is_terminal());
    }

    #[test]
    fn incomplete_milestones_follow_order_index() {
        let mut goal = Goal::new("g", "u", "Ship", date(2025, 3, 1), 20);
        goal.milestones = vec![
            milestone("c", 2, false),
            milestone("a", 0, true),
            milestone("b", 1, false),
        ];
        let ids: Vec<_> = goal.incomplete_milestones().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn completed_date_set_only_on_transition() {
        let mut m = milestone("a", 0, false);
        m.mark_completed(date(2025, 1, 5));
        m.mark_completed(date(2025, 1, 9));
        assert!(m.completed);
        assert_eq!(m.completed_date, Some(date(2025, 1, 5)));
    }

    #[test]
    fn enums_use_screaming_case_on_the_wire() {
        let json = r#"{
            "id": "g1", "user_id": "u1", "title": "Marathon",
            "deadline": "2025-06-01", "priority": "HIGH",
            "category": "HEALTH", "status": "ON_TRACK",
            "estimated_hours": 100, "completed_hours": 20
        }"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.priority, GoalPriority::High);
        assert_eq!(goal.category, GoalCategory::Health);
        assert_eq!(goal.status, GoalStatus::OnTrack);
        assert!(goal.milestones.is_empty());
    }
}
