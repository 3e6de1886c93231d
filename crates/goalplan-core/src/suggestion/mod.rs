//! Suggestion generator.
//!
//! Four independent read-only passes over a user's schedules and goals,
//! concatenated in this order:
//! 1. conflict suggestions (pairwise, via [`ConflictDetector`])
//! 2. goal-progress suggestions
//! 3. a time-management suggestion for overloaded weeks
//! 4. a wellbeing suggestion for weeks without restorative blocks

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::{Conflict, ConflictDetector, ConflictSeverity, DetectorConfig, Resolution, ResolutionType};
use crate::error::ValidationError;
use crate::goal::Goal;
use crate::schedule::{clock, TimeBlock};

/// Kind of suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionType {
    ConflictResolution,
    ScheduleOptimization,
    GoalProgress,
    TimeManagement,
    Wellbeing,
    Productivity,
    Reminder,
}

/// How soon the user should act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SuggestionPriority {
    /// Act within a day
    Urgent,
    /// Act this week
    High,
    Medium,
    Low,
}

impl From<ConflictSeverity> for SuggestionPriority {
    fn from(severity: ConflictSeverity) -> Self {
        match severity {
            ConflictSeverity::Critical => SuggestionPriority::Urgent,
            ConflictSeverity::High => SuggestionPriority::High,
            ConflictSeverity::Medium => SuggestionPriority::Medium,
            ConflictSeverity::Low => SuggestionPriority::Low,
        }
    }
}

/// Action-type tag carried by a suggestion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Reschedule,
    ExtendTime,
    ReduceTime,
    Cancel,
    Delegate,
    AddTime,
    RescheduleGoal,
    Optimize,
    AddBreak,
    Dismiss,
}

impl From<ResolutionType> for ActionKind {
    fn from(resolution: ResolutionType) -> Self {
        match resolution {
            ResolutionType::Reschedule => ActionKind::Reschedule,
            ResolutionType::ExtendTime => ActionKind::ExtendTime,
            ResolutionType::ReduceTime => ActionKind::ReduceTime,
            ResolutionType::Cancel => ActionKind::Cancel,
            ResolutionType::Delegate => ActionKind::Delegate,
        }
    }
}

/// Payload the caller needs to carry out an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionData {
    #[default]
    None,
    Resolution(Resolution),
    Goal {
        goal_id: String,
        title: String,
        deadline: NaiveDate,
        remaining_hours: u32,
    },
}

/// A user-facing action attached to a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionAction {
    pub label: String,
    pub action_type: ActionKind,
    #[serde(default)]
    pub data: ActionData,
}

impl SuggestionAction {
    pub fn new(label: impl Into<String>, action_type: ActionKind) -> Self {
        Self {
            label: label.into(),
            action_type,
            data: ActionData::None,
        }
    }

    pub fn with_data(mut self, data: ActionData) -> Self {
        self.data = data;
        self
    }
}

/// A prioritized recommendation for the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub priority: SuggestionPriority,
    pub title: String,
    pub description: String,
    pub actions: Vec<SuggestionAction>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub dismissed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_goal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_schedule_id: Option<String>,
}

impl Suggestion {
    pub fn new(
        user_id: &str,
        suggestion_type: SuggestionType,
        priority: SuggestionPriority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            suggestion_type,
            priority,
            title: title.into(),
            description: description.into(),
            actions: Vec::new(),
            created_at: Utc::now(),
            dismissed: false,
            related_goal_id: None,
            related_schedule_id: None,
        }
    }

    pub fn with_actions(mut self, actions: Vec<SuggestionAction>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_related_goal(mut self, goal_id: impl Into<String>) -> Self {
        self.related_goal_id = Some(goal_id.into());
        self
    }

    pub fn with_related_schedule(mut self, schedule_id: Option<String>) -> Self {
        self.related_schedule_id = schedule_id;
        self
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }
}

/// Heuristic thresholds for the goal, workload and wellbeing passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Deadlines this close (days) are checked for lagging progress
    #[serde(default = "default_deadline_window_days")]
    pub deadline_window_days: i64,
    /// Progress below this (percent) near the deadline is urgent
    #[serde(default = "default_behind_progress_percent")]
    pub behind_progress_percent: f64,
    /// Progress at or above this (percent), below 100, is "almost there"
    #[serde(default = "default_almost_done_percent")]
    pub almost_done_percent: f64,
    /// Length of the workload window starting today (days)
    #[serde(default = "default_workload_window_days")]
    pub workload_window_days: i64,
    /// More blocks than this in the window is an overload
    #[serde(default = "default_overload_threshold")]
    pub overload_threshold: usize,
    /// More work-like blocks than this without rest triggers wellbeing
    #[serde(default = "default_wellbeing_work_threshold")]
    pub wellbeing_work_threshold: usize,
    #[serde(default = "default_rest_keywords")]
    pub rest_keywords: Vec<String>,
    #[serde(default = "default_exercise_keywords")]
    pub exercise_keywords: Vec<String>,
    #[serde(default = "default_hobby_keywords")]
    pub hobby_keywords: Vec<String>,
}

/// Upper bound for the configurable day windows.
pub const MAX_WINDOW_DAYS: i64 = 366;

fn default_deadline_window_days() -> i64 {
    7
}
fn default_behind_progress_percent() -> f64 {
    70.0
}
fn default_almost_done_percent() -> f64 {
    90.0
}
fn default_workload_window_days() -> i64 {
    7
}
fn default_overload_threshold() -> usize {
    30
}
fn default_wellbeing_work_threshold() -> usize {
    20
}
fn default_rest_keywords() -> Vec<String> {
    vec!["rest".into(), "break".into(), "휴식".into()]
}
fn default_exercise_keywords() -> Vec<String> {
    vec!["exercise".into(), "workout".into(), "운동".into()]
}
fn default_hobby_keywords() -> Vec<String> {
    vec!["hobby".into(), "취미".into()]
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            deadline_window_days: default_deadline_window_days(),
            behind_progress_percent: default_behind_progress_percent(),
            almost_done_percent: default_almost_done_percent(),
            workload_window_days: default_workload_window_days(),
            overload_threshold: default_overload_threshold(),
            wellbeing_work_threshold: default_wellbeing_work_threshold(),
            rest_keywords: default_rest_keywords(),
            exercise_keywords: default_exercise_keywords(),
            hobby_keywords: default_hobby_keywords(),
        }
    }
}

impl SuggestionConfig {
    /// Checks a title against keywords, ignoring case.
    ///
    /// ASCII keywords match whole words, with an optional plural `s`
    /// ("Breaks" matches "break", "Interest" does not match "rest"). An
    /// all-caps word in a mixed-case title is read as an acronym and never
    /// matches, so "REST API design" is work. Other keywords (Hangul, for
    /// example) match as substrings since words there carry attached
    /// particles.
    fn title_matches(title: &str, keywords: &[String]) -> bool {
        let has_lowercase = title.chars().any(char::is_lowercase);
        let words: Vec<String> = title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .filter(|w| !(has_lowercase && w.chars().count() > 1 && is_acronym(w)))
            .map(str::to_lowercase)
            .collect();
        let lowered = title.to_lowercase();

        keywords.iter().any(|keyword| {
            let keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() {
                false
            } else if keyword.is_ascii() {
                matches_words(&words, &keyword)
            } else {
                lowered.contains(&keyword)
            }
        })
    }

    /// Reject window lengths that make no sense as a calendar range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.workload_window_days) {
            return Err(ValidationError::InvalidValue {
                field: "workload_window_days".to_string(),
                message: format!("must be between 1 and {MAX_WINDOW_DAYS}"),
            });
        }
        if !(0..=MAX_WINDOW_DAYS).contains(&self.deadline_window_days) {
            return Err(ValidationError::InvalidValue {
                field: "deadline_window_days".to_string(),
                message: format!("must be between 0 and {MAX_WINDOW_DAYS}"),
            });
        }
        Ok(())
    }

    /// Rest or exercise. Hobbies still count as work-like.
    fn is_rest_or_exercise(&self, block: &TimeBlock) -> bool {
        Self::title_matches(&block.title, &self.rest_keywords)
            || Self::title_matches(&block.title, &self.exercise_keywords)
    }

    fn is_restorative(&self, block: &TimeBlock) -> bool {
        self.is_rest_or_exercise(block) || Self::title_matches(&block.title, &self.hobby_keywords)
    }
}

fn is_acronym(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        && word.chars().any(|c| c.is_ascii_uppercase())
}

/// Whether `keyword` (one or more words) appears as consecutive words.
fn matches_words(words: &[String], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword
        .split(|c: char| !c.is_alphanumeric())
        .filter(|p| !p.is_empty())
        .collect();
    let Some((last, leading)) = parts.split_last() else {
        return false;
    };

    words.windows(parts.len()).any(|window| {
        let Some((tail, head)) = window.split_last() else {
            return false;
        };
        head.iter().zip(leading).all(|(w, p)| w.as_str() == *p)
            && (tail.as_str() == *last || tail.strip_suffix('s') == Some(*last))
    })
}

/// Suggestion generator over one user's schedules and goals.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    detector: ConflictDetector,
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create an engine with default thresholds and buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom thresholds and detector buffers
    pub fn with_config(config: SuggestionConfig, detector: DetectorConfig) -> Self {
        Self {
            detector: ConflictDetector::with_config(detector),
            config,
        }
    }

    /// Run all passes for `user_id` as of `today`.
    pub fn generate_suggestions(
        &self,
        user_id: &str,
        schedules: &[TimeBlock],
        goals: &[Goal],
        today: NaiveDate,
    ) -> Vec<Suggestion> {
        let mut suggestions = self.conflict_suggestions(user_id, schedules);
        suggestions.extend(self.goal_progress_suggestions(user_id, goals, today));
        suggestions.extend(self.time_management_suggestions(user_id, schedules, today));
        suggestions.extend(self.wellbeing_suggestions(user_id, schedules, today));

        tracing::debug!(user = user_id, count = suggestions.len(), "suggestions generated");
        suggestions
    }

    /// Same as [`generate_suggestions`](Self::generate_suggestions) with today's local date.
    pub fn generate_suggestions_from_today(
        &self,
        user_id: &str,
        schedules: &[TimeBlock],
        goals: &[Goal],
    ) -> Vec<Suggestion> {
        self.generate_suggestions(user_id, schedules, goals, clock::today())
    }

    /// Suggestions that have not been dismissed.
    pub fn active(suggestions: &[Suggestion]) -> Vec<&Suggestion> {
        suggestions.iter().filter(|s| !s.dismissed).collect()
    }

    /// One suggestion per conflict, checking every block against all others.
    ///
    /// Quadratic in the number of schedules; callers bound the set (one week
    /// at a time, for example).
    pub fn conflict_suggestions(&self, user_id: &str, schedules: &[TimeBlock]) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for (i, schedule) in schedules.iter().enumerate() {
            let others = [&schedules[..i], &schedules[i + 1..]].concat();
            for conflict in self.detector.detect_conflicts(schedule, &others) {
                suggestions.push(
                    Suggestion::new(
                        user_id,
                        SuggestionType::ConflictResolution,
                        conflict.severity.into(),
                        "Schedule conflict detected",
                        conflict.description.clone(),
                    )
                    .with_actions(conflict_actions(&conflict))
                    .with_related_schedule(schedule.id.clone()),
                );
            }
        }

        suggestions
    }

    /// Deadline-pressure and almost-done suggestions for open goals.
    pub fn goal_progress_suggestions(
        &self,
        user_id: &str,
        goals: &[Goal],
        today: NaiveDate,
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for goal in goals.iter().filter(|g| !g.is_terminal()) {
            let days_until_deadline = (goal.deadline - today).num_days();
            let progress = goal.progress_percentage();

            if days_until_deadline <= self.config.deadline_window_days
                && progress < self.config.behind_progress_percent
            {
                suggestions.push(
                    Suggestion::new(
                        user_id,
                        SuggestionType::GoalProgress,
                        SuggestionPriority::Urgent,
                        format!("Progress behind schedule: {}", goal.title),
                        format!(
                            "{days_until_deadline} day(s) left until the deadline but progress is {progress:.0}%. More time needs to be allocated."
                        ),
                    )
                    .with_actions(goal_progress_actions(goal))
                    .with_related_goal(goal.id.clone()),
                );
            } else if progress >= self.config.almost_done_percent && progress < 100.0 {
                suggestions.push(
                    Suggestion::new(
                        user_id,
                        SuggestionType::GoalProgress,
                        SuggestionPriority::Low,
                        format!("Almost there: {}", goal.title),
                        format!("Progress is at {progress:.0}%. Keep going!"),
                    )
                    .with_related_goal(goal.id.clone()),
                );
            }
        }

        suggestions
    }

    /// At most one suggestion when the coming window is overloaded.
    pub fn time_management_suggestions(
        &self,
        user_id: &str,
        schedules: &[TimeBlock],
        today: NaiveDate,
    ) -> Vec<Suggestion> {
        let count = self.in_window(schedules, today).count();
        if count <= self.config.overload_threshold {
            return Vec::new();
        }

        vec![Suggestion::new(
            user_id,
            SuggestionType::TimeManagement,
            SuggestionPriority::High,
            "Too many schedules this week",
            format!(
                "There are {count} schedules in the next {} days. Consider moving some to next week or trimming low-priority items.",
                self.config.workload_window_days
            ),
        )
        .with_actions(vec![
            SuggestionAction::new("Start optimizing the schedule", ActionKind::Optimize),
            SuggestionAction::new("Dismiss", ActionKind::Dismiss),
        ])]
    }

    /// At most one suggestion when a busy window has no rest, exercise or hobby.
    pub fn wellbeing_suggestions(
        &self,
        user_id: &str,
        schedules: &[TimeBlock],
        today: NaiveDate,
    ) -> Vec<Suggestion> {
        let work = self
            .in_window(schedules, today)
            .filter(|b| !self.config.is_rest_or_exercise(b))
            .count();
        let restorative = self
            .in_window(schedules, today)
            .filter(|b| self.config.is_restorative(b))
            .count();

        if work <= self.config.wellbeing_work_threshold || restorative > 0 {
            return Vec::new();
        }

        vec![Suggestion::new(
            user_id,
            SuggestionType::Wellbeing,
            SuggestionPriority::Medium,
            "Not enough rest",
            "There is no rest or exercise scheduled this week. Adding breaks helps keep health and productivity up.",
        )
        .with_actions(vec![
            SuggestionAction::new("Add a break", ActionKind::AddBreak),
            SuggestionAction::new("Later", ActionKind::Dismiss),
        ])]
    }

    fn in_window<'a>(
        &'a self,
        schedules: &'a [TimeBlock],
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a TimeBlock> + 'a {
        let days = self.config.workload_window_days;
        schedules.iter().filter(move |b| b.falls_within(today, days))
    }
}

fn conflict_actions(conflict: &Conflict) -> Vec<SuggestionAction> {
    conflict
        .resolutions
        .iter()
        .map(|r| {
            SuggestionAction::new(r.description.clone(), r.resolution_type.into())
                .with_data(ActionData::Resolution(r.clone()))
        })
        .collect()
}

fn goal_progress_actions(goal: &Goal) -> Vec<SuggestionAction> {
    let data = ActionData::Goal {
        goal_id: goal.id.clone(),
        title: goal.title.clone(),
        deadline: goal.deadline,
        remaining_hours: goal.remaining_hours(),
    };
    vec![
        SuggestionAction::new("Allocate more time", ActionKind::AddTime).with_data(data.clone()),
        SuggestionAction::new("Reschedule the goal", ActionKind::RescheduleGoal).with_data(data),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::GoalStatus;
    use chrono::{Duration, NaiveTime};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn timed(title: &str, offset_days: i64, start: (u32, u32), end: (u32, u32)) -> TimeBlock {
        TimeBlock::new(title, today() + Duration::days(offset_days))
            .with_times(t(start.0, start.1), t(end.0, end.1))
    }

    /// `n` non-conflicting one-hour blocks spread over the coming week.
    fn busy_week(title: &str, n: usize) -> Vec<TimeBlock> {
        (0..n)
            .map(|i| {
                let day = (i % 7) as i64;
                let hour = 6 + (i / 7) as u32 * 2;
                timed(&format!("{title} {i}"), day, (hour, 0), (hour + 1, 0))
            })
            .collect()
    }

    fn goal(id: &str, deadline_in: i64, estimated: u32, completed: u32) -> Goal {
        let mut g = Goal::new(id, "user-1", format!("Goal {id}"), today() + Duration::days(deadline_in), estimated);
        g.completed_hours = completed;
        g.status = GoalStatus::OnTrack;
        g
    }

    #[test]
    fn overlapping_pair_yields_one_suggestion_per_side() {
        let schedules = vec![
            timed("Gym", 0, (9, 0), (10, 0)).with_id("a"),
            timed("Call", 0, (9, 30), (10, 30)).with_id("b"),
        ];
        let suggestions = SuggestionEngine::new().conflict_suggestions("user-1", &schedules);

        assert_eq!(suggestions.len(), 2);
        for s in &suggestions {
            assert_eq!(s.suggestion_type, SuggestionType::ConflictResolution);
            assert_eq!(s.priority, SuggestionPriority::Urgent);
            assert_eq!(s.actions.len(), 3);
            assert_eq!(s.actions[2].action_type, ActionKind::ReduceTime);
            assert!(matches!(s.actions[0].data, ActionData::Resolution(_)));
        }
        assert_eq!(suggestions[0].related_schedule_id.as_deref(), Some("a"));
        assert_eq!(suggestions[1].related_schedule_id.as_deref(), Some("b"));
    }

    #[test]
    fn transition_gap_maps_to_high_priority() {
        let schedules = vec![
            timed("A", 0, (9, 0), (10, 0)),
            timed("B", 0, (10, 20), (11, 0)),
        ];
        let suggestions = SuggestionEngine::new().conflict_suggestions("u", &schedules);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.priority == SuggestionPriority::High));
    }

    #[test]
    fn lagging_goal_near_deadline_is_urgent() {
        let goals = vec![goal("late", 5, 10, 3)];
        let suggestions = SuggestionEngine::new().goal_progress_suggestions("u", &goals, today());

        assert_eq!(suggestions.len(), 1);
        let s = &suggestions[0];
        assert_eq!(s.priority, SuggestionPriority::Urgent);
        assert_eq!(s.related_goal_id.as_deref(), Some("late"));
        assert!(s.description.contains("30%"));
        let kinds: Vec<_> = s.actions.iter().map(|a| a.action_type).collect();
        assert_eq!(kinds, vec![ActionKind::AddTime, ActionKind::RescheduleGoal]);
    }

    #[test]
    fn deadline_window_boundary_is_inclusive() {
        let engine = SuggestionEngine::new();
        assert_eq!(engine.goal_progress_suggestions("u", &[goal("g", 7, 10, 0)], today()).len(), 1);
        assert!(engine.goal_progress_suggestions("u", &[goal("g", 8, 10, 0)], today()).is_empty());
    }

    #[test]
    fn overdue_goal_still_flagged() {
        let suggestions =
            SuggestionEngine::new().goal_progress_suggestions("u", &[goal("g", -3, 10, 1)], today());
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].description.starts_with("-3 day(s)"));
    }

    #[test]
    fn almost_done_goal_is_low_priority_without_actions() {
        let suggestions =
            SuggestionEngine::new().goal_progress_suggestions("u", &[goal("g", 30, 10, 9)], today());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].priority, SuggestionPriority::Low);
        assert!(suggestions[0].actions.is_empty());
    }

    #[test]
    fn finished_progress_is_silent() {
        let engine = SuggestionEngine::new();
        assert!(engine.goal_progress_suggestions("u", &[goal("g", 30, 10, 10)], today()).is_empty());
        assert!(engine.goal_progress_suggestions("u", &[goal("g", 30, 10, 5)], today()).is_empty());
    }

    #[test]
    fn terminal_goals_never_produce_progress_suggestions() {
        let mut done = goal("done", 2, 10, 1);
        done.status = GoalStatus::Completed;
        let mut cancelled = goal("cancelled", 30, 10, 9);
        cancelled.status = GoalStatus::Cancelled;

        let suggestions =
            SuggestionEngine::new().goal_progress_suggestions("u", &[done, cancelled], today());
        assert!(suggestions.is_empty());
    }

    #[test]
    fn overload_threshold_is_exclusive() {
        let engine = SuggestionEngine::new();
        assert!(engine
            .time_management_suggestions("u", &busy_week("Task", 30), today())
            .is_empty());

        let suggestions = engine.time_management_suggestions("u", &busy_week("Task", 31), today());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].priority, SuggestionPriority::High);
        assert_eq!(suggestions[0].actions[0].action_type, ActionKind::Optimize);
        assert_eq!(suggestions[0].actions[1].action_type, ActionKind::Dismiss);
    }

    #[test]
    fn blocks_outside_the_window_do_not_count() {
        let mut schedules = busy_week("Task", 25);
        schedules.extend((0..10).map(|i| timed("Later", 7 + i, (9, 0), (10, 0))));
        schedules.extend((0..10).map(|i| timed("Earlier", -1 - i, (9, 0), (10, 0))));
        assert!(SuggestionEngine::new()
            .time_management_suggestions("u", &schedules, today())
            .is_empty());
    }

    #[test]
    fn busy_week_without_rest_triggers_wellbeing() {
        let suggestions =
            SuggestionEngine::new().wellbeing_suggestions("u", &busy_week("Task", 21), today());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].suggestion_type, SuggestionType::Wellbeing);
        assert_eq!(suggestions[0].priority, SuggestionPriority::Medium);
        assert_eq!(suggestions[0].actions[0].action_type, ActionKind::AddBreak);
    }

    #[test]
    fn any_restorative_block_suppresses_wellbeing() {
        let engine = SuggestionEngine::new();
        for title in ["Evening Workout", "Rest", "Hobby: guitar", "휴식"] {
            let mut schedules = busy_week("Task", 21);
            schedules.push(timed(title, 2, (20, 0), (21, 0)));
            assert!(
                engine.wellbeing_suggestions("u", &schedules, today()).is_empty(),
                "{title} should count as restorative"
            );
        }
    }

    #[test]
    fn words_containing_rest_keywords_stay_work_like() {
        let engine = SuggestionEngine::new();
        assert_eq!(
            engine.wellbeing_suggestions("u", &busy_week("REST API design", 25), today()).len(),
            1
        );

        for title in ["Interest rate sync", "Restaurant booking", "Breakfast meeting", "Workouts planning doc"] {
            let mut schedules = busy_week("Design review", 25);
            schedules.push(timed(title, 2, (20, 0), (21, 0)));
            let suggestions = engine.wellbeing_suggestions("u", &schedules, today());
            // "Workouts" is a real plural and does count
            let expected = usize::from(!title.starts_with("Workouts"));
            assert_eq!(suggestions.len(), expected, "{title}");
        }
    }

    #[test]
    fn keyword_matching_handles_case_plurals_and_phrases() {
        let config = SuggestionConfig {
            rest_keywords: vec!["lunch break".into(), "nap".into()],
            ..Default::default()
        };
        let block = |title: &str| TimeBlock::new(title, today());

        assert!(config.is_rest_or_exercise(&block("Lunch Break")));
        assert!(config.is_rest_or_exercise(&block("long lunch breaks")));
        assert!(!config.is_rest_or_exercise(&block("Lunch with team, break later")));
        assert!(config.is_rest_or_exercise(&block("NAP")));
        assert!(!config.is_rest_or_exercise(&block("NAP planning")));
        assert!(!config.is_rest_or_exercise(&block("Snapshot")));
    }

    #[test]
    fn hangul_keywords_match_inside_words() {
        let config = SuggestionConfig::default();
        assert!(config.is_rest_or_exercise(&TimeBlock::new("점심 휴식시간", today())));
        assert!(config.is_restorative(&TimeBlock::new("주말취미", today())));
    }

    #[test]
    fn oversized_workload_window_does_not_panic() {
        let config = SuggestionConfig {
            workload_window_days: 9_000_000_000_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut schedules = busy_week("Task", 25);
        schedules.extend((0..10).map(|i| timed("Later", 30 + i, (9, 0), (10, 0))));
        let engine = SuggestionEngine::with_config(config, DetectorConfig::default());

        let suggestions = engine.time_management_suggestions("u", &schedules, today());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(engine.generate_suggestions("u", &schedules, &[], today()).len(), 2);
    }

    #[test]
    fn default_thresholds_validate() {
        assert!(SuggestionConfig::default().validate().is_ok());
        let zero = SuggestionConfig {
            workload_window_days: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn hobby_blocks_count_as_work_like() {
        // 20 tasks plus a hobby: work-like count is 21 but a restorative block exists
        let mut schedules = busy_week("Task", 20);
        schedules.push(timed("Hobby painting", 1, (20, 0), (21, 0)));
        let engine = SuggestionEngine::new();
        assert!(engine.wellbeing_suggestions("u", &schedules, today()).is_empty());
    }

    #[test]
    fn generation_is_structurally_idempotent() {
        let mut schedules = busy_week("Task", 31);
        schedules.push(timed("Overlap", 0, (6, 30), (7, 30)));
        let goals = vec![goal("a", 3, 10, 1), goal("b", 40, 10, 9)];
        let engine = SuggestionEngine::new();

        let shape = |suggestions: Vec<Suggestion>| {
            suggestions
                .into_iter()
                .map(|s| {
                    (
                        s.suggestion_type,
                        s.priority,
                        s.title,
                        s.description,
                        s.actions.into_iter().map(|a| a.label).collect::<Vec<_>>(),
                    )
                })
                .collect::<Vec<_>>()
        };

        let first = shape(engine.generate_suggestions("u", &schedules, &goals, today()));
        let second = shape(engine.generate_suggestions("u", &schedules, &goals, today()));
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn passes_are_concatenated_in_order() {
        let mut schedules = busy_week("Task", 31);
        schedules.push(timed("Overlap", 0, (6, 30), (7, 30)));
        let goals = vec![goal("a", 3, 10, 1)];

        let kinds: Vec<_> = SuggestionEngine::new()
            .generate_suggestions("u", &schedules, &goals, today())
            .into_iter()
            .map(|s| s.suggestion_type)
            .collect();

        let first_goal = kinds.iter().position(|k| *k == SuggestionType::GoalProgress).unwrap();
        assert!(kinds[..first_goal]
            .iter()
            .all(|k| *k == SuggestionType::ConflictResolution));
        assert_eq!(
            &kinds[kinds.len() - 3..],
            &[
                SuggestionType::GoalProgress,
                SuggestionType::TimeManagement,
                SuggestionType::Wellbeing
            ]
        );
    }

    #[test]
    fn dismissed_suggestions_filtered_from_active() {
        let mut suggestions = SuggestionEngine::new().goal_progress_suggestions(
            "u",
            &[goal("a", 3, 10, 1), goal("b", 3, 10, 2)],
            today(),
        );
        suggestions[0].dismiss();
        let active = SuggestionEngine::active(&suggestions);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].related_goal_id.as_deref(), Some("b"));
    }
}
