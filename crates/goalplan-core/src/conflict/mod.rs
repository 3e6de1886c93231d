//! Interval conflict detection between time blocks.
//!
//! Each (candidate, existing) pair is classified in a fixed order, stopping
//! at the first match:
//! 1. overlap → [`ConflictSeverity::Critical`]
//! 2. gap shorter than the transition buffer → [`ConflictSeverity::High`]
//! 3. gap shorter than the preparation buffer → [`ConflictSeverity::Medium`]
//!
//! With the default buffers (30 and 15 minutes) the third tier never fires,
//! because every gap under 15 minutes is also under 30. The order is kept so
//! that severities stay stable when the buffers are reconfigured.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::schedule::TimeBlock;

/// Severity tier of a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConflictSeverity {
    /// Blocks overlap.
    Critical,
    /// Not enough transition time between blocks.
    High,
    /// Not enough preparation time between blocks.
    Medium,
    /// Reserved for preference violations; never produced by the detector.
    Low,
}

/// What made the pair conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Overlap,
    InsufficientTransition,
    InsufficientPreparation,
}

impl ConflictKind {
    pub fn description(&self, config: &DetectorConfig) -> String {
        match self {
            Self::Overlap => "Schedules overlap completely (complete overlap).".to_string(),
            Self::InsufficientTransition => format!(
                "Insufficient transition time between schedules ({} min recommended).",
                config.transition_buffer_minutes
            ),
            Self::InsufficientPreparation => {
                "Insufficient preparation time between schedules.".to_string()
            }
        }
    }
}

/// Strategy named by a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionType {
    Reschedule,
    ExtendTime,
    ReduceTime,
    Cancel,
    Delegate,
}

/// A field-level change proposed by a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    pub schedule_id: Option<String>,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// A named strategy for resolving a conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: String,
    #[serde(rename = "type")]
    pub resolution_type: ResolutionType,
    pub description: String,
    /// Empty when only the strategy is named.
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

impl Resolution {
    pub fn new(resolution_type: ResolutionType, description: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            resolution_type,
            description: description.into(),
            adjustments: Vec::new(),
        }
    }
}

/// A detected scheduling problem between two blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub id: String,
    /// Candidate first, then the existing block.
    pub blocks: Vec<TimeBlock>,
    pub severity: ConflictSeverity,
    pub kind: ConflictKind,
    pub description: String,
    pub resolutions: Vec<Resolution>,
}

/// Buffer thresholds for the gap tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Gaps shorter than this are `High` (minutes)
    #[serde(default = "default_transition_buffer")]
    pub transition_buffer_minutes: i64,
    /// Gaps shorter than this are `Medium` (minutes)
    #[serde(default = "default_preparation_buffer")]
    pub preparation_buffer_minutes: i64,
}

fn default_transition_buffer() -> i64 {
    30
}
fn default_preparation_buffer() -> i64 {
    15
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            transition_buffer_minutes: default_transition_buffer(),
            preparation_buffer_minutes: default_preparation_buffer(),
        }
    }
}

/// Pairwise conflict detector.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    config: DetectorConfig,
}

impl ConflictDetector {
    /// Create a detector with default buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom buffers
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Classify `candidate` against every block in `existing`.
    ///
    /// A pair contributes at most one conflict. Blocks without times are
    /// treated as all-day.
    pub fn detect_conflicts(&self, candidate: &TimeBlock, existing: &[TimeBlock]) -> Vec<Conflict> {
        existing
            .iter()
            .filter_map(|other| {
                let (kind, severity) = self.classify(candidate, other)?;
                tracing::debug!(
                    candidate = %candidate.title,
                    other = %other.title,
                    ?severity,
                    "conflict detected"
                );
                Some(self.build_conflict(candidate, other, kind, severity))
            })
            .collect()
    }

    /// Severity tier for a pair, or `None` when they do not conflict.
    pub fn classify(&self, a: &TimeBlock, b: &TimeBlock) -> Option<(ConflictKind, ConflictSeverity)> {
        let (a_start, a_end) = (a.start_datetime(), a.end_datetime());
        let (b_start, b_end) = (b.start_datetime(), b.end_datetime());

        if overlaps(a_start, a_end, b_start, b_end) {
            return Some((ConflictKind::Overlap, ConflictSeverity::Critical));
        }

        let gap = separation_minutes(a_start, a_end, b_start, b_end)?;
        if gap < self.config.transition_buffer_minutes {
            Some((ConflictKind::InsufficientTransition, ConflictSeverity::High))
        } else if gap < self.config.preparation_buffer_minutes {
            Some((ConflictKind::InsufficientPreparation, ConflictSeverity::Medium))
        } else {
            None
        }
    }

    fn build_conflict(
        &self,
        candidate: &TimeBlock,
        other: &TimeBlock,
        kind: ConflictKind,
        severity: ConflictSeverity,
    ) -> Conflict {
        Conflict {
            id: uuid::Uuid::new_v4().to_string(),
            blocks: vec![candidate.clone(), other.clone()],
            severity,
            kind,
            description: kind.description(&self.config),
            resolutions: generate_resolutions(candidate, other),
        }
    }
}

/// Reschedule either block, or shorten both.
fn generate_resolutions(first: &TimeBlock, second: &TimeBlock) -> Vec<Resolution> {
    vec![
        Resolution::new(
            ResolutionType::Reschedule,
            format!("Move '{}' to another time", first.title),
        ),
        Resolution::new(
            ResolutionType::Reschedule,
            format!("Move '{}' to another time", second.title),
        ),
        Resolution::new(
            ResolutionType::ReduceTime,
            format!("Shorten '{}' and '{}' so both fit", first.title, second.title),
        ),
    ]
}

fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Minutes between two strictly separated intervals.
///
/// Touching intervals (one ends exactly when the other starts) are not
/// separated and yield `None`.
fn separation_minutes(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> Option<i64> {
    if a_end < b_start {
        Some((b_start - a_end).num_minutes())
    } else if b_end < a_start {
        Some((a_start - b_end).num_minutes())
    } else {
        None
    }
}

/// Convenience function to detect conflicts with default buffers
pub fn detect_conflicts(candidate: &TimeBlock, existing: &[TimeBlock]) -> Vec<Conflict> {
    ConflictDetector::new().detect_conflicts(candidate, existing)
}
