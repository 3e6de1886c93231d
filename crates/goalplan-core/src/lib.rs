//! # Goalplan Core Library
//!
//! Core planning logic for goalplan. Everything here is synchronous and
//! deterministic for a fixed `today`: callers load goals and schedules,
//! call in, and persist the returned values themselves. The `goalplan`
//! CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Scheduler**: Turns a goal's remaining effort into dated work sessions
//! - **Conflict**: Pairwise overlap and buffer checks between time blocks
//! - **Suggestion**: Heuristic recommendations over a user's goals and week
//! - **Timeline**: Open slots left between existing blocks on a date
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`GoalScheduler`]: Goal allocation engine
//! - [`ConflictDetector`]: Interval conflict detector
//! - [`SuggestionEngine`]: Suggestion generator
//! - [`Config`]: Configuration management

pub mod availability;
pub mod conflict;
pub mod error;
pub mod goal;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod suggestion;
pub mod timeline;

pub use availability::AvailabilityModel;
pub use conflict::{
    detect_conflicts, Conflict, ConflictDetector, ConflictKind, ConflictSeverity, DetectorConfig,
    Resolution, ResolutionType,
};
pub use error::{ConfigError, CoreError, ParseError, ValidationError};
pub use goal::{Goal, GoalCategory, GoalPriority, GoalStatus, Milestone};
pub use schedule::{BlockOrigin, BlockPriority, BlockStatus, CreatedBy, TimeBlock};
pub use scheduler::{generate_schedule, AllocationConfig, GoalScheduler};
pub use storage::Config;
pub use suggestion::{
    ActionData, ActionKind, Suggestion, SuggestionAction, SuggestionConfig, SuggestionEngine,
    SuggestionPriority, SuggestionType,
};
pub use timeline::{find_open_slots, first_open_slot, OpenSlot, OpenSlotFinder};
