use thiserror::Error;

use crate::domain::models::{ActivityId, DayIndex};

/// Errors that can occur during planner operations.
///
/// None of these are fatal: callers report them and keep the current state.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("a day must be selected to add an activity")]
    MissingDay,
    #[error("activity title must not be empty")]
    EmptyTitle,
    #[error("an activity must be scheduled on at least one day")]
    EmptyDaySet,
    #[error("activity not found: {0}")]
    ActivityNotFound(ActivityId),
    #[error("activity already exists: {0}")]
    DuplicateId(ActivityId),
    #[error("activity {id} is not scheduled on day {day}")]
    DayNotScheduled { id: ActivityId, day: DayIndex },
    #[error("activity {0} has no reminder")]
    NoReminder(ActivityId),
    #[error("activity {0} has no target count")]
    NoTarget(ActivityId),
    #[error("invalid day index {0}, expected 0-6")]
    InvalidDay(u8),
    #[error("invalid week {week} for year {year}")]
    InvalidWeek { week: u8, year: i32 },
    #[error("invalid reminder time {0:?}, expected HH:MM")]
    InvalidReminderTime(String),
    #[error("invalid activity anchor {0:?}")]
    InvalidAnchor(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl PlannerError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(value: std::io::Error) -> Self {
        Self::Storage(value.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Storage(value.to_string())
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
