//! Error types for the agenda layer

use planner_core::{CourseId, PlannerError, Weekday};
use thiserror::Error;

/// Errors raised while managing courses and preferences
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AgendaError {
    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error("Course already exists: {name} taught by {teacher}")]
    DuplicateCourse { name: String, teacher: String },

    #[error("Course not found: {0}")]
    CourseNotFound(CourseId),

    #[error("No class block at {weekday} slot {slot}")]
    InvalidBlock { weekday: Weekday, slot: usize },

    #[error("Block {weekday} slot {slot} is already taken by {course}")]
    BlockTaken {
        weekday: Weekday,
        slot: usize,
        course: String,
    },

    #[error("Upcoming day count must be between 1 and {max}, got {value}")]
    InvalidUpcomingDays { value: u32, max: u32 },

    #[error("Invalid colour: {0}. Expected #RRGGBB")]
    InvalidColor(String),
}

/// Result type alias for agenda operations
pub type AgendaResult<T> = Result<T, AgendaError>;

/// Configuration loading errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar { name: String, value: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
