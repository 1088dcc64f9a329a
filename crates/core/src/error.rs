//! Error types for planner core domain logic

use chrono::Weekday;
use std::fmt;
use thiserror::Error;

use crate::date::Date;
use crate::types::AssignmentId;

/// Which of a course's two date indexes an operation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Assigned,
    Due,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Assigned => write!(f, "assigned-date"),
            IndexKind::Due => write!(f, "due-date"),
        }
    }
}

/// Core planner domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Could not parse date: {0}. Expected YYYY-MM-DD")]
    UnparseableDate(String),

    #[error("Due date {due} is before assigned date {assigned}")]
    DueBeforeAssigned { assigned: Date, due: Date },

    #[error("Assignment {id} is not indexed in the {index} index of this course")]
    UnindexedAssignment { id: AssignmentId, index: IndexKind },

    #[error("Assignment not found: {0}")]
    AssignmentNotFound(AssignmentId),

    #[error("Unknown assignment type: {0}")]
    UnknownAssignmentType(String),

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    #[error("Weekday {0} appears more than once in the block template")]
    DuplicateWeekday(Weekday),
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
