//! Planner Core - Domain logic and models
//!
//! This crate contains the pure scheduling model with no I/O operations:
//! calendar dates, the weekly block rotation, assignments, and courses that
//! index their assignments by assigned date and by due date.

pub mod assignment;
pub mod course;
pub mod date;
pub mod error;
mod index;
pub mod schedule;
pub mod types;

pub use assignment::{Assignment, AssignmentType};
pub use course::Course;
pub use date::Date;
pub use error::{IndexKind, PlannerError, PlannerResult};
pub use schedule::{Block, BlockSchedule, Period};
pub use types::{AssignmentId, CourseId};

pub use chrono::Weekday;
