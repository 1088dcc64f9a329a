//! Agenda - presentation support for the planner
//!
//! Holds the course registry, user preferences, configuration, free-text
//! assignment parsing, plan file loading and the plain-text day and upcoming
//! views built on top of `planner-core` queries.

pub mod assignment_parser;
pub mod config;
pub mod error;
pub mod plan;
pub mod planner;
pub mod preferences;
pub mod view;

pub use config::AgendaConfig;
pub use error::{AgendaError, AgendaResult, ConfigError};
pub use plan::{PlanError, PlanSummary, load_plan};
pub use planner::Planner;
pub use preferences::{Color, Preferences};
