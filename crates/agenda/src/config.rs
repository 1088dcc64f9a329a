//! Agenda configuration
//!
//! Loads display settings and the local timezone from environment variables.

use chrono::Utc;
use chrono_tz::Tz;
use planner_core::Date;
use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::preferences::{DEFAULT_UPCOMING_DAYS, MAX_UPCOMING_DAYS};

/// Configuration for the agenda binary
#[derive(Debug, Clone)]
pub struct AgendaConfig {
    /// IANA timezone used to decide what "today" is (default: UTC)
    pub timezone: Tz,

    /// Number of days the upcoming view covers (default: 7)
    pub upcoming_days: u32,

    /// Show assignments on their due date rather than their assigned date
    /// (default: true)
    pub display_on_due: bool,

    /// Keep completed assignments in the upcoming view (default: false)
    pub show_completed: bool,

    /// Plan file read when none is given on the command line
    pub plan_file: Option<PathBuf>,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            display_on_due: true,
            show_completed: false,
            plan_file: None,
        }
    }
}

impl AgendaConfig {
    /// Load configuration from environment variables
    ///
    /// This will also initialize dotenv if it hasn't been done yet. Unset
    /// variables fall back to defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let timezone = match env::var("PLANNER_TIMEZONE") {
            Ok(value) => parse_timezone(&value)?,
            Err(_) => defaults.timezone,
        };

        let upcoming_days = match env::var("PLANNER_UPCOMING_DAYS") {
            Ok(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|days| (1..=MAX_UPCOMING_DAYS).contains(days))
                .ok_or_else(|| invalid("PLANNER_UPCOMING_DAYS", &value))?,
            Err(_) => defaults.upcoming_days,
        };

        Ok(Self {
            timezone,
            upcoming_days,
            display_on_due: bool_var("PLANNER_DISPLAY_ON_DUE", defaults.display_on_due)?,
            show_completed: bool_var("PLANNER_SHOW_COMPLETED", defaults.show_completed)?,
            plan_file: env::var("PLANNER_PLAN_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Today's date in the configured timezone
    pub fn today(&self) -> Date {
        Utc::now().with_timezone(&self.timezone).date_naive().into()
    }
}

/// Parse an IANA timezone string (e.g., "America/New_York")
pub fn parse_timezone(tz_str: &str) -> Result<Tz, ConfigError> {
    tz_str
        .trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimezone(tz_str.to_string()))
}

fn bool_var(name: &str, default: bool) -> Result<bool, ConfigError> {
    let Ok(value) = env::var(name) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(name, &value)),
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    }
}
