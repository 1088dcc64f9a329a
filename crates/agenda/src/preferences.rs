//! User display preferences
//!
//! Per-course colours are keyed by [`CourseId`]; the remaining settings
//! control the upcoming view. The core never reads any of this.

use planner_core::CourseId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::AgendaConfig;
use crate::error::{AgendaError, AgendaResult};

pub const DEFAULT_UPCOMING_DAYS: u32 = 7;
pub const MAX_UPCOMING_DAYS: u32 = 365;

/// An RGB colour written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Light grey used for courses without a chosen colour
    pub const DEFAULT: Color = Color {
        r: 0xd3,
        g: 0xd3,
        b: 0xd3,
    };

    pub fn parse(input: &str) -> AgendaResult<Self> {
        let invalid = || AgendaError::InvalidColor(input.to_string());
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl FromStr for Color {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Display settings for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    display_on_due: bool,
    upcoming_days: u32,
    show_completed: bool,
    colors: HashMap<CourseId, Color>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            display_on_due: true,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            show_completed: false,
            colors: HashMap::new(),
        }
    }
}

impl Preferences {
    pub fn from_config(config: &AgendaConfig) -> Self {
        Self {
            display_on_due: config.display_on_due,
            upcoming_days: config.upcoming_days.clamp(1, MAX_UPCOMING_DAYS),
            show_completed: config.show_completed,
            colors: HashMap::new(),
        }
    }

    /// Whether assignments are listed under their due date (true) or their
    /// assigned date (false)
    pub fn display_on_due(&self) -> bool {
        self.display_on_due
    }

    pub fn set_display_on_due(&mut self, display_on_due: bool) {
        self.display_on_due = display_on_due;
    }

    pub fn upcoming_days(&self) -> u32 {
        self.upcoming_days
    }

    pub fn set_upcoming_days(&mut self, days: u32) -> AgendaResult<()> {
        if !(1..=MAX_UPCOMING_DAYS).contains(&days) {
            return Err(AgendaError::InvalidUpcomingDays {
                value: days,
                max: MAX_UPCOMING_DAYS,
            });
        }
        self.upcoming_days = days;
        Ok(())
    }

    pub fn show_completed(&self) -> bool {
        self.show_completed
    }

    pub fn set_show_completed(&mut self, show_completed: bool) {
        self.show_completed = show_completed;
    }

    pub fn set_color(&mut self, course: CourseId, color: Color) {
        self.colors.insert(course, color);
    }

    pub fn clear_color(&mut self, course: CourseId) {
        self.colors.remove(&course);
    }

    /// Chosen colour for a course, or [`Color::DEFAULT`]
    pub fn color_for(&self, course: CourseId) -> Color {
        self.colors.get(&course).copied().unwrap_or(Color::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        let color = Color::parse("#1E90ff").unwrap();
        assert_eq!(color, Color { r: 0x1e, g: 0x90, b: 0xff });
        assert_eq!(color.to_string(), "#1e90ff");
    }

    #[test]
    fn test_color_rejects_malformed() {
        for input in ["1e90ff", "#1e90f", "#1e90ffa", "#gg90ff", "", "#éé90f"] {
            assert_eq!(
                Color::parse(input),
                Err(AgendaError::InvalidColor(input.to_string())),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_course_colors() {
        let mut prefs = Preferences::default();
        let bio = CourseId::new();
        let chem = CourseId::new();
        let blue = Color::parse("#0000ff").unwrap();

        prefs.set_color(bio, blue);
        assert_eq!(prefs.color_for(bio), blue);
        assert_eq!(prefs.color_for(chem), Color::DEFAULT);

        prefs.clear_color(bio);
        assert_eq!(prefs.color_for(bio), Color::DEFAULT);
    }

    #[test]
    fn test_upcoming_days_validation() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.upcoming_days(), 7);
        prefs.set_upcoming_days(30).unwrap();
        assert_eq!(prefs.upcoming_days(), 30);

        assert_eq!(
            prefs.set_upcoming_days(0),
            Err(AgendaError::InvalidUpcomingDays { value: 0, max: 365 })
        );
        assert!(prefs.set_upcoming_days(366).is_err());
        assert_eq!(prefs.upcoming_days(), 30);
    }

    #[test]
    fn test_from_config() {
        let config = AgendaConfig {
            display_on_due: false,
            upcoming_days: 3,
            show_completed: true,
            ..AgendaConfig::default()
        };
        let prefs = Preferences::from_config(&config);
        assert!(!prefs.display_on_due());
        assert_eq!(prefs.upcoming_days(), 3);
        assert!(prefs.show_completed());
    }
}
