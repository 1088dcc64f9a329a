//! Calendar dates
//!
//! [`Date`] is an immutable day value used as the key of the assignment
//! indexes. Every value represents a real calendar day: construction rejects
//! impossible triples such as February 30 rather than clamping them.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PlannerError, PlannerResult};

/// A calendar day, totally ordered by (year, month, day)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Build a date from a year, month (1-12) and day of month
    ///
    /// # Examples
    ///
    /// ```
    /// use planner_core::Date;
    ///
    /// let leap_day = Date::new(2024, 2, 29).unwrap();
    /// assert_eq!(leap_day.day(), 29);
    /// assert!(Date::new(2023, 2, 29).is_err());
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> PlannerResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(PlannerError::InvalidDate { year, month, day })
    }

    /// Parse an ISO `YYYY-MM-DD` string
    pub fn parse_iso(input: &str) -> PlannerResult<Self> {
        let trimmed = input.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| PlannerError::UnparseableDate(trimmed.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of the week, used for block schedule lookups
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Shift by `days` (negative moves backwards), or `None` when the result
    /// leaves the representable range
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
    }

    /// Shift by `days`, rolling over month and year boundaries
    ///
    /// # Panics
    ///
    /// Panics if the result is outside the range chrono can represent
    /// (roughly 262,000 years either side of the common era), matching
    /// chrono's own `Add` behaviour.
    pub fn add_days(self, days: i64) -> Self {
        match self.checked_add_days(days) {
            Some(date) => date,
            None => panic!("date out of range: {self} + {days} days"),
        }
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(&self, other: Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl FromStr for Date {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse_iso(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
