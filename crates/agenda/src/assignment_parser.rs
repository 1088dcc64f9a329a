//! Assignment message parser
//!
//! Parses multi-line text entered by a user into assignment data.

use chrono::NaiveTime;
use chrono_english::{Dialect, parse_date_string};
use planner_core::{Assignment, AssignmentType, Date, PlannerResult};
use thiserror::Error;

/// Errors that can occur during assignment parsing
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Assignment name is required (line 1)")]
    MissingName,

    #[error("Due date is required (line 2)")]
    MissingDueDate,

    #[error(
        "Could not parse date: {0}. Try formats like 'tomorrow', 'next friday', or '2026-01-25'"
    )]
    InvalidDate(String),

    #[error("Due date {0} is before the assigned date")]
    DueInPast(Date),

    #[error("Unknown assignment type: {0}")]
    UnknownType(String),

    #[error("Message must have at least 2 lines (name and due date)")]
    TooFewLines,
}

/// A successfully parsed assignment ready to be added to a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAssignment {
    pub name: String,
    /// The day the message was entered
    pub assigned: Date,
    pub due: Date,
    /// Defaults to homework
    pub kind: AssignmentType,
    pub description: Option<String>,
}

impl ParsedAssignment {
    pub fn into_assignment(self) -> PlannerResult<Assignment> {
        Assignment::new(
            self.assigned,
            self.due,
            self.kind,
            self.name,
            self.description,
        )
    }
}

/// Parse a multi-line message into assignment data
///
/// Expected format:
/// ```text
/// Lab Report
/// next friday
/// lab
/// Write up the enzyme experiment
/// ```
///
/// Lines:
/// 1. Assignment name (required)
/// 2. Due date - natural language or YYYY-MM-DD (required)
/// 3. Type (optional, default: homework)
/// 4. Description (optional, may continue over further lines)
pub fn parse_assignment_message(text: &str, today: Date) -> Result<ParsedAssignment, ParseError> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim()).collect();

    if lines.len() < 2 {
        return Err(ParseError::TooFewLines);
    }

    let name = lines[0].to_string();
    if name.is_empty() {
        return Err(ParseError::MissingName);
    }

    if lines[1].is_empty() {
        return Err(ParseError::MissingDueDate);
    }
    let due = parse_date(lines[1], today)?;
    if due < today {
        return Err(ParseError::DueInPast(due));
    }

    let kind = match lines.get(2) {
        Some(kind) if !kind.is_empty() => kind
            .parse::<AssignmentType>()
            .map_err(|_| ParseError::UnknownType(kind.to_string()))?,
        _ => AssignmentType::Homework,
    };

    let description = lines
        .get(3..)
        .map(|rest| rest.join("\n").trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(ParsedAssignment {
        name,
        assigned: today,
        due,
        kind,
        description,
    })
}

/// Parse a date relative to `today`
///
/// ISO dates are tried first, then natural language via chrono-english.
pub fn parse_date(input: &str, today: Date) -> Result<Date, ParseError> {
    let input = input.trim();
    if let Ok(date) = Date::parse_iso(input) {
        return Ok(date);
    }

    let reference = today.as_naive().and_time(NaiveTime::MIN).and_utc();
    // chrono-english doesn't need "on" ("on friday" -> "friday")
    let normalized = input.trim_start_matches("on ");
    match parse_date_string(normalized, reference, Dialect::Us) {
        Ok(parsed) => Ok(parsed.date_naive().into()),
        Err(_) => Err(ParseError::InvalidDate(input.to_string())),
    }
}

/// Format example for user help text
pub fn format_example() -> &'static str {
    r#"Example:
Lab Report
next friday
lab
Write up the enzyme experiment

Format:
Line 1: Assignment name
Line 2: Due date (e.g., "tomorrow", "next friday", "2026-01-25")
Line 3: Type (optional, default: homework)
Line 4: Description (optional)"#
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> Date {
        Date::new(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_parse_minimal_assignment() {
        let parsed = parse_assignment_message("Problem Set 4\n2024-03-04", today())
            .expect("should parse");
        assert_eq!(parsed.name, "Problem Set 4");
        assert_eq!(parsed.assigned, today());
        assert_eq!(parsed.due, Date::new(2024, 3, 4).unwrap());
        assert_eq!(parsed.kind, AssignmentType::Homework);
        assert!(parsed.description.is_none());
    }

    #[test]
    fn test_parse_full_assignment() {
        let input = "Lab Report\n2024-03-08\nLab\nEnzyme kinetics\nInclude error bars";
        let parsed = parse_assignment_message(input, today()).expect("should parse");
        assert_eq!(parsed.kind, AssignmentType::Lab);
        assert_eq!(
            parsed.description.as_deref(),
            Some("Enzyme kinetics\nInclude error bars")
        );

        let assignment = parsed.into_assignment().expect("valid assignment");
        assert_eq!(assignment.name(), "Lab Report");
        assert_eq!(assignment.due_date(), Date::new(2024, 3, 8).unwrap());
    }

    #[test]
    fn test_parse_relative_date() {
        let parsed = parse_assignment_message("Reading\ntomorrow", today()).expect("should parse");
        assert_eq!(parsed.due, Date::new(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_parse_date_iso_and_invalid() {
        assert_eq!(
            parse_date(" 2024-12-25 ", today()),
            Ok(Date::new(2024, 12, 25).unwrap())
        );
        assert_eq!(
            parse_date("the twelfth of never", today()),
            Err(ParseError::InvalidDate("the twelfth of never".to_string()))
        );
    }

    #[test]
    fn test_missing_name() {
        let result = parse_assignment_message("\n2024-03-04", today());
        assert_eq!(result, Err(ParseError::MissingName));
    }

    #[test]
    fn test_missing_due_date() {
        let result = parse_assignment_message("Essay\n   ", today());
        assert_eq!(result, Err(ParseError::MissingDueDate));
    }

    #[test]
    fn test_too_few_lines() {
        let result = parse_assignment_message("Just a name", today());
        assert_eq!(result, Err(ParseError::TooFewLines));
    }

    #[test]
    fn test_unknown_type() {
        let result = parse_assignment_message("Essay\n2024-03-04\nworksheet", today());
        assert_eq!(result, Err(ParseError::UnknownType("worksheet".to_string())));
    }

    #[test]
    fn test_due_in_past() {
        let result = parse_assignment_message("Essay\n2024-02-28", today());
        assert_eq!(
            result,
            Err(ParseError::DueInPast(Date::new(2024, 2, 28).unwrap()))
        );
    }

    #[test]
    fn test_format_example() {
        let example = format_example();
        assert!(example.contains("Line 1"));
        assert!(example.contains("Line 2"));
    }
}
