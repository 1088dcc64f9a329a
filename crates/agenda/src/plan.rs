//! Plan files
//!
//! A plan is plain text listing courses and their assignments:
//!
//! ```text
//! # Spring term
//! course: AP Bio | Smith | D
//! Lab Report
//! next friday
//! lab
//!
//! course: History | Green | A, L
//! Chapter 12
//! 2024-03-02
//! reading
//! pp. 300-320
//! ```
//!
//! A `course:` line registers a course with its name, teacher and the
//! periods it meets in. Assignment messages below it belong to that course,
//! use the assignment parser's format and are separated by blank lines.
//! Lines starting with `#` are ignored.

use planner_core::{Block, Course, CourseId, Date, Period, PlannerError};
use thiserror::Error;

use crate::assignment_parser::{ParseError, parse_assignment_message};
use crate::error::AgendaError;
use crate::planner::Planner;

const COURSE_PREFIX: &str = "course:";

/// Errors raised while loading a plan, tagged with the offending line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("Line {line}: expected 'course: Name | Teacher | Periods'")]
    MalformedCourse { line: usize },

    #[error("Line {line}: assignment appears before any course line")]
    NoCourse { line: usize },

    #[error("Line {line}: {source}")]
    Period { line: usize, source: PlannerError },

    #[error("Line {line}: {source}")]
    Assignment { line: usize, source: ParseError },

    #[error("Line {line}: {source}")]
    Planner { line: usize, source: AgendaError },
}

/// What a plan added to the planner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub courses: usize,
    pub assignments: usize,
    /// Assignments already past due on the reference day
    pub skipped: usize,
}

/// Load every course and assignment of `text` into `planner`
///
/// Relative dates are read as of `today`. Assignments due before `today`
/// are skipped; any other problem stops the load at its line.
pub fn load_plan(
    planner: &mut Planner,
    text: &str,
    today: Date,
) -> Result<PlanSummary, PlanError> {
    let mut loader = Loader {
        planner,
        today,
        course: None,
        pending: Vec::new(),
        first_line: 0,
        summary: PlanSummary::default(),
    };

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim();

        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            loader.flush()?;
            continue;
        }
        if let Some(fields) = course_fields(line) {
            loader.flush()?;
            loader.start_course(fields, number)?;
            continue;
        }

        if loader.pending.is_empty() {
            loader.first_line = number;
        }
        loader.pending.push(line);
    }
    loader.flush()?;

    Ok(loader.summary)
}

fn course_fields(line: &str) -> Option<&str> {
    line.get(..COURSE_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(COURSE_PREFIX))
        .map(|_| &line[COURSE_PREFIX.len()..])
}

struct Loader<'p, 't> {
    planner: &'p mut Planner,
    today: Date,
    course: Option<CourseId>,
    pending: Vec<&'t str>,
    first_line: usize,
    summary: PlanSummary,
}

impl Loader<'_, '_> {
    fn start_course(&mut self, fields: &str, line: usize) -> Result<(), PlanError> {
        let mut fields = fields.split('|').map(str::trim);
        let name = fields.next().filter(|f| !f.is_empty());
        let teacher = fields.next().filter(|f| !f.is_empty());
        let periods = fields.next().unwrap_or_default();
        let (Some(name), Some(teacher), None) = (name, teacher, fields.next()) else {
            return Err(PlanError::MalformedCourse { line });
        };

        let periods = periods
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<Period>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| PlanError::Period { line, source })?;

        let rejected = |source: AgendaError| PlanError::Planner { line, source };
        let id = self
            .planner
            .add_course(Course::new(name, teacher))
            .map_err(rejected)?;
        let blocks: Vec<Block> = periods
            .iter()
            .flat_map(|period| self.planner.schedule().blocks_for_period(*period))
            .collect();
        self.planner.assign_blocks(id, blocks).map_err(rejected)?;

        tracing::debug!(line, course = name, ?periods, "Loaded course");
        self.course = Some(id);
        self.summary.courses += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PlanError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let line = self.first_line;
        let message = self.pending.join("\n");
        self.pending.clear();

        let Some(course) = self.course else {
            return Err(PlanError::NoCourse { line });
        };

        let parsed = match parse_assignment_message(&message, self.today) {
            Ok(parsed) => parsed,
            Err(ParseError::DueInPast(due)) => {
                tracing::warn!(line, %due, "Skipping assignment that is already past due");
                self.summary.skipped += 1;
                return Ok(());
            }
            Err(source) => return Err(PlanError::Assignment { line, source }),
        };

        let rejected = |source: AgendaError| PlanError::Planner { line, source };
        let assignment = parsed
            .into_assignment()
            .map_err(|err| rejected(err.into()))?;
        self.planner
            .add_assignment(course, assignment)
            .map_err(rejected)?;
        self.summary.assignments += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{AssignmentType, Weekday};

    const TERM: &str = "\
# Spring term
course: AP Bio | Smith | D
Lab Report
2024-03-08
lab
Enzyme kinetics

Problem Set
tomorrow

course: History | Green | A, L
Chapter 12
2024-03-02
reading

Old Quiz
2024-02-20
quiz
";

    fn today() -> Date {
        Date::new(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_load_plan() {
        let mut planner = Planner::default();
        let summary = load_plan(&mut planner, TERM, today()).unwrap();
        assert_eq!(
            summary,
            PlanSummary {
                courses: 2,
                assignments: 3,
                skipped: 1,
            }
        );

        let bio = &planner.courses()[0];
        assert_eq!(bio.name(), "AP Bio");
        assert_eq!(bio.teacher(), "Smith");
        assert_eq!(bio.len(), 2);
        assert!(bio.blocks().iter().all(|b| b.period == Period::D));
        let lab = bio.get_due(Date::new(2024, 3, 8).unwrap());
        assert_eq!(lab[0].kind(), AssignmentType::Lab);
        assert_eq!(lab[0].description(), Some("Enzyme kinetics"));
        assert_eq!(bio.get_due(Date::new(2024, 3, 2).unwrap())[0].name(), "Problem Set");

        let history = &planner.courses()[1];
        assert_eq!(history.len(), 1);
        assert!(history.meets_on(Weekday::Wed));
        assert!(history.blocks().iter().any(|b| b.period == Period::Lab));
    }

    #[test]
    fn test_course_without_periods() {
        let mut planner = Planner::default();
        let summary = load_plan(&mut planner, "COURSE: Study Hall | Gray", today()).unwrap();
        assert_eq!(summary.courses, 1);
        assert!(planner.courses()[0].blocks().is_empty());
    }

    #[test]
    fn test_assignment_before_course() {
        let mut planner = Planner::default();
        let result = load_plan(&mut planner, "\n# notes\nEssay\n2024-03-04\n", today());
        assert_eq!(result, Err(PlanError::NoCourse { line: 3 }));
    }

    #[test]
    fn test_malformed_course_line() {
        let mut planner = Planner::default();
        for text in ["course: AP Bio", "course: | Smith", "course: A | B | D | extra"] {
            assert_eq!(
                load_plan(&mut planner, text, today()),
                Err(PlanError::MalformedCourse { line: 1 })
            );
        }
        assert!(planner.courses().is_empty());
    }

    #[test]
    fn test_unknown_period() {
        let mut planner = Planner::default();
        let result = load_plan(&mut planner, "course: Art | White | H", today());
        assert_eq!(
            result,
            Err(PlanError::Period {
                line: 1,
                source: PlannerError::UnknownPeriod("H".to_string()),
            })
        );
    }

    #[test]
    fn test_block_conflict_names_line() {
        let mut planner = Planner::default();
        let text = "course: AP Bio | Smith | D\ncourse: Chemistry | Black | D";
        let result = load_plan(&mut planner, text, today());
        assert!(matches!(
            result,
            Err(PlanError::Planner {
                line: 2,
                source: AgendaError::BlockTaken { .. },
            })
        ));
    }

    #[test]
    fn test_bad_assignment_names_first_line() {
        let mut planner = Planner::default();
        let text = "course: AP Bio | Smith | D\n\nLab Report\nsoonish";
        let result = load_plan(&mut planner, text, today());
        assert_eq!(
            result,
            Err(PlanError::Assignment {
                line: 3,
                source: ParseError::InvalidDate("soonish".to_string()),
            })
        );
    }
}
