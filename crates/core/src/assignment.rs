//! Assignments and their display order

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::date::Date;
use crate::error::{PlannerError, PlannerResult};
use crate::types::AssignmentId;

/// Category of schoolwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    Homework,
    Reading,
    Essay,
    Project,
    Lab,
    Quiz,
    Test,
    Other,
}

impl AssignmentType {
    pub const ALL: [AssignmentType; 8] = [
        AssignmentType::Homework,
        AssignmentType::Reading,
        AssignmentType::Essay,
        AssignmentType::Project,
        AssignmentType::Lab,
        AssignmentType::Quiz,
        AssignmentType::Test,
        AssignmentType::Other,
    ];

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            AssignmentType::Homework => "Homework",
            AssignmentType::Reading => "Reading",
            AssignmentType::Essay => "Essay",
            AssignmentType::Project => "Project",
            AssignmentType::Lab => "Lab",
            AssignmentType::Quiz => "Quiz",
            AssignmentType::Test => "Test",
            AssignmentType::Other => "Other",
        }
    }
}

impl FromStr for AssignmentType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlannerError::UnknownAssignmentType(wanted.to_string()))
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of an assignment inside a date bucket: due date, then name,
/// then id
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct AssignmentKey {
    pub(crate) due: Date,
    pub(crate) name: String,
    pub(crate) id: AssignmentId,
}

/// A unit of schoolwork
///
/// Equality is identity: two assignments are equal only when they share an
/// [`AssignmentId`], even if every other field matches. Dates change only
/// through [`Course`](crate::Course), which keeps its indexes in step.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    id: AssignmentId,
    assigned: Date,
    due: Date,
    kind: AssignmentType,
    name: String,
    description: Option<String>,
    completed: bool,
}

impl Assignment {
    /// Create a pending assignment
    ///
    /// Fails with [`PlannerError::DueBeforeAssigned`] when `due` precedes
    /// `assigned`.
    pub fn new(
        assigned: Date,
        due: Date,
        kind: AssignmentType,
        name: impl Into<String>,
        description: Option<String>,
    ) -> PlannerResult<Self> {
        if due < assigned {
            return Err(PlannerError::DueBeforeAssigned { assigned, due });
        }

        Ok(Self {
            id: AssignmentId::new(),
            assigned,
            due,
            kind,
            name: name.into(),
            description: description.filter(|d| !d.trim().is_empty()),
            completed: false,
        })
    }

    pub fn id(&self) -> AssignmentId {
        self.id
    }

    pub fn assigned_date(&self) -> Date {
        self.assigned
    }

    pub fn due_date(&self) -> Date {
        self.due
    }

    pub fn kind(&self) -> AssignmentType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Replace the assigned date, returning the previous one
    pub(crate) fn change_assigned_date(&mut self, date: Date) -> Date {
        std::mem::replace(&mut self.assigned, date)
    }

    /// Replace the due date, returning the previous one
    pub(crate) fn change_due_date(&mut self, date: Date) -> Date {
        std::mem::replace(&mut self.due, date)
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub(crate) fn key(&self) -> AssignmentKey {
        AssignmentKey {
            due: self.due,
            name: self.name.clone(),
            id: self.id,
        }
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Assignment {}

impl PartialOrd for Assignment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Assignment {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.id == other.id {
            return Ordering::Equal;
        }
        self.due
            .cmp(&other.due)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl std::hash::Hash for Assignment {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, due {})", self.name, self.kind, self.due)
    }
}
