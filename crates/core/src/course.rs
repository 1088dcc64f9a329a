//! Courses and their dual date index
//!
//! A [`Course`] owns its assignments and indexes each one twice: under its
//! assigned date and under its due date. Every mutation goes through the
//! course so that an assignment is always present in exactly the two
//! buckets named by its current dates.

use chrono::Weekday;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::assignment::Assignment;
use crate::date::Date;
use crate::error::{IndexKind, PlannerError, PlannerResult};
use crate::index::DateIndex;
use crate::schedule::Block;
use crate::types::{AssignmentId, CourseId};

/// A class with its assignments and meeting blocks
///
/// Two courses are equal when they share a name and teacher, regardless of
/// their ids or assignments.
#[derive(Debug, Clone)]
pub struct Course {
    id: CourseId,
    name: String,
    teacher: String,
    blocks: Vec<Block>,
    assignments: HashMap<AssignmentId, Assignment>,
    by_assigned: DateIndex,
    by_due: DateIndex,
}

impl Course {
    pub fn new(name: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            id: CourseId::new(),
            name: name.into(),
            teacher: teacher.into(),
            blocks: Vec::new(),
            assignments: HashMap::new(),
            by_assigned: DateIndex::default(),
            by_due: DateIndex::default(),
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn teacher(&self) -> &str {
        &self.teacher
    }

    /// Add an assignment to both date indexes
    ///
    /// Adding an assignment that is already present leaves the stored copy
    /// untouched, including any date changes or completion made since.
    pub fn add_assignment(&mut self, assignment: Assignment) -> AssignmentId {
        let id = assignment.id();
        if self.assignments.contains_key(&id) {
            tracing::debug!(course = %self.name, assignment = %id, "Assignment already indexed");
            return id;
        }

        let key = assignment.key();
        self.by_assigned.insert(assignment.assigned_date(), key.clone());
        self.by_due.insert(assignment.due_date(), key);

        tracing::debug!(
            course = %self.name,
            assignment = %id,
            assigned = %assignment.assigned_date(),
            due = %assignment.due_date(),
            "Indexed assignment"
        );
        self.assignments.insert(id, assignment);
        id
    }

    /// Remove an assignment from the course and both indexes
    pub fn remove_assignment(&mut self, id: AssignmentId) -> Option<Assignment> {
        let assignment = self.assignments.remove(&id)?;
        let key = assignment.key();
        self.by_assigned.remove(assignment.assigned_date(), &key);
        self.by_due.remove(assignment.due_date(), &key);
        tracing::debug!(course = %self.name, assignment = %id, "Removed assignment");
        Some(assignment)
    }

    /// Move an assignment to a new assigned date, returning the old one
    ///
    /// Nothing changes when the call fails: an assignment that is not
    /// indexed here yields [`PlannerError::UnindexedAssignment`], and a date
    /// after the due date yields [`PlannerError::DueBeforeAssigned`].
    pub fn change_assigned_date(
        &mut self,
        id: AssignmentId,
        new_date: Date,
    ) -> PlannerResult<Date> {
        let unindexed = PlannerError::UnindexedAssignment {
            id,
            index: IndexKind::Assigned,
        };
        let Some(assignment) = self.assignments.get_mut(&id) else {
            return Err(unindexed);
        };

        let key = assignment.key();
        if !self.by_assigned.contains(assignment.assigned_date(), &key) {
            return Err(unindexed);
        }
        if assignment.due_date() < new_date {
            return Err(PlannerError::DueBeforeAssigned {
                assigned: new_date,
                due: assignment.due_date(),
            });
        }

        // The bucket key does not depend on the assigned date
        let previous = assignment.change_assigned_date(new_date);
        self.by_assigned.remove(previous, &key);
        self.by_assigned.insert(new_date, key);

        tracing::debug!(
            course = %self.name,
            assignment = %id,
            from = %previous,
            to = %new_date,
            "Changed assigned date"
        );
        Ok(previous)
    }

    /// Move an assignment to a new due date, returning the old one
    ///
    /// Fails without side effects like [`Course::change_assigned_date`].
    pub fn change_due_date(&mut self, id: AssignmentId, new_date: Date) -> PlannerResult<Date> {
        let unindexed = |index| PlannerError::UnindexedAssignment { id, index };
        let Some(assignment) = self.assignments.get_mut(&id) else {
            return Err(unindexed(IndexKind::Due));
        };

        let old_key = assignment.key();
        if !self.by_due.contains(assignment.due_date(), &old_key) {
            return Err(unindexed(IndexKind::Due));
        }
        if !self.by_assigned.contains(assignment.assigned_date(), &old_key) {
            return Err(unindexed(IndexKind::Assigned));
        }
        if new_date < assignment.assigned_date() {
            return Err(PlannerError::DueBeforeAssigned {
                assigned: assignment.assigned_date(),
                due: new_date,
            });
        }

        let previous = assignment.change_due_date(new_date);
        let new_key = assignment.key();
        let assigned = assignment.assigned_date();

        self.by_due.remove(previous, &old_key);
        self.by_due.insert(new_date, new_key.clone());
        // Due date is part of the ordering, so re-key the assigned bucket too
        self.by_assigned.remove(assigned, &old_key);
        self.by_assigned.insert(assigned, new_key);

        tracing::debug!(
            course = %self.name,
            assignment = %id,
            from = %previous,
            to = %new_date,
            "Changed due date"
        );
        Ok(previous)
    }

    pub fn mark_complete(&mut self, id: AssignmentId) -> PlannerResult<()> {
        self.set_completed(id, true)
    }

    pub fn mark_incomplete(&mut self, id: AssignmentId) -> PlannerResult<()> {
        self.set_completed(id, false)
    }

    fn set_completed(&mut self, id: AssignmentId, completed: bool) -> PlannerResult<()> {
        let assignment = self
            .assignments
            .get_mut(&id)
            .ok_or(PlannerError::AssignmentNotFound(id))?;
        assignment.set_completed(completed);
        Ok(())
    }

    /// Assignments assigned on `date`, in display order. Empty when none.
    pub fn get_assigned(&self, date: Date) -> Vec<&Assignment> {
        self.resolve(self.by_assigned.bucket(date))
    }

    /// Assignments due on `date`, in display order. Empty when none.
    pub fn get_due(&self, date: Date) -> Vec<&Assignment> {
        self.resolve(self.by_due.bucket(date))
    }

    /// Assignments assigned between `start` and `end` inclusive
    pub fn assigned_between(&self, start: Date, end: Date) -> Vec<&Assignment> {
        if end < start {
            return Vec::new();
        }
        self.resolve(self.by_assigned.range(start..=end))
    }

    /// Assignments due between `start` and `end` inclusive
    pub fn due_between(&self, start: Date, end: Date) -> Vec<&Assignment> {
        if end < start {
            return Vec::new();
        }
        self.resolve(self.by_due.range(start..=end))
    }

    pub fn assignment(&self, id: AssignmentId) -> Option<&Assignment> {
        self.assignments.get(&id)
    }

    /// All assignments in display order
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        let mut all: Vec<&Assignment> = self.assignments.values().collect();
        all.sort();
        all.into_iter()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Replace the blocks this course meets in
    pub fn set_blocks<I>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.clear();
        for block in blocks {
            if !self.blocks.contains(&block) {
                self.blocks.push(block);
            }
        }
        self.blocks
            .sort_by_key(|b| (b.weekday.num_days_from_monday(), b.slot));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn meets_on(&self, weekday: Weekday) -> bool {
        self.blocks.iter().any(|b| b.weekday == weekday)
    }

    fn resolve(&self, ids: impl Iterator<Item = AssignmentId>) -> Vec<&Assignment> {
        ids.filter_map(|id| self.assignments.get(&id)).collect()
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.teacher == other.teacher
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.teacher.hash(state);
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} taught by {}", self.name, self.teacher)
    }
}
