//! Course registry
//!
//! [`Planner`] owns the weekly block schedule and every course of a session.
//! It answers the questions a calendar screen asks: which course sits in each
//! block of a day, and what is coming up over the next few days.

use planner_core::{
    Assignment, AssignmentId, Block, BlockSchedule, Course, CourseId, Date, Weekday,
};

use crate::error::{AgendaError, AgendaResult};
use crate::preferences::Preferences;
use crate::view::{DaySlot, DayView, UpcomingDay, UpcomingEntry};

#[derive(Debug, Clone, Default)]
pub struct Planner {
    schedule: BlockSchedule,
    courses: Vec<Course>,
}

impl Planner {
    pub fn new(schedule: BlockSchedule) -> Self {
        Self {
            schedule,
            courses: Vec::new(),
        }
    }

    pub fn schedule(&self) -> &BlockSchedule {
        &self.schedule
    }

    /// Register a course. A course with the same name and teacher is rejected.
    pub fn add_course(&mut self, course: Course) -> AgendaResult<CourseId> {
        if self.courses.contains(&course) {
            return Err(AgendaError::DuplicateCourse {
                name: course.name().to_string(),
                teacher: course.teacher().to_string(),
            });
        }
        for block in course.blocks() {
            self.check_block(block, None)?;
        }

        let id = course.id();
        tracing::info!(course = %course, id = %id, "Added course");
        self.courses.push(course);
        Ok(id)
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    /// Courses in the order they were added
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn remove_course(&mut self, id: CourseId) -> AgendaResult<Course> {
        let index = self
            .courses
            .iter()
            .position(|c| c.id() == id)
            .ok_or(AgendaError::CourseNotFound(id))?;
        let course = self.courses.remove(index);
        tracing::info!(course = %course, id = %id, "Removed course");
        Ok(course)
    }

    pub fn add_assignment(
        &mut self,
        course: CourseId,
        assignment: Assignment,
    ) -> AgendaResult<AssignmentId> {
        Ok(self.course_entry(course)?.add_assignment(assignment))
    }

    pub fn remove_assignment(
        &mut self,
        course: CourseId,
        id: AssignmentId,
    ) -> AgendaResult<Option<Assignment>> {
        Ok(self.course_entry(course)?.remove_assignment(id))
    }

    pub fn change_assigned_date(
        &mut self,
        course: CourseId,
        id: AssignmentId,
        new_date: Date,
    ) -> AgendaResult<Date> {
        Ok(self.course_entry(course)?.change_assigned_date(id, new_date)?)
    }

    pub fn change_due_date(
        &mut self,
        course: CourseId,
        id: AssignmentId,
        new_date: Date,
    ) -> AgendaResult<Date> {
        Ok(self.course_entry(course)?.change_due_date(id, new_date)?)
    }

    pub fn mark_complete(&mut self, course: CourseId, id: AssignmentId) -> AgendaResult<()> {
        Ok(self.course_entry(course)?.mark_complete(id)?)
    }

    pub fn mark_incomplete(&mut self, course: CourseId, id: AssignmentId) -> AgendaResult<()> {
        Ok(self.course_entry(course)?.mark_incomplete(id)?)
    }

    /// Set the blocks a course meets in
    ///
    /// Every block must be a class slot of this planner's schedule and must
    /// not be claimed by another course.
    pub fn assign_blocks(&mut self, id: CourseId, blocks: Vec<Block>) -> AgendaResult<()> {
        if self.course(id).is_none() {
            return Err(AgendaError::CourseNotFound(id));
        }
        for block in &blocks {
            self.check_block(block, Some(id))?;
        }

        self.course_entry(id)?.set_blocks(blocks);
        Ok(())
    }

    pub fn courses_meeting_on(&self, weekday: Weekday) -> Vec<&Course> {
        self.courses.iter().filter(|c| c.meets_on(weekday)).collect()
    }

    /// Each block of `date` paired with the course that meets in it
    pub fn day_view(&self, date: Date) -> DayView<'_> {
        let slots = self
            .schedule
            .blocks_on(date)
            .iter()
            .map(|block| DaySlot {
                block,
                course: self.course_in(block),
            })
            .collect();
        DayView { date, slots }
    }

    /// Assignments over the preferred number of days starting at `today`
    ///
    /// Each day lists assignments course by course, taken from the due-date
    /// or assigned-date index according to the preferences. Days without
    /// assignments are kept so the window has a fixed length.
    pub fn upcoming(&self, today: Date, preferences: &Preferences) -> Vec<UpcomingDay<'_>> {
        let on_due = preferences.display_on_due();
        let show_completed = preferences.show_completed();

        (0..i64::from(preferences.upcoming_days()))
            .filter_map(|offset| today.checked_add_days(offset))
            .map(move |date| {
                let entries = self
                    .courses
                    .iter()
                    .flat_map(move |course| {
                        let assignments = if on_due {
                            course.get_due(date)
                        } else {
                            course.get_assigned(date)
                        };
                        assignments
                            .into_iter()
                            .filter(move |a| show_completed || !a.is_completed())
                            .map(move |assignment| UpcomingEntry { course, assignment })
                    })
                    .collect();
                UpcomingDay { date, entries }
            })
            .collect()
    }

    // Registered courses are only mutated through the methods above so that
    // block ownership stays checked
    fn course_entry(&mut self, id: CourseId) -> AgendaResult<&mut Course> {
        self.courses
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(AgendaError::CourseNotFound(id))
    }

    fn course_in(&self, block: &Block) -> Option<&Course> {
        self.courses.iter().find(|c| c.blocks().contains(block))
    }

    fn check_block(&self, block: &Block, owner: Option<CourseId>) -> AgendaResult<()> {
        let invalid = AgendaError::InvalidBlock {
            weekday: block.weekday,
            slot: block.slot,
        };
        match self.schedule.block(block.weekday, block.slot) {
            Some(known) if known == block && known.is_class_slot() => {}
            _ => return Err(invalid),
        }

        if let Some(other) = self.course_in(block).filter(|c| Some(c.id()) != owner) {
            return Err(AgendaError::BlockTaken {
                weekday: block.weekday,
                slot: block.slot,
                course: other.name().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{AssignmentType, Period, PlannerError};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::new(y, m, d).unwrap()
    }

    fn planner_with_bio() -> (Planner, CourseId) {
        let mut planner = Planner::default();
        let id = planner.add_course(Course::new("AP Bio", "Smith")).unwrap();
        let blocks = planner.schedule().blocks_for_period(Period::D);
        planner.assign_blocks(id, blocks).unwrap();
        (planner, id)
    }

    #[test]
    fn test_duplicate_course_rejected() {
        let (mut planner, _) = planner_with_bio();
        assert_eq!(
            planner.add_course(Course::new("AP Bio", "Smith")),
            Err(AgendaError::DuplicateCourse {
                name: "AP Bio".to_string(),
                teacher: "Smith".to_string(),
            })
        );
        assert!(planner.add_course(Course::new("AP Bio", "Jones")).is_ok());
        assert_eq!(planner.courses().len(), 2);
    }

    #[test]
    fn test_remove_course() {
        let (mut planner, id) = planner_with_bio();
        let removed = planner.remove_course(id).unwrap();
        assert_eq!(removed.name(), "AP Bio");
        assert!(planner.course(id).is_none());
        assert_eq!(planner.remove_course(id), Err(AgendaError::CourseNotFound(id)));
    }

    #[test]
    fn test_assign_blocks_validation() {
        let (mut planner, _) = planner_with_bio();
        let chem = planner.add_course(Course::new("Chemistry", "Black")).unwrap();

        let lunch = *planner.schedule().block(Weekday::Mon, 5).unwrap();
        assert_eq!(
            planner.assign_blocks(chem, vec![lunch]),
            Err(AgendaError::InvalidBlock {
                weekday: Weekday::Mon,
                slot: 5,
            })
        );

        let phantom = Block {
            weekday: Weekday::Sun,
            slot: 0,
            period: Period::A,
        };
        assert!(matches!(
            planner.assign_blocks(chem, vec![phantom]),
            Err(AgendaError::InvalidBlock { .. })
        ));

        let monday_d = *planner.schedule().block(Weekday::Mon, 4).unwrap();
        assert_eq!(
            planner.assign_blocks(chem, vec![monday_d]),
            Err(AgendaError::BlockTaken {
                weekday: Weekday::Mon,
                slot: 4,
                course: "AP Bio".to_string(),
            })
        );

        let lab = planner.schedule().blocks_for_period(Period::Lab);
        planner.assign_blocks(chem, lab).unwrap();
        assert!(planner.course(chem).unwrap().meets_on(Weekday::Wed));
    }

    #[test]
    fn test_assignment_changes_go_through_registry() {
        let (mut planner, id) = planner_with_bio();
        let reading = Assignment::new(
            date(2024, 3, 1),
            date(2024, 3, 4),
            AssignmentType::Reading,
            "Chapter 5",
            None,
        )
        .unwrap();
        let reading = planner.add_assignment(id, reading).unwrap();

        assert_eq!(
            planner.change_due_date(id, reading, date(2024, 3, 6)),
            Ok(date(2024, 3, 4))
        );
        assert_eq!(
            planner.change_assigned_date(id, reading, date(2024, 3, 7)),
            Err(AgendaError::Planner(PlannerError::DueBeforeAssigned {
                assigned: date(2024, 3, 7),
                due: date(2024, 3, 6),
            }))
        );
        planner.mark_complete(id, reading).unwrap();
        planner.mark_incomplete(id, reading).unwrap();
        let course = planner.course(id).unwrap();
        assert!(!course.assignment(reading).unwrap().is_completed());

        let removed = planner.remove_assignment(id, reading).unwrap();
        assert_eq!(removed.map(|a| a.id()), Some(reading));
        assert!(planner.course(id).unwrap().is_empty());

        let missing = CourseId::new();
        assert_eq!(
            planner.mark_complete(missing, reading),
            Err(AgendaError::CourseNotFound(missing))
        );
    }

    #[test]
    fn test_reassigning_own_blocks_is_allowed() {
        let (mut planner, id) = planner_with_bio();
        let blocks = planner.schedule().blocks_for_period(Period::D);
        assert!(planner.assign_blocks(id, blocks).is_ok());
    }

    #[test]
    fn test_courses_meeting_on() {
        let (planner, id) = planner_with_bio();
        let wednesday: Vec<CourseId> = planner
            .courses_meeting_on(Weekday::Wed)
            .iter()
            .map(|c| c.id())
            .collect();
        assert!(wednesday.is_empty());
        assert_eq!(planner.courses_meeting_on(Weekday::Tue)[0].id(), id);
    }

    #[test]
    fn test_day_view_pairs_blocks_with_courses() {
        let (planner, _) = planner_with_bio();
        // 2024-03-05 is a Tuesday: D is a double block in slots 6 and 7
        let view = planner.day_view(date(2024, 3, 5));
        assert_eq!(view.slots.len(), 8);
        let taken: Vec<usize> = view
            .slots
            .iter()
            .filter(|s| s.course.is_some())
            .map(|s| s.block.slot)
            .collect();
        assert_eq!(taken, vec![6, 7]);

        assert!(planner.day_view(date(2024, 3, 10)).slots.is_empty());
    }

    #[test]
    fn test_upcoming_window() {
        let (mut planner, id) = planner_with_bio();
        let today = date(2024, 3, 1);
        let lab = Assignment::new(
            today,
            date(2024, 3, 3),
            AssignmentType::Lab,
            "Lab Report",
            None,
        )
        .unwrap();
        let lab = planner.add_assignment(id, lab).unwrap();
        let test = Assignment::new(
            today,
            date(2024, 3, 20),
            AssignmentType::Test,
            "Unit Test",
            None,
        )
        .unwrap();
        planner.add_assignment(id, test).unwrap();

        let mut prefs = Preferences::default();
        prefs.set_upcoming_days(5).unwrap();

        let days = planner.upcoming(today, &prefs);
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, today);
        assert_eq!(days[4].date, date(2024, 3, 5));
        assert_eq!(days[2].entries.len(), 1);
        assert_eq!(days[2].entries[0].assignment.id(), lab);
        assert_eq!(days.iter().map(|d| d.entries.len()).sum::<usize>(), 1);

        prefs.set_display_on_due(false);
        let days = planner.upcoming(today, &prefs);
        assert_eq!(days[0].entries.len(), 2);

        planner.mark_complete(id, lab).unwrap();
        let days = planner.upcoming(today, &prefs);
        assert_eq!(days[0].entries.len(), 1);
        prefs.set_show_completed(true);
        assert_eq!(planner.upcoming(today, &prefs)[0].entries.len(), 2);
    }
}
