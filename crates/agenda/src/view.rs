//! Plain-text day and upcoming views

use planner_core::{Assignment, Block, Course, Date, Weekday};

/// One block of a day and the course meeting in it, if any
#[derive(Debug, Clone, Copy)]
pub struct DaySlot<'a> {
    pub block: &'a Block,
    pub course: Option<&'a Course>,
}

#[derive(Debug, Clone)]
pub struct DayView<'a> {
    pub date: Date,
    pub slots: Vec<DaySlot<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct UpcomingEntry<'a> {
    pub course: &'a Course,
    pub assignment: &'a Assignment,
}

#[derive(Debug, Clone)]
pub struct UpcomingDay<'a> {
    pub date: Date,
    pub entries: Vec<UpcomingEntry<'a>>,
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Render a day's blocks, one line per slot
///
/// ```text
/// Tuesday 2024-03-05
///  1  G
///  7  D      AP Bio
/// ```
pub fn render_day(view: &DayView<'_>) -> String {
    let mut out = format!("{} {}\n", weekday_name(view.date.weekday()), view.date);

    if view.slots.is_empty() {
        out.push_str("  No classes\n");
        return out;
    }

    for slot in &view.slots {
        let course = slot.course.map(Course::name).unwrap_or_default();
        let line = format!("{:>2}  {:<6} {}", slot.block.slot + 1, slot.block.label(), course);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Render the upcoming window, one heading per day
pub fn render_upcoming(days: &[UpcomingDay<'_>], display_on_due: bool) -> String {
    let heading = if display_on_due { "due" } else { "assigned" };
    let mut out = format!("Upcoming ({})\n", heading);

    for day in days {
        out.push_str(&format!(
            "{} {}\n",
            day.date,
            &weekday_name(day.date.weekday())[..3]
        ));
        if day.entries.is_empty() {
            out.push_str("  nothing\n");
            continue;
        }
        for entry in &day.entries {
            let done = if entry.assignment.is_completed() {
                " (done)"
            } else {
                ""
            };
            out.push_str(&format!(
                "  - {}: {} [{}]{}\n",
                entry.course.name(),
                entry.assignment.name(),
                entry.assignment.kind(),
                done
            ));
        }
    }
    out
}
