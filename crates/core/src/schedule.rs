//! Weekly block rotation
//!
//! A [`BlockSchedule`] is a fixed template mapping each weekday to the
//! ordered periods ("blocks") that meet that day. Days may hold different
//! numbers of blocks; callers that need a rectangular grid pad it themselves
//! using [`BlockSchedule::max_slots`].

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::date::Date;
use crate::error::{PlannerError, PlannerResult};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Label of a slot in the rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    /// "L" block: irregular extension slot a course can claim for labs
    Lab,
    Assembly,
    Conference,
    Lunch,
    Free,
}

impl Period {
    pub const ALL: [Period; 12] = [
        Period::A,
        Period::B,
        Period::C,
        Period::D,
        Period::E,
        Period::F,
        Period::G,
        Period::Lab,
        Period::Assembly,
        Period::Conference,
        Period::Lunch,
        Period::Free,
    ];

    /// Short label shown in a schedule cell
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Period::A => "A",
            Period::B => "B",
            Period::C => "C",
            Period::D => "D",
            Period::E => "E",
            Period::F => "F",
            Period::G => "G",
            Period::Lab => "L",
            Period::Assembly => "Asm",
            Period::Conference => "Conf",
            Period::Lunch => "Lunch",
            Period::Free => "Free",
        }
    }

    /// Whether a course can meet in this period
    pub fn is_class(&self) -> bool {
        !matches!(
            self,
            Period::Assembly | Period::Conference | Period::Lunch | Period::Free
        )
    }
}

/// Parses the abbreviation shown in a schedule cell, ignoring case
impl FromStr for Period {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|period| period.abbreviation().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlannerError::UnknownPeriod(wanted.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// One meeting slot: a period at a position within a weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub weekday: Weekday,
    /// Zero-based chronological position within the day
    pub slot: usize,
    pub period: Period,
}

impl Block {
    pub fn label(&self) -> &'static str {
        self.period.abbreviation()
    }

    pub fn is_class_slot(&self) -> bool {
        self.period.is_class()
    }
}

/// The fixed weekly template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSchedule {
    // Indexed by `Weekday::num_days_from_monday`
    days: [Vec<Block>; 7],
}

impl BlockSchedule {
    /// Build a schedule from `(weekday, periods)` entries
    ///
    /// Weekdays that are not listed have no blocks. Listing a weekday twice
    /// is an error rather than a silent overwrite.
    pub fn from_template<I>(template: I) -> PlannerResult<Self>
    where
        I: IntoIterator<Item = (Weekday, Vec<Period>)>,
    {
        let mut days: [Vec<Block>; 7] = Default::default();
        let mut seen = [false; 7];

        for (weekday, periods) in template {
            let index = weekday.num_days_from_monday() as usize;
            if seen[index] {
                return Err(PlannerError::DuplicateWeekday(weekday));
            }
            seen[index] = true;
            days[index] = day_blocks(weekday, periods);
        }

        Ok(Self { days })
    }

    /// The standard rotation: full weekdays with double blocks, a Saturday
    /// half day and no Sunday classes
    pub fn standard() -> Self {
        use Period::*;

        let days = [
            vec![A, B, C, Assembly, D, Lunch, E, F],
            vec![G, A, B, Conference, C, Lunch, D, D],
            vec![E, F, G, Assembly, A, Lunch, Lab],
            vec![B, C, D, Conference, E, Lunch, F, F],
            vec![G, A, B, Assembly, C, Lunch, D, E],
            vec![F, G, Free],
            vec![],
        ];

        let mut schedule = Self {
            days: Default::default(),
        };
        for (weekday, periods) in WEEK.into_iter().zip(days) {
            schedule.days[weekday.num_days_from_monday() as usize] = day_blocks(weekday, periods);
        }
        schedule
    }

    /// Blocks meeting on `weekday`, in chronological order
    pub fn blocks_for(&self, weekday: Weekday) -> &[Block] {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn blocks_on(&self, date: Date) -> &[Block] {
        self.blocks_for(date.weekday())
    }

    pub fn block(&self, weekday: Weekday, slot: usize) -> Option<&Block> {
        self.blocks_for(weekday).get(slot)
    }

    /// Every slot in the week labelled `period`, Monday first
    pub fn blocks_for_period(&self, period: Period) -> Vec<Block> {
        self.days
            .iter()
            .flatten()
            .filter(|block| block.period == period)
            .copied()
            .collect()
    }

    /// Start slots of double blocks: two consecutive slots holding the same
    /// class period
    pub fn double_blocks(&self, weekday: Weekday) -> Vec<usize> {
        self.blocks_for(weekday)
            .windows(2)
            .filter(|pair| pair[0].period == pair[1].period && pair[0].is_class_slot())
            .map(|pair| pair[0].slot)
            .collect()
    }

    /// Largest number of blocks on any day
    pub fn max_slots(&self) -> usize {
        self.days.iter().map(Vec::len).max().unwrap_or(0)
    }
}

fn day_blocks(weekday: Weekday, periods: Vec<Period>) -> Vec<Block> {
    periods
        .into_iter()
        .enumerate()
        .map(|(slot, period)| Block {
            weekday,
            slot,
            period,
        })
        .collect()
}

impl Default for BlockSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
