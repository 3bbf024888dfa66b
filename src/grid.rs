use chrono::{Datelike, Month, NaiveDate, Weekday};
use num_traits::FromPrimitive;

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 6;

/// One row of a month grid, `0` marks a day of an adjacent month.
pub type Week = [u32; DAYS_PER_WEEK];

const EMPTY_WEEK: Week = [0; DAYS_PER_WEEK];

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1);
    let next = if month.number_from_month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    pub fn from_number(number: u32, year: i32) -> Option<Self> {
        Month::from_u32(number).map(|index| MonthIndex::new(index, year))
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn number(&self) -> u32 {
        self.index.number_from_month()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days(&self) -> u32 {
        days_of_month(&self.index, self.year)
    }

    pub fn next(&self) -> Self {
        let next_month = self.index.succ();

        MonthIndex {
            index: next_month,
            year: if next_month == Month::January {
                self.year + 1
            } else {
                self.year
            },
        }
    }

    pub fn prev(&self) -> Self {
        let prev_month = self.index.pred();

        MonthIndex {
            index: prev_month,
            year: if prev_month == Month::December {
                self.year - 1
            } else {
                self.year
            },
        }
    }
}

/// Weeks of a month as rows of seven days starting at `week_start`, with
/// zeros for the days outside the month.
pub fn month_calendar(month: MonthIndex, week_start: Weekday) -> Vec<Week> {
    let first = match NaiveDate::from_ymd_opt(month.year(), month.number(), 1) {
        Some(first) => first,
        None => return Vec::new(),
    };

    let offset = (first.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday()) as usize
        % DAYS_PER_WEEK;

    let mut cells = vec![0; offset];
    cells.extend(1..=month.days());
    let padding = (DAYS_PER_WEEK - cells.len() % DAYS_PER_WEEK) % DAYS_PER_WEEK;
    cells.extend(std::iter::repeat(0).take(padding));

    cells
        .chunks(DAYS_PER_WEEK)
        .map(|chunk| {
            let mut week = EMPTY_WEEK;
            week.copy_from_slice(chunk);
            week
        })
        .collect()
}

/// Days of the given weeks in order, without the zero cells.
pub fn in_line_month(weeks: &[Week]) -> Vec<u32> {
    weeks
        .iter()
        .flat_map(|week| week.iter().copied())
        .filter(|&day| day != 0)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    None,
    After,
    AfterAndBefore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: MonthIndex,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn new(month: MonthIndex, week_start: Weekday) -> Self {
        MonthGrid {
            month,
            weeks: month_calendar(month, week_start),
        }
    }

    pub fn month(&self) -> MonthIndex {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Pads the grid to six weeks. An empty week is appended first and only
    /// if the grid is still short another one is prepended.
    pub fn pad_to_six_weeks(&mut self) -> Padding {
        let mut padding = Padding::None;

        if self.weeks.len() < WEEKS_PER_GRID {
            self.weeks.push(EMPTY_WEEK);
            padding = Padding::After;
        }
        if self.weeks.len() < WEEKS_PER_GRID {
            self.weeks.insert(0, EMPTY_WEEK);
            padding = Padding::AfterAndBefore;
        }

        padding
    }

    /// Number of zero cells before the first day of the month.
    pub fn leading_fillers(&self) -> usize {
        self.weeks
            .iter()
            .take(2)
            .map(|week| week.iter().filter(|&&day| day == 0).count())
            .sum()
    }
}
