use chrono::{NaiveDate, Weekday};

use crate::holidays::{HolidaySet, OtherHoliday};
use crate::options::{Options, StartDay, WeekendDefinition};
use crate::style::{StyleRecord, StyleTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Normal,
    Weekend,
    PublicHoliday,
    OtherHoliday,
}

/// Decides how a grid cell of the configured year is highlighted.
pub struct HolidayClassifier {
    year: i32,
    start_day: StartDay,
    weekend: WeekendDefinition,
    holidays: HolidaySet,
    other_holidays: Vec<OtherHoliday>,
}

impl HolidayClassifier {
    pub fn new(options: &Options, holidays: HolidaySet) -> Self {
        HolidayClassifier {
            year: options.year,
            start_day: options.start_day,
            weekend: options.weekend,
            holidays,
            other_holidays: options.other_holidays.clone(),
        }
    }

    pub fn weekday_of_column(&self, column: usize) -> Weekday {
        (0..column % 7).fold(self.start_day.weekday(), |day, _| day.succ())
    }

    pub fn is_weekend(&self, column: usize) -> bool {
        self.weekend.contains(self.weekday_of_column(column))
    }

    fn date(&self, month: u32, day: u32) -> Option<NaiveDate> {
        if day == 0 {
            return None;
        }

        let date = NaiveDate::from_ymd_opt(self.year, month, day);
        debug_assert!(
            date.is_some(),
            "grid cell {}-{}-{} is not a date",
            self.year,
            month,
            day
        );
        date
    }

    pub fn is_holiday(&self, month: u32, day: u32) -> bool {
        self.date(month, day)
            .map_or(false, |date| self.holidays.contains(&date))
    }

    pub fn is_other_holiday(&self, month: u32, day: u32) -> bool {
        self.date(month, day).map_or(false, |date| {
            self.other_holidays.iter().any(|other| other.date == date)
        })
    }

    /// Other holidays falling on the given day of the configured year.
    pub fn other_holidays_on(&self, month: u32, day: u32) -> Vec<&OtherHoliday> {
        match self.date(month, day) {
            Some(date) => self
                .other_holidays
                .iter()
                .filter(|other| other.date == date)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn classify(&self, column: usize, month: u32, day: u32) -> DayKind {
        if self.is_holiday(month, day) {
            DayKind::PublicHoliday
        } else if self.is_other_holiday(month, day) {
            DayKind::OtherHoliday
        } else if self.is_weekend(column) {
            DayKind::Weekend
        } else {
            DayKind::Normal
        }
    }

    /// Style of a grid cell; cells of adjacent months always use the next
    /// month day style.
    pub fn style<'s>(
        &self,
        styles: &'s StyleTable,
        column: usize,
        month: u32,
        day: u32,
    ) -> &'s StyleRecord {
        if day == 0 {
            return &styles.nmd;
        }

        match self.classify(column, month, day) {
            DayKind::PublicHoliday | DayKind::Weekend => &styles.weekend,
            DayKind::OtherHoliday => &styles.other_holiday,
            DayKind::Normal => &styles.day,
        }
    }
}
