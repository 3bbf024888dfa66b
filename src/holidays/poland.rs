use chrono::{Duration, NaiveDate};

use super::{HolidayProvider, HolidaySet};

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Statutory public holidays in Poland.
pub struct PolishHolidays;

impl PolishHolidays {
    const FIXED: [(u32, u32); 8] = [
        (1, 1),   // New Year
        (5, 1),   // Labour Day
        (5, 3),   // Constitution Day
        (8, 15),  // Assumption
        (11, 1),  // All Saints
        (11, 11), // Independence Day
        (12, 25), // Christmas
        (12, 26), // Second day of Christmas
    ];
}

impl HolidayProvider for PolishHolidays {
    fn name(&self) -> &str {
        "pl"
    }

    fn holidays(&self, year: i32) -> HolidaySet {
        let mut set: HolidaySet = Self::FIXED
            .iter()
            .filter_map(|&(month, day)| NaiveDate::from_ymd_opt(year, month, day))
            .collect();

        if year >= 2011 {
            set.extend_opt(NaiveDate::from_ymd_opt(year, 1, 6));
        }
        if year >= 2025 {
            set.extend_opt(NaiveDate::from_ymd_opt(year, 12, 24));
        }

        if let Some(easter) = easter_sunday(year) {
            for offset in &[0, 1, 49, 60] {
                set.insert(easter + Duration::days(*offset));
            }
        }

        set
    }
}

impl HolidaySet {
    fn extend_opt(&mut self, date: Option<NaiveDate>) {
        if let Some(date) = date {
            self.insert(date);
        }
    }
}
