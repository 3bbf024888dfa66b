use chrono::{Datelike, Local, Weekday};
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::config::{Colors, Config};
use crate::error::*;
use crate::holidays::{parse_other_holidays, HolidayRegion, OtherHoliday};
use crate::units::to_user_units;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

pub const DEFAULT_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Week day names, starting on Sunday.
pub const DEFAULT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub enum StartDay {
    Sunday,
    Monday,
}

impl StartDay {
    pub fn weekday(&self) -> Weekday {
        match self {
            StartDay::Sunday => Weekday::Sun,
            StartDay::Monday => Weekday::Mon,
        }
    }
}

impl Default for StartDay {
    fn default() -> Self {
        StartDay::Monday
    }
}

impl FromStr for StartDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" | "sunday" => Ok(StartDay::Sunday),
            "mon" | "monday" => Ok(StartDay::Monday),
            other => Err(Error::new(
                ErrorKind::InvalidOption,
                &format!("start day '{}', expected 'sun' or 'mon'", other),
            )),
        }
    }
}

impl fmt::Display for StartDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartDay::Sunday => write!(f, "sun"),
            StartDay::Monday => write!(f, "mon"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub enum WeekendDefinition {
    SaturdayAndSunday,
    Saturday,
    Sunday,
}

impl WeekendDefinition {
    pub fn contains(&self, weekday: Weekday) -> bool {
        match self {
            WeekendDefinition::SaturdayAndSunday => {
                weekday == Weekday::Sat || weekday == Weekday::Sun
            }
            WeekendDefinition::Saturday => weekday == Weekday::Sat,
            WeekendDefinition::Sunday => weekday == Weekday::Sun,
        }
    }
}

impl Default for WeekendDefinition {
    fn default() -> Self {
        WeekendDefinition::SaturdayAndSunday
    }
}

impl FromStr for WeekendDefinition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sat+sun" | "sat sun" => Ok(WeekendDefinition::SaturdayAndSunday),
            "sat" => Ok(WeekendDefinition::Saturday),
            "sun" => Ok(WeekendDefinition::Sunday),
            other => Err(Error::new(
                ErrorKind::InvalidOption,
                &format!("weekend '{}', expected 'sat+sun', 'sat' or 'sun'", other),
            )),
        }
    }
}

impl fmt::Display for WeekendDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekendDefinition::SaturdayAndSunday => write!(f, "sat+sun"),
            WeekendDefinition::Saturday => write!(f, "sat"),
            WeekendDefinition::Sunday => write!(f, "sun"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub enabled: bool,
    /// Border color, the day style's fill when unset.
    pub color: Option<String>,
    pub fill: String,
}

/// Validated options of one calendar run. Lengths are in user units.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub year: i32,
    pub month: Option<u32>,
    pub fill_empty_day_boxes: bool,
    pub start_day: StartDay,
    pub weekend: WeekendDefinition,
    pub auto_organize: bool,
    pub months_per_line: u32,
    pub month_width: f64,
    pub month_margin: f64,
    pub colors: Colors,
    pub font_month: String,
    pub font_day: String,
    pub month_names: Vec<String>,
    pub day_names: Vec<String>,
    pub frame: Frame,
    pub other_holidays: Vec<OtherHoliday>,
    pub holidays: HolidayRegion,
    pub list_calendar: bool,
}

fn split_names(names: &str, defaults: &[&str], what: &str) -> Vec<String> {
    let split: Vec<String> = names.split_whitespace().map(str::to_owned).collect();

    if split.len() == defaults.len() {
        split
    } else {
        log::warn!(
            "The {} name list {:?} is invalid. Using default.",
            what,
            split
        );
        defaults.iter().map(|&name| name.to_owned()).collect()
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Result<Self> {
        let year = if config.year == 0 {
            Local::now().year()
        } else {
            config.year
        };
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::new(
                ErrorKind::InvalidOption,
                &format!("year {} is not within {}..={}", year, MIN_YEAR, MAX_YEAR),
            ));
        }

        let month = match config.month {
            0 => None,
            m @ 1..=12 => Some(m),
            m => {
                return Err(Error::new(
                    ErrorKind::InvalidOption,
                    &format!("month {} is not within 0..=12", m),
                ))
            }
        };

        if config.months_per_line == 0 {
            return Err(Error::new(
                ErrorKind::InvalidOption,
                "months per line must be at least 1",
            ));
        }

        let other_holidays = parse_other_holidays(&config.other_holidays, year)?;

        Ok(Options {
            year,
            month,
            fill_empty_day_boxes: config.fill_empty_day_boxes,
            start_day: config.start_day,
            weekend: config.weekend,
            auto_organize: config.auto_organize,
            months_per_line: config.months_per_line,
            month_width: to_user_units(&config.month_width)?,
            month_margin: to_user_units(&config.month_margin)?,
            colors: config.colors.clone(),
            font_month: config.font_month.clone(),
            font_day: config.font_day.clone(),
            month_names: split_names(&config.month_names, &DEFAULT_MONTH_NAMES, "month"),
            day_names: split_names(&config.day_names, &DEFAULT_DAY_NAMES, "day"),
            frame: Frame {
                enabled: config.frame.enabled,
                color: config.frame.color.clone(),
                fill: config.frame.fill.clone(),
            },
            other_holidays,
            holidays: config.holidays,
            list_calendar: config.list_calendar,
        })
    }

    /// Months to render, in order.
    pub fn months(&self) -> Vec<u32> {
        match self.month {
            Some(month) => vec![month],
            None => (1..=12).collect(),
        }
    }

    /// Week day names in grid column order.
    pub fn week_day_names(&self) -> Vec<&str> {
        let names = self.day_names.iter().map(String::as_str);
        match self.start_day {
            StartDay::Sunday => names.collect(),
            StartDay::Monday => names.clone().skip(1).chain(names.take(1)).collect(),
        }
    }
}
