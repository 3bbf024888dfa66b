mod other;
mod poland;

pub use other::{parse_date, parse_other_holidays, OtherHoliday};
pub use poland::{easter_sunday, PolishHolidays};

use chrono::NaiveDate;
use serde_with::DeserializeFromStr;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

use crate::error::*;

/// Public holidays of one year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet(BTreeSet<NaiveDate>);

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0.contains(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        HolidaySet(iter.into_iter().collect())
    }
}

pub trait HolidayProvider {
    fn name(&self) -> &str;
    fn holidays(&self, year: i32) -> HolidaySet;
}

pub struct NoHolidays;

impl HolidayProvider for NoHolidays {
    fn name(&self) -> &str {
        "none"
    }

    fn holidays(&self, _year: i32) -> HolidaySet {
        HolidaySet::new()
    }
}

/// Selects the public holiday calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub enum HolidayRegion {
    Poland,
    None,
}

impl Default for HolidayRegion {
    fn default() -> Self {
        HolidayRegion::Poland
    }
}

impl HolidayRegion {
    pub fn provider(&self) -> Box<dyn HolidayProvider> {
        match self {
            HolidayRegion::Poland => Box::new(PolishHolidays),
            HolidayRegion::None => Box::new(NoHolidays),
        }
    }
}

impl FromStr for HolidayRegion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pl" | "poland" => Ok(HolidayRegion::Poland),
            "none" | "" => Ok(HolidayRegion::None),
            other => Err(Error::new(
                ErrorKind::InvalidOption,
                &format!("unknown holiday calendar '{}', expected 'pl' or 'none'", other),
            )),
        }
    }
}

impl fmt::Display for HolidayRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayRegion::Poland => write!(f, "pl"),
            HolidayRegion::None => write!(f, "none"),
        }
    }
}
