use chrono::NaiveDate;
use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::{char, one_of},
    combinator::{all_consuming, map_res, opt},
    sequence::{preceded, tuple},
    IResult,
};
use std::str::FromStr;

use crate::error::*;

/// A user supplied special day, e.g. a birthday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherHoliday {
    pub date: NaiveDate,
    pub description: String,
}

impl OtherHoliday {
    pub fn new(date: NaiveDate, description: &str) -> Self {
        OtherHoliday {
            date,
            description: description.to_owned(),
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

type DateParts = (Option<i32>, u32, u32);

fn number<T: FromStr>(min: usize, max: usize) -> impl Fn(&str) -> IResult<&str, T> {
    move |input| {
        map_res(
            take_while_m_n(min, max, |c: char| c.is_ascii_digit()),
            |s: &str| s.parse::<T>(),
        )(input)
    }
}

// 2024-12-25, 2024/12/25
fn iso_date(input: &str) -> IResult<&str, DateParts> {
    let (input, year) = number::<i32>(4, 4)(input)?;
    let (input, sep) = one_of("-/")(input)?;
    let (input, (month, _, day)) = tuple((number(1, 2), char(sep), number(1, 2)))(input)?;

    Ok((input, (Some(year), month, day)))
}

// 12/25, 12/25/2024
fn slashed_date(input: &str) -> IResult<&str, DateParts> {
    let (input, (month, _, day, year)) = tuple((
        number(1, 2),
        char('/'),
        number(1, 2),
        opt(preceded(char('/'), number::<i32>(4, 4))),
    ))(input)?;

    Ok((input, (year, month, day)))
}

// 25.12, 25.12., 25.12.2024
fn dotted_date(input: &str) -> IResult<&str, DateParts> {
    let (input, (day, _, month, year, _)) = tuple((
        number(1, 2),
        char('.'),
        number(1, 2),
        opt(preceded(char('.'), number::<i32>(4, 4))),
        opt(char('.')),
    ))(input)?;

    Ok((input, (year, month, day)))
}

// 12-25
fn dashed_date(input: &str) -> IResult<&str, DateParts> {
    let (input, (month, _, day)) = tuple((number(1, 2), char('-'), number(1, 2)))(input)?;

    Ok((input, (None, month, day)))
}

/// Parses a single date; dates without a year fall into `default_year`.
pub fn parse_date(input: &str, default_year: i32) -> Result<NaiveDate> {
    let (_, (year, month, day)) = all_consuming(alt((
        iso_date,
        slashed_date,
        dotted_date,
        dashed_date,
    )))(input.trim())
    .map_err(|_| Error::new(ErrorKind::DateParse, &format!("unknown date format '{}'", input)))?;

    let year = year.unwrap_or(default_year);
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Error::new(
            ErrorKind::DateParse,
            &format!("'{}' is not a day of {}", input.trim(), year),
        )
    })
}

/// Parses `date [description]` entries separated by `;` or `,`.
pub fn parse_other_holidays(input: &str, default_year: i32) -> Result<Vec<OtherHoliday>> {
    input
        .split(|c: char| c == ';' || c == ',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (date, description) = match entry.find(char::is_whitespace) {
                Some(pos) => entry.split_at(pos),
                None => (entry, ""),
            };

            parse_date(date, default_year)
                .map(|date| OtherHoliday::new(date, description.trim()))
                .map_err(|e| {
                    Error::new(
                        ErrorKind::OtherHolidaysParse,
                        &format!("entry '{}': {}", entry, e),
                    )
                })
        })
        .collect()
}
