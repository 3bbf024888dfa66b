//! Draws printable year and month calendars onto SVG documents.

pub mod calendar;
pub mod classify;
pub mod config;
pub mod day_maker;
pub mod encoding;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod holidays;
pub mod options;
pub mod style;
pub mod svg;
pub mod units;
