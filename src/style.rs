use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::Geometry;
use crate::options::Options;

/// Style properties of one category of text, rendered as an SVG `style`
/// attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRecord(BTreeMap<&'static str, String>);

impl StyleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<V: ToString>(mut self, key: &'static str, value: V) -> Self {
        self.set(key, value);
        self
    }

    pub fn set<V: ToString>(&mut self, key: &'static str, value: V) {
        self.0.insert(key, value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn fill(&self) -> Option<&str> {
        self.get("fill")
    }

    /// The `font-size` as a number, 0 when missing.
    pub fn font_size(&self) -> f64 {
        self.get("font-size")
            .and_then(|size| size.parse().ok())
            .unwrap_or(0.0)
    }
}

impl fmt::Display for StyleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|(key, value)| format!("{}:{}", key, value))
                .join(";")
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    pub day: StyleRecord,
    pub weekend: StyleRecord,
    pub nmd: StyleRecord,
    pub month: StyleRecord,
    pub day_name: StyleRecord,
    pub year: StyleRecord,
    pub other_holiday: StyleRecord,
    /// Holiday descriptions below a day number.
    pub caption: StyleRecord,
    pub day_offset_x: f64,
    pub day_offset_y: f64,
}

impl StyleTable {
    pub fn build(options: &Options, geometry: &Geometry) -> Self {
        let day_w = geometry.day_w;
        let day_h = geometry.day_h;
        let colors = &options.colors;

        let base = StyleRecord::new()
            .with("font-size", day_w / 2.0)
            .with("font-family", &options.font_day)
            .with("text-anchor", "middle")
            .with("text-align", "center")
            .with("fill", &colors.day);

        let mut day = base.clone();
        let (day_offset_x, day_offset_y) = if options.frame.enabled {
            day.set("font-size", day_w / 7.0);
            day.set("text-anchor", "start");
            day.set("text-align", "left");
            (
                -day_w / 2.0 + day_w / 14.0,
                -0.75 * day_h + day_w / 7.0 + day_h / 14.0,
            )
        } else {
            (0.0, 0.0)
        };

        let weekend = day.clone().with("fill", &colors.weekend);
        let nmd = day.clone().with("fill", &colors.nmd);
        let other_holiday = day.clone().with("fill", &colors.other_holiday);
        let caption = other_holiday.clone().with("font-size", day_w / 10.0);

        let month = base
            .clone()
            .with("fill", &colors.month)
            .with("font-size", day_w / 1.5)
            .with("font-weight", "bold")
            .with("font-family", &options.font_month);
        let day_name = base
            .clone()
            .with("fill", &colors.day_name)
            .with("font-size", day_w / 3.0);
        let year = base
            .with("fill", &colors.year)
            .with("font-size", day_w * 2.0)
            .with("font-weight", "bold");

        StyleTable {
            day,
            weekend,
            nmd,
            month,
            day_name,
            year,
            other_holiday,
            caption,
            day_offset_x,
            day_offset_y,
        }
    }
}
