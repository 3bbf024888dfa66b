use std::io::Write;

use crate::classify::HolidayClassifier;
use crate::day_maker::{new_day_maker, DayLayout, DayMaker};
use crate::error::*;
use crate::geometry::{Geometry, PageSize};
use crate::grid::{MonthGrid, MonthIndex};
use crate::holidays::HolidaySet;
use crate::options::Options;
use crate::style::StyleTable;
use crate::svg::{number, Drawing, NodeId, SvgDocument};

/// Draws the calendar of one year, or of a single month of it.
pub struct SvgCalendar {
    options: Options,
    geometry: Geometry,
    styles: StyleTable,
    classifier: HolidayClassifier,
    day_maker: Box<dyn DayMaker>,
    month_x_pos: u32,
    month_y_pos: u32,
}

impl SvgCalendar {
    pub fn new(options: Options, page: &PageSize) -> Self {
        let provider = options.holidays.provider();
        let holidays = provider.holidays(options.year);
        log::debug!(
            "{} public holidays in {} from '{}'",
            holidays.len(),
            options.year,
            provider.name()
        );

        Self::with_holidays(options, page, holidays)
    }

    pub fn with_holidays(options: Options, page: &PageSize, holidays: HolidaySet) -> Self {
        let geometry = Geometry::calculate(page, &options);
        let styles = StyleTable::build(&options, &geometry);
        let classifier = HolidayClassifier::new(&options, holidays);
        let day_maker = new_day_maker(&options, DayLayout::new(&options, &geometry, &styles));

        SvgCalendar {
            options,
            geometry,
            styles,
            classifier,
            day_maker,
            month_x_pos: 0,
            month_y_pos: 0,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Builds the `year_<Y>` group with the year header and all requested
    /// months.
    pub fn effect(&mut self) -> Drawing {
        let year = self.options.year;
        let mut drawing = Drawing::new("g", &[("id", format!("year_{}", year))]);
        let root = drawing.root();

        let header = drawing.create_element(
            root,
            "text",
            &[
                ("style", self.styles.year.to_string()),
                ("x", number(self.geometry.doc_w / 2.0)),
                ("y", number(self.geometry.day_w * 1.5)),
            ],
        );
        drawing.set_text(header, &year.to_string());

        self.month_x_pos = 0;
        self.month_y_pos = 0;
        for month in self.options.months() {
            self.create_month(&mut drawing, root, month);
        }

        drawing
    }

    pub fn create_month(&mut self, drawing: &mut Drawing, parent: NodeId, month: u32) {
        let year = self.options.year;
        let index = match MonthIndex::from_number(month, year) {
            Some(index) => index,
            None => {
                log::error!("There is no month {} to draw", month);
                return;
            }
        };

        let (x, y) = self
            .geometry
            .month_origin(self.month_x_pos, self.month_y_pos);
        let group = drawing.create_element(
            parent,
            "g",
            &[
                ("transform", format!("translate({},{})", number(x), number(y))),
                ("id", format!("month_{}_{}", month, year)),
            ],
        );
        log::debug!(
            "Month {}/{} at column {}, row {}",
            month,
            year,
            self.month_x_pos,
            self.month_y_pos
        );

        self.write_month_header(drawing, group, month);
        let days = drawing.create_element(group, "g", &[]);

        let mut grid = MonthGrid::new(index, self.options.start_day.weekday());
        self.day_maker.on_before_month(days, &mut grid);

        for week in grid.weeks() {
            self.day_maker.on_new_week(week);
            for (column, &day) in week.iter().enumerate() {
                let style = self.classifier.style(&self.styles, column, month, day);
                let other_holidays = self.classifier.other_holidays_on(month, day);
                self.day_maker
                    .make(drawing, month, week, day, style, &other_holidays);
            }
        }

        self.month_x_pos += 1;
        if self.month_x_pos >= self.geometry.months_per_line {
            self.month_x_pos = 0;
            self.month_y_pos += 1;
        }
    }

    pub fn write_month_header(&self, drawing: &mut Drawing, parent: NodeId, month: u32) {
        let name = self
            .options
            .month_names
            .get(month as usize - 1)
            .map(String::as_str)
            .unwrap_or_default();

        let title = drawing.create_element(
            parent,
            "text",
            &[
                ("style", self.styles.month.to_string()),
                ("x", number((self.geometry.month_w - self.geometry.day_w) / 2.0)),
                ("y", number(self.geometry.day_h / 5.0)),
            ],
        );
        drawing.set_text(title, name);

        let week_days = drawing.create_element(parent, "g", &[]);
        for (column, day_name) in self.options.week_day_names().into_iter().enumerate() {
            let text = drawing.create_element(
                week_days,
                "text",
                &[
                    ("style", self.styles.day_name.to_string()),
                    ("x", number(self.geometry.day_w * column as f64)),
                    ("y", number(self.geometry.day_h)),
                ],
            );
            drawing.set_text(text, day_name);
        }
    }
}

/// Draws the calendar described by `options` onto `document` and writes the
/// result to `out`.
pub fn draw_onto<W: Write>(document: &SvgDocument, options: Options, out: W) -> Result<W> {
    let mut calendar = SvgCalendar::new(options, &document.page());
    let drawing = calendar.effect();
    document.write_with(&drawing, out)
}
