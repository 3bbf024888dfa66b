use chrono::Weekday;

use crate::geometry::Geometry;
use crate::grid::{in_line_month, month_calendar, MonthGrid, Week};
use crate::holidays::OtherHoliday;
use crate::options::Options;
use crate::style::{StyleRecord, StyleTable};
use crate::svg::{number, Drawing, NodeId};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameStyle {
    /// Border color; the cell style's fill when unset.
    pub color: Option<String>,
    pub fill: String,
}

/// Everything a day maker needs to place the cells of a month.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub week_start: Weekday,
    pub fill_empty_day_boxes: bool,
    pub frame: Option<FrameStyle>,
    pub day_w: f64,
    pub day_h: f64,
    pub day_offset_x: f64,
    pub day_offset_y: f64,
    pub caption: StyleRecord,
}

impl DayLayout {
    pub fn new(options: &Options, geometry: &Geometry, styles: &StyleTable) -> Self {
        DayLayout {
            week_start: options.start_day.weekday(),
            fill_empty_day_boxes: options.fill_empty_day_boxes,
            frame: if options.frame.enabled {
                Some(FrameStyle {
                    color: options.frame.color.clone(),
                    fill: options.frame.fill.clone(),
                })
            } else {
                None
            },
            day_w: geometry.day_w,
            day_h: geometry.day_h,
            day_offset_x: styles.day_offset_x,
            day_offset_y: styles.day_offset_y,
            caption: styles.caption.clone(),
        }
    }
}

/// Cursor of a day maker within the current month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayMakerState {
    pub week_x: usize,
    pub week_y: i32,
    /// Before the first day: previous month days still to show. After it:
    /// index of the next next-month day.
    pub bmd: usize,
    /// No day of the month has been drawn yet.
    pub before: bool,
    /// Baseline of the last text line in the current cell.
    pub text_offset_y: f64,
}

/// Draws the day cells of a month. The driver calls `on_before_month` once,
/// then `on_new_week` at the start of every week and `make` for every cell.
pub trait DayMaker {
    fn on_before_month(&mut self, parent: NodeId, grid: &mut MonthGrid);

    fn on_new_week(&mut self, week: &Week);

    fn make(
        &mut self,
        drawing: &mut Drawing,
        month: u32,
        week: &Week,
        day: u32,
        style: &StyleRecord,
        other_holidays: &[&OtherHoliday],
    );

    fn state(&self) -> &DayMakerState;
}

/// Lays the days out as a calendar grid, one row per week.
pub struct BasicDayMaker {
    layout: DayLayout,
    parent: Option<NodeId>,
    before_month: Vec<u32>,
    next_month: Vec<u32>,
    state: DayMakerState,
}

impl BasicDayMaker {
    pub fn new(layout: DayLayout) -> Self {
        BasicDayMaker {
            layout,
            parent: None,
            before_month: Vec::new(),
            next_month: Vec::new(),
            state: DayMakerState::default(),
        }
    }

    fn position(&self) -> (f64, f64) {
        (
            self.layout.day_w * self.state.week_x as f64,
            self.layout.day_h * (self.state.week_y + 2) as f64,
        )
    }

    fn next_filler(&mut self) -> Option<u32> {
        if self.state.before {
            let filler = self
                .before_month
                .len()
                .checked_sub(self.state.bmd)
                .and_then(|idx| self.before_month.get(idx))
                .copied();
            self.state.bmd = self.state.bmd.saturating_sub(1);
            filler
        } else {
            let filler = self.next_month.get(self.state.bmd).copied();
            self.state.bmd += 1;
            filler
        }
    }

    fn write_frame(
        &self,
        drawing: &mut Drawing,
        parent: NodeId,
        frame: &FrameStyle,
        style: &StyleRecord,
    ) {
        let (x, y) = self.position();
        let border = frame
            .color
            .as_deref()
            .or_else(|| style.fill())
            .unwrap_or("none");
        let frame_style = StyleRecord::new()
            .with("fill", &frame.fill)
            .with("stroke", border)
            .with("stroke-width", 1);

        drawing.create_element(
            parent,
            "rect",
            &[
                ("style", frame_style.to_string()),
                ("x", number(x + 1.0 - self.layout.day_w / 2.0)),
                ("y", number(y + 1.0 - 0.75 * self.layout.day_h)),
                ("width", number(self.layout.day_w - 2.0)),
                ("height", number(self.layout.day_h - 2.0)),
            ],
        );
    }

    fn write_text(
        &mut self,
        drawing: &mut Drawing,
        parent: NodeId,
        style: &StyleRecord,
        label: &str,
        captions: &[&str],
    ) {
        let (x, y) = self.position();
        let x = x + self.layout.day_offset_x;
        let y = y + self.layout.day_offset_y;
        self.state.text_offset_y = y;

        let text = drawing.create_element(
            parent,
            "text",
            &[
                ("style", style.to_string()),
                ("x", number(x)),
                ("y", number(y)),
            ],
        );

        if captions.is_empty() {
            drawing.set_text(text, label);
            return;
        }

        let line = drawing.create_element(
            text,
            "tspan",
            &[("x", number(x)), ("y", number(y))],
        );
        drawing.set_text(line, label);

        let step = self.layout.caption.font_size() + 2.0;
        for caption in captions {
            self.state.text_offset_y += step;
            let line = drawing.create_element(
                text,
                "tspan",
                &[
                    ("style", self.layout.caption.to_string()),
                    ("x", number(x)),
                    ("y", number(self.state.text_offset_y)),
                ],
            );
            drawing.set_text(line, caption);
        }
    }

    fn make_cell(
        &mut self,
        drawing: &mut Drawing,
        parent: NodeId,
        day: u32,
        style: &StyleRecord,
        other_holidays: &[&OtherHoliday],
    ) {
        if day == 0 {
            if self.layout.fill_empty_day_boxes {
                if let Some(filler) = self.next_filler() {
                    self.write_text(drawing, parent, style, &filler.to_string(), &[]);
                }
            }
            return;
        }

        if let Some(frame) = &self.layout.frame {
            self.write_frame(drawing, parent, frame, style);
        }

        let captions: Vec<&str> = other_holidays
            .iter()
            .filter(|holiday| holiday.has_description())
            .map(|holiday| holiday.description.as_str())
            .collect();
        self.write_text(drawing, parent, style, &day.to_string(), &captions);

        self.state.before = false;
    }
}

impl DayMaker for BasicDayMaker {
    fn on_before_month(&mut self, parent: NodeId, grid: &mut MonthGrid) {
        let month = grid.month();
        self.parent = Some(parent);

        let week_start = self.layout.week_start;
        self.before_month = in_line_month(&month_calendar(month.prev(), week_start));
        self.next_month = in_line_month(&month_calendar(month.next(), week_start));

        let padding = grid.pad_to_six_weeks();
        log::trace!(
            "Month {}/{} padded: {:?}",
            month.number(),
            month.year(),
            padding
        );

        self.state = DayMakerState {
            week_x: 0,
            week_y: -1,
            bmd: grid.leading_fillers(),
            before: true,
            text_offset_y: 0.0,
        };
    }

    fn on_new_week(&mut self, _week: &Week) {
        self.state.week_x = 0;
        self.state.week_y += 1;
    }

    fn make(
        &mut self,
        drawing: &mut Drawing,
        _month: u32,
        _week: &Week,
        day: u32,
        style: &StyleRecord,
        other_holidays: &[&OtherHoliday],
    ) {
        match self.parent {
            Some(parent) => self.make_cell(drawing, parent, day, style, other_holidays),
            None => log::error!("Day {} made before its month was started", day),
        }

        self.state.week_x += 1;
    }

    fn state(&self) -> &DayMakerState {
        &self.state
    }
}

/// Lays the days out as a list, one row per day.
pub struct ListDayMaker {
    basic: BasicDayMaker,
}

impl ListDayMaker {
    pub fn new(layout: DayLayout) -> Self {
        ListDayMaker {
            basic: BasicDayMaker::new(layout),
        }
    }
}

impl DayMaker for ListDayMaker {
    fn on_before_month(&mut self, parent: NodeId, grid: &mut MonthGrid) {
        self.basic.on_before_month(parent, grid);
        self.basic.state.week_y = 0;
    }

    fn on_new_week(&mut self, _week: &Week) {}

    fn make(
        &mut self,
        drawing: &mut Drawing,
        month: u32,
        week: &Week,
        day: u32,
        style: &StyleRecord,
        other_holidays: &[&OtherHoliday],
    ) {
        self.basic.make(drawing, month, week, day, style, other_holidays);

        if day != 0 {
            self.basic.state.week_x = 0;
            self.basic.state.week_y += 1;
        }
    }

    fn state(&self) -> &DayMakerState {
        &self.basic.state
    }
}

pub fn new_day_maker(options: &Options, layout: DayLayout) -> Box<dyn DayMaker> {
    if options.list_calendar {
        Box::new(ListDayMaker::new(layout))
    } else {
        Box::new(BasicDayMaker::new(layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MonthIndex;
    use approx::assert_relative_eq;
    use chrono::{Month, NaiveDate};
    use proptest::prelude::*;

    fn layout() -> DayLayout {
        DayLayout {
            week_start: Weekday::Mon,
            fill_empty_day_boxes: true,
            frame: None,
            day_w: 14.0,
            day_h: 9.0,
            day_offset_x: 0.0,
            day_offset_y: 0.0,
            caption: StyleRecord::new().with("font-size", 1.5),
        }
    }

    fn style() -> StyleRecord {
        StyleRecord::new().with("fill", "#123")
    }

    /// Runs the lifecycle of one month the way the calendar driver does.
    fn run_month(
        maker: &mut dyn DayMaker,
        drawing: &mut Drawing,
        month: MonthIndex,
        holidays: &[OtherHoliday],
    ) {
        let mut grid = MonthGrid::new(month, Weekday::Mon);
        maker.on_before_month(drawing.root(), &mut grid);

        for week in grid.weeks() {
            maker.on_new_week(week);
            for &day in week.iter() {
                let date = NaiveDate::from_ymd_opt(month.year(), month.number(), day);
                let on_day: Vec<&OtherHoliday> = holidays
                    .iter()
                    .filter(|h| Some(h.date) == date)
                    .collect();
                maker.make(drawing, month.number(), week, day, &style(), &on_day);
            }
        }
    }

    fn texts(drawing: &Drawing) -> Vec<(String, f64, f64)> {
        drawing
            .children(drawing.root())
            .map(|id| drawing.element(id))
            .filter(|element| element.tag == "text")
            .map(|element| {
                (
                    element.text.clone().unwrap_or_default(),
                    element.number("x").unwrap(),
                    element.number("y").unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn february_2024_fillers() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = BasicDayMaker::new(layout());
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::February, 2024), &[]);

        let texts = texts(&drawing);
        assert_eq!(texts.len(), 42);

        let labels: Vec<&str> = texts.iter().map(|(label, _, _)| label.as_str()).collect();
        assert_eq!(&labels[..4], &["29", "30", "31", "1"]);
        assert_eq!(&labels[30..35], &["28", "29", "1", "2", "3"]);
        assert_eq!(&labels[35..], &["4", "5", "6", "7", "8", "9", "10"]);

        // the first day sits in the Thursday column of the first week
        assert_relative_eq!(texts[3].1, 14.0 * 3.0);
        assert_relative_eq!(texts[3].2, 9.0 * 2.0);
        // the padded sixth week
        assert_relative_eq!(texts[41].1, 14.0 * 6.0);
        assert_relative_eq!(texts[41].2, 9.0 * 7.0);
        assert!(!maker.state().before);
    }

    #[test]
    fn january_fillers_come_from_previous_december() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = BasicDayMaker::new(layout());
        // 1st of January 2025 is a Wednesday
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::January, 2025), &[]);

        let labels: Vec<String> = texts(&drawing).into_iter().map(|(label, _, _)| label).collect();
        assert_eq!(&labels[..3], &["30", "31", "1"]);
    }

    #[test]
    fn empty_boxes_stay_empty_without_filling() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = BasicDayMaker::new(DayLayout {
            fill_empty_day_boxes: false,
            ..layout()
        });
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::February, 2024), &[]);

        let texts = texts(&drawing);
        assert_eq!(texts.len(), 29);
        assert_eq!(texts[0].0, "1");
        // the column still advances over empty boxes
        assert_relative_eq!(texts[0].1, 14.0 * 3.0);
    }

    #[test]
    fn short_february_is_padded_before_and_after() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = BasicDayMaker::new(layout());
        // February 2021 starts on a Monday and has exactly four weeks
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::February, 2021), &[]);

        let texts = texts(&drawing);
        assert_eq!(texts.len(), 42);
        assert_eq!(texts[0].0, "25");
        assert_eq!(texts[6].0, "31");
        assert_eq!(texts[7].0, "1");
        assert_relative_eq!(texts[7].2, 9.0 * 3.0);
        assert_eq!(texts[35].0, "1");
    }

    #[test]
    fn framed_cell_with_holiday_caption() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = BasicDayMaker::new(DayLayout {
            frame: Some(FrameStyle {
                color: None,
                fill: "#fff".to_owned(),
            }),
            fill_empty_day_boxes: false,
            ..layout()
        });
        let birthday = OtherHoliday::new(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(), "Birthday");
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::February, 2024), &[birthday]);

        let root = drawing.root();
        assert_eq!(drawing.descendants_with_tag(root, "rect").len(), 29);

        let cell: Vec<NodeId> = drawing
            .children(root)
            .filter(|&id| {
                let element = drawing.element(id);
                element.tag == "text" && element.text.is_none()
            })
            .collect();
        assert_eq!(cell.len(), 1);

        let lines: Vec<&crate::svg::Element> = drawing
            .children(cell[0])
            .map(|id| drawing.element(id))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text.as_deref(), Some("14"));
        assert_eq!(lines[1].text.as_deref(), Some("Birthday"));
        assert_relative_eq!(
            lines[1].number("y").unwrap(),
            lines[0].number("y").unwrap() + 1.5 + 2.0
        );

        // the frame precedes the text and borrows the style's fill
        let children: Vec<NodeId> = drawing.children(root).collect();
        let idx = children.iter().position(|&id| id == cell[0]).unwrap();
        let frame = drawing.element(children[idx - 1]);
        assert_eq!(frame.tag, "rect");
        assert_eq!(frame.attribute("style"), Some("fill:#fff;stroke:#123;stroke-width:1"));
        assert_relative_eq!(frame.number("width").unwrap(), 12.0);
        assert_relative_eq!(frame.number("height").unwrap(), 7.0);
        // Wednesday of the third week
        assert_relative_eq!(frame.number("x").unwrap(), 14.0 * 2.0 + 1.0 - 7.0);
        assert_relative_eq!(frame.number("y").unwrap(), 9.0 * 4.0 + 1.0 - 6.75);
    }

    #[test]
    fn explicit_frame_color() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = BasicDayMaker::new(DayLayout {
            frame: Some(FrameStyle {
                color: Some("#333".to_owned()),
                fill: "none".to_owned(),
            }),
            ..layout()
        });
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::March, 2024), &[]);

        let rects = drawing.descendants_with_tag(drawing.root(), "rect");
        assert_eq!(rects.len(), 31);
        assert_eq!(
            drawing.element(rects[0]).attribute("style"),
            Some("fill:none;stroke:#333;stroke-width:1")
        );
    }

    #[test]
    fn descriptionless_holidays_add_no_lines() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = BasicDayMaker::new(layout());
        let holiday = OtherHoliday::new(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(), "");
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::February, 2024), &[holiday]);

        assert!(drawing.descendants_with_tag(drawing.root(), "tspan").is_empty());
    }

    #[test]
    fn list_rows_follow_days_not_weeks() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = ListDayMaker::new(DayLayout {
            fill_empty_day_boxes: false,
            ..layout()
        });
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::February, 2024), &[]);

        assert_eq!(maker.state().week_y, 29);

        let texts = texts(&drawing);
        assert_eq!(texts.len(), 29);
        for (row, (label, x, y)) in texts.iter().enumerate().skip(1) {
            assert_eq!(label, &(row + 1).to_string());
            assert_relative_eq!(*x, 0.0);
            assert_relative_eq!(*y, 9.0 * (row + 2) as f64);
        }
    }

    #[test]
    fn list_fillers_share_the_rows_of_their_neighbours() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = ListDayMaker::new(layout());
        run_month(&mut maker, &mut drawing, MonthIndex::new(Month::February, 2024), &[]);

        assert_eq!(maker.state().week_y, 29);

        let texts = texts(&drawing);
        assert_eq!(texts.len(), 42);

        // January fillers and the 1st share the first row
        for (column, label) in ["29", "30", "31", "1"].iter().enumerate() {
            assert_eq!(texts[column].0, *label);
            assert_relative_eq!(texts[column].1, 14.0 * column as f64);
            assert_relative_eq!(texts[column].2, 9.0 * 2.0);
        }
        assert_eq!(texts[4].0, "2");
        assert_relative_eq!(texts[4].1, 0.0);
        assert_relative_eq!(texts[4].2, 9.0 * 3.0);

        // March fillers run along the row after the 29th
        let trailing = &texts[32..];
        for (offset, (label, x, y)) in trailing.iter().enumerate() {
            assert_eq!(label, &(offset + 1).to_string());
            assert_relative_eq!(*x, 14.0 * offset as f64);
            assert_relative_eq!(*y, 9.0 * 31.0);
        }
        assert_eq!(trailing.last().unwrap().0, "10");
        assert_relative_eq!(trailing.last().unwrap().1, 126.0);
    }

    #[test]
    fn cursor_advances_without_a_started_month() {
        let mut drawing = Drawing::new("g", &[]);
        let mut maker = BasicDayMaker::new(layout());
        let week = [1, 2, 3, 4, 5, 6, 7];

        maker.make(&mut drawing, 1, &week, 1, &style(), &[]);
        maker.make(&mut drawing, 1, &week, 2, &style(), &[]);

        assert_eq!(maker.state().week_x, 2);
        assert_eq!(drawing.children(drawing.root()).count(), 0);
    }

    #[test]
    fn factory_picks_variant() {
        use crate::config::Config;
        use crate::geometry::PageSize;

        let config = Config {
            list_calendar: true,
            ..Config::default()
        };
        let options = Options::from_config(&config).unwrap();
        let geometry = Geometry::calculate(&PageSize::new(1000.0, 700.0), &options);
        let styles = StyleTable::build(&options, &geometry);
        let mut maker = new_day_maker(&options, DayLayout::new(&options, &geometry, &styles));

        let mut drawing = Drawing::new("g", &[]);
        let mut grid = MonthGrid::new(MonthIndex::new(Month::May, 2024), Weekday::Mon);
        maker.on_before_month(drawing.root(), &mut grid);
        maker.on_new_week(&grid.weeks()[0]);
        assert_eq!(maker.state().week_y, 0);
        maker.make(&mut drawing, 5, &grid.weeks()[0], 1, &styles.day, &[]);
        assert_eq!(maker.state().week_y, 1);
    }

    proptest! {
        #[test]
        fn leading_fillers_end_the_previous_month(year in 1i32..=9999, number in 1u32..=12) {
            let month = MonthIndex::from_number(number, year).unwrap();
            let mut drawing = Drawing::new("g", &[]);
            let mut maker = BasicDayMaker::new(layout());
            run_month(&mut maker, &mut drawing, month, &[]);

            let labels: Vec<u32> = texts(&drawing)
                .iter()
                .map(|(label, _, _)| label.parse().unwrap())
                .collect();
            let first = labels.iter().position(|&day| day == 1).unwrap();

            let prev_days = month.prev().days();
            let expected: Vec<u32> = (prev_days + 1 - first as u32..=prev_days).collect();
            prop_assert_eq!(&labels[..first], expected.as_slice());

            let mut grid = MonthGrid::new(month, Weekday::Mon);
            grid.pad_to_six_weeks();
            prop_assert_eq!(first, grid.leading_fillers());
        }
    }
}
