use crate::options::Options;

/// Page size in user units. `user_units_per_px` is the scale introduced by a
/// `viewBox` that differs from the page's physical size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
    pub user_units_per_px: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        PageSize {
            width,
            height,
            user_units_per_px: 1.0,
        }
    }
}

/// Sizes and positions of the calendar in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub doc_w: f64,
    pub doc_h: f64,
    pub months_per_line: u32,
    pub month_w: f64,
    pub month_margin: f64,
    pub day_w: f64,
    pub day_h: f64,
    pub month_h: f64,
    pub year_margin: f64,
}

impl Geometry {
    pub fn calculate(page: &PageSize, options: &Options) -> Self {
        let doc_w = page.width;
        let doc_h = page.height;
        let months_per_line = if options.auto_organize {
            if doc_h > doc_w {
                3
            } else {
                4
            }
        } else {
            options.months_per_line
        };

        let (month_w, month_margin) = if options.auto_organize {
            let month_w = (doc_w * 0.8) / months_per_line as f64;
            (month_w, month_w / 10.0)
        } else {
            (
                options.month_width * page.user_units_per_px,
                options.month_margin * page.user_units_per_px,
            )
        };

        let day_w = month_w / 7.0;
        let day_h = month_w / 9.0;
        let month_h = day_w * 7.0;

        let year_margin = if options.month.is_none() {
            let n = months_per_line as f64;
            (doc_w + day_w - month_w * n - month_margin * (n - 1.0)) / 2.0
        } else {
            (doc_w - month_w) / 2.0
        };

        let geometry = Geometry {
            doc_w,
            doc_h,
            months_per_line,
            month_w,
            month_margin,
            day_w,
            day_h,
            month_h,
            year_margin,
        };
        log::debug!("Calendar geometry: {:?}", geometry);

        geometry
    }

    /// Origin of the month group at the given position of the month flow.
    pub fn month_origin(&self, month_x_pos: u32, month_y_pos: u32) -> (f64, f64) {
        (
            self.year_margin + (self.month_w + self.month_margin) * month_x_pos as f64,
            self.day_h * 4.0 + self.month_h * month_y_pos as f64,
        )
    }
}
