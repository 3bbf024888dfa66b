extern crate svgcal as lib;

use flexi_logger::{Duplicate, FileSpec, Logger};
use lib::calendar::draw_onto;
use lib::config::{load_suitable_config, Config};
use lib::encoding::TextEncoding;
use lib::holidays::HolidayRegion;
use lib::options::{Options, StartDay, WeekendDefinition};
use lib::svg::SvgDocument;
use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use structopt::StructOpt;

/// Inkscape passes booleans as `true`/`false`.
fn parse_inkbool(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("'{}' is not a boolean", other)),
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "svgcal",
    about = "Draws a printable calendar onto an SVG document."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(long, help = "year to draw, 0 for the current year")]
    pub year: Option<i32>,

    #[structopt(long, help = "month to draw, 0 for the whole year")]
    pub month: Option<u32>,

    #[structopt(
        long,
        parse(try_from_str = parse_inkbool),
        help = "fill empty day boxes with the days of adjacent months"
    )]
    pub fill_empty_day_boxes: Option<bool>,

    #[structopt(long, help = "first day of the week: sun or mon")]
    pub start_day: Option<StartDay>,

    #[structopt(long, help = "weekend days: sat+sun, sat or sun")]
    pub weekend: Option<WeekendDefinition>,

    #[structopt(
        long,
        parse(try_from_str = parse_inkbool),
        help = "size the months to fit the page"
    )]
    pub auto_organize: Option<bool>,

    #[structopt(long)]
    pub months_per_line: Option<u32>,

    #[structopt(long, help = "month width, e.g. 6cm")]
    pub month_width: Option<String>,

    #[structopt(long, help = "space between months, e.g. 1cm")]
    pub month_margin: Option<String>,

    #[structopt(long)]
    pub color_year: Option<String>,
    #[structopt(long)]
    pub color_month: Option<String>,
    #[structopt(long)]
    pub color_day_name: Option<String>,
    #[structopt(long)]
    pub color_day: Option<String>,
    #[structopt(long)]
    pub color_weekend: Option<String>,
    #[structopt(long)]
    pub color_nmd: Option<String>,
    #[structopt(long)]
    pub color_other_holiday: Option<String>,

    #[structopt(long)]
    pub font_month: Option<String>,
    #[structopt(long)]
    pub font_day: Option<String>,

    #[structopt(long, parse(from_os_str), help = "twelve month names separated by spaces")]
    pub month_names: Option<OsString>,

    #[structopt(
        long,
        parse(from_os_str),
        help = "seven day names separated by spaces, starting on Sunday"
    )]
    pub day_names: Option<OsString>,

    #[structopt(long, help = "encoding of the names: utf-8, latin-1 or ascii")]
    pub encoding: Option<TextEncoding>,

    #[structopt(long, parse(try_from_str = parse_inkbool), help = "draw a frame around every day")]
    pub frame: Option<bool>,

    #[structopt(long)]
    pub frame_color: Option<String>,

    #[structopt(long)]
    pub frame_fill: Option<String>,

    #[structopt(
        long,
        parse(from_os_str),
        help = "extra holidays as 'date [description]' separated by ';'"
    )]
    pub other_holidays: Option<OsString>,

    #[structopt(long, help = "public holidays: pl or none")]
    pub holidays: Option<HolidayRegion>,

    #[structopt(long, parse(try_from_str = parse_inkbool), help = "one row per day")]
    pub list_calendar: Option<bool>,

    #[structopt(long, help = "width of the blank page drawn without INPUT")]
    pub page_width: Option<String>,

    #[structopt(long, help = "height of the blank page drawn without INPUT")]
    pub page_height: Option<String>,

    #[structopt(long, hidden = true)]
    pub tab: Option<String>,

    #[structopt(long = "id", hidden = true, number_of_values = 1)]
    pub selected: Vec<String>,

    #[structopt(name = "INPUT", parse(from_os_str), help = "SVG document to draw onto")]
    pub input: Option<PathBuf>,
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl Args {
    /// Overrides the config values given on the command line.
    fn apply(&self, config: &mut Config) {
        set(&mut config.year, &self.year);
        set(&mut config.month, &self.month);
        set(&mut config.fill_empty_day_boxes, &self.fill_empty_day_boxes);
        set(&mut config.start_day, &self.start_day);
        set(&mut config.weekend, &self.weekend);
        set(&mut config.auto_organize, &self.auto_organize);
        set(&mut config.months_per_line, &self.months_per_line);
        set(&mut config.month_width, &self.month_width);
        set(&mut config.month_margin, &self.month_margin);

        let colors = &mut config.colors;
        set(&mut colors.year, &self.color_year);
        set(&mut colors.month, &self.color_month);
        set(&mut colors.day_name, &self.color_day_name);
        set(&mut colors.day, &self.color_day);
        set(&mut colors.weekend, &self.color_weekend);
        set(&mut colors.nmd, &self.color_nmd);
        set(&mut colors.other_holiday, &self.color_other_holiday);

        set(&mut config.font_month, &self.font_month);
        set(&mut config.font_day, &self.font_day);
        set(&mut config.encoding, &self.encoding);

        let encoding = config.encoding;
        if let Some(names) = &self.month_names {
            config.month_names = encoding.decode_os_label(names);
        }
        if let Some(names) = &self.day_names {
            config.day_names = encoding.decode_os_label(names);
        }
        if let Some(holidays) = &self.other_holidays {
            config.other_holidays = encoding.decode_os_label(holidays);
        }

        set(&mut config.frame.enabled, &self.frame);
        if self.frame_color.as_deref().map_or(false, |c| !c.is_empty()) {
            config.frame.color = self.frame_color.clone();
        }
        set(&mut config.frame.fill, &self.frame_fill);

        set(&mut config.holidays, &self.holidays);
        set(&mut config.list_calendar, &self.list_calendar);
        set(&mut config.page_width, &self.page_width);
        set(&mut config.page_height, &self.page_height);
    }
}

fn run(args: &Args) -> lib::error::Result<()> {
    let mut config = load_suitable_config(args.configfile.as_deref())?;
    args.apply(&mut config);

    let options = Options::from_config(&config)?;
    let document = match &args.input {
        Some(path) => SvgDocument::from_file(path)?,
        None => SvgDocument::blank(&config.page_width, &config.page_height)?,
    };

    let stdout = io::stdout();
    let mut out = draw_onto(&document, options, BufWriter::new(stdout.lock()))?;
    out.flush()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .duplicate_to_stderr(Duplicate::Warn)
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        eprintln!("svgcal ran into a fatal error!");
        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
