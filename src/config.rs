use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::encoding::TextEncoding;
use crate::error::*;
use crate::holidays::HolidayRegion;
use crate::options::{StartDay, WeekendDefinition, DEFAULT_DAY_NAMES, DEFAULT_MONTH_NAMES};

const CONFIG_PATH_ENV_VAR: &str = "SVGCAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("svgcal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".svgcal.toml"));
    }

    locations
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Colors {
    pub year: String,
    pub month: String,
    pub day_name: String,
    pub day: String,
    pub weekend: String,
    pub nmd: String,
    pub other_holiday: String,
}

impl Default for Colors {
    fn default() -> Self {
        Colors {
            year: "#888".to_owned(),
            month: "#666".to_owned(),
            day_name: "#999".to_owned(),
            day: "#000".to_owned(),
            weekend: "#777".to_owned(),
            nmd: "#BBB".to_owned(),
            other_holiday: "#FF6060".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub enabled: bool,
    pub color: Option<String>,
    pub fill: String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig {
            enabled: false,
            color: None,
            fill: "none".to_owned(),
        }
    }
}

/// Settings of a calendar run as read from the config file; the command
/// line overrides single values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub year: i32,
    pub month: u32,
    pub fill_empty_day_boxes: bool,
    pub start_day: StartDay,
    pub weekend: WeekendDefinition,
    pub auto_organize: bool,
    pub months_per_line: u32,
    pub month_width: String,
    pub month_margin: String,
    pub colors: Colors,
    pub font_month: String,
    pub font_day: String,
    pub month_names: String,
    pub day_names: String,
    pub encoding: TextEncoding,
    pub frame: FrameConfig,
    pub other_holidays: String,
    pub holidays: HolidayRegion,
    pub list_calendar: bool,
    pub page_width: String,
    pub page_height: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            year: 0,
            month: 0,
            fill_empty_day_boxes: true,
            start_day: StartDay::default(),
            weekend: WeekendDefinition::default(),
            auto_organize: true,
            months_per_line: 3,
            month_width: "6cm".to_owned(),
            month_margin: "1cm".to_owned(),
            colors: Colors::default(),
            font_month: "Arial Black".to_owned(),
            font_day: "Arial".to_owned(),
            month_names: DEFAULT_MONTH_NAMES.join(" "),
            day_names: DEFAULT_DAY_NAMES.join(" "),
            encoding: TextEncoding::default(),
            frame: FrameConfig::default(),
            other_holidays: String::new(),
            holidays: HolidayRegion::default(),
            list_calendar: false,
            page_width: "210mm".to_owned(),
            page_height: "297mm".to_owned(),
        }
    }
}

impl Config {
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::ConfigParse,
                &format!("{}: {}", path.display(), e),
            )
        })?;

        Self::from_str(&content).map_err(|e| {
            let msg = format!(
                "{}: {}",
                path.display(),
                e.message.as_deref().unwrap_or_default()
            );
            e.with_msg(&msg)
        })
    }
}

/// Loads `path` if given, else the first existing file of the search path,
/// else the defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    for location in find_configfile_locations() {
        if location.is_file() {
            log::info!("Using config file {}", location.display());
            return Config::from_file(&location);
        }
    }

    log::debug!("No config file found, using defaults");
    Ok(Config::default())
}
