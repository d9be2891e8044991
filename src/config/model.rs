use crate::modal::OpenPolicy;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "http://localhost:1313";
pub const DEFAULT_DATA_PATH: &str = "/spring-training-2025.json";
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Scripts the grid needs, in load order. The day-grid plugin registers itself on the core.
pub const DEFAULT_SCRIPTS: [&str; 2] = [
    "/js/fullcalendar/core/index.global.min.js",
    "/js/fullcalendar/daygrid/index.global.min.js",
];

lazy_static! {
    static ref SEASON_START: NaiveDate =
        NaiveDate::from_ymd_opt(2025, 2, 23).expect("Invalid season start");
    static ref SEASON_END: NaiveDate =
        NaiveDate::from_ymd_opt(2025, 3, 22).expect("Invalid season end");
}

#[derive(Debug, Clone)]
pub struct Config {
    pub origin: Url,
    pub data_path: String,
    pub dependency_scripts: Vec<String>,
    pub settle_delay: Duration,
    pub season: SeasonConfig,
    pub modal_policy: OpenPolicy,
}

impl Config {
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            data_path: DEFAULT_DATA_PATH.to_string(),
            dependency_scripts: DEFAULT_SCRIPTS.iter().map(|s| s.to_string()).collect(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            season: SeasonConfig::default(),
            modal_policy: OpenPolicy::default(),
        }
    }

    pub fn data_url(&self) -> Result<Url, url::ParseError> {
        self.origin.join(&self.data_path)
    }
}

/// Visible range of the grid. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub initial_date: NaiveDate,
    pub day_max_events: u32,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            start: *SEASON_START,
            end: *SEASON_END,
            initial_date: *SEASON_START,
            day_max_events: 1,
        }
    }
}
