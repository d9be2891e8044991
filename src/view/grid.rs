use crate::config::model::SeasonConfig;
use crate::schedule::model::Event;
use chrono::{Days, NaiveDate};
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, warn};
use voca_rs::escape::escape_html;

const INITIAL_VIEW: &str = "dayGridMonth";
const EVENT_DISPLAY: &str = "block";

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid library is not available: {0}")]
    Unavailable(String),
    #[error("grid library failed to lay out events: {0}")]
    Layout(String),
}

/// Configuration object handed to the calendar library, in the library's own field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub initial_view: &'static str,
    pub header_toolbar: HeaderToolbar,
    pub valid_range: ValidRange,
    pub initial_date: NaiveDate,
    pub fixed_week_count: bool,
    pub show_non_current_dates: bool,
    pub event_display: &'static str,
    pub day_max_events: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderToolbar {
    pub left: &'static str,
    pub center: &'static str,
    pub right: &'static str,
}

/// The library treats `end` as exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl GridOptions {
    pub fn for_season(season: &SeasonConfig) -> Self {
        Self {
            initial_view: INITIAL_VIEW,
            header_toolbar: HeaderToolbar {
                left: "prev,next",
                center: "title",
                right: "",
            },
            valid_range: ValidRange {
                start: season.start,
                end: season.end + Days::new(1),
            },
            initial_date: season.initial_date,
            fixed_week_count: false,
            show_non_current_dates: false,
            event_display: EVENT_DISPLAY,
            day_max_events: season.day_max_events,
        }
    }

    pub fn is_visible(&self, date: NaiveDate) -> bool {
        self.valid_range.start <= date && date < self.valid_range.end
    }
}

/// One day of the month grid as laid out by the library. Indices point into the event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub visible: Vec<usize>,
    /// Behind the "+N more" link.
    pub hidden: Vec<usize>,
}

/// The month-grid library. It decides which events land in which day cell.
pub trait CalendarLibrary: Send + Sync {
    fn layout(&self, options: &GridOptions, events: &[Event]) -> Result<Vec<DayCell>, GridError>;
}

/// Minimal day-grid layout: events within the valid range, grouped by day in list order,
/// at most `day_max_events` shown per cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct DayGridMonth;

impl CalendarLibrary for DayGridMonth {
    fn layout(&self, options: &GridOptions, events: &[Event]) -> Result<Vec<DayCell>, GridError> {
        let cap = options.day_max_events.max(1) as usize;

        let placed = events.iter().enumerate().filter_map(|(index, event)| {
            let Some(date) = event.start_date() else {
                warn!(
                    "Not placing '{}' on the grid, invalid start '{}'",
                    event.title, event.start
                );
                return None;
            };

            if !options.is_visible(date) {
                debug!("'{}' on {} is outside the visible range", event.title, date);
                return None;
            }

            Some((date, index))
        });

        let cells = placed
            .sorted_by_key(|(date, _)| *date)
            .chunk_by(|(date, _)| *date)
            .into_iter()
            .map(|(date, day)| {
                let mut visible: Vec<usize> = day.map(|(_, index)| index).collect();
                let hidden = visible.split_off(cap.min(visible.len()));

                DayCell {
                    date,
                    visible,
                    hidden,
                }
            })
            .collect();

        Ok(cells)
    }
}

/// Cell content for an event: its title in bold, never the description.
pub fn event_content(event: &Event) -> String {
    format!(
        r#"<div style="font-weight: bold;">{}</div>"#,
        escape_html(&event.title)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEvent {
    pub event: usize,
    pub content: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub events: Vec<GridEvent>,
    pub more: Vec<GridEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    options: GridOptions,
    days: Vec<GridDay>,
}

impl GridView {
    pub fn mount(
        options: GridOptions,
        events: &[Event],
        library: &dyn CalendarLibrary,
    ) -> Result<Self, GridError> {
        let mount_event = |index: usize| -> Result<GridEvent, GridError> {
            let event = events.get(index).ok_or_else(|| {
                GridError::Layout(format!("library placed unknown event #{}", index))
            })?;

            Ok(GridEvent {
                event: index,
                content: event_content(event),
                color: event.cell_color().to_string(),
            })
        };

        let days = library
            .layout(&options, events)?
            .into_iter()
            .map(|cell| -> Result<GridDay, GridError> {
                Ok(GridDay {
                    date: cell.date,
                    events: cell.visible.into_iter().map(mount_event).collect::<Result<_, _>>()?,
                    more: cell.hidden.into_iter().map(mount_event).collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<Vec<GridDay>, GridError>>()?;

        Ok(Self { options, days })
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn days(&self) -> &[GridDay] {
        &self.days
    }

    /// Whether `event` was mounted, in a cell or behind its "+N more" link.
    pub fn is_mounted(&self, event: usize) -> bool {
        self.mounted().any(|mounted| mounted.event == event)
    }

    pub fn mounted(&self) -> impl Iterator<Item = &GridEvent> {
        self.days
            .iter()
            .flat_map(|day| day.events.iter().chain(day.more.iter()))
    }

    pub fn to_html(&self) -> String {
        let options = serde_json::to_string(&self.options).unwrap_or_default();

        let days = self
            .days
            .iter()
            .map(|day| {
                let events = day
                    .events
                    .iter()
                    .map(|mounted| {
                        format!(
                            r#"<a class="fc-event" data-event="{}" style="background-color: {};">{}</a>"#,
                            mounted.event,
                            escape_html(&mounted.color),
                            mounted.content
                        )
                    })
                    .join("");
                let more = if day.more.is_empty() {
                    String::new()
                } else {
                    format!(
                        r#"<a class="fc-more-link" data-events="{}">+{} more</a>"#,
                        day.more.iter().map(|mounted| mounted.event).join(","),
                        day.more.len()
                    )
                };

                format!(
                    r#"<div class="fc-daygrid-day" data-date="{}">{}{}</div>"#,
                    day.date, events, more
                )
            })
            .join("");

        format!(
            r#"<div id="calendar" data-options="{}">{}</div>"#,
            escape_html(&options),
            days
        )
    }
}
