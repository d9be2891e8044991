use crate::format;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use strum::IntoEnumIterator;

pub const ALL_AVAILABLE_COLOR: &str = "#28a745";
pub const SOME_AVAILABLE_COLOR: &str = "#ffa500";
pub const NONE_AVAILABLE_COLOR: &str = "#dc3545";

/// The fetched schedule, shared read-only by both views and the modal.
pub type EventList = Arc<[Event]>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub start: String,
    pub description: String,
    pub seats_available: SeatsAvailable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Event {
    pub fn new(
        title: String,
        start: String,
        description: String,
        seats_available: SeatsAvailable,
    ) -> Self {
        Self {
            title,
            start,
            description,
            seats_available,
            background_color: None,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        format::parse_date(&self.start)
    }

    /// Colour given to the grid library: the payload's own, or derived from seat availability.
    pub fn cell_color(&self) -> &str {
        self.background_color
            .as_deref()
            .unwrap_or_else(|| self.seats_available.availability().color())
    }
}

/// Availability of the fixed seat set. Seats the payload doesn't mention are unavailable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatsAvailable {
    pub s103a6: bool,
    pub s103b5: bool,
    pub s103b6: bool,
    pub s103b7: bool,
}

impl SeatsAvailable {
    pub fn all() -> Self {
        Self {
            s103a6: true,
            s103b5: true,
            s103b6: true,
            s103b7: true,
        }
    }

    pub fn is_available(&self, seat: Seat) -> bool {
        match seat {
            Seat::S103A6 => self.s103a6,
            Seat::S103B5 => self.s103b5,
            Seat::S103B6 => self.s103b6,
            Seat::S103B7 => self.s103b7,
        }
    }

    pub fn set(&mut self, seat: Seat, available: bool) {
        match seat {
            Seat::S103A6 => self.s103a6 = available,
            Seat::S103B5 => self.s103b5 = available,
            Seat::S103B6 => self.s103b6 = available,
            Seat::S103B7 => self.s103b7 = available,
        }
    }

    pub fn available_count(&self) -> usize {
        Seat::iter().filter(|seat| self.is_available(*seat)).count()
    }

    pub fn availability(&self) -> Availability {
        match self.available_count() {
            0 => Availability::None,
            n if n == Seat::iter().len() => Availability::All,
            _ => Availability::Some,
        }
    }
}

/// Seats tracked for every game. Displayed as their section label, keyed in JSON by `key()`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr, strum::Display,
)]
pub enum Seat {
    #[strum(serialize = "103A-6")]
    S103A6,
    #[strum(serialize = "103B-5")]
    S103B5,
    #[strum(serialize = "103B-6")]
    S103B6,
    #[strum(serialize = "103B-7")]
    S103B7,
}

impl Seat {
    pub fn key(&self) -> &'static str {
        match self {
            Seat::S103A6 => "s103a6",
            Seat::S103B5 => "s103b5",
            Seat::S103B6 => "s103b6",
            Seat::S103B7 => "s103b7",
        }
    }

    pub fn from_key(key: &str) -> Option<Seat> {
        Seat::iter().find(|seat| seat.key() == key)
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    All,
    Some,
    None,
}

impl Availability {
    pub fn color(&self) -> &'static str {
        match self {
            Availability::All => ALL_AVAILABLE_COLOR,
            Availability::Some => SOME_AVAILABLE_COLOR,
            Availability::None => NONE_AVAILABLE_COLOR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Schedule {
    pub events: Vec<Event>,
}
