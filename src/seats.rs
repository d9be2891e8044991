use crate::schedule::model::{Seat, SeatsAvailable, ALL_AVAILABLE_COLOR, NONE_AVAILABLE_COLOR};
use itertools::Itertools;

/// Marker layout: a single seat in 103A above three in 103B.
pub const SEAT_ROWS: [&[Seat]; 2] = [
    &[Seat::S103A6],
    &[Seat::S103B5, Seat::S103B6, Seat::S103B7],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatMarker {
    pub seat: Seat,
    pub available: bool,
}

impl SeatMarker {
    pub fn color(&self) -> &'static str {
        if self.available {
            ALL_AVAILABLE_COLOR
        } else {
            NONE_AVAILABLE_COLOR
        }
    }

    fn to_html(self) -> String {
        let label = self.seat.label();
        let status = if self.available { "available" } else { "unavailable" };

        format!(
            r#"<div class="seat-box" data-seat="{label}" title="{label}: {status}" aria-label="Seat {label} {status}" role="img" tabindex="0"><svg viewBox="0 0 24 24"><rect width="24" height="24" fill="{color}" rx="4"/></svg></div>"#,
            color = self.color()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    rows: Vec<Vec<SeatMarker>>,
}

impl SeatGrid {
    pub fn new(seats: &SeatsAvailable) -> Self {
        let rows = SEAT_ROWS
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&seat| SeatMarker {
                        seat,
                        available: seats.is_available(seat),
                    })
                    .collect()
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<SeatMarker>] {
        &self.rows
    }

    /// Markers in reading order.
    pub fn markers(&self) -> impl Iterator<Item = &SeatMarker> {
        self.rows.iter().flatten()
    }

    pub fn to_html(&self) -> String {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                format!(
                    r#"<div class="seat-row">{}</div>"#,
                    row.iter().map(|marker| marker.to_html()).join("")
                )
            })
            .join("");

        format!(r#"<div class="seat-grid">{}</div>"#, rows)
    }
}
