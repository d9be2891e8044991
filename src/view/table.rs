use crate::format::{normalize_description, tabular_form};
use crate::schedule::model::Event;
use crate::seats::SeatGrid;
use itertools::Itertools;
use voca_rs::escape::escape_html;

const HEADERS: [&str; 3] = ["Date", "Description", "Seats"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub event: usize,
    pub date: String,
    pub description: String,
    pub seats: SeatGrid,
}

/// Every event, one row each, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    rows: Vec<TableRow>,
}

impl TableView {
    /// Orders by start date. The sort is stable so same-day events keep their payload order,
    /// and events whose start doesn't parse go last.
    pub fn project(events: &[Event]) -> Self {
        let rows = events
            .iter()
            .enumerate()
            .sorted_by_key(|(_, event)| {
                let date = event.start_date();
                (date.is_none(), date)
            })
            .map(|(index, event)| TableRow {
                event: index,
                date: tabular_form(&event.start),
                description: normalize_description(&event.description, &event.start),
                seats: SeatGrid::new(&event.seats_available),
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&TableRow> {
        self.rows.get(row)
    }

    pub fn to_html(&self) -> String {
        let header = HEADERS
            .iter()
            .map(|header| format!("<th>{}</th>", header))
            .join("");

        let body = self
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| {
                format!(
                    r#"<tr data-row="{}" data-event="{}"><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                    position,
                    row.event,
                    row.date,
                    escape_html(&row.description),
                    row.seats.to_html()
                )
            })
            .join("");

        format!(
            r#"<table class="events-table"><thead><tr>{}</tr></thead><tbody id="events-table-body">{}</tbody></table>"#,
            header, body
        )
    }
}
