//! Converts a plain games listing into the schedule payload.
//!
//! One game per line, e.g. `Rays at Giants Sun, Feb 23, 2025 01:05PM MST`.

use super::model::{Event, Schedule, SeatsAvailable, ALL_AVAILABLE_COLOR};
use chrono::{Datelike, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const HOME_TEAM: &str = "Giants";

const LISTING_DATE_FORMAT: &str = "%a, %b %d, %Y %I:%M%p MST";

#[derive(Debug, thiserror::Error)]
pub enum GamesParseError {
    #[error("line {line}: expected '<opponent> at <home team> <date>', got '{content}'")]
    MissingHomeTeam { line: usize, content: String },
    #[error("line {line}: invalid date '{date}': {source}")]
    InvalidDate {
        line: usize,
        date: String,
        source: chrono::ParseError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("couldn't read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] GamesParseError),
    #[error("couldn't serialize schedule: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("couldn't write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads a games listing from `input` and writes the payload JSON to `output`.
/// Returns how many games were written.
#[tracing::instrument]
pub fn convert_listing(input: &Path, output: &Path) -> Result<usize, ConvertError> {
    let listing = fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let schedule = parse_games(&listing)?;
    let json = serde_json::to_string_pretty(&schedule)?;

    fs::write(output, json).map_err(|source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    info!("Wrote {} games", schedule.events.len());

    Ok(schedule.events.len())
}

pub fn parse_games(listing: &str) -> Result<Schedule, GamesParseError> {
    let separator = format!(" at {} ", HOME_TEAM);
    let mut events = Vec::new();

    for (number, line) in listing.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (opponent, date) = line.split_once(&separator).ok_or_else(|| {
            GamesParseError::MissingHomeTeam {
                line: number + 1,
                content: line.to_string(),
            }
        })?;

        let played_at = NaiveDateTime::parse_from_str(date, LISTING_DATE_FORMAT).map_err(
            |source| GamesParseError::InvalidDate {
                line: number + 1,
                date: date.to_string(),
                source,
            },
        )?;

        debug!("Parsed game against {} on {}", opponent, played_at);

        let mut event = Event::new(
            opponent.to_string(),
            played_at.format("%Y-%m-%d").to_string(),
            describe_game(opponent, &played_at),
            SeatsAvailable::all(),
        );
        event.background_color = Some(ALL_AVAILABLE_COLOR.to_string());

        events.push(event);
    }

    Ok(Schedule { events })
}

fn describe_game(opponent: &str, played_at: &NaiveDateTime) -> String {
    format!(
        "{} versus {} at {} on {} {}, {}",
        HOME_TEAM,
        opponent,
        played_at.format("%I:%M%p"),
        played_at.format("%A, %B"),
        ordinal(played_at.day()),
        played_at.year()
    )
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 10..=20) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };

    format!("{}{}", n, suffix)
}
