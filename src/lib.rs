//! Spring training calendar component.
//!
//! One fetched list of [`schedule::model::Event`]s is projected into a month grid and a
//! chronological table, and either view opens a detail modal with a seat-availability grid.
//! The [`component::SpringTrainingCalendar`] drives the whole chain: scripts, settle delay,
//! fetch, render, then user interaction.

pub mod component;
pub mod config;
pub mod format;
pub mod loader;
pub mod logging;
pub mod modal;
pub mod schedule;
pub mod seats;
pub mod view;
