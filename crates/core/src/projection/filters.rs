//! Presentation post-filters over the projected feed.
//!
//! The observed widget behavior narrows technical entries to the current
//! day and political entries to the current ISO week. That narrowing is a
//! presentation decision layered on top of the generic 7-day projection,
//! so it lives here as optional caller-side filters rather than inside the
//! engine.

use chrono::{Datelike, NaiveDate};
use rotaboard_domain::{Occurrence, RotaType};

/// Technical occurrences falling exactly on `date`.
pub fn technical_for_day(occurrences: &[Occurrence], date: NaiveDate) -> Vec<Occurrence> {
    occurrences
        .iter()
        .filter(|occurrence| {
            occurrence.rota_type == RotaType::Technical && occurrence.date == date
        })
        .cloned()
        .collect()
}

/// Political occurrences in the same ISO week as `date`.
///
/// Comparison uses the ISO week-year, so windows spanning a year boundary
/// group correctly (e.g. 2024-12-30 and 2025-01-03 share ISO week 2025-W01).
pub fn political_for_iso_week(occurrences: &[Occurrence], date: NaiveDate) -> Vec<Occurrence> {
    let week = date.iso_week();
    occurrences
        .iter()
        .filter(|occurrence| {
            occurrence.rota_type == RotaType::Political && occurrence.date.iso_week() == week
        })
        .cloned()
        .collect()
}
