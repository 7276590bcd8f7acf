//! Fixed French-locale calendar tables.
//!
//! Rota records name their month with the full lowercase French month name
//! and are matched against dates by exact string equality, so every piece of
//! code that derives a month name from a date must go through this module.
//! Keeping the tables in one place is what contains the locale-mismatch risk
//! inherited from the source data model.

use chrono::{Datelike, NaiveDate};

/// Full lowercase French month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Abbreviated French weekday names, Monday first.
pub const WEEKDAY_ABBREVS: [&str; 7] = ["lun", "mar", "mer", "jeu", "ven", "sam", "dim"];

/// Full lowercase French month name for a date.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// 1-based month number for a French month name, if known.
///
/// Used at data entry to reject month strings that projection could never
/// match.
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES.iter().position(|candidate| *candidate == name).map(|index| index as u32 + 1)
}

/// Abbreviated French weekday name for a date.
pub fn weekday_abbrev(date: NaiveDate) -> &'static str {
    WEEKDAY_ABBREVS[date.weekday().num_days_from_monday() as usize]
}

/// First three characters of the month name.
///
/// Character-based, not byte-based: "août" and "décembre" carry multi-byte
/// characters inside the prefix.
pub fn month_abbrev(date: NaiveDate) -> String {
    month_name(date).chars().take(3).collect()
}

/// Display label for a board entry: abbreviated weekday, day number,
/// abbreviated month (e.g. "jeu 10 jui").
pub fn display_label(date: NaiveDate) -> String {
    format!("{} {} {}", weekday_abbrev(date), date.day(), month_abbrev(date))
}
