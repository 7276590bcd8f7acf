//! Domain types and models
//!
//! Rota records are the stored staffing entries managed by the admin
//! console; occurrences are the derived display entries produced by the
//! projection engine. Records are snapshots for the duration of one
//! projection call and are never mutated by the engine.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{POLITICAL_COLOR, TECHNICAL_COLOR};
use crate::errors::{Result, RotaBoardError};
use crate::utils::french_calendar;

/// Rota entry category. Drives display color and board grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotaType {
    Technical,
    Political,
}

impl RotaType {
    /// Human-readable label for the type.
    pub fn label(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Political => "Political",
        }
    }

    /// Display color for the type. Total over the enumeration; there is no
    /// per-record customization.
    pub fn color(self) -> &'static str {
        match self {
            Self::Technical => TECHNICAL_COLOR,
            Self::Political => POLITICAL_COLOR,
        }
    }

    /// Canonical storage string (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Political => "political",
        }
    }
}

impl fmt::Display for RotaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotaType {
    type Err = RotaBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "technical" => Ok(Self::Technical),
            "political" => Ok(Self::Political),
            other => Err(RotaBoardError::UnknownRotaType(other.to_string())),
        }
    }
}

/// Per-day schedule entry inside a rota record.
///
/// Presence of the day key with `time: None` means "rostered, time
/// unspecified".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// A stored staffing entry for one person covering one calendar month,
/// with a sparse per-day schedule.
///
/// `month` is the full lowercase French month name and is matched by exact
/// string equality against the month derived from a date. Spelling, case
/// and accents must agree or projection silently skips the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotaRecord {
    pub id: String,
    pub person_name: String,
    pub rota_type: RotaType,
    pub month: String,
    pub year: i32,
    /// Day-of-month ("1".."31") to schedule slot. Absent key = not rostered.
    #[serde(default)]
    pub days: BTreeMap<String, DaySlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RotaRecord {
    /// Check every `days` key parses as a day-of-month.
    ///
    /// # Errors
    /// Returns [`RotaBoardError::MalformedDayKey`] for the first key that is
    /// not an all-digit integer in [1, 31].
    pub fn validate(&self) -> Result<()> {
        for key in self.days.keys() {
            if !is_valid_day_key(key) {
                return Err(RotaBoardError::MalformedDayKey {
                    record_id: self.id.clone(),
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Whether this record covers the month and year of `date`.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.year == date.year() && self.month == french_calendar::month_name(date)
    }

    /// Schedule slot for a day-of-month, if rostered.
    pub fn slot_for_day(&self, day: u32) -> Option<&DaySlot> {
        self.days.get(day.to_string().as_str())
    }
}

/// Payload for creating a rota record; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRotaRecord {
    pub person_name: String,
    pub rota_type: RotaType,
    pub month: String,
    pub year: i32,
    #[serde(default)]
    pub days: BTreeMap<String, DaySlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewRotaRecord {
    /// Attach a freshly assigned id, producing a storable record.
    pub fn into_record(self, id: String) -> RotaRecord {
        RotaRecord {
            id,
            person_name: self.person_name,
            rota_type: self.rota_type,
            month: self.month,
            year: self.year,
            days: self.days,
            description: self.description,
        }
    }
}

/// One concrete (person, day) display entry derived from a rota record.
///
/// Ephemeral: recomputed on every projection, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    /// `"{record_id}:{day}"` — unique even when one record yields several
    /// days.
    pub id: String,
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub person_name: String,
    pub rota_type: RotaType,
    /// Abbreviated weekday, day number, 3-character month prefix
    /// (e.g. "jeu 10 jui").
    pub display_label: String,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// A day key is valid when it is all ASCII digits and in [1, 31].
///
/// Stricter than a plain integer parse: "+5" parses as an integer but is
/// storage garbage and would never match a lookup.
pub fn is_valid_day_key(key: &str) -> bool {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    key.parse::<u32>().map(|day| (1..=31).contains(&day)).unwrap_or(false)
}
