//! Rota projection engine.
//!
//! Derives a flat, date-ordered list of display occurrences for the rolling
//! 7-day window starting at a caller-supplied reference date. The engine is
//! a pure function over its inputs: no I/O, no mutation, no ambient time
//! calls. Callers resolve "today" through the [`Clock`](super::ports::Clock)
//! port and hand the date in explicitly, which keeps projection
//! referentially transparent and trivially testable.
//!
//! Records are matched by exact (French month name, year) string equality,
//! then by day-of-month key lookup. Day/week narrowing for specific widget
//! panes is *not* done here; see [`super::filters`].

use chrono::{Datelike, Days, NaiveDate};
use rotaboard_domain::constants::PROJECTION_WINDOW_DAYS;
use rotaboard_domain::utils::french_calendar;
use rotaboard_domain::{DaySlot, Occurrence, RotaRecord};
use tracing::warn;

/// The inclusive projection window: `reference + 0 ..= reference + 6`.
pub fn projection_window(reference: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..PROJECTION_WINDOW_DAYS).filter_map(move |offset| reference.checked_add_days(Days::new(offset)))
}

/// Project rota records onto the 7-day window starting at `reference`.
///
/// Emits one [`Occurrence`] per (record, day) pair whose record matches the
/// window date's (month name, year) exactly and whose `days` mapping
/// contains the date's day-of-month key. The result is stable-sorted
/// ascending by date, so same-date occurrences keep record order.
///
/// Malformed day keys are a data-quality problem in the upstream store, not
/// a projection failure: each one is logged and skipped, and never suppresses
/// the record's well-formed days or aborts the projection.
pub fn project_window(records: &[RotaRecord], reference: NaiveDate) -> Vec<Occurrence> {
    report_malformed_day_keys(records);

    let mut occurrences = Vec::new();
    for date in projection_window(reference) {
        let month_name = french_calendar::month_name(date);
        let year = date.year();
        let day_key = date.day().to_string();

        for record in records {
            if record.year != year || record.month != month_name {
                continue;
            }
            if let Some(slot) = record.days.get(&day_key) {
                occurrences.push(build_occurrence(record, date, slot));
            }
        }
    }

    occurrences.sort_by_key(|occurrence| occurrence.date);
    occurrences
}

fn build_occurrence(record: &RotaRecord, date: NaiveDate, slot: &DaySlot) -> Occurrence {
    Occurrence {
        id: format!("{}:{}", record.id, date.day()),
        date,
        day_of_month: date.day(),
        person_name: record.person_name.clone(),
        rota_type: record.rota_type,
        display_label: french_calendar::display_label(date),
        color: record.rota_type.color(),
        time: slot.time.clone(),
    }
}

fn report_malformed_day_keys(records: &[RotaRecord]) {
    for record in records {
        if let Err(err) = record.validate() {
            warn!(record_id = %record.id, error = %err, "skipping malformed day key in rota record");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rotaboard_domain::RotaType;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn record(
        id: &str,
        name: &str,
        rota_type: RotaType,
        month: &str,
        year: i32,
        days: &[(&str, Option<&str>)],
    ) -> RotaRecord {
        RotaRecord {
            id: id.to_string(),
            person_name: name.to_string(),
            rota_type,
            month: month.to_string(),
            year,
            days: days
                .iter()
                .map(|(day, time)| {
                    (day.to_string(), DaySlot { time: time.map(str::to_string) })
                })
                .collect::<BTreeMap<_, _>>(),
            description: None,
        }
    }

    #[test]
    fn empty_records_project_to_nothing() {
        assert!(project_window(&[], date(2025, 7, 10)).is_empty());
    }

    #[test]
    fn window_is_seven_days_inclusive() {
        let dates: Vec<_> = projection_window(date(2025, 7, 10)).collect();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], date(2025, 7, 10));
        assert_eq!(dates[6], date(2025, 7, 16));
    }

    #[test]
    fn window_crosses_month_boundaries() {
        let dates: Vec<_> = projection_window(date(2025, 7, 29)).collect();
        assert_eq!(dates[0], date(2025, 7, 29));
        assert_eq!(dates[6], date(2025, 8, 4));
    }

    #[test]
    fn every_occurrence_falls_inside_the_window() {
        let reference = date(2025, 7, 28);
        let records = vec![
            record("a", "Dupont", RotaType::Technical, "juillet", 2025, &[
                ("1", None),
                ("28", None),
                ("31", None),
            ]),
            record("b", "Martin", RotaType::Political, "août", 2025, &[
                ("2", None),
                ("15", None),
            ]),
        ];

        let occurrences = project_window(&records, reference);
        let end = date(2025, 8, 3);
        assert_eq!(occurrences.len(), 3); // 28, 31 juillet + 2 août
        for occurrence in &occurrences {
            assert!(occurrence.date >= reference && occurrence.date <= end);
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let records = vec![record("a", "Dupont", RotaType::Technical, "juillet", 2025, &[
            ("10", Some("14:00")),
            ("12", None),
        ])];
        let first = project_window(&records, date(2025, 7, 10));
        let second = project_window(&records, date(2025, 7, 10));
        assert_eq!(first, second);
    }

    #[test]
    fn day_key_round_trip_carries_the_time() {
        let records =
            vec![record("a", "Dupont", RotaType::Technical, "juillet", 2025, &[(
                "15",
                Some("14:00"),
            )])];

        let occurrences = project_window(&records, date(2025, 7, 10));
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].day_of_month, 15);
        assert_eq!(occurrences[0].time.as_deref(), Some("14:00"));
        assert_eq!(occurrences[0].id, "a:15");
    }

    #[test]
    fn day_31_of_a_30_day_month_never_matches() {
        // juin has 30 days; a "31" key can never correspond to a real date.
        let records =
            vec![record("a", "Dupont", RotaType::Technical, "juin", 2025, &[("31", None)])];
        let occurrences = project_window(&records, date(2025, 6, 25));
        assert!(occurrences.is_empty());
    }

    #[test]
    fn reference_scenario_dupont_juillet() {
        // 2025-07-10 is a Thursday; the window ends 2025-07-16 inclusive,
        // so both day 10 and day 14 project.
        let records = vec![record("a", "Dupont", RotaType::Technical, "juillet", 2025, &[
            ("10", None),
            ("14", None),
        ])];

        let occurrences = project_window(&records, date(2025, 7, 10));
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].date, date(2025, 7, 10));
        assert_eq!(occurrences[0].display_label, "jeu 10 jui");
        assert_eq!(occurrences[0].color, RotaType::Technical.color());
        assert_eq!(occurrences[1].date, date(2025, 7, 14));
        assert_eq!(occurrences[1].display_label, "lun 14 jui");
    }

    #[test]
    fn same_day_records_yield_distinct_adjacent_occurrences() {
        let records = vec![
            record("a", "Dupont", RotaType::Technical, "juillet", 2025, &[("12", None)]),
            record("b", "Martin", RotaType::Technical, "juillet", 2025, &[("12", None)]),
        ];

        let occurrences = project_window(&records, date(2025, 7, 10));
        assert_eq!(occurrences.len(), 2);
        assert_ne!(occurrences[0].id, occurrences[1].id);
        assert_eq!(occurrences[0].date, occurrences[1].date);
        // Stable sort keeps record order for same-date entries.
        assert_eq!(occurrences[0].person_name, "Dupont");
        assert_eq!(occurrences[1].person_name, "Martin");
    }

    #[test]
    fn month_name_mismatch_silently_drops_the_record() {
        let records = vec![
            record("a", "Dupont", RotaType::Technical, "Juillet", 2025, &[("10", None)]),
            record("b", "Martin", RotaType::Technical, "aout", 2025, &[("1", None)]),
        ];
        assert!(project_window(&records, date(2025, 7, 10)).is_empty());
    }

    #[test]
    fn malformed_day_key_is_skipped_without_losing_valid_days() {
        let records = vec![record("a", "Dupont", RotaType::Technical, "juillet", 2025, &[
            ("10", None),
            ("notaday", None),
        ])];

        let occurrences = project_window(&records, date(2025, 7, 10));
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].day_of_month, 10);
    }

    #[test]
    fn output_is_sorted_ascending_by_date() {
        let records = vec![
            record("late", "Martin", RotaType::Political, "juillet", 2025, &[("16", None)]),
            record("early", "Dupont", RotaType::Technical, "juillet", 2025, &[("11", None)]),
        ];

        let occurrences = project_window(&records, date(2025, 7, 10));
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].date, date(2025, 7, 11));
        assert_eq!(occurrences[1].date, date(2025, 7, 16));
    }

    #[test]
    fn records_outside_the_window_contribute_nothing() {
        let records = vec![
            record("a", "Dupont", RotaType::Technical, "janvier", 2025, &[("10", None)]),
            record("b", "Martin", RotaType::Political, "juillet", 2030, &[("10", None)]),
        ];
        assert!(project_window(&records, date(2025, 7, 10)).is_empty());
    }

    #[test]
    fn year_boundary_window_matches_both_months() {
        let records = vec![
            record("dec", "Dupont", RotaType::Technical, "décembre", 2025, &[("30", None)]),
            record("jan", "Martin", RotaType::Political, "janvier", 2026, &[("2", None)]),
        ];

        let occurrences = project_window(&records, date(2025, 12, 29));
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].date, date(2025, 12, 30));
        assert_eq!(occurrences[1].date, date(2026, 1, 2));
    }
}
