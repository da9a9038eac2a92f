//! Integration tests for start-date normalization.

use chrono::NaiveDate;
use proptest::prelude::*;

use carelog_model::{ColumnSet, DateFormat, EventTable, Field, PipelineError, RawEvent};
use carelog_transform::normalize;

fn table_with_starts(starts: &[Option<&str>]) -> EventTable {
    let rows = starts
        .iter()
        .map(|start| {
            let event = RawEvent::default().with(Field::Type, "Diaper");
            match start {
                Some(start) => event.with(Field::Start, *start),
                None => event,
            }
        })
        .collect();
    EventTable::with_rows(ColumnSet::all(), rows)
}

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn month_day_year_timestamps_use_the_date_token() {
    let table = table_with_starts(&[Some("1/5/24 08:10"), Some("1/6/24 23:59:00")]);
    let normalized = normalize(&table).unwrap();

    assert_eq!(normalized.date_format, DateFormat::MonthDayShortYear);
    let days: Vec<_> = normalized.rows.iter().map(|row| row.start_day).collect();
    assert_eq!(days, vec![day(2024, 1, 5), day(2024, 1, 6)]);
}

#[test]
fn year_month_day_export_falls_back_table_wide() {
    let table = table_with_starts(&[Some("2024/01/05 08:10"), Some("2024/01/06 09:00")]);
    let normalized = normalize(&table).unwrap();

    assert_eq!(normalized.date_format, DateFormat::YearMonthDay);
    let days: Vec<_> = normalized.rows.iter().map(|row| row.start_day).collect();
    assert_eq!(days, vec![day(2024, 1, 5), day(2024, 1, 6)]);
}

#[test]
fn mixed_encodings_are_not_parsed_per_row() {
    let table = table_with_starts(&[Some("2024/01/05 08:10"), Some("1/6/24 09:00")]);
    let err = normalize(&table).unwrap_err();
    assert_eq!(
        err,
        PipelineError::DateParseFailure {
            token: "1/6/24".to_string(),
            row: 1,
        }
    );
}

#[test]
fn known_quirk_missing_start_is_tolerated_but_one_bad_token_fails_the_table() {
    // A row without a Start value only loses its start_day.
    let tolerant = table_with_starts(&[Some("1/5/24 08:10"), None, Some("1/7/24 10:00")]);
    let normalized = normalize(&tolerant).unwrap();
    assert_eq!(normalized.rows[1].start_day, None);
    assert_eq!(normalized.rows[2].start_day, day(2024, 1, 7));

    // A single unparseable token aborts normalization of every row.
    let strict = table_with_starts(&[Some("1/5/24 08:10"), Some("yesterday"), Some("1/7/24")]);
    let err = normalize(&strict).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::DateParseFailure { ref token, row: 1 } if token == "yesterday"
    ));
}

#[test]
fn blank_start_is_treated_as_missing() {
    let table = table_with_starts(&[Some("   "), Some("2/29/24")]);
    let normalized = normalize(&table).unwrap();
    assert_eq!(normalized.rows[0].start_day, None);
    assert_eq!(normalized.rows[1].start_day, day(2024, 2, 29));
}

#[test]
fn numeric_start_cell_yields_missing_day() {
    let rows = vec![
        RawEvent::default().with(Field::Start, 45000.0),
        RawEvent::default().with(Field::Start, "3/1/24"),
    ];
    let table = EventTable::with_rows(ColumnSet::all(), rows);
    let normalized = normalize(&table).unwrap();
    assert_eq!(normalized.rows[0].start_day, None);
    assert_eq!(normalized.rows[1].start_day, day(2024, 3, 1));
}

#[test]
fn missing_start_column_is_reported() {
    let table = EventTable::with_rows(
        ColumnSet::new([Field::Type, Field::EndCondition]),
        vec![RawEvent::default().with(Field::Type, "Diaper")],
    );
    let err = normalize(&table).unwrap_err();
    assert_eq!(err, PipelineError::missing_column("Start"));
}

#[test]
fn input_table_is_left_untouched() {
    let table = table_with_starts(&[Some("1/5/24 08:10")]);
    let before = table.clone();
    let normalized = normalize(&table).unwrap();
    assert_eq!(table, before);
    assert_eq!(normalized.rows[0].raw, before.rows[0]);
}

proptest! {
    #[test]
    fn month_day_year_tokens_parse_to_their_calendar_date(
        days_offset in prop::collection::vec(0i64..36_500, 1..20),
    ) {
        let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = days_offset
            .iter()
            .map(|offset| base + chrono::Duration::days(*offset))
            .collect();
        let starts: Vec<String> = dates
            .iter()
            .map(|date| format!("{} 12:00", date.format("%-m/%-d/%y")))
            .collect();
        let refs: Vec<Option<&str>> = starts.iter().map(|start| Some(start.as_str())).collect();

        let normalized = normalize(&table_with_starts(&refs)).unwrap();
        prop_assert_eq!(normalized.date_format, DateFormat::MonthDayShortYear);
        for (row, date) in normalized.rows.iter().zip(&dates) {
            // Two-digit years pivot at 1970/2069.
            prop_assert_eq!(row.start_day, Some(*date));
        }
    }

    #[test]
    fn year_month_day_tables_always_fall_back(
        days_offset in prop::collection::vec(0i64..36_500, 1..20),
    ) {
        let base = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = days_offset
            .iter()
            .map(|offset| base + chrono::Duration::days(*offset))
            .collect();
        let starts: Vec<String> = dates
            .iter()
            .map(|date| date.format("%Y/%m/%d 07:30").to_string())
            .collect();
        let refs: Vec<Option<&str>> = starts.iter().map(|start| Some(start.as_str())).collect();

        let normalized = normalize(&table_with_starts(&refs)).unwrap();
        prop_assert_eq!(normalized.date_format, DateFormat::YearMonthDay);
        let days: Vec<_> = normalized.rows.iter().map(|row| row.start_day).collect();
        let expected: Vec<_> = dates.into_iter().map(Some).collect();
        prop_assert_eq!(days, expected);
    }
}
