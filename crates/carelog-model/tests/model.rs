//! Tests for carelog-model types.

use chrono::NaiveDate;
use carelog_model::{
    CellValue, CumulativeSeries, DateFormat, DerivedSeries, DiaperOutcomeCounts, Field, RawEvent,
};

#[test]
fn field_headers_match_export_columns() {
    assert_eq!(Field::from_header("End Condition"), Some(Field::EndCondition));
    assert_eq!(Field::from_header(" start location "), Some(Field::StartLocation));
    assert_eq!(Field::from_header("\u{feff}Type"), Some(Field::Type));
    assert_eq!(Field::from_header("Weight"), None);
}

#[test]
fn raw_event_builder_sets_fields() {
    let event = RawEvent::default()
        .with(Field::Type, "Feed")
        .with(Field::StartLocation, "Bottle")
        .with(Field::Duration, 12.0);

    assert!(event.get(Field::Type).is_text("Feed"));
    assert!(event.get(Field::StartLocation).is_text("Bottle"));
    assert_eq!(event.get(Field::Duration), &CellValue::Number(12.0));
    assert!(event.get(Field::EndCondition).is_missing());
}

#[test]
fn date_formats_parse_their_own_encoding_only() {
    let expected = NaiveDate::from_ymd_opt(2024, 1, 23);
    assert_eq!(DateFormat::MonthDayShortYear.parse("1/23/24"), expected);
    assert_eq!(DateFormat::MonthDayShortYear.parse("01/23/24"), expected);
    assert_eq!(DateFormat::YearMonthDay.parse("2024/01/23"), expected);
    assert_eq!(DateFormat::MonthDayShortYear.parse("2024/01/23"), None);
    assert_eq!(DateFormat::YearMonthDay.parse("1/23/24"), None);
    assert_eq!(DateFormat::YearMonthDay.parse("24/01/23"), None);
    assert_eq!(DateFormat::MonthDayShortYear.parse("1/23/4"), None);
    assert_eq!(DateFormat::MonthDayShortYear.parse("13/01/24"), None);
}

#[test]
fn derived_series_serializes_with_kind_tag() {
    let counts: DiaperOutcomeCounts = [Some("wet"), Some("dirty")].into_iter().collect();
    let json = serde_json::to_value(DerivedSeries::Counts(counts)).expect("serialize counts");
    assert_eq!(json["kind"], "counts");
    assert_eq!(json["counts"]["wet"], 1);
    assert_eq!(json["unrecorded"], 0);

    let mut series = CumulativeSeries::new("Time nursing (min)");
    series.push(NaiveDate::from_ymd_opt(2024, 2, 1), 15.0);
    let json =
        serde_json::to_value(DerivedSeries::Cumulative(series)).expect("serialize series");
    assert_eq!(json["kind"], "cumulative");
    assert_eq!(json["y_label"], "Time nursing (min)");
    assert_eq!(json["points"][0]["date"], "2024-02-01");
    assert_eq!(json["points"][0]["total"], 15.0);
}
