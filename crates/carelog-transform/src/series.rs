//! Derived series for each chart.
//!
//! One parameterized entry point, [`build_series`], dispatches on a
//! [`Selector`]. Every builder filters the normalized rows by event type,
//! then either counts outcomes or accumulates a per-row amount over rows
//! sorted by `start_day`.
//!
//! Sorting is stable: rows on the same day keep their input order, and rows
//! without a `start_day` come last. Cumulative series carry one point per
//! event; same-day events are not merged.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::{debug, debug_span};

use carelog_model::{
    CellValue, CumulativeSeries, DerivedSeries, DiaperOutcomeCounts, Field, NormalizedEvent,
    NormalizedTable, Result, Selector,
};

use crate::normalization::{duration_minutes, volume};

/// Y-axis label of the breastfeeding series.
pub const NURSING_LABEL: &str = "Time nursing (min)";
/// Y-axis label of the bottle series.
pub const BOTTLE_LABEL: &str = "Oz of formula or breast milk";
/// Y-axis label of the cumulative diaper series.
pub const DIAPER_COUNT_LABEL: &str = "Number of diapers";

const DIAPER_TYPE: &str = "Diaper";
const FEED_TYPE: &str = "Feed";
const BOTTLE_LOCATION: &str = "Bottle";

/// Build the series named by `selector`.
pub fn build_series(table: &NormalizedTable, selector: Selector) -> Result<DerivedSeries> {
    let span = debug_span!("build_series", selector = %selector);
    let _guard = span.enter();

    let series = match selector {
        Selector::Diaper => DerivedSeries::Counts(build_diaper_counts(table)?),
        Selector::Breastfeeding => DerivedSeries::Cumulative(build_breastfeeding_series(table)?),
        Selector::Bottle => DerivedSeries::Cumulative(build_bottle_series(table)?),
        Selector::DiaperCumulative => {
            DerivedSeries::Cumulative(build_cumulative_count_series(table)?)
        }
    };
    Ok(series)
}

/// Parse `selector` and build the matching series.
///
/// Unknown selector text fails with `InvalidSelector` before the table is
/// touched.
pub fn build_series_named(table: &NormalizedTable, selector: &str) -> Result<DerivedSeries> {
    let selector: Selector = selector.parse()?;
    build_series(table, selector)
}

/// Count diaper changes per `End Condition`.
///
/// Every diaper row counts once; rows sharing a timestamp are not
/// deduplicated.
pub fn build_diaper_counts(table: &NormalizedTable) -> Result<DiaperOutcomeCounts> {
    table.columns.require(&[Field::Type, Field::EndCondition])?;

    let mut counts = DiaperOutcomeCounts::new();
    for row in table.rows.iter().filter(|row| is_diaper(row)) {
        let outcome = outcome_label(row.get(Field::EndCondition));
        counts.record(outcome.as_deref());
    }
    debug!(
        outcomes = counts.len(),
        total = counts.total(),
        unrecorded = counts.unrecorded(),
        "counted diaper outcomes"
    );
    Ok(counts)
}

/// Cumulative minutes of at-breast feeding.
pub fn build_breastfeeding_series(table: &NormalizedTable) -> Result<CumulativeSeries> {
    table
        .columns
        .require(&[Field::Type, Field::StartLocation, Field::Duration])?;

    let series = cumulate(
        table.rows.iter().filter(|row| is_breast_feed(row)),
        NURSING_LABEL,
        |row| duration_minutes(row.get(Field::Duration)),
    );
    debug!(points = series.len(), total = series.final_total(), "built nursing series");
    Ok(series)
}

/// Cumulative bottle volume.
pub fn build_bottle_series(table: &NormalizedTable) -> Result<CumulativeSeries> {
    table
        .columns
        .require(&[Field::Type, Field::StartLocation, Field::EndCondition])?;

    let series = cumulate(
        table.rows.iter().filter(|row| is_bottle_feed(row)),
        BOTTLE_LABEL,
        |row| volume(row.get(Field::EndCondition)),
    );
    debug!(points = series.len(), total = series.final_total(), "built bottle series");
    Ok(series)
}

/// Cumulative number of diaper changes; point `i` has total `i + 1`.
pub fn build_cumulative_count_series(table: &NormalizedTable) -> Result<CumulativeSeries> {
    table.columns.require(&[Field::Type])?;

    let series = cumulate(
        table.rows.iter().filter(|row| is_diaper(row)),
        DIAPER_COUNT_LABEL,
        |_| 1.0,
    );
    debug!(points = series.len(), "built diaper count series");
    Ok(series)
}

fn is_diaper(row: &NormalizedEvent) -> bool {
    row.get(Field::Type).is_text(DIAPER_TYPE)
}

fn is_feed(row: &NormalizedEvent) -> bool {
    row.get(Field::Type).is_text(FEED_TYPE)
}

fn is_breast_feed(row: &NormalizedEvent) -> bool {
    is_feed(row) && !row.get(Field::StartLocation).is_text(BOTTLE_LOCATION)
}

fn is_bottle_feed(row: &NormalizedEvent) -> bool {
    is_feed(row) && row.get(Field::StartLocation).is_text(BOTTLE_LOCATION)
}

/// Outcome key for a diaper row. Numeric outcomes are keyed by their
/// textual form.
fn outcome_label(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Missing => None,
        other => Some(other.to_string()),
    }
}

/// Missing days sort after every known day.
fn compare_days(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cumulate<'a>(
    rows: impl Iterator<Item = &'a NormalizedEvent>,
    y_label: &str,
    amount: impl Fn(&NormalizedEvent) -> f64,
) -> CumulativeSeries {
    let mut contributions: Vec<(Option<NaiveDate>, f64)> =
        rows.map(|row| (row.start_day, amount(row))).collect();
    // Vec::sort_by is stable.
    contributions.sort_by(|a, b| compare_days(a.0, b.0));

    let mut series = CumulativeSeries::new(y_label);
    for (date, amount) in contributions {
        series.push(date, amount);
    }
    series
}
