//! Derived series handed to the chart layer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label shown for diaper changes without a recorded outcome.
pub const UNRECORDED_OUTCOME: &str = "(unrecorded)";

/// Number of diaper changes per outcome.
///
/// Diaper rows with no recorded `End Condition` are kept out of the outcome
/// map but still counted in [`unrecorded`](Self::unrecorded), so
/// [`total`](Self::total) always equals the number of diaper rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaperOutcomeCounts {
    counts: BTreeMap<String, u64>,
    unrecorded: u64,
}

impl DiaperOutcomeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one diaper change with the given outcome.
    pub fn record(&mut self, outcome: Option<&str>) {
        match outcome {
            Some(outcome) => *self.counts.entry(outcome.to_string()).or_insert(0) += 1,
            None => self.unrecorded += 1,
        }
    }

    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Outcomes and their counts, ordered by outcome name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts
            .iter()
            .map(|(outcome, count)| (outcome.as_str(), *count))
    }

    /// Outcomes followed by an [`UNRECORDED_OUTCOME`] entry when any diaper
    /// change had no outcome.
    pub fn labelled(&self) -> impl Iterator<Item = (&str, u64)> {
        let unrecorded = (self.unrecorded > 0).then_some((UNRECORDED_OUTCOME, self.unrecorded));
        self.iter().chain(unrecorded)
    }

    pub fn unrecorded(&self) -> u64 {
        self.unrecorded
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum::<u64>() + self.unrecorded
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.unrecorded == 0
    }
}

impl<'a> FromIterator<Option<&'a str>> for DiaperOutcomeCounts {
    fn from_iter<I: IntoIterator<Item = Option<&'a str>>>(iter: I) -> Self {
        let mut counts = DiaperOutcomeCounts::new();
        for outcome in iter {
            counts.record(outcome);
        }
        counts
    }
}

/// One event's contribution to a running total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Calendar day of the event; missing days sort after every dated point.
    pub date: Option<NaiveDate>,
    /// Running total including this event.
    pub total: f64,
}

/// Running total over date-ordered events, one point per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    y_label: String,
    points: Vec<SeriesPoint>,
}

impl CumulativeSeries {
    pub fn new(y_label: impl Into<String>) -> Self {
        Self {
            y_label: y_label.into(),
            points: Vec::new(),
        }
    }

    /// Append a point whose total is the previous total plus `amount`.
    pub fn push(&mut self, date: Option<NaiveDate>, amount: f64) {
        let total = self.final_total() + amount;
        self.points.push(SeriesPoint { date, total });
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.total).collect()
    }

    /// Last running total, 0.0 for an empty series.
    pub fn final_total(&self) -> f64 {
        self.points.last().map_or(0.0, |point| point.total)
    }

    /// Points that carry a date, for plotting on a time axis.
    pub fn dated_points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|point| point.date.map(|date| (date, point.total)))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Output of the series builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedSeries {
    Counts(DiaperOutcomeCounts),
    Cumulative(CumulativeSeries),
}

impl DerivedSeries {
    pub fn as_counts(&self) -> Option<&DiaperOutcomeCounts> {
        match self {
            DerivedSeries::Counts(counts) => Some(counts),
            DerivedSeries::Cumulative(_) => None,
        }
    }

    pub fn as_cumulative(&self) -> Option<&CumulativeSeries> {
        match self {
            DerivedSeries::Cumulative(series) => Some(series),
            DerivedSeries::Counts(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DerivedSeries::Counts(counts) => counts.is_empty(),
            DerivedSeries::Cumulative(series) => series.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_track_unrecorded_outcomes() {
        let counts: DiaperOutcomeCounts = [Some("wet"), None, Some("wet"), Some("dirty")]
            .into_iter()
            .collect();
        assert_eq!(counts.get("wet"), 2);
        assert_eq!(counts.get("dirty"), 1);
        assert_eq!(counts.get("mixed"), 0);
        assert_eq!(counts.unrecorded(), 1);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.len(), 2);
        let labelled: Vec<_> = counts.labelled().collect();
        assert_eq!(labelled, vec![("dirty", 1), ("wet", 2), (UNRECORDED_OUTCOME, 1)]);
    }

    #[test]
    fn cumulative_push_accumulates() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5);
        let mut series = CumulativeSeries::new("Oz");
        series.push(day, 4.0);
        series.push(None, 0.0);
        series.push(day, 2.5);
        assert_eq!(series.totals(), vec![4.0, 4.0, 6.5]);
        assert_eq!(series.dated_points().count(), 2);
        assert!((series.final_total() - 6.5).abs() < f64::EPSILON);
    }
}
