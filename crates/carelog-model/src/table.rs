#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::error::{PipelineError, Result};

/// A single field value as read from the event log.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Missing,
}

impl CellValue {
    /// Build a text cell; blank input reads as missing.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(value)
        }
    }

    /// Returns the text content, or `None` for numbers and missing values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// True when the cell holds exactly `expected` as text.
    pub fn is_text(&self, expected: &str) -> bool {
        self.as_text() == Some(expected)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => f.write_str(value),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Missing => Ok(()),
        }
    }
}

/// The event-log columns the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Type,
    Start,
    End,
    StartLocation,
    StartCondition,
    EndCondition,
    Duration,
    Notes,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Type,
        Field::Start,
        Field::End,
        Field::StartLocation,
        Field::StartCondition,
        Field::EndCondition,
        Field::Duration,
        Field::Notes,
    ];

    /// Column header as it appears in the CSV export.
    pub fn header(&self) -> &'static str {
        match self {
            Field::Type => "Type",
            Field::Start => "Start",
            Field::End => "End",
            Field::StartLocation => "Start Location",
            Field::StartCondition => "Start Condition",
            Field::EndCondition => "End Condition",
            Field::Duration => "Duration",
            Field::Notes => "Notes",
        }
    }

    /// Match a CSV header to a known field (case-insensitive, trimmed).
    pub fn from_header(header: &str) -> Option<Self> {
        let trimmed = header.trim().trim_matches('\u{feff}');
        Field::ALL
            .into_iter()
            .find(|field| field.header().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One row of the uploaded event log.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawEvent {
    pub event_type: CellValue,
    pub start: CellValue,
    pub end: CellValue,
    pub start_location: CellValue,
    pub start_condition: CellValue,
    pub end_condition: CellValue,
    pub duration: CellValue,
    pub notes: CellValue,
}

impl RawEvent {
    pub fn get(&self, field: Field) -> &CellValue {
        match field {
            Field::Type => &self.event_type,
            Field::Start => &self.start,
            Field::End => &self.end,
            Field::StartLocation => &self.start_location,
            Field::StartCondition => &self.start_condition,
            Field::EndCondition => &self.end_condition,
            Field::Duration => &self.duration,
            Field::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: Field, value: CellValue) {
        let slot = match field {
            Field::Type => &mut self.event_type,
            Field::Start => &mut self.start,
            Field::End => &mut self.end,
            Field::StartLocation => &mut self.start_location,
            Field::StartCondition => &mut self.start_condition,
            Field::EndCondition => &mut self.end_condition,
            Field::Duration => &mut self.duration,
            Field::Notes => &mut self.notes,
        };
        *slot = value;
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<CellValue>) -> Self {
        self.set(field, value.into());
        self
    }
}

/// Set of known columns present in an input table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(BTreeSet<Field>);

impl ColumnSet {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self(fields.into_iter().collect())
    }

    /// Every known column.
    pub fn all() -> Self {
        Self::new(Field::ALL)
    }

    pub fn insert(&mut self, field: Field) {
        self.0.insert(field);
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    /// Fails with `MissingColumn` naming the first absent field.
    pub fn require(&self, fields: &[Field]) -> Result<()> {
        match fields.iter().find(|field| !self.contains(**field)) {
            Some(field) => Err(PipelineError::missing_column(field.header())),
            None => Ok(()),
        }
    }
}

/// Raw event log as handed over by the ingest layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
    pub columns: ColumnSet,
    pub rows: Vec<RawEvent>,
}

impl EventTable {
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: ColumnSet, rows: Vec<RawEvent>) -> Self {
        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: RawEvent) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Date encoding chosen for the first token of the `Start` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DateFormat {
    /// `1/23/24`
    MonthDayShortYear,
    /// `2024/01/23`
    YearMonthDay,
}

impl DateFormat {
    /// Probe order used by the normalizer.
    pub const PROBE_ORDER: [DateFormat; 2] =
        [DateFormat::MonthDayShortYear, DateFormat::YearMonthDay];

    /// chrono format string for this encoding.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::MonthDayShortYear => "%m/%d/%y",
            DateFormat::YearMonthDay => "%Y/%m/%d",
        }
    }

    /// Parse a date token. The year part must have exactly two digits
    /// (`%y`) or four digits (`%Y`); chrono alone would accept shorter years.
    pub fn parse(&self, token: &str) -> Option<NaiveDate> {
        let year = match self {
            DateFormat::MonthDayShortYear => token.rsplit('/').next(),
            DateFormat::YearMonthDay => token.split('/').next(),
        }?;
        let width = match self {
            DateFormat::MonthDayShortYear => 2,
            DateFormat::YearMonthDay => 4,
        };
        if year.len() != width || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        NaiveDate::parse_from_str(token, self.pattern()).ok()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// A raw event with its derived calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    pub raw: RawEvent,
    pub start_day: Option<NaiveDate>,
}

impl NormalizedEvent {
    pub fn get(&self, field: Field) -> &CellValue {
        self.raw.get(field)
    }
}

/// Event log after date normalization. Built fresh from an [`EventTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub columns: ColumnSet,
    pub rows: Vec<NormalizedEvent>,
    pub date_format: DateFormat,
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
