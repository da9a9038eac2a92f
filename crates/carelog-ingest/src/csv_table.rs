//! CSV loading into polars and conversion to [`EventTable`]s.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use carelog_model::{ColumnSet, EventTable, Field, RawEvent};

use crate::polars_utils::any_to_cell;

/// Options for reading an event-log export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Field separator. Defaults to `,`.
    pub separator: u8,

    /// Number of rows used to infer column types.
    /// `None` scans the whole file. Defaults to 1000.
    pub infer_schema_length: Option<usize>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            infer_schema_length: Some(1000),
        }
    }
}

impl ReadOptions {
    /// Set the field separator.
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Set the schema inference length.
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    fn csv_options(&self) -> CsvReadOptions {
        let separator = self.separator;
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .map_parse_options(|parse| parse.with_separator(separator))
    }
}

/// Read a CSV file into a DataFrame.
pub fn read_csv_frame(path: &Path, options: &ReadOptions) -> Result<DataFrame> {
    if !path.exists() {
        anyhow::bail!("CSV file not found: {}", path.display());
    }
    let df = options
        .csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read CSV: {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );
    Ok(df)
}

/// Read a CSV snapshot held in memory (e.g. an uploaded file) into a DataFrame.
pub fn read_csv_frame_from_bytes(bytes: Vec<u8>, options: &ReadOptions) -> Result<DataFrame> {
    let size = bytes.len();
    let df = options
        .csv_options()
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .context("Failed to read CSV from memory")?;
    debug!(bytes = size, rows = df.height(), columns = df.width(), "read csv");
    Ok(df)
}

/// Convert a DataFrame into an [`EventTable`].
///
/// Columns are matched to known fields by header (case-insensitive). Unknown
/// columns are ignored; when two headers map to the same field the first one
/// wins.
pub fn frame_to_events(df: &DataFrame) -> Result<EventTable> {
    let mut columns = ColumnSet::default();
    let mut sources: Vec<(Field, &Column)> = Vec::new();
    let mut ignored: Vec<&str> = Vec::new();

    for column in df.get_columns() {
        let name = column.name().as_str();
        match Field::from_header(name) {
            Some(field) if columns.contains(field) => {
                warn!(column = name, field = %field, "duplicate column ignored");
            }
            Some(field) => {
                columns.insert(field);
                sources.push((field, column));
            }
            None => ignored.push(name),
        }
    }
    if !ignored.is_empty() {
        debug!(columns = ?ignored, "ignoring unknown columns");
    }

    let mut table = EventTable::new(columns);
    for idx in 0..df.height() {
        let mut row = RawEvent::default();
        for (field, column) in &sources {
            let value = column
                .get(idx)
                .with_context(|| format!("read {field} at row {idx}"))?;
            row.set(*field, any_to_cell(value));
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Read an event-log CSV file into an [`EventTable`].
pub fn read_events(path: &Path, options: &ReadOptions) -> Result<EventTable> {
    let df = read_csv_frame(path, options)?;
    let table = frame_to_events(&df)?;
    info!(
        path = %path.display(),
        events = table.len(),
        "loaded event log"
    );
    Ok(table)
}

/// Read an in-memory event-log CSV into an [`EventTable`].
pub fn read_events_from_bytes(bytes: Vec<u8>, options: &ReadOptions) -> Result<EventTable> {
    let df = read_csv_frame_from_bytes(bytes, options)?;
    let table = frame_to_events(&df)?;
    info!(events = table.len(), "loaded event log");
    Ok(table)
}
