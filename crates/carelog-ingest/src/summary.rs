//! Per-column summary of an uploaded event log.

use std::collections::BTreeSet;

use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::polars_utils::{any_to_f64, any_to_string};

/// Descriptive statistics for one CSV column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub count: usize,
    pub null_count: usize,
    pub unique: usize,
    /// Numeric statistics, present when every non-null value is numeric.
    pub numeric: Option<NumericSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnSummary {
    pub fn null_ratio(&self) -> f64 {
        let total = self.count + self.null_count;
        if total == 0 {
            1.0
        } else {
            self.null_count as f64 / total as f64
        }
    }
}

/// Summarize every column of a DataFrame, in column order.
pub fn summarize_frame(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    df.get_columns().iter().map(summarize_column).collect()
}

fn summarize_column(column: &Column) -> Result<ColumnSummary> {
    let mut count = 0usize;
    let mut uniques = BTreeSet::new();
    let mut numbers: Vec<f64> = Vec::new();
    let mut all_numeric = true;

    for idx in 0..column.len() {
        let value = column.get(idx)?;
        if matches!(value, AnyValue::Null) {
            continue;
        }
        let text = any_to_string(value.clone());
        if text.trim().is_empty() {
            continue;
        }
        count += 1;
        match any_to_f64(value) {
            Some(number) => numbers.push(number),
            None => all_numeric = false,
        }
        uniques.insert(text);
    }

    let numeric = if all_numeric && !numbers.is_empty() {
        let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
        let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
        Some(NumericSummary { min, max, mean })
    } else {
        None
    };

    Ok(ColumnSummary {
        name: column.name().to_string(),
        dtype: column.dtype().to_string(),
        count,
        null_count: column.len() - count,
        unique: uniques.len(),
        numeric,
    })
}
