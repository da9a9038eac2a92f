//! Raw event log to derived series in one call.
//!
//! The CLI and the batch program go through [`derive_series`]; callers that
//! chart several selectors from one upload normalize once and call
//! [`build_series`](crate::series::build_series) per chart instead.

use tracing::info_span;

use carelog_model::{DerivedSeries, EventTable, Result, Selector};

use crate::normalization::normalize;
use crate::series::build_series;

/// Normalize `table` and build the series for `selector`.
pub fn derive_series(table: &EventTable, selector: Selector) -> Result<DerivedSeries> {
    let span = info_span!("derive_series", selector = %selector, rows = table.len());
    let _guard = span.enter();
    let normalized = normalize(table)?;
    build_series(&normalized, selector)
}
