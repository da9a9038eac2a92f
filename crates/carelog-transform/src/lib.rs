//! Event-log transformation.
//!
//! - **normalization**: `Start` date probing and per-row duration/volume parsing
//! - **series**: selector dispatch and the four series builders
//! - **pipeline**: normalize + build in one call
//! - **export**: CSV/JSON rendering of derived series

pub mod export;
pub mod normalization;
pub mod pipeline;
pub mod series;

pub use export::{series_to_csv_string, series_to_json, write_series_csv};
pub use normalization::normalize;
pub use pipeline::derive_series;
pub use series::{
    BOTTLE_LABEL, DIAPER_COUNT_LABEL, NURSING_LABEL, build_bottle_series,
    build_breastfeeding_series, build_cumulative_count_series, build_diaper_counts,
    build_series, build_series_named,
};
