pub mod csv_table;
pub mod polars_utils;
pub mod summary;

pub use csv_table::{
    ReadOptions, frame_to_events, read_csv_frame, read_csv_frame_from_bytes, read_events,
    read_events_from_bytes,
};
pub use polars_utils::{any_to_cell, any_to_f64, any_to_string, format_numeric};
pub use summary::{ColumnSummary, NumericSummary, summarize_frame};
