pub mod enums;
pub mod error;
pub mod series;
pub mod table;

pub use enums::Selector;
pub use error::{PipelineError, Result};
pub use series::{
    CumulativeSeries, DerivedSeries, DiaperOutcomeCounts, SeriesPoint, UNRECORDED_OUTCOME,
};
pub use table::{
    CellValue, ColumnSet, DateFormat, EventTable, Field, NormalizedEvent, NormalizedTable,
    RawEvent,
};
