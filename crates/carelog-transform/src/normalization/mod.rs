//! Normalization of raw event-log fields.
//!
//! - **datetime**: table-wide `Start` date probing and the derived `start_day`
//! - **numeric**: per-row duration and volume parsing with zero fallback

pub mod datetime;
pub mod numeric;

pub use datetime::{normalize, probe_date_format, start_token};
pub use numeric::{duration_minutes, parse_duration_minutes, parse_volume, volume};
