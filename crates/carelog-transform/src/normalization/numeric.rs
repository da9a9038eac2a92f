//! Per-row numeric fields.
//!
//! Durations and bottle volumes are free text in the export. A value that
//! cannot be read contributes zero to its series instead of failing the
//! request.

use carelog_model::CellValue;

/// Parses an `"H:MM"` duration into minutes.
///
/// Only the hour and minute parts are read; a trailing seconds part is
/// ignored.
///
/// # Examples
///
/// ```
/// use carelog_transform::normalization::parse_duration_minutes;
///
/// assert_eq!(parse_duration_minutes("0:25"), Some(25));
/// assert_eq!(parse_duration_minutes("1:05"), Some(65));
/// assert_eq!(parse_duration_minutes("25"), None);
/// ```
pub fn parse_duration_minutes(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let hours = parts.next()?.trim().parse::<u32>().ok()?;
    let minutes = parts.next()?.trim().parse::<u32>().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Minutes contributed by a `Duration` cell; 0 when missing or unreadable.
pub fn duration_minutes(value: &CellValue) -> f64 {
    value
        .as_text()
        .and_then(parse_duration_minutes)
        .map_or(0.0, f64::from)
}

/// Parses a volume with a two-character unit suffix such as `"4oz"`.
///
/// The last two characters are dropped and the rest is read as a number.
/// Negative and non-finite values are rejected so running totals never
/// decrease.
///
/// # Examples
///
/// ```
/// use carelog_transform::normalization::parse_volume;
///
/// assert_eq!(parse_volume("4oz"), Some(4.0));
/// assert_eq!(parse_volume("2.5oz"), Some(2.5));
/// assert_eq!(parse_volume("oz"), None);
/// ```
pub fn parse_volume(value: &str) -> Option<f64> {
    let (cut, _) = value.char_indices().rev().nth(1)?;
    value[..cut]
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|volume| volume.is_finite() && *volume >= 0.0)
}

/// Volume contributed by an `End Condition` cell; 0.0 when non-text or
/// unreadable.
pub fn volume(value: &CellValue) -> f64 {
    value.as_text().and_then(parse_volume).unwrap_or(0.0)
}
