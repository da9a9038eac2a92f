//! Start-date normalization.
//!
//! The `Start` column holds free-text timestamps such as `1/5/24 08:10` or
//! `2024/01/05 08:10`. Only the first whitespace-separated token is used.
//!
//! The date encoding is chosen once for the whole table: every token must
//! parse as `%m/%d/%y`, otherwise every token must parse as `%Y/%m/%d`.
//! Formats are never mixed between rows. A token that parses under neither
//! format fails the whole table, while a missing or non-text `Start` only
//! leaves that row's `start_day` empty.

use chrono::NaiveDate;
use tracing::{debug, info};

use carelog_model::{
    CellValue, DateFormat, EventTable, Field, NormalizedEvent, NormalizedTable, PipelineError,
    Result,
};

/// Date portion of a `Start` cell: its first whitespace-separated token.
///
/// Returns `None` for missing and non-text cells.
///
/// # Examples
///
/// ```
/// use carelog_model::CellValue;
/// use carelog_transform::normalization::start_token;
///
/// assert_eq!(start_token(&CellValue::text("1/5/24 08:10")), Some("1/5/24"));
/// assert_eq!(start_token(&CellValue::Number(3.0)), None);
/// assert_eq!(start_token(&CellValue::Missing), None);
/// ```
pub fn start_token(value: &CellValue) -> Option<&str> {
    value.as_text()?.split_whitespace().next()
}

/// Derive `start_day` for every row of `table`.
///
/// Returns a new table; the input is left untouched so it can feed several
/// charts.
pub fn normalize(table: &EventTable) -> Result<NormalizedTable> {
    table.columns.require(&[Field::Start])?;

    let tokens: Vec<Option<&str>> = table
        .rows
        .iter()
        .map(|row| start_token(row.get(Field::Start)))
        .collect();
    let (date_format, days) = probe_date_format(&tokens)?;

    let missing = days.iter().filter(|day| day.is_none()).count();
    let rows: Vec<NormalizedEvent> = table
        .rows
        .iter()
        .cloned()
        .zip(days)
        .map(|(raw, start_day)| NormalizedEvent { raw, start_day })
        .collect();

    info!(
        rows = rows.len(),
        missing_start_day = missing,
        date_format = %date_format,
        "normalized event log"
    );
    Ok(NormalizedTable {
        columns: table.columns.clone(),
        rows,
        date_format,
    })
}

/// Pick the date encoding that parses every token and return the parsed days.
///
/// `None` tokens are skipped by the probe and yield `None` days. When no
/// format parses every token, the error names the first token (in row order)
/// that neither format accepts. A table mixing both encodings has no such
/// token and reports the first token rejected by the fallback format instead.
pub fn probe_date_format(
    tokens: &[Option<&str>],
) -> Result<(DateFormat, Vec<Option<NaiveDate>>)> {
    let [primary, fallback] = DateFormat::PROBE_ORDER;

    match parse_all(tokens, primary) {
        Ok(days) => return Ok((primary, days)),
        Err((row, token)) => {
            debug!(
                row,
                token = %token,
                format = %primary,
                "start date probe failed, retrying"
            );
        }
    }

    parse_all(tokens, fallback)
        .map(|days| (fallback, days))
        .map_err(|(row, token)| {
            let (row, token) = first_unparseable(tokens).unwrap_or((row, token));
            PipelineError::DateParseFailure { token, row }
        })
}

fn first_unparseable(tokens: &[Option<&str>]) -> Option<(usize, String)> {
    tokens.iter().enumerate().find_map(|(row, token)| {
        let token = (*token)?;
        DateFormat::PROBE_ORDER
            .iter()
            .all(|format| format.parse(token).is_none())
            .then(|| (row, token.to_string()))
    })
}

fn parse_all(
    tokens: &[Option<&str>],
    format: DateFormat,
) -> std::result::Result<Vec<Option<NaiveDate>>, (usize, String)> {
    tokens
        .iter()
        .enumerate()
        .map(|(row, token)| match token {
            None => Ok(None),
            Some(token) => format
                .parse(token)
                .map(Some)
                .ok_or_else(|| (row, (*token).to_string())),
        })
        .collect()
}
