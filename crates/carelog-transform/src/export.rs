//! Export of derived series as CSV or JSON.

use std::io::Write;

use carelog_model::{CumulativeSeries, DerivedSeries, DiaperOutcomeCounts};

/// Write a derived series as CSV.
///
/// Counts are written as `outcome,count` rows, unrecorded outcomes last.
/// Cumulative series are written as `date,<y label>` rows with ISO dates,
/// blank when the day is unknown.
pub fn write_series_csv<W: Write>(series: &DerivedSeries, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    match series {
        DerivedSeries::Counts(counts) => write_counts(&mut wtr, counts)?,
        DerivedSeries::Cumulative(series) => write_cumulative(&mut wtr, series)?,
    }
    wtr.flush()?;
    Ok(())
}

/// Render a derived series as a CSV string.
pub fn series_to_csv_string(series: &DerivedSeries) -> csv::Result<String> {
    let mut buffer = Vec::new();
    write_series_csv(series, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Render a derived series as pretty-printed JSON.
pub fn series_to_json(series: &DerivedSeries) -> serde_json::Result<String> {
    serde_json::to_string_pretty(series)
}

fn write_counts<W: Write>(
    wtr: &mut csv::Writer<W>,
    counts: &DiaperOutcomeCounts,
) -> csv::Result<()> {
    wtr.write_record(["outcome", "count"])?;
    for (outcome, count) in counts.labelled() {
        wtr.write_record([outcome, count.to_string().as_str()])?;
    }
    Ok(())
}

fn write_cumulative<W: Write>(
    wtr: &mut csv::Writer<W>,
    series: &CumulativeSeries,
) -> csv::Result<()> {
    wtr.write_record(["date", series.y_label()])?;
    for point in series.points() {
        let date = point
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        wtr.write_record([date, point.total.to_string()])?;
    }
    Ok(())
}
