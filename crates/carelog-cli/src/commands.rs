use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use carelog_ingest::{ColumnSummary, ReadOptions, read_csv_frame, read_events, summarize_frame};
use carelog_model::{DerivedSeries, Selector};
use carelog_render::{Figure, FigureSize, PlottersRenderer, Renderer};
use carelog_transform::{derive_series, series_to_json, write_series_csv};

/// Default caption of the diaper outcome chart.
pub const DEFAULT_BAR_TITLE: &str = "Types of Diapers";

/// Caption used by the `diaper-types` batch program.
pub const BATCH_TITLE: &str = "Types of diapers";

/// A chart to render from an event-log CSV.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub selector: Selector,
    /// Chart caption. Outcome charts fall back to [`DEFAULT_BAR_TITLE`].
    pub title: Option<String>,
    pub size: FigureSize,
    pub read: ReadOptions,
}

impl ChartRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, selector: Selector) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            selector,
            title: None,
            size: FigureSize::default(),
            read: ReadOptions::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// What a chart run produced.
#[derive(Debug, Clone)]
pub struct ChartOutcome {
    pub output: PathBuf,
    pub points: usize,
    pub bytes: usize,
}

/// Serialization used by `carelog series`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFormat {
    Csv,
    Json,
}

/// Column summary of a CSV file.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub input: PathBuf,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

/// File name used when `carelog chart` is given no `--output`.
pub fn default_chart_path(selector: Selector) -> PathBuf {
    match selector {
        Selector::Diaper => PathBuf::from("diaper_types.png"),
        other => PathBuf::from(format!("{}.png", other.as_str().replace('-', "_"))),
    }
}

pub fn run_summary(input: &Path, read: &ReadOptions) -> Result<SummaryReport> {
    let span = info_span!("summary", input = %input.display());
    let _guard = span.enter();
    let df = read_csv_frame(input, read)?;
    let columns = summarize_frame(&df).context("summarize columns")?;
    info!(rows = df.height(), columns = columns.len(), "summarized event log");
    Ok(SummaryReport {
        input: input.to_path_buf(),
        rows: df.height(),
        columns,
    })
}

/// Load `input` and derive the series for `selector`.
pub fn load_series(input: &Path, selector: Selector, read: &ReadOptions) -> Result<DerivedSeries> {
    let table = read_events(input, read)?;
    let series = derive_series(&table, selector)
        .with_context(|| format!("build {selector} series from {}", input.display()))?;
    Ok(series)
}

pub fn run_chart(request: &ChartRequest) -> Result<ChartOutcome> {
    let span = info_span!(
        "chart",
        input = %request.input.display(),
        selector = %request.selector
    );
    let _guard = span.enter();

    let series = load_series(&request.input, request.selector, &request.read)?;
    let figure = build_figure(&series, request.title.as_deref()).with_size(request.size);
    let image = PlottersRenderer::new()
        .render(&figure)
        .context("render chart")?;
    image.save(&request.output)?;

    Ok(ChartOutcome {
        output: request.output.clone(),
        points: series_len(&series),
        bytes: image.png.len(),
    })
}

/// Entry point of the `diaper-types` batch program.
pub fn run_diaper_types(input: &Path, output: &Path) -> Result<ChartOutcome> {
    let request = ChartRequest::new(input, output, Selector::Diaper).with_title(BATCH_TITLE);
    run_chart(&request)
}

/// Export a derived series to `output`, or stdout when `output` is `None`.
pub fn run_series(
    input: &Path,
    selector: Selector,
    format: SeriesFormat,
    output: Option<&Path>,
    read: &ReadOptions,
) -> Result<()> {
    let span = info_span!("series", input = %input.display(), selector = %selector);
    let _guard = span.enter();

    let series = load_series(input, selector, read)?;
    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_series(&series, format, &mut writer)?;
            writer
                .flush()
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote series");
        }
        None => {
            let stdout = io::stdout();
            write_series(&series, format, stdout.lock())?;
        }
    }
    Ok(())
}

pub fn write_series<W: Write>(
    series: &DerivedSeries,
    format: SeriesFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        SeriesFormat::Csv => write_series_csv(series, writer).context("write series CSV")?,
        SeriesFormat::Json => {
            let json = series_to_json(series).context("serialize series")?;
            writeln!(writer, "{json}").context("write series JSON")?;
        }
    }
    Ok(())
}

fn build_figure(series: &DerivedSeries, title: Option<&str>) -> Figure {
    match (series, title) {
        (DerivedSeries::Counts(counts), title) => {
            Figure::bar(counts, title.unwrap_or(DEFAULT_BAR_TITLE))
        }
        (DerivedSeries::Cumulative(series), Some(title)) => {
            Figure::cumulative(series).with_title(title)
        }
        (DerivedSeries::Cumulative(series), None) => Figure::cumulative(series),
    }
}

fn series_len(series: &DerivedSeries) -> usize {
    match series {
        DerivedSeries::Counts(counts) => counts.labelled().count(),
        DerivedSeries::Cumulative(series) => series.len(),
    }
}
