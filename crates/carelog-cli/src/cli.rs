//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use carelog_cli::commands::SeriesFormat;
use carelog_ingest::ReadOptions;
use carelog_model::Selector;
use carelog_render::FigureSize;

#[derive(Parser)]
#[command(
    name = "carelog",
    version,
    about = "Charts and summaries for infant-care event logs",
    long_about = "Summarize an exported baby-tracker CSV and chart diaper changes,\n\
                  nursing time and bottle volume.\n\n\
                  Dates in the Start column may be M/D/YY or YYYY/MM/DD; one format\n\
                  is chosen for the whole file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print per-column statistics of an event-log CSV.
    Summary(SummaryArgs),

    /// Render a chart of one derived series to PNG.
    Chart(ChartArgs),

    /// Export a derived series as CSV or JSON.
    Series(SeriesArgs),

    /// List the chart kinds accepted by --kind.
    Kinds,
}

/// CSV reading flags shared by every command that loads a file.
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Event-log CSV exported from the tracker app.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Field delimiter.
    #[arg(long = "delimiter", default_value_t = ',')]
    pub delimiter: char,

    /// Rows scanned to infer column types (0 scans the whole file).
    #[arg(long = "infer-rows", default_value_t = 1000)]
    pub infer_rows: usize,
}

impl InputArgs {
    pub fn read_options(&self) -> ReadOptions {
        let infer = (self.infer_rows > 0).then_some(self.infer_rows);
        ReadOptions::default()
            .with_separator(u8::try_from(self.delimiter).unwrap_or(b','))
            .with_infer_schema_length(infer)
    }
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Series to chart (see `carelog kinds`).
    #[arg(long = "kind", default_value = "diaper", value_parser = parse_selector)]
    pub kind: Selector,

    /// Chart title. Diaper outcome charts default to "Types of Diapers".
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Output PNG path (default: <kind>.png in the current directory).
    #[arg(long = "output", short = 'o', value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long = "width", default_value_t = FigureSize::default().width)]
    pub width: u32,

    /// Image height in pixels.
    #[arg(long = "height", default_value_t = FigureSize::default().height)]
    pub height: u32,
}

impl ChartArgs {
    pub fn size(&self) -> FigureSize {
        FigureSize::new(self.width, self.height)
    }
}

#[derive(Args)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Series to export (see `carelog kinds`).
    #[arg(long = "kind", default_value = "diaper", value_parser = parse_selector)]
    pub kind: Selector,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: SeriesFormatArg,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

fn parse_selector(value: &str) -> Result<Selector, String> {
    value.parse().map_err(|err: carelog_model::PipelineError| err.to_string())
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SeriesFormatArg {
    Csv,
    Json,
}

impl From<SeriesFormatArg> for SeriesFormat {
    fn from(value: SeriesFormatArg) -> Self {
        match value {
            SeriesFormatArg::Csv => SeriesFormat::Csv,
            SeriesFormatArg::Json => SeriesFormat::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_defaults() {
        let cli = Cli::try_parse_from(["carelog", "chart", "log.csv"]).unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart command");
        };
        assert_eq!(args.kind, Selector::Diaper);
        assert_eq!(args.size(), FigureSize::new(640, 480));
        assert_eq!(args.title, None);
        assert_eq!(args.output, None);
        assert_eq!(args.input.read_options().separator, b',');
    }

    #[test]
    fn chart_kind_accepts_dashboard_labels() {
        let cli =
            Cli::try_parse_from(["carelog", "chart", "log.csv", "--kind", "Breast Feeding"])
                .unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart command");
        };
        assert_eq!(args.kind, Selector::Breastfeeding);
    }

    #[test]
    fn unknown_kind_is_rejected_with_selector_error() {
        let err = Cli::try_parse_from(["carelog", "series", "log.csv", "--kind", "Solids"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown chart selector: Solids"));
    }

    #[test]
    fn infer_rows_zero_scans_whole_file() {
        let cli = Cli::try_parse_from([
            "carelog",
            "summary",
            "log.csv",
            "--infer-rows",
            "0",
            "--delimiter",
            ";",
        ])
        .unwrap();
        let Command::Summary(args) = cli.command else {
            panic!("expected summary command");
        };
        let options = args.input.read_options();
        assert_eq!(options.infer_schema_length, None);
        assert_eq!(options.separator, b';');
    }
}
