//! Batch chart of diaper outcomes: `diaper-types <INPUT> <OUTPUT>`.

use std::path::PathBuf;

use clap::Parser;

use carelog_cli::commands::run_diaper_types;
use carelog_cli::logging::{LogConfig, init_logging};
use carelog_cli::summary::print_chart_outcome;

#[derive(Parser)]
#[command(
    name = "diaper-types",
    version,
    about = "Render a bar chart of diaper outcomes from an event-log CSV"
)]
struct Args {
    /// Event-log CSV exported from the tracker app.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path of the PNG to write.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(error) = init_logging(&LogConfig::default()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    match run_diaper_types(&args.input, &args.output) {
        Ok(outcome) => print_chart_outcome(&outcome),
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}
