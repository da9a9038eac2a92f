//! Care-log CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use carelog_cli::commands::{
    ChartRequest, default_chart_path, run_chart, run_series, run_summary,
};
use carelog_cli::logging::{LogConfig, LogFormat, init_logging};
use carelog_cli::summary::{print_chart_outcome, print_selectors, print_summary};

mod cli;

use crate::cli::{ChartArgs, Cli, Command, LogFormatArg, LogLevelArg, SeriesArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Summary(args) => {
            run_summary(&args.input.input, &args.input.read_options()).map(|report| {
                print_summary(&report);
            })
        }
        Command::Chart(args) => run_chart(&chart_request(args)).map(|outcome| {
            print_chart_outcome(&outcome);
        }),
        Command::Series(args) => series(args),
        Command::Kinds => {
            print_selectors();
            Ok(())
        }
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn chart_request(args: &ChartArgs) -> ChartRequest {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_chart_path(args.kind));
    ChartRequest {
        input: args.input.input.clone(),
        output,
        selector: args.kind,
        title: args.title.clone(),
        size: args.size(),
        read: args.input.read_options(),
    }
}

fn series(args: &SeriesArgs) -> anyhow::Result<()> {
    run_series(
        &args.input.input,
        args.kind,
        args.format.into(),
        args.output.as_deref(),
        &args.input.read_options(),
    )
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
