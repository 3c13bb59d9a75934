//! filewrap CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use filewrap_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use filewrap_cli::commands::{run_filter, run_lines, run_sort, run_stats};
use filewrap_cli::logging::{LogConfig, LogFormat, init_logging};
use filewrap_cli::summary::{print_filter, print_stats, report_outcome};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Lines(args) => match run_lines(args, &mut io::stdout().lock()) {
            Ok(_) => 0,
            Err(error) => fail(&error),
        },
        Command::Filter(args) => match run_filter(args) {
            Ok(result) => {
                print_filter(&result);
                report_outcome(&result.outcome)
            }
            Err(error) => fail(&error),
        },
        Command::Stats(args) => match run_stats(args) {
            Ok(result) => {
                print_stats(&result);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Sort(args) => match run_sort(args) {
            Ok(outcome) => report_outcome(&outcome),
            Err(error) => fail(&error),
        },
    };
    std::process::exit(exit_code);
}

fn fail(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level(cli.verbosity.tracing_level_filter())
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_log_file(cli.log_file.clone());
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
