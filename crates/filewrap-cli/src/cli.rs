//! CLI argument definitions for filewrap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use filewrap::ClosingPolicy;

#[derive(Parser)]
#[command(
    name = "filewrap",
    version,
    about = "Inspect and edit line files and numeric tables",
    long_about = "Inspect and edit line-oriented text files and whitespace-separated\n\
                  numeric tables. Edits are written back when the file is closed,\n\
                  either over the original or appended to a target file."
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

    /// Explicit log level (overrides -v/-q flags).
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
    /// Print a range of lines from a text file.
    Lines(LinesArgs),

    /// Drop lines containing a pattern and write the result.
    Filter(FilterArgs),

    /// Print aggregates over a numeric table.
    Stats(StatsArgs),

    /// Sort the entries within every row of a numeric table.
    Sort(SortArgs),
}

#[derive(Args)]
pub struct LinesArgs {
    /// Text file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// First line to print (0-based).
    #[arg(long = "from", value_name = "N", default_value_t = 0)]
    pub from: usize,

    /// Last line to print (0-based, inclusive; default: last line).
    #[arg(long = "to", value_name = "N")]
    pub to: Option<usize>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Text file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Remove lines containing this text.
    #[arg(long = "contains", value_name = "PAT")]
    pub contains: String,

    /// Only consider lines in this inclusive range (bounds in either order).
    #[arg(long = "range", num_args = 2, value_names = ["LOW", "HIGH"])]
    pub range: Option<Vec<usize>>,

    /// Write the result here instead of back to FILE.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// How the result is written.
    #[arg(long = "policy", value_enum, default_value = "flush")]
    pub policy: PolicyArg,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Numeric table to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Aggregate a single row.
    #[arg(long = "row", value_name = "N", conflicts_with = "rows")]
    pub row: Option<usize>,

    /// Aggregate an inclusive range of rows (bounds in either order).
    #[arg(long = "rows", num_args = 2, value_names = ["LOW", "HIGH"])]
    pub rows: Option<Vec<usize>>,
}

#[derive(Args)]
pub struct SortArgs {
    /// Numeric table to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sort largest first.
    #[arg(long = "descending")]
    pub descending: bool,

    /// Write the result here instead of back to FILE.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Closing policies that write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Overwrite the target.
    Flush,
    /// Add after the target's content.
    Append,
}

impl From<PolicyArg> for ClosingPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Flush => ClosingPolicy::Flush,
            PolicyArg::Append => ClosingPolicy::Append,
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

/// An optional `LOW HIGH` pair as collected by clap.
pub fn bounds(values: Option<&[usize]>) -> Option<(usize, usize)> {
    match values {
        Some(&[low, high]) => Some((low, high)),
        _ => None,
    }
}
