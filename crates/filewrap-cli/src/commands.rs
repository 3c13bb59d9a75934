use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use filewrap::{CloseOutcome, ClosingPolicy, LineDocument, NumericTable, range, stats};
use tracing::{debug, info};

use crate::cli::{FilterArgs, LinesArgs, SortArgs, StatsArgs, bounds};

/// What `filter` did to a document.
#[derive(Debug)]
pub struct FilterResult {
    pub removed: usize,
    pub kept: usize,
    pub outcome: CloseOutcome,
}

/// Which rows `stats` aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    All,
    Row(usize),
    Rows(usize, usize),
}

/// Aggregates for one scope of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsResult {
    pub scope: StatsScope,
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

/// Print lines `from..=to` of a text file.
pub fn run_lines<W: Write>(args: &LinesArgs, out: &mut W) -> Result<usize> {
    let mut doc = LineDocument::new();
    doc.load_from(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;

    let to = args.to.unwrap_or(usize::MAX);
    let selected = doc.get_range(args.from, to);
    for line in selected {
        writeln!(out, "{line}").context("write output")?;
    }
    debug!(file = %args.file.display(), lines = selected.len(), "printed lines");
    Ok(selected.len())
}

/// Remove lines containing a pattern and close the document with the
/// requested policy.
pub fn run_filter(args: &FilterArgs) -> Result<FilterResult> {
    let mut doc = LineDocument::with_policy(ClosingPolicy::from(args.policy));
    doc.load_from(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    doc.set_path(target(&args.file, args.output.as_ref()));

    let pattern = args.contains.as_str();
    let matches = |line: &str| line.contains(pattern);
    let removed = match bounds(args.range.as_deref()) {
        Some((low, high)) => doc.remove_range_if(low, high, matches),
        None => doc.clear_if(matches),
    };
    let kept = doc.len();
    info!(removed, kept, policy = %doc.policy(), "filtered document");

    Ok(FilterResult {
        removed,
        kept,
        outcome: doc.close(),
    })
}

/// Aggregate a numeric table over the requested rows.
pub fn run_stats(args: &StatsArgs) -> Result<StatsResult> {
    let table = load_table(&args.file, ClosingPolicy::Discard)?;
    let scope = match (args.row, bounds(args.rows.as_deref())) {
        (Some(row), _) => StatsScope::Row(row),
        (None, Some((low, high))) => StatsScope::Rows(low, high),
        (None, None) => StatsScope::All,
    };
    Ok(aggregate(&table, scope))
}

/// Sort the entries within every row and close the table with `Flush`.
pub fn run_sort(args: &SortArgs) -> Result<CloseOutcome> {
    let mut table = load_table(&args.file, ClosingPolicy::Flush)?;
    table.set_path(target(&args.file, args.output.as_ref()));

    if args.descending {
        table.sort_all_by(|a, b| b.total_cmp(a));
    } else {
        table.sort_all();
    }
    info!(rows = table.len(), descending = args.descending, "sorted table");
    Ok(table.close())
}

pub fn aggregate(table: &NumericTable, scope: StatsScope) -> StatsResult {
    match scope {
        StatsScope::All => StatsResult {
            scope,
            count: table.entry_count(),
            sum: table.sum_all(),
            mean: table.mean_all(),
            variance: table.variance_all(),
            std_dev: table.std_dev_all(),
        },
        StatsScope::Row(row) => StatsResult {
            scope,
            count: table.row_len(row),
            sum: table.sum(row),
            mean: table.mean(row),
            variance: table.variance(row),
            std_dev: table.std_dev(row),
        },
        StatsScope::Rows(low, high) => {
            let count = range::clamp(low, high, table.len())
                .map_or(0, |span| stats::count(&table.rows()[span]));
            StatsResult {
                scope,
                count,
                sum: table.sum_range(low, high),
                mean: table.mean_range(low, high),
                variance: table.variance_range(low, high),
                std_dev: table.std_dev_range(low, high),
            }
        }
    }
}

fn load_table(path: &Path, policy: ClosingPolicy) -> Result<NumericTable> {
    let mut table = NumericTable::with_policy(policy);
    table
        .load_from(path)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(table)
}

fn target(file: &Path, output: Option<&PathBuf>) -> PathBuf {
    output.cloned().unwrap_or_else(|| file.to_path_buf())
}
