//! Jagged rows of floating-point entries.
//!
//! [`NumericTable`] follows the same fail-soft rules as
//! [`LineDocument`](crate::LineDocument), applied at two levels: a missing
//! row or entry reads as an empty row or `0.0`, and mutations against it
//! are no-ops. Rows may differ in length.

use std::cmp::Ordering;
use std::fmt;
use std::io::Write;
use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::error::{FileWrapError, Result};
use crate::io::{self, WriteMode};
use crate::policy::{self, CloseOutcome, ClosingPolicy};
use crate::range;
use crate::stats;

/// One row of entries.
pub type Row = Vec<f64>;

/// Numeric rows held in memory, optionally bound to a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericTable {
    rows: Vec<Row>,
    path: Option<PathBuf>,
    policy: ClosingPolicy,
}

impl NumericTable {
    /// An empty, unbound table that discards its rows on close.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty, unbound table with the given closing policy.
    pub fn with_policy(policy: ClosingPolicy) -> Self {
        Self {
            rows: Vec::new(),
            path: None,
            policy,
        }
    }

    /// A table bound to `path` and loaded from it.
    ///
    /// A file that cannot be read or parsed leaves the table empty; the
    /// failure is logged, not returned.
    pub fn open(path: impl Into<PathBuf>, policy: ClosingPolicy) -> Self {
        let mut table = Self::with_policy(policy);
        table.set_path(path);
        if table.path.is_some() {
            if let Err(error) = table.reload() {
                if error.is_not_found() {
                    tracing::debug!(%error, "starting with an empty table");
                } else {
                    tracing::warn!(%error, "failed to load table");
                }
            }
        }
        table
    }

    /// An unbound table holding `rows`.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Row>,
    {
        rows.into_iter().collect()
    }

    // === Path and policy ===

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Associate the table with `path`. An empty path unbinds it.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.path = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };
    }

    pub fn clear_path(&mut self) {
        self.path = None;
    }

    pub fn policy(&self) -> ClosingPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ClosingPolicy) {
        self.policy = policy;
    }

    // === Reads ===

    /// Entry `index` of row `row`, or `0.0` when either is out of range.
    pub fn entry(&self, row: usize, index: usize) -> f64 {
        self.rows
            .get(row)
            .and_then(|r| r.get(index))
            .copied()
            .unwrap_or(0.0)
    }

    /// Row `row`, or an empty slice when out of range.
    pub fn row(&self, row: usize) -> &[f64] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of entries in row `row`, or 0 when out of range.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Number of entries across all rows.
    pub fn entry_count(&self) -> usize {
        stats::count(&self.rows)
    }

    // === Entry mutation ===

    pub fn set_entry(&mut self, row: usize, index: usize, value: f64) {
        if let Some(entry) = self.entry_mut(row, index) {
            *entry = value;
        }
    }

    pub fn append_entry_to_row(&mut self, row: usize, value: f64) {
        if let Some(r) = self.rows.get_mut(row) {
            r.push(value);
        }
    }

    pub fn prepend_entry_to_row(&mut self, row: usize, value: f64) {
        if let Some(r) = self.rows.get_mut(row) {
            r.insert(0, value);
        }
    }

    /// Insert `value` before entry `index`; `index` must already exist.
    pub fn insert_entry_in_row(&mut self, row: usize, index: usize, value: f64) {
        if let Some(r) = self.rows.get_mut(row) {
            if index < r.len() {
                r.insert(index, value);
            }
        }
    }

    pub fn remove_entry(&mut self, row: usize, index: usize) {
        if let Some(r) = self.rows.get_mut(row) {
            if index < r.len() {
                r.remove(index);
            }
        }
    }

    // === Row mutation ===

    pub fn append_row(&mut self, values: impl Into<Row>) {
        self.rows.push(values.into());
    }

    pub fn prepend_row(&mut self, values: impl Into<Row>) {
        self.rows.insert(0, values.into());
    }

    /// Insert a row before `row`; `row` must already exist.
    ///
    /// Use [`append_row`](Self::append_row) to add past the end.
    pub fn insert_row_at(&mut self, row: usize, values: impl Into<Row>) {
        if row < self.rows.len() {
            self.rows.insert(row, values.into());
        }
    }

    pub fn remove_row(&mut self, row: usize) {
        if row < self.rows.len() {
            self.rows.remove(row);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    // === Transforms ===

    pub fn transform_entry<F>(&mut self, row: usize, index: usize, f: F)
    where
        F: FnOnce(f64) -> f64,
    {
        if let Some(entry) = self.entry_mut(row, index) {
            *entry = f(*entry);
        }
    }

    /// Apply `f` to entries `low..=high` of one row.
    pub fn transform_entries_in_row<F>(&mut self, row: usize, low: usize, high: usize, f: F)
    where
        F: FnMut(f64) -> f64,
    {
        if let Some(r) = self.rows.get_mut(row) {
            apply_in_range(r, low, high, f);
        }
    }

    /// Apply `f` to entry `index` of each row in `low..=high`.
    ///
    /// Rows too short to have that entry are skipped.
    pub fn transform_entry_across_rows<F>(&mut self, index: usize, low: usize, high: usize, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        for r in self.span_mut(low, high) {
            if let Some(entry) = r.get_mut(index) {
                *entry = f(*entry);
            }
        }
    }

    /// Apply `f` to entries `low_entry..=high_entry` of each row in
    /// `low..=high`, clamping the entry range to each row separately.
    pub fn transform_entries_across_rows<F>(
        &mut self,
        low_entry: usize,
        high_entry: usize,
        low: usize,
        high: usize,
        mut f: F,
    ) where
        F: FnMut(f64) -> f64,
    {
        for r in self.span_mut(low, high) {
            apply_in_range(r, low_entry, high_entry, &mut f);
        }
    }

    /// Apply `f` to every entry of one row.
    pub fn transform_row<F>(&mut self, row: usize, f: F)
    where
        F: FnMut(f64) -> f64,
    {
        if let Some(r) = self.rows.get_mut(row) {
            apply(r, f);
        }
    }

    /// Apply `f` to every entry of each row in `low..=high`.
    pub fn transform_rows<F>(&mut self, low: usize, high: usize, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        for r in self.span_mut(low, high) {
            apply(r, &mut f);
        }
    }

    pub fn transform_all<F>(&mut self, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        for r in &mut self.rows {
            apply(r, &mut f);
        }
    }

    // === Sorting ===
    //
    // Entries are sorted within each targeted row; rows keep their order.

    /// Sort one row ascending.
    pub fn sort_row(&mut self, row: usize) {
        self.sort_row_by(row, f64::total_cmp);
    }

    pub fn sort_row_by<C>(&mut self, row: usize, compare: C)
    where
        C: FnMut(&f64, &f64) -> Ordering,
    {
        if let Some(r) = self.rows.get_mut(row) {
            r.sort_by(compare);
        }
    }

    /// Sort each row in `low..=high` ascending.
    pub fn sort_rows(&mut self, low: usize, high: usize) {
        self.sort_rows_by(low, high, f64::total_cmp);
    }

    pub fn sort_rows_by<C>(&mut self, low: usize, high: usize, mut compare: C)
    where
        C: FnMut(&f64, &f64) -> Ordering,
    {
        for r in self.span_mut(low, high) {
            r.sort_by(&mut compare);
        }
    }

    /// Sort every row ascending.
    pub fn sort_all(&mut self) {
        self.sort_all_by(f64::total_cmp);
    }

    pub fn sort_all_by<C>(&mut self, mut compare: C)
    where
        C: FnMut(&f64, &f64) -> Ordering,
    {
        for r in &mut self.rows {
            r.sort_by(&mut compare);
        }
    }

    // === Aggregates ===
    //
    // A missing row or an out-of-range span aggregates to 0.

    pub fn sum(&self, row: usize) -> f64 {
        stats::sum(self.single(row))
    }

    pub fn sum_range(&self, low: usize, high: usize) -> f64 {
        stats::sum(self.span(low, high))
    }

    pub fn sum_all(&self) -> f64 {
        stats::sum(&self.rows)
    }

    pub fn mean(&self, row: usize) -> f64 {
        stats::mean(self.single(row))
    }

    /// Mean over every entry in `low..=high`, weighted by entry count.
    pub fn mean_range(&self, low: usize, high: usize) -> f64 {
        stats::mean(self.span(low, high))
    }

    pub fn mean_all(&self) -> f64 {
        stats::mean(&self.rows)
    }

    pub fn variance(&self, row: usize) -> f64 {
        stats::variance(self.single(row))
    }

    /// Population variance of every entry in `low..=high` around the
    /// range mean.
    pub fn variance_range(&self, low: usize, high: usize) -> f64 {
        stats::variance(self.span(low, high))
    }

    pub fn variance_all(&self) -> f64 {
        stats::variance(&self.rows)
    }

    pub fn std_dev(&self, row: usize) -> f64 {
        stats::std_dev(self.single(row))
    }

    pub fn std_dev_range(&self, low: usize, high: usize) -> f64 {
        stats::std_dev(self.span(low, high))
    }

    pub fn std_dev_all(&self) -> f64 {
        stats::std_dev(&self.rows)
    }

    /// `f(row)`, or 0 when the row does not exist.
    pub fn compute_row<F>(&self, row: usize, f: F) -> f64
    where
        F: FnOnce(&[f64]) -> f64,
    {
        self.rows.get(row).map_or(0.0, |r| f(r))
    }

    // === Storage ===

    /// Replace the rows with the content of the associated path.
    pub fn reload(&mut self) -> Result<usize> {
        let path = self
            .path
            .clone()
            .ok_or(FileWrapError::NoPath { operation: "reload" })?;
        self.load_from(&path)
    }

    /// Replace the rows with the content of `path`.
    ///
    /// The associated path is unchanged. On error the current rows are
    /// kept.
    pub fn load_from(&mut self, path: &Path) -> Result<usize> {
        self.rows = io::read_rows(path)?;
        Ok(self.rows.len())
    }

    /// Add the rows of `path` after the current rows.
    pub fn load_and_append(&mut self, path: &Path) -> Result<usize> {
        let loaded = io::read_rows(path)?;
        let count = loaded.len();
        self.rows.extend(loaded);
        Ok(count)
    }

    /// Add the rows of `path` before the current rows, in file order.
    pub fn load_and_prepend(&mut self, path: &Path) -> Result<usize> {
        let loaded = io::read_rows(path)?;
        let count = loaded.len();
        self.rows.splice(0..0, loaded);
        Ok(count)
    }

    /// Overwrite the associated path with the current rows.
    pub fn save(&self) -> Result<usize> {
        let path = self.require_path("save")?;
        self.save_to(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<usize> {
        io::write_lines(path, self.formatted_rows(), WriteMode::Overwrite)
    }

    /// Add the current rows after the content of the associated path.
    pub fn append_to_file(&self) -> Result<usize> {
        let path = self.require_path("append")?;
        self.append_to_file_at(path)
    }

    pub fn append_to_file_at(&self, path: &Path) -> Result<usize> {
        io::write_lines(path, self.formatted_rows(), WriteMode::Append)
    }

    /// Write every row as a line of space-separated numbers.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        io::write_lines_to(writer, self.formatted_rows()).map(|_| ())
    }

    /// Run the closing policy and consume the table.
    pub fn close(mut self) -> CloseOutcome {
        let outcome = self.run_closing_policy();
        self.policy = ClosingPolicy::Discard;
        outcome
    }

    fn run_closing_policy(&self) -> CloseOutcome {
        policy::close_with("table", self.policy, self.path(), self.formatted_rows())
    }

    fn formatted_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|r| io::format_row(r))
    }

    fn require_path(&self, operation: &'static str) -> Result<&Path> {
        self.path().ok_or(FileWrapError::NoPath { operation })
    }

    fn entry_mut(&mut self, row: usize, index: usize) -> Option<&mut f64> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(index))
    }

    /// Row `row` as a one-row span, or an empty span.
    fn single(&self, row: usize) -> &[Row] {
        self.rows.get(row..=row).unwrap_or(&[])
    }

    fn span(&self, low: usize, high: usize) -> &[Row] {
        match range::clamp(low, high, self.rows.len()) {
            Some(range) => &self.rows[range],
            None => &[],
        }
    }

    fn span_mut(&mut self, low: usize, high: usize) -> &mut [Row] {
        match range::clamp(low, high, self.rows.len()) {
            Some(range) => &mut self.rows[range],
            None => &mut [],
        }
    }
}

fn apply<F>(row: &mut [f64], mut f: F)
where
    F: FnMut(f64) -> f64,
{
    for entry in row {
        *entry = f(*entry);
    }
}

fn apply_in_range<F>(row: &mut [f64], low: usize, high: usize, f: F)
where
    F: FnMut(f64) -> f64,
{
    if let Some(range) = range::clamp(low, high, row.len()) {
        apply(&mut row[range], f);
    }
}

impl Drop for NumericTable {
    fn drop(&mut self) {
        if self.policy != ClosingPolicy::Discard {
            tracing::debug!(policy = %self.policy, "table dropped without close");
            self.run_closing_policy();
        }
    }
}

impl Index<usize> for NumericTable {
    type Output = [f64];

    /// Panics when `row` is out of range; use [`NumericTable::row`] for the
    /// non-panicking read.
    fn index(&self, row: usize) -> &[f64] {
        &self.rows[row]
    }
}

impl<'a> IntoIterator for &'a NumericTable {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<R: Into<Row>> FromIterator<R> for NumericTable {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(Into::into).collect(),
            path: None,
            policy: ClosingPolicy::Discard,
        }
    }
}

impl<R: Into<Row>> Extend<R> for NumericTable {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.rows.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for NumericTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.formatted_rows() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
