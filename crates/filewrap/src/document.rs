//! An ordered, index-addressable sequence of text lines.
//!
//! Index misuse never fails: out-of-range reads return `""` or an empty
//! slice and out-of-range mutations are no-ops. Ranged operations take an
//! inclusive `(low, high)` pair in either order and clamp it to the
//! document (see [`crate::range`]).
//!
//! A document may be bound to a path and carries a [`ClosingPolicy`] that
//! decides what happens to its lines when it is closed. Call
//! [`LineDocument::close`] to run the policy and inspect the outcome; a
//! document that is dropped without being closed runs the same policy from
//! its `Drop` impl.

use std::fmt;
use std::io::Write;
use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::error::{FileWrapError, Result};
use crate::io::{self, WriteMode};
use crate::policy::{self, CloseOutcome, ClosingPolicy};
use crate::range;

/// Text lines held in memory, optionally bound to a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDocument {
    lines: Vec<String>,
    path: Option<PathBuf>,
    policy: ClosingPolicy,
}

impl LineDocument {
    /// An empty, unbound document that discards its lines on close.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty, unbound document with the given closing policy.
    pub fn with_policy(policy: ClosingPolicy) -> Self {
        Self {
            lines: Vec::new(),
            path: None,
            policy,
        }
    }

    /// A document bound to `path` and loaded from it.
    ///
    /// A file that cannot be read leaves the document empty; the failure is
    /// logged, not returned.
    pub fn open(path: impl Into<PathBuf>, policy: ClosingPolicy) -> Self {
        let mut document = Self::with_policy(policy);
        document.set_path(path);
        if document.path.is_some() {
            if let Err(error) = document.reload() {
                log_load_failure(&error);
            }
        }
        document
    }

    /// An unbound document holding `lines`.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        lines.into_iter().collect()
    }

    // === Path and policy ===

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Associate the document with `path`. An empty path unbinds it.
    ///
    /// Held lines and any previously associated file are left untouched.
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

    /// Line `index`, or `""` when out of range.
    pub fn get(&self, index: usize) -> &str {
        self.lines.get(index).map_or("", String::as_str)
    }

    /// First line, or `""` when empty.
    pub fn first(&self) -> &str {
        self.lines.first().map_or("", String::as_str)
    }

    /// Last line, or `""` when empty.
    pub fn last(&self) -> &str {
        self.lines.last().map_or("", String::as_str)
    }

    /// Lines in the inclusive range, clamped to the document.
    pub fn get_range(&self, low: usize, high: usize) -> &[String] {
        match range::clamp(low, high, self.lines.len()) {
            Some(range) => &self.lines[range],
            None => &[],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Length of line `index` in bytes, or 0 when out of range.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, String::len)
    }

    /// Index of the first line containing `pattern`.
    pub fn find(&self, pattern: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.contains(pattern))
    }

    /// Index of the last line containing `pattern`.
    pub fn rfind(&self, pattern: &str) -> Option<usize> {
        self.lines.iter().rposition(|line| line.contains(pattern))
    }

    // === Single-line mutation ===

    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = value.into();
        }
    }

    /// Add `text` to the end of line `index`.
    pub fn append_to(&mut self, index: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.push_str(text);
        }
    }

    /// Add `text` to the start of line `index`.
    pub fn prepend_to(&mut self, index: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.insert_str(0, text);
        }
    }

    pub fn append(&mut self, value: impl Into<String>) {
        self.lines.push(value.into());
    }

    pub fn prepend(&mut self, value: impl Into<String>) {
        self.lines.insert(0, value.into());
    }

    /// Insert a line before `index`.
    ///
    /// Only existing indices are accepted; use [`append`](Self::append) to
    /// add past the end.
    pub fn insert_before(&mut self, index: usize, value: impl Into<String>) {
        if index < self.lines.len() {
            self.lines.insert(index, value.into());
        }
    }

    // === Removal ===

    pub fn remove_at(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Remove line `index` if it exists and satisfies `predicate`.
    pub fn remove_if<P>(&mut self, index: usize, mut predicate: P)
    where
        P: FnMut(&str) -> bool,
    {
        if self.lines.get(index).is_some_and(|line| predicate(line)) {
            self.lines.remove(index);
        }
    }

    /// Remove every line in the inclusive range.
    pub fn remove_range(&mut self, low: usize, high: usize) {
        if let Some(range) = range::clamp(low, high, self.lines.len()) {
            self.lines.drain(range);
        }
    }

    /// Remove lines in the inclusive range that satisfy `predicate`.
    ///
    /// Each line originally inside the range is tested exactly once, left to
    /// right. Returns the number of lines removed.
    pub fn remove_range_if<P>(&mut self, low: usize, high: usize, mut predicate: P) -> usize
    where
        P: FnMut(&str) -> bool,
    {
        let Some(range) = range::clamp(low, high, self.lines.len()) else {
            return 0;
        };
        let (mut cursor, mut upper) = range.into_inner();
        let mut removed = 0;

        while cursor <= upper && cursor < self.lines.len() {
            if predicate(&self.lines[cursor]) {
                self.lines.remove(cursor);
                removed += 1;
                // The next line slid into `cursor`; the range end moved with it.
                match upper.checked_sub(1) {
                    Some(next) => upper = next,
                    None => break,
                }
            } else {
                cursor += 1;
            }
        }
        removed
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Remove every line that satisfies `predicate`.
    pub fn clear_if<P>(&mut self, predicate: P) -> usize
    where
        P: FnMut(&str) -> bool,
    {
        if self.lines.is_empty() {
            return 0;
        }
        self.remove_range_if(0, self.lines.len() - 1, predicate)
    }

    // === Transforms ===

    /// Replace line `index` with `f(line)`.
    pub fn transform_at<F>(&mut self, index: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        if let Some(line) = self.lines.get_mut(index) {
            *line = f(line.as_str());
        }
    }

    /// Replace each line in the inclusive range with `f(line)`.
    pub fn transform_range<F>(&mut self, low: usize, high: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        if let Some(range) = range::clamp(low, high, self.lines.len()) {
            for line in &mut self.lines[range] {
                *line = f(line.as_str());
            }
        }
    }

    /// Replace every line with `f(line)`.
    pub fn transform_all<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for line in &mut self.lines {
            *line = f(line.as_str());
        }
    }

    // === Merging ===

    /// Add `source` lines after the last line, in source order.
    pub fn merge_append<I>(&mut self, source: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lines.extend(source.into_iter().map(Into::into));
    }

    /// Add `source` lines before the first line, in source order.
    pub fn merge_prepend<I>(&mut self, source: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lines.splice(0..0, source.into_iter().map(Into::into));
    }

    /// Insert `source` lines as a contiguous block starting at `index`.
    ///
    /// Like [`insert_before`](Self::insert_before), `index` must be an
    /// existing line.
    pub fn merge_insert<I>(&mut self, index: usize, source: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if index < self.lines.len() {
            self.lines
                .splice(index..index, source.into_iter().map(Into::into));
        }
    }

    // === Storage ===

    /// Replace the lines with the content of the associated path.
    ///
    /// Returns the number of lines read.
    pub fn reload(&mut self) -> Result<usize> {
        let path = self
            .path
            .clone()
            .ok_or(FileWrapError::NoPath { operation: "reload" })?;
        self.load_from(&path)
    }

    /// Replace the lines with the content of `path`.
    ///
    /// The associated path is unchanged. On error the current lines are
    /// kept.
    pub fn load_from(&mut self, path: &Path) -> Result<usize> {
        self.lines = io::read_lines(path)?;
        Ok(self.lines.len())
    }

    /// Add the content of `path` after the current lines.
    pub fn load_and_append(&mut self, path: &Path) -> Result<usize> {
        let loaded = io::read_lines(path)?;
        let count = loaded.len();
        self.merge_append(loaded);
        Ok(count)
    }

    /// Add the content of `path` before the current lines, in file order.
    pub fn load_and_prepend(&mut self, path: &Path) -> Result<usize> {
        let loaded = io::read_lines(path)?;
        let count = loaded.len();
        self.merge_prepend(loaded);
        Ok(count)
    }

    /// Overwrite the associated path with the current lines.
    pub fn save(&self) -> Result<usize> {
        let path = self.require_path("save")?;
        self.save_to(path)
    }

    /// Overwrite `path` with the current lines.
    pub fn save_to(&self, path: &Path) -> Result<usize> {
        io::write_lines(path, &self.lines, WriteMode::Overwrite)
    }

    /// Add the current lines after the content of the associated path.
    pub fn append_to_file(&self) -> Result<usize> {
        let path = self.require_path("append")?;
        self.append_to_file_at(path)
    }

    /// Add the current lines after the content of `path`.
    pub fn append_to_file_at(&self, path: &Path) -> Result<usize> {
        io::write_lines(path, &self.lines, WriteMode::Append)
    }

    /// Write every line, newline-terminated, to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        io::write_lines_to(writer, &self.lines).map(|_| ())
    }

    /// Run the closing policy and consume the document.
    pub fn close(mut self) -> CloseOutcome {
        let outcome = self.run_closing_policy();
        self.policy = ClosingPolicy::Discard;
        outcome
    }

    fn run_closing_policy(&self) -> CloseOutcome {
        policy::close_with("document", self.policy, self.path(), &self.lines)
    }

    fn require_path(&self, operation: &'static str) -> Result<&Path> {
        self.path().ok_or(FileWrapError::NoPath { operation })
    }
}

fn log_load_failure(error: &FileWrapError) {
    if error.is_not_found() {
        tracing::debug!(%error, "starting with an empty document");
    } else {
        tracing::warn!(%error, "failed to load document");
    }
}

impl Drop for LineDocument {
    fn drop(&mut self) {
        if self.policy != ClosingPolicy::Discard {
            tracing::debug!(policy = %self.policy, "document dropped without close");
            self.run_closing_policy();
        }
    }
}

impl Index<usize> for LineDocument {
    type Output = str;

    /// Panics when `index` is out of range; use [`LineDocument::get`] for
    /// the non-panicking read.
    fn index(&self, index: usize) -> &str {
        &self.lines[index]
    }
}

impl<'a> IntoIterator for &'a LineDocument {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for LineDocument {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
            path: None,
            policy: ClosingPolicy::Discard,
        }
    }
}

impl<S: Into<String>> Extend<S> for LineDocument {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.merge_append(iter);
    }
}

impl fmt::Display for LineDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> LineDocument {
        LineDocument::from_lines(lines.iter().copied())
    }

    #[test]
    fn test_get_out_of_range() {
        let document = doc(&["a", "b"]);
        assert_eq!(document.get(1), "b");
        assert_eq!(document.get(2), "");
        assert_eq!(LineDocument::new().first(), "");
        assert_eq!(LineDocument::new().last(), "");
    }

    #[test]
    fn test_first_and_last() {
        let document = doc(&["a", "b", "c"]);
        assert_eq!(document.first(), "a");
        assert_eq!(document.last(), "c");
    }

    #[test]
    fn test_get_range_clamps() {
        let document = doc(&["a", "b", "c", "d"]);
        assert_eq!(document.get_range(1, 2), ["b", "c"]);
        assert_eq!(document.get_range(2, 1), ["b", "c"]);
        assert_eq!(document.get_range(2, 99), ["c", "d"]);
        assert!(document.get_range(4, 9).is_empty());
    }

    #[test]
    fn test_set_and_edit_in_place() {
        let mut document = doc(&["mid"]);
        document.set(0, "middle");
        document.append_to(0, "!");
        document.prepend_to(0, "> ");
        document.set(5, "ignored");
        document.append_to(5, "ignored");
        document.prepend_to(5, "ignored");
        assert_eq!(document.lines(), ["> middle!"]);
    }

    #[test]
    fn test_append_and_prepend() {
        let mut document = LineDocument::new();
        document.append("b");
        document.prepend("a");
        document.append("c");
        assert_eq!(document.lines(), ["a", "b", "c"]);
    }

    #[test]
    fn test_insert_before_requires_existing_index() {
        let mut document = doc(&["a", "c"]);
        document.insert_before(1, "b");
        assert_eq!(document.lines(), ["a", "b", "c"]);

        document.insert_before(3, "d");
        assert_eq!(document.len(), 3);

        let mut empty = LineDocument::new();
        empty.insert_before(0, "x");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_remove_at_and_remove_if() {
        let mut document = doc(&["a", "b", "c"]);
        document.remove_at(7);
        document.remove_at(0);
        assert_eq!(document.lines(), ["b", "c"]);

        document.remove_if(0, |line| line == "c");
        assert_eq!(document.lines(), ["b", "c"]);
        document.remove_if(1, |line| line == "c");
        assert_eq!(document.lines(), ["b"]);
    }

    #[test]
    fn test_remove_range() {
        let mut document = doc(&["a", "b", "c", "d"]);
        document.remove_range(3, 1);
        assert_eq!(document.lines(), ["a"]);
        document.remove_range(1, 5);
        assert_eq!(document.lines(), ["a"]);
    }

    #[test]
    fn test_remove_range_if_middle() {
        let mut document = doc(&["a", "b", "c"]);
        let removed = document.remove_range_if(0, 2, |line| line == "b");
        assert_eq!(removed, 1);
        assert_eq!(document.lines(), ["a", "c"]);
    }

    #[test]
    fn test_remove_range_if_consecutive_matches() {
        let mut document = doc(&["x", "x", "y", "x", "z"]);
        let removed = document.remove_range_if(0, 3, |line| line == "x");
        assert_eq!(removed, 3);
        assert_eq!(document.lines(), ["y", "z"]);
    }

    #[test]
    fn test_remove_range_if_stays_inside_range() {
        let mut document = doc(&["x", "x", "x", "x"]);
        document.remove_range_if(1, 2, |line| line == "x");
        assert_eq!(document.lines(), ["x", "x"]);
    }

    #[test]
    fn test_remove_range_if_at_zero_does_not_underflow() {
        let mut document = doc(&["x", "x"]);
        let removed = document.remove_range_if(0, 0, |_| true);
        assert_eq!(removed, 1);
        assert_eq!(document.lines(), ["x"]);
    }

    #[test]
    fn test_clear_if() {
        let mut document = doc(&["keep", "", "keep", ""]);
        assert_eq!(document.clear_if(str::is_empty), 2);
        assert_eq!(document.lines(), ["keep", "keep"]);

        let mut empty = LineDocument::new();
        assert_eq!(empty.clear_if(|_| true), 0);
    }

    #[test]
    fn test_transforms() {
        let mut document = doc(&["a", "b", "c", "d"]);
        document.transform_at(0, str::to_uppercase);
        document.transform_range(3, 2, |line| format!("{line}{line}"));
        document.transform_at(9, |_| unreachable!());
        assert_eq!(document.lines(), ["A", "b", "cc", "dd"]);

        document.transform_all(|line| format!("[{line}]"));
        assert_eq!(document.lines(), ["[A]", "[b]", "[cc]", "[dd]"]);
    }

    #[test]
    fn test_transform_with_captured_argument() {
        let suffix = String::from(";");
        let mut document = doc(&["x", "y"]);
        document.transform_all(|line| format!("{line}{suffix}"));
        assert_eq!(document.lines(), ["x;", "y;"]);
    }

    #[test]
    fn test_merge_variants() {
        let mut document = doc(&["m", "n"]);
        document.merge_prepend(["a", "b"]);
        document.merge_append(vec!["y".to_string(), "z".to_string()]);
        document.merge_insert(2, ["c", "d"]);
        assert_eq!(document.lines(), ["a", "b", "c", "d", "m", "n", "y", "z"]);

        document.merge_insert(8, ["never"]);
        assert_eq!(document.len(), 8);
    }

    #[test]
    fn test_merge_from_other_document() {
        let source = doc(&["1", "2"]);
        let mut target = doc(&["0"]);
        target.merge_append(&source);
        assert_eq!(target.lines(), ["0", "1", "2"]);
    }

    #[test]
    fn test_find_and_rfind() {
        let document = doc(&["alpha", "beta", "alphabet"]);
        assert_eq!(document.find("alpha"), Some(0));
        assert_eq!(document.rfind("alpha"), Some(2));
        assert_eq!(document.find("gamma"), None);
    }

    #[test]
    fn test_line_len() {
        let document = doc(&["four", ""]);
        assert_eq!(document.line_len(0), 4);
        assert_eq!(document.line_len(1), 0);
        assert_eq!(document.line_len(2), 0);
    }

    #[test]
    fn test_equality_covers_path_and_policy() {
        let a = doc(&["x"]);
        let mut b = doc(&["x"]);
        assert_eq!(a, b);

        b.set_policy(ClosingPolicy::Append);
        assert_ne!(a, b);
        b.set_policy(ClosingPolicy::Discard);

        b.set_path("other.txt");
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_empty_path_unbinds() {
        let mut document = LineDocument::new();
        document.set_path("a.txt");
        assert_eq!(document.path(), Some(Path::new("a.txt")));
        document.set_path("");
        assert_eq!(document.path(), None);
    }

    #[test]
    fn test_display_and_write_to() {
        let document = doc(&["a", "b"]);
        assert_eq!(document.to_string(), "a\nb\n");

        let mut buffer = Vec::new();
        document.write_to(&mut buffer).unwrap();
        assert_eq!(buffer, b"a\nb\n");
    }

    #[test]
    fn test_index() {
        let document = doc(&["a", "b"]);
        assert_eq!(&document[1], "b");
    }

    #[test]
    fn test_reload_without_path() {
        let mut document = LineDocument::new();
        assert!(matches!(
            document.reload(),
            Err(FileWrapError::NoPath { .. })
        ));
        assert!(matches!(document.save(), Err(FileWrapError::NoPath { .. })));
    }

    #[test]
    fn test_close_discard() {
        let document = doc(&["a"]);
        assert_eq!(document.close(), CloseOutcome::Discarded);
    }
}
