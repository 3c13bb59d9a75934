//! Conversion between text lines and numeric rows.
//!
//! A row is one line of whitespace-separated numbers. Lines without any
//! tokens produce no row, so an empty row does not survive a save and
//! reload.

use crate::table::Row;

/// A token that did not parse as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadToken {
    /// 1-based line number.
    pub line: usize,
    pub token: String,
}

/// Parse one line of whitespace-separated numbers.
///
/// Returns the offending token if any token is not a number.
pub fn parse_row(line: &str) -> std::result::Result<Row, String> {
    line.split_whitespace()
        .map(|token| token.parse::<f64>().map_err(|_| token.to_string()))
        .collect()
}

/// Parse text into rows, one row per line that holds at least one token.
pub fn parse_rows(text: &str) -> std::result::Result<Vec<Row>, BadToken> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_row(line).map_err(|token| BadToken {
                line: index + 1,
                token,
            })
        })
        .collect()
}

/// Format a row as a single line of space-separated numbers.
///
/// Uses the shortest representation that parses back to the same value.
pub fn format_row(row: &[f64]) -> String {
    row.iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
