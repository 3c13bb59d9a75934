//! Reading files into lines and rows.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{FileWrapError, Result};
use crate::table::Row;

use super::numeric::parse_rows;

/// Read a file into lines, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| FileWrapError::io("open", path, e))?;

    let lines = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(|e| FileWrapError::io("read", path, e))?;

    tracing::debug!(path = %path.display(), lines = lines.len(), "read lines");
    Ok(lines)
}

/// Read a file of whitespace-separated numbers into rows.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let text = fs::read_to_string(path).map_err(|e| FileWrapError::io("read", path, e))?;

    let rows = parse_rows(&text).map_err(|bad| FileWrapError::InvalidNumber {
        path: path.to_path_buf(),
        line: bad.line,
        token: bad.token,
    })?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "read rows");
    Ok(rows)
}
