//! Writing lines to files.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{FileWrapError, Result};

/// How `write_lines` treats existing file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace the file's content.
    Overwrite,
    /// Add after the file's content, creating the file if needed.
    Append,
}

/// Write lines to `writer`, each followed by a newline.
///
/// Returns the number of lines written.
pub fn write_lines_to<W, I>(writer: &mut W, lines: I) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut count = 0;
    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    Ok(count)
}

/// Write lines to a file.
///
/// `Overwrite` goes through a uniquely named temp file in the target's
/// directory and a rename, so a failed write leaves the previous content
/// intact. `Append` starts on a fresh line even when the file does not end
/// with a newline. Returns the number of lines written.
pub fn write_lines<I>(path: &Path, lines: I, mode: WriteMode) -> Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    if path.as_os_str().is_empty() {
        return Err(FileWrapError::io(
            "write",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty path"),
        ));
    }

    let count = match mode {
        WriteMode::Overwrite => overwrite(path, lines)?,
        WriteMode::Append => append(path, lines)?,
    };

    tracing::debug!(path = %path.display(), ?mode, lines = count, "wrote lines");
    Ok(count)
}

fn append<I>(path: &Path, lines: I) -> Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| FileWrapError::io("open", path, e))?;

    let mut lines = lines.into_iter().peekable();
    if lines.peek().is_none() {
        return Ok(0);
    }
    let separate =
        lacks_final_newline(&mut file).map_err(|e| FileWrapError::io("read", path, e))?;

    let mut writer = BufWriter::new(file);
    if separate {
        writer
            .write_all(b"\n")
            .map_err(|e| FileWrapError::io("append", path, e))?;
    }
    let count =
        write_lines_to(&mut writer, lines).map_err(|e| FileWrapError::io("append", path, e))?;
    writer
        .flush()
        .map_err(|e| FileWrapError::io("append", path, e))?;
    Ok(count)
}

/// Whether the file has content whose last byte is not a newline.
fn lacks_final_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

fn overwrite<I>(path: &Path, lines: I) -> Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // Removed on drop unless persisted.
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| FileWrapError::io("create", path, e))?;
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| FileWrapError::io("write", path, e))?;
    }

    let mut writer = BufWriter::new(&mut temp);
    let count =
        write_lines_to(&mut writer, lines).map_err(|e| FileWrapError::io("write", path, e))?;
    writer
        .flush()
        .map_err(|e| FileWrapError::io("write", path, e))?;
    drop(writer);

    temp.as_file()
        .sync_all()
        .map_err(|e| FileWrapError::io("sync", path, e))?;
    temp.persist(path)
        .map_err(|e| FileWrapError::io("rename", path, e.error))?;
    Ok(count)
}
