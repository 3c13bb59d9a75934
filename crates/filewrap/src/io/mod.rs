//! Line-based file access used by both containers.
//!
//! This module handles:
//! - Reading a file into lines, or into whitespace-separated numeric rows
//! - Overwriting a file atomically, or appending to it
//! - Formatting numeric rows as text lines
//!
//! Every call opens, uses, and releases the file within the call.

mod load;
mod numeric;
mod save;

pub use load::{read_lines, read_rows};
pub use numeric::{BadToken, format_row, parse_row, parse_rows};
pub use save::{WriteMode, write_lines, write_lines_to};
