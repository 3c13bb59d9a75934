//! In-memory text and numeric containers bound to files.
//!
//! A container holds its content in memory and may be associated with a
//! file path. Every storage call opens, uses, and releases the file within
//! the call; no handle is held between calls. When a container is closed
//! (or dropped) its [`ClosingPolicy`] decides whether the content is
//! discarded, written over the file, or added after it.
//!
//! # Containers
//!
//! - [`LineDocument`] - an ordered sequence of text lines
//! - [`NumericTable`] - jagged rows of `f64` entries, one row per line
//!
//! # Fail-soft access
//!
//! Out-of-range reads return a neutral value (`""`, `0.0`, an empty slice)
//! and out-of-range mutations do nothing. Ranged operations take inclusive
//! index pairs in either order and clamp the upper bound; see [`range`].
//!
//! # Example
//!
//! ```no_run
//! use filewrap::{ClosingPolicy, LineDocument};
//!
//! let mut doc = LineDocument::open("notes.txt", ClosingPolicy::Flush);
//! doc.append("one more line");
//! doc.remove_range_if(0, 10, |line| line.trim().is_empty());
//! let outcome = doc.close();
//! assert!(outcome.is_written());
//! ```
//!
//! # Architecture
//!
//! - `document.rs` / `table.rs` - the two containers
//! - `io/` - file reads, atomic and appending writes, numeric text format
//! - `policy.rs` - closing policies and close outcomes
//! - `range.rs` - inclusive range normalization
//! - `stats.rs` - aggregates over spans of rows
//! - `error.rs` - error types

pub mod document;
pub mod error;
pub mod io;
pub mod policy;
pub mod range;
pub mod stats;
pub mod table;

// Re-export main types
pub use document::LineDocument;
pub use error::{FileWrapError, Result};
pub use io::WriteMode;
pub use policy::{CloseOutcome, ClosingPolicy};
pub use table::{NumericTable, Row};
