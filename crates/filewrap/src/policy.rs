//! What a container does with its contents when it is closed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FileWrapError;
use crate::io::{self, WriteMode};

/// Action taken against a container's associated path when it is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosingPolicy {
    /// Drop the contents without touching storage.
    #[default]
    Discard,
    /// Overwrite the associated path with the current contents.
    Flush,
    /// Add the current contents after whatever the path already holds.
    Append,
}

impl ClosingPolicy {
    /// All policies, in declaration order.
    pub const ALL: [ClosingPolicy; 3] = [Self::Discard, Self::Flush, Self::Append];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discard => "discard",
            Self::Flush => "flush",
            Self::Append => "append",
        }
    }

    /// The write this policy performs on close, if any.
    pub fn write_mode(self) -> Option<WriteMode> {
        match self {
            Self::Discard => None,
            Self::Flush => Some(WriteMode::Overwrite),
            Self::Append => Some(WriteMode::Append),
        }
    }
}

impl fmt::Display for ClosingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClosingPolicy {
    type Err = FileWrapError;

    /// Accepts the policy names case-insensitively, plus the older
    /// `none`/`output` names and their numeric codes `0`/`1`/`2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" | "none" | "0" => Ok(Self::Discard),
            "flush" | "output" | "1" => Ok(Self::Flush),
            "append" | "2" => Ok(Self::Append),
            _ => Err(FileWrapError::UnknownPolicy {
                value: s.to_string(),
            }),
        }
    }
}

/// Result of closing a container.
///
/// Closing never fails; storage problems are reported here instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The policy was `Discard`; nothing was written.
    Discarded,
    /// The contents were written.
    Written {
        path: PathBuf,
        mode: WriteMode,
        lines: usize,
    },
    /// The policy asked for a write but no path was associated.
    NoPath { mode: WriteMode },
    /// The write was attempted and failed.
    Failed {
        path: PathBuf,
        mode: WriteMode,
        reason: String,
    },
}

impl CloseOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Apply `policy` to `lines` for a container bound to `path`.
pub(crate) fn close_with<I>(
    kind: &'static str,
    policy: ClosingPolicy,
    path: Option<&Path>,
    lines: I,
) -> CloseOutcome
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let Some(mode) = policy.write_mode() else {
        tracing::debug!(kind, "discarding contents on close");
        return CloseOutcome::Discarded;
    };

    let Some(path) = path else {
        tracing::warn!(kind, %policy, "no path associated on close, nothing written");
        return CloseOutcome::NoPath { mode };
    };

    match io::write_lines(path, lines, mode) {
        Ok(lines) => {
            tracing::debug!(kind, %policy, path = %path.display(), lines, "closed");
            CloseOutcome::Written {
                path: path.to_path_buf(),
                mode,
                lines,
            }
        }
        Err(error) => {
            tracing::warn!(kind, %policy, path = %path.display(), %error, "close failed");
            CloseOutcome::Failed {
                path: path.to_path_buf(),
                mode,
                reason: error.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_discard() {
        assert_eq!(ClosingPolicy::default(), ClosingPolicy::Discard);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for policy in ClosingPolicy::ALL {
            assert_eq!(policy.to_string().parse::<ClosingPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("NONE".parse::<ClosingPolicy>().unwrap(), ClosingPolicy::Discard);
        assert_eq!("0".parse::<ClosingPolicy>().unwrap(), ClosingPolicy::Discard);
        assert_eq!("Output".parse::<ClosingPolicy>().unwrap(), ClosingPolicy::Flush);
        assert_eq!("1".parse::<ClosingPolicy>().unwrap(), ClosingPolicy::Flush);
        assert_eq!(" append ".parse::<ClosingPolicy>().unwrap(), ClosingPolicy::Append);
        assert_eq!("2".parse::<ClosingPolicy>().unwrap(), ClosingPolicy::Append);
    }

    #[test]
    fn test_from_str_unknown() {
        let result = "sometimes".parse::<ClosingPolicy>();
        assert!(matches!(result, Err(FileWrapError::UnknownPolicy { .. })));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ClosingPolicy::Flush).unwrap();
        assert_eq!(json, "\"flush\"");
        let policy: ClosingPolicy = serde_json::from_str("\"append\"").unwrap();
        assert_eq!(policy, ClosingPolicy::Append);
    }

    #[test]
    fn test_write_mode() {
        assert_eq!(ClosingPolicy::Discard.write_mode(), None);
        assert_eq!(ClosingPolicy::Flush.write_mode(), Some(WriteMode::Overwrite));
        assert_eq!(ClosingPolicy::Append.write_mode(), Some(WriteMode::Append));
    }

    #[test]
    fn test_close_discard_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let outcome = close_with("test", ClosingPolicy::Discard, Some(path.as_path()), ["a"]);

        assert_eq!(outcome, CloseOutcome::Discarded);
        assert!(!path.exists());
    }

    #[test]
    fn test_close_without_path() {
        let outcome = close_with("test", ClosingPolicy::Flush, None, ["a"]);
        assert_eq!(
            outcome,
            CloseOutcome::NoPath {
                mode: WriteMode::Overwrite
            }
        );
    }

    #[test]
    fn test_close_flush_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let outcome = close_with("test", ClosingPolicy::Flush, Some(path.as_path()), ["a", "b"]);

        assert!(outcome.is_written());
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_close_failure_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");

        let outcome = close_with("test", ClosingPolicy::Append, Some(path.as_path()), ["a"]);

        assert!(outcome.is_failed());
    }
}
