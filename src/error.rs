//! Error type shared by the frame engine and the file driver.
//!
//! Apart from `Io`, every variant is detected before any document is
//! written, and carries the offending value together with the bound it
//! violated.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::range::Role;

pub type Result<T, E = FrameError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FrameError {
    /// A position token that is neither `N` nor `N-M`.
    #[error("invalid position {token:?}: {reason}")]
    Format { token: String, reason: String },

    /// A position outside `[min, max]` for the document it addresses.
    #[error("{role} {value} is out of range ({min}-{max})")]
    OutOfRange {
        role: Role,
        value: usize,
        min: usize,
        max: usize,
    },

    /// The operation needs at least one frame and the document has none.
    #[error("no frames found in {}", path.display())]
    EmptyDocument { path: PathBuf },

    /// A required argument was not supplied for the requested action.
    #[error("{name} is required for {action}")]
    MissingArgument {
        name: &'static str,
        action: &'static str,
    },

    /// A cross-file destination that does not exist.
    #[error("output file {} does not exist", path.display())]
    MissingDestination { path: PathBuf },

    #[error("input file {} does not exist", path.display())]
    InputNotFound { path: PathBuf },

    /// Disjoint positions handed to an in-place move.
    #[error("positions {positions} are not contiguous; in-place moves need a single range")]
    NonContiguous { positions: String },

    /// A move or copy that would place frames after, or carry, a frame that
    /// runs to end of input. The scanner would fold them into that frame.
    #[error(
        "frame {position} in {} has no matching \\end{{frame}}; close it before moving frames across it",
        path.display()
    )]
    Unterminated { path: PathBuf, position: usize },

    /// An edit computed against a different snapshot of the document.
    #[error("edit reaches line {line} but the document has {line_count} lines (stale frame index)")]
    StaleEdit { line: usize, line_count: usize },

    #[error("failed to encode listing: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FrameError {
    pub fn format(token: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_value_and_bounds() {
        let err = FrameError::OutOfRange {
            role: Role::Source,
            value: 7,
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "source position 7 is out of range (1-5)");
    }

    #[test]
    fn format_error_quotes_token() {
        let err = FrameError::format("5-3", "start (5) > end (3)");
        assert_eq!(
            err.to_string(),
            "invalid position \"5-3\": start (5) > end (3)"
        );
    }
}
