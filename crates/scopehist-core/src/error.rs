//! Error types shared by the scopehist library crates.

use std::io;
use std::path::PathBuf;

/// All failures a history operation can surface to its caller.
///
/// Repository detection and missing history files are not errors and have
/// no variant here.
#[derive(Debug, thiserror::Error)]
pub enum HistError {
    /// The parent directory of a scope file could not be created.
    #[error("cannot create history directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A history file exists but could not be read or appended to.
    #[error("history file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A persisted session record is unreadable.
    #[error("invalid session record {}: {reason}", path.display())]
    State { path: PathBuf, reason: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HistError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HistError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for Results in scopehist.
pub type HistResult<T> = Result<T, HistError>;
