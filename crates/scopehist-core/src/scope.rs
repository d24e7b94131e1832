use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The unit of history isolation for a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScopeIdentity {
    /// Directory is inside a repository; stable under `cd` within it.
    Repo { root: PathBuf },
    /// Directory outside any repository, symlinks resolved.
    Path { directory: PathBuf },
}

impl ScopeIdentity {
    pub fn is_repo(&self) -> bool {
        matches!(self, ScopeIdentity::Repo { .. })
    }

    /// The directory this identity is anchored at.
    pub fn anchor(&self) -> &Path {
        match self {
            ScopeIdentity::Repo { root } => root,
            ScopeIdentity::Path { directory } => directory,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            ScopeIdentity::Repo { .. } => "repo",
            ScopeIdentity::Path { .. } => "path",
        }
    }
}

/// A scope together with the history file it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedScope {
    pub identity: ScopeIdentity,
    pub file: PathBuf,
}
