use scopehist_core::{Config, HistError, HistResult, ResolvedScope, ScopeIdentity};
use std::path::{Component, Path, PathBuf};

/// File name used for every plain-directory scope under the base dir.
pub const PATH_SCOPE_FILE: &str = "history";

/// Maps scope identities to history files.
#[derive(Debug, Clone)]
pub struct ScopePaths {
    pub base_dir: PathBuf,
    pub repo_history_name: String,
}

impl ScopePaths {
    pub fn new(base_dir: impl Into<PathBuf>, repo_history_name: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            repo_history_name: repo_history_name.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_dir, &config.repo_history_name)
    }

    /// Derive the history file for a scope. Pure computation, no I/O.
    ///
    /// - repo: `<root>/<repo_history_name>`
    /// - path: `<base_dir>/<directory without root>/history`
    pub fn path_for(&self, identity: &ScopeIdentity) -> PathBuf {
        match identity {
            ScopeIdentity::Repo { root } => root.join(&self.repo_history_name),
            ScopeIdentity::Path { directory } => {
                let mut out = self.base_dir.clone();
                for comp in directory.components() {
                    match comp {
                        Component::RootDir | Component::CurDir => {}
                        // `C:` becomes `C` so the drive nests as a plain segment.
                        Component::Prefix(prefix) => {
                            let raw = prefix.as_os_str().to_string_lossy();
                            out.push(raw.replace([':', '\\', '?'], ""));
                        }
                        // `%` is escaped in names so `%2e%2e` only ever means `..`.
                        Component::ParentDir => out.push("%2e%2e"),
                        Component::Normal(seg) => match seg.to_str() {
                            Some(name) if name.contains('%') => out.push(name.replace('%', "%25")),
                            _ => out.push(seg),
                        },
                    }
                }
                out.join(PATH_SCOPE_FILE)
            }
        }
    }

    pub fn resolved(&self, identity: ScopeIdentity) -> ResolvedScope {
        let file = self.path_for(&identity);
        ResolvedScope { identity, file }
    }

    /// Create the parent directory of `path` and all missing ancestors.
    /// Idempotent: an existing parent is a no-op.
    pub fn ensure_containing_dir(path: &Path) -> HistResult<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        if parent.is_dir() {
            return Ok(());
        }
        tracing::debug!(dir = %parent.display(), "creating history directory");
        std::fs::create_dir_all(parent).map_err(|source| HistError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })
    }
}
