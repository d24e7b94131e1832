use crate::detect::RepoDetector;
use scopehist_core::{ResolvedScope, ScopeIdentity};
use scopehist_store::ScopePaths;
use std::path::{Path, PathBuf};

/// Computes the scope (and its history file) for a directory.
pub struct ScopeResolver<D> {
    detector: D,
    paths: ScopePaths,
}

impl<D: RepoDetector> ScopeResolver<D> {
    pub fn new(detector: D, paths: ScopePaths) -> Self {
        Self { detector, paths }
    }

    pub fn paths(&self) -> &ScopePaths {
        &self.paths
    }

    /// Repository root when `dir` is inside one, else the canonical `dir`.
    pub fn resolve(&self, dir: &Path) -> ScopeIdentity {
        if self.detector.is_inside_repo(dir) {
            if let Some(root) = self.detector.repo_root(dir) {
                return ScopeIdentity::Repo { root };
            }
            tracing::debug!(dir = %dir.display(), "repository reported without a root");
        }
        ScopeIdentity::Path {
            directory: canonical(dir),
        }
    }

    pub fn resolve_scope(&self, dir: &Path) -> ResolvedScope {
        self.paths.resolved(self.resolve(dir))
    }
}

/// Canonicalize, keeping the input when the path cannot be resolved.
fn canonical(dir: &Path) -> PathBuf {
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}
