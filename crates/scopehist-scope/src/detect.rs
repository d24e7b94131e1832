use scopehist_core::config::Detection;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Answers "is this directory inside a repository, and where is its root".
///
/// Implementations must return a negative answer for any path they cannot
/// inspect; callers never see an error.
pub trait RepoDetector {
    fn is_inside_repo(&self, dir: &Path) -> bool;
    fn repo_root(&self, dir: &Path) -> Option<PathBuf>;
}

impl<T: RepoDetector + ?Sized> RepoDetector for Box<T> {
    fn is_inside_repo(&self, dir: &Path) -> bool {
        (**self).is_inside_repo(dir)
    }

    fn repo_root(&self, dir: &Path) -> Option<PathBuf> {
        (**self).repo_root(dir)
    }
}

/// Build the detector selected by configuration.
pub fn detector_for(detection: Detection) -> Box<dyn RepoDetector> {
    match detection {
        Detection::Git => Box::new(GitCli::default()),
        Detection::Walk => Box::new(MarkerWalk::default()),
    }
}

/// Asks the `git` binary. Missing binary, non-repository, or permission
/// problems all come back as "not a repository".
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitCli {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn rev_parse(&self, dir: &Path, flag: &str) -> Option<String> {
        Command::new(&self.program)
            .arg("-C")
            .arg(dir)
            .args(["rev-parse", flag])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl RepoDetector for GitCli {
    fn is_inside_repo(&self, dir: &Path) -> bool {
        // Inside `.git/` itself git answers "false" with a zero exit.
        self.rev_parse(dir, "--is-inside-work-tree").as_deref() == Some("true")
    }

    fn repo_root(&self, dir: &Path) -> Option<PathBuf> {
        self.rev_parse(dir, "--show-toplevel").map(PathBuf::from)
    }
}

/// Walks up from the directory looking for a marker entry (`.git` by
/// default, directory or file so worktrees and submodules count).
#[derive(Debug, Clone)]
pub struct MarkerWalk {
    marker: String,
}

impl Default for MarkerWalk {
    fn default() -> Self {
        Self {
            marker: ".git".to_string(),
        }
    }
}

impl MarkerWalk {
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    fn find_root(&self, start: &Path) -> Option<PathBuf> {
        let mut cur = start.canonicalize().ok()?;
        loop {
            if cur.join(&self.marker).exists() {
                return Some(cur);
            }
            if !cur.pop() {
                return None;
            }
        }
    }
}

impl RepoDetector for MarkerWalk {
    fn is_inside_repo(&self, dir: &Path) -> bool {
        self.find_root(dir).is_some()
    }

    fn repo_root(&self, dir: &Path) -> Option<PathBuf> {
        self.find_root(dir)
    }
}
