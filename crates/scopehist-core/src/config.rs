//! Environment-style configuration.
//!
//! Every knob is read through a lookup function so the same parsing runs
//! against the real process environment and against fixed maps in tests.

use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_DIR: &str = "~/.directory_history";
pub const DEFAULT_REPO_HISTFILE: &str = ".zsh_history";
pub const DEFAULT_GLOBAL_HISTFILE: &str = "~/.zsh_history";
pub const DEFAULT_TOGGLE_KEY: &str = "^G";
pub const DEFAULT_RECALL_KEY: &str = "^R";
pub const DEFAULT_HISTSIZE: usize = 10_000;

/// Host history options that change how entries are accepted and persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostOptions {
    /// Drop lines that begin with whitespace.
    pub ignore_space: bool,
    pub share_history: bool,
    pub inc_append: bool,
    pub inc_append_time: bool,
}

impl HostOptions {
    /// True when any option asks for persistence on every command.
    pub fn eager(&self) -> bool {
        self.share_history || self.inc_append || self.inc_append_time
    }
}

/// Which repository detector the binary wires in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Detection {
    #[default]
    Git,
    Walk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Root under which plain-directory history files are nested.
    pub base_dir: PathBuf,
    /// File name created at a repository root.
    pub repo_history_name: String,
    pub global_file: PathBuf,
    pub start_with_global: bool,
    pub toggle_key: String,
    /// Key bound to the recall picker widget.
    pub recall_key: String,
    /// In-memory buffer capacity.
    pub histsize: usize,
    pub options: HostOptions,
    pub detection: Detection,
    /// Override for the per-user store root (`SCOPEHIST_HOME`).
    pub store_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let flag = |key: &str| get(key).map(|v| parse_bool(&v)).unwrap_or(false);

        let global = get("SCOPEHIST_GLOBAL_HISTFILE")
            .or_else(|| get("HISTFILE"))
            .unwrap_or_else(|| DEFAULT_GLOBAL_HISTFILE.to_string());

        let detection = match get("SCOPEHIST_DETECT").as_deref() {
            Some("walk") => Detection::Walk,
            _ => Detection::Git,
        };

        Self {
            base_dir: expand_home(
                &get("SCOPEHIST_BASE_DIR").unwrap_or_else(|| DEFAULT_BASE_DIR.to_string()),
            ),
            repo_history_name: get("SCOPEHIST_REPO_HISTFILE")
                .unwrap_or_else(|| DEFAULT_REPO_HISTFILE.to_string()),
            global_file: expand_home(&global),
            start_with_global: flag("SCOPEHIST_START_WITH_GLOBAL"),
            toggle_key: get("SCOPEHIST_TOGGLE_KEY")
                .unwrap_or_else(|| DEFAULT_TOGGLE_KEY.to_string()),
            recall_key: get("SCOPEHIST_RECALL_KEY")
                .unwrap_or_else(|| DEFAULT_RECALL_KEY.to_string()),
            histsize: get("SCOPEHIST_HISTSIZE")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_HISTSIZE),
            options: HostOptions {
                ignore_space: flag("SCOPEHIST_IGNORE_SPACE"),
                share_history: flag("SCOPEHIST_SHARE_HISTORY"),
                inc_append: flag("SCOPEHIST_INC_APPEND"),
                inc_append_time: flag("SCOPEHIST_INC_APPEND_TIME"),
            },
            detection,
            store_root: get("SCOPEHIST_HOME").map(|v| expand_home(&v)),
        }
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Expand a leading `~/` (or a bare `~`) to the home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if raw == "~" {
        return home();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None => Path::new(raw).to_path_buf(),
    }
}
