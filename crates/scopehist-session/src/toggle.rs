use scopehist_core::ScopeIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which file the buffer reflects for recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Global,
    Scoped,
}

impl Mode {
    pub fn initial(start_with_global: bool) -> Self {
        if start_with_global {
            Mode::Global
        } else {
            Mode::Scoped
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Global => Mode::Scoped,
            Mode::Scoped => Mode::Global,
        }
    }
}

/// User-visible announcement emitted on a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    RepoHistory,
    LocalHistory,
    GlobalHistory,
}

impl Notice {
    pub fn for_scope(identity: &ScopeIdentity) -> Self {
        if identity.is_repo() {
            Notice::RepoHistory
        } else {
            Notice::LocalHistory
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Notice::RepoHistory => "using git repo history",
            Notice::LocalHistory => "using local directory history",
            Notice::GlobalHistory => "using global history",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
