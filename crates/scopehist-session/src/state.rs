use crate::toggle::Mode;
use scopehist_core::ResolvedScope;
use serde::{Deserialize, Serialize};

/// Mutable state of one interactive shell session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Scope of the present directory; `None` until first computed.
    pub current_scope: Option<ResolvedScope>,
    pub mode: Mode,
    /// Set by the first session-start event, never reset.
    pub initialized: bool,
}

impl SessionState {
    pub fn new(mode: Mode) -> Self {
        Self {
            current_scope: None,
            mode,
            initialized: false,
        }
    }
}
