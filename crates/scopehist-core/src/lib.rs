pub mod config;
pub mod error;
pub mod scope;

pub use config::{Config, HostOptions};
pub use error::{HistError, HistResult};
pub use scope::{ResolvedScope, ScopeIdentity};
