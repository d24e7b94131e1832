//! Directory → scope resolution.
//!
//! A directory inside a repository resolves to the repository root; anything
//! else resolves to its own canonical path. Detection never fails the caller.

pub mod detect;
pub mod resolver;

pub use detect::{detector_for, GitCli, MarkerWalk, RepoDetector};
pub use resolver::ScopeResolver;
