//! Session lifecycle: which history file the buffer reflects, and when the
//! buffer is persisted and rebuilt.
//!
//! Every handler persists before it rebuilds, so a mode or scope switch never
//! discards entries that were only in memory.

use crate::state::SessionState;
use crate::toggle::{Mode, Notice};
use scopehist_core::{Config, HistResult, ResolvedScope};
use scopehist_host::HistoryGateway;
use scopehist_scope::{RepoDetector, ScopeResolver};
use scopehist_store::ScopePaths;
use std::path::{Path, PathBuf};

pub struct SessionController<D> {
    config: Config,
    resolver: ScopeResolver<D>,
    state: SessionState,
}

impl<D: RepoDetector> SessionController<D> {
    pub fn new(config: Config, detector: D) -> Self {
        let state = SessionState::new(Mode::initial(config.start_with_global));
        Self::with_state(config, detector, state)
    }

    /// Resume a session whose state was persisted by an earlier process.
    pub fn with_state(config: Config, detector: D, state: SessionState) -> Self {
        let resolver = ScopeResolver::new(detector, ScopePaths::from_config(&config));
        Self {
            config,
            resolver,
            state,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn resolver(&self) -> &ScopeResolver<D> {
        &self.resolver
    }

    /// The file the buffer currently reflects for recall.
    pub fn active_file(&self) -> Option<&Path> {
        match self.state.mode {
            Mode::Global => Some(self.config.global_file.as_path()),
            Mode::Scoped => self.state.current_scope.as_ref().map(|s| s.file.as_path()),
        }
    }

    fn rescope(&mut self, dir: &Path) -> ResolvedScope {
        let scope = self.resolver.resolve_scope(dir);
        tracing::debug!(
            dir = %dir.display(),
            kind = scope.identity.kind_str(),
            file = %scope.file.display(),
            "scope recomputed"
        );
        self.state.current_scope = Some(scope.clone());
        scope
    }

    /// First session-start event loads the initial buffer; later ones are ignored.
    pub fn on_session_start<G: HistoryGateway>(
        &mut self,
        host: &mut G,
        cwd: &Path,
    ) -> HistResult<()> {
        if self.state.initialized {
            tracing::debug!("session already initialized");
            return Ok(());
        }
        self.state.initialized = true;
        let scope = self.rescope(cwd);
        self.state.mode = Mode::initial(self.config.start_with_global);

        // No earlier in-session buffer exists, so nothing is persisted first.
        host.clear_buffer();
        match self.state.mode {
            Mode::Global => host.load_into_buffer(&self.config.global_file)?,
            Mode::Scoped => host.load_into_buffer(&scope.file)?,
        };
        tracing::info!(mode = ?self.state.mode, "session started");
        Ok(())
    }

    pub fn on_directory_change<G: HistoryGateway>(
        &mut self,
        host: &mut G,
        prev: &Path,
        new: &Path,
    ) -> HistResult<()> {
        match self.state.mode {
            Mode::Scoped => {
                let global = self.config.global_file.clone();
                persist(host, &global)?;
                // The buffer still holds what was typed under the current scope.
                let prev_file = match &self.state.current_scope {
                    Some(scope) => scope.file.clone(),
                    None => self.resolver.resolve_scope(prev).file,
                };
                persist(host, &prev_file)?;

                let scope = self.rescope(new);
                host.clear_buffer();
                host.load_into_buffer(&scope.file)?;
            }
            Mode::Global => {
                self.rescope(new);
            }
        }
        Ok(())
    }

    /// Returns whether the line was accepted into history.
    pub fn on_command<G: HistoryGateway>(
        &mut self,
        host: &mut G,
        raw_line: &str,
    ) -> HistResult<bool> {
        if !host.emit_entry(raw_line) {
            return Ok(false);
        }
        let scope_file = self.state.current_scope.as_ref().map(|s| s.file.clone());
        if self.config.options.eager() {
            let global = self.config.global_file.clone();
            persist(host, &global)?;
            if let Some(file) = &scope_file {
                persist(host, file)?;
            }
        }
        if let Some(file) = &scope_file {
            host.set_backing_file(file);
        }
        Ok(true)
    }

    /// Flip between global and scoped history for `cwd`.
    pub fn toggle<G: HistoryGateway>(
        &mut self,
        host: &mut G,
        cwd: &Path,
    ) -> HistResult<Notice> {
        let global = self.config.global_file.clone();
        let notice = match self.state.mode {
            Mode::Scoped => {
                persist(host, &global)?;
                if let Some(scope) = self.state.current_scope.clone() {
                    persist(host, &scope.file)?;
                }
                self.state.mode = Mode::Global;
                host.clear_buffer();
                host.load_into_buffer(&global)?;
                Notice::GlobalHistory
            }
            Mode::Global => {
                persist(host, &global)?;
                let scope = self.rescope(cwd);
                self.state.mode = Mode::Scoped;
                host.clear_buffer();
                host.load_into_buffer(&scope.file)?;
                Notice::for_scope(&scope.identity)
            }
        };
        tracing::info!(mode = ?self.state.mode, "history toggled");
        Ok(notice)
    }

    /// Default persistence when the shell exits.
    pub fn on_session_end<G: HistoryGateway>(&mut self, host: &mut G) -> HistResult<()> {
        let global = self.config.global_file.clone();
        persist(host, &global)?;
        if self.state.mode == Mode::Scoped {
            let target: Option<PathBuf> = host
                .backing_file()
                .map(Path::to_path_buf)
                .or_else(|| self.state.current_scope.as_ref().map(|s| s.file.clone()));
            if let Some(file) = target {
                persist(host, &file)?;
            }
        }
        Ok(())
    }
}

/// Make sure the file's directory exists, then append the buffer to it.
fn persist<G: HistoryGateway>(host: &mut G, path: &Path) -> HistResult<()> {
    ScopePaths::ensure_containing_dir(path)?;
    host.append_buffer_to(path)?;
    Ok(())
}
