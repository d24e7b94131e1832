use clap::Subcommand;
use scopehist_core::{Config, HistResult};
use scopehist_host::HostHistory;
use scopehist_scope::{detector_for, RepoDetector};
use scopehist_session::{Mode, SessionController, SessionRecord};
use std::path::PathBuf;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum HookCmd {
    /// Shell started (first prompt)
    Start {
        #[arg(long, env = "SCOPEHIST_SESSION")]
        session: String,
        /// Starting directory (defaults to the current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
    /// Working directory changed
    Chpwd {
        #[arg(long, env = "SCOPEHIST_SESSION")]
        session: String,
        /// Previous directory ($OLDPWD)
        #[arg(long)]
        from: PathBuf,
        /// New directory (defaults to the current directory)
        #[arg(long)]
        to: Option<PathBuf>,
    },
    /// A command line was accepted
    Add {
        #[arg(long, env = "SCOPEHIST_SESSION")]
        session: String,
        /// Raw command line, leading whitespace preserved
        #[arg(allow_hyphen_values = true)]
        line: String,
    },
    /// Switch between global and scoped history
    Toggle {
        #[arg(long, env = "SCOPEHIST_SESSION")]
        session: String,
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
    /// Shell is exiting
    Exit {
        #[arg(long, env = "SCOPEHIST_SESSION")]
        session: String,
    },
}

// ── Dispatch ──

/// Hooks never fail the shell: errors become a warning on stderr.
pub fn run(cmd: HookCmd, config: &Config) -> anyhow::Result<()> {
    match dispatch(cmd, config) {
        Ok(Some(notice)) => println!("{notice}"),
        Ok(None) => {}
        Err(e) => tracing::warn!("scopehist: {e:#}"),
    }
    Ok(())
}

/// Apply one hook event. Returns the line to show the user, if any.
pub fn dispatch(cmd: HookCmd, config: &Config) -> anyhow::Result<Option<String>> {
    match cmd {
        HookCmd::Start { session, cwd } => {
            let cwd = cwd_or_current(cwd)?;
            with_session(config, &session, |ctl, host| ctl.on_session_start(host, &cwd))?;
            Ok(None)
        }
        HookCmd::Chpwd { session, from, to } => {
            let to = cwd_or_current(to)?;
            with_session(config, &session, |ctl, host| {
                ctl.on_directory_change(host, &from, &to)
            })?;
            Ok(None)
        }
        HookCmd::Add { session, line } => {
            with_session(config, &session, |ctl, host| ctl.on_command(host, &line))?;
            Ok(None)
        }
        HookCmd::Toggle { session, cwd } => {
            let cwd = cwd_or_current(cwd)?;
            let notice = with_session(config, &session, |ctl, host| ctl.toggle(host, &cwd))?;
            Ok(Some(notice.to_string()))
        }
        HookCmd::Exit { session } => {
            with_session(config, &session, |ctl, host| ctl.on_session_end(host))?;
            SessionRecord::remove(&store_root(config), &session)?;
            Ok(None)
        }
    }
}

// ── Session plumbing ──

pub(crate) fn store_root(config: &Config) -> PathBuf {
    scopehist_store::store_root(config.store_root.as_deref())
}

/// Session ids become file names; keep them to a safe alphabet.
pub(crate) fn validate_session_id(id: &str) -> anyhow::Result<()> {
    if id.is_empty()
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!("invalid session id {id:?} (expected letters, digits, '-' or '_')");
    }
    Ok(())
}

fn cwd_or_current(dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match dir {
        Some(d) => Ok(d),
        None => Ok(std::env::current_dir()?),
    }
}

type Controller = SessionController<Box<dyn RepoDetector>>;

/// Restore the session, run one handler, and write the session back.
/// The record is saved even when the handler fails, so a partially applied
/// event (e.g. global log already appended) is not replayed next time.
fn with_session<T, F>(config: &Config, session: &str, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut Controller, &mut HostHistory) -> HistResult<T>,
{
    validate_session_id(session)?;
    let root = store_root(config);
    let record = SessionRecord::load_or_new(
        &root,
        session,
        Mode::initial(config.start_with_global),
        config.histsize,
    )?;
    let SessionRecord {
        session_id,
        started_at,
        updated_at,
        state,
        buffer,
    } = record;

    let mut host = HostHistory::new(buffer, config.options.ignore_space);
    let mut ctl =
        SessionController::with_state(config.clone(), detector_for(config.detection), state);
    let out = f(&mut ctl, &mut host);

    let mut record = SessionRecord {
        session_id,
        started_at,
        updated_at,
        state: ctl.into_state(),
        buffer: host.into_buffer(),
    };
    record.save(&root)?;
    Ok(out?)
}

pub(crate) fn load_record(
    config: &Config,
    session: &str,
) -> anyhow::Result<Option<SessionRecord>> {
    validate_session_id(session)?;
    Ok(SessionRecord::load(&store_root(config), session)?)
}

pub(crate) fn active_file(config: &Config, record: &SessionRecord) -> Option<PathBuf> {
    match record.state.mode {
        Mode::Global => Some(config.global_file.clone()),
        Mode::Scoped => record
            .state
            .current_scope
            .as_ref()
            .map(|s| s.file.clone()),
    }
}
