mod cmd_config;
mod cmd_gc;
mod cmd_hook;
mod cmd_init;
mod cmd_resolve;
mod cmd_session;
mod cmd_show;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scopehist",
    version,
    about = "Per-directory and per-repository shell history"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shell hook entrypoints (called by the shell integration)
    Hook {
        #[command(subcommand)]
        cmd: cmd_hook::HookCmd,
    },
    /// Print a fresh session id
    SessionId,
    /// Print the session's buffer for a recall widget
    Recall {
        #[arg(long, env = "SCOPEHIST_SESSION")]
        session: String,
        /// Newest entries first
        #[arg(long)]
        reverse: bool,
        /// Write entries in history file format (for `fc -R`)
        #[arg(long)]
        encoded: bool,
    },
    /// Show the session's mode, scope, and active file
    Status {
        #[arg(long, env = "SCOPEHIST_SESSION")]
        session: String,
    },
    /// Print the scope and history file for a directory
    Resolve {
        /// Directory (defaults to the current directory)
        dir: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a directory's history file (or the global one)
    Show {
        /// Directory (defaults to the current directory)
        dir: Option<PathBuf>,
        /// Show the global history file instead
        #[arg(long)]
        global: bool,
        /// Maximum number of entries (0 = unlimited)
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Print shell integration code
    Init {
        #[arg(value_enum)]
        shell: cmd_init::Shell,
    },
    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete session records that have not been updated recently
    Gc {
        /// Age threshold in days
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// List what would be removed without deleting
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SCOPEHIST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = scopehist_core::Config::from_env();

    match cli.cmd {
        Command::Hook { cmd } => cmd_hook::run(cmd, &config),
        Command::SessionId => cmd_session::new_id(),
        Command::Recall {
            session,
            reverse,
            encoded,
        } => cmd_session::recall(&config, &session, reverse, encoded),
        Command::Status { session } => cmd_session::status(&config, &session),
        Command::Resolve { dir, json } => {
            let dir = dir.map_or_else(std::env::current_dir, Ok)?;
            cmd_resolve::execute(&config, &dir, json)
        }
        Command::Show { dir, global, limit } => {
            let dir = dir.map_or_else(std::env::current_dir, Ok)?;
            cmd_show::execute(&config, &dir, global, limit)
        }
        Command::Init { shell } => cmd_init::execute(
            shell,
            cmd_init::Keys {
                toggle: &config.toggle_key,
                recall: &config.recall_key,
            },
        ),
        Command::Config { json } => cmd_config::execute(&config, json),
        Command::Gc { days, dry_run } => cmd_gc::execute(&config, days, dry_run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hook_add_with_leading_space_and_dashes() {
        let cli = Cli::try_parse_from([
            "scopehist", "hook", "add", "--session", "s1", "--", " -secret",
        ])
        .unwrap();
        match cli.cmd {
            Command::Hook {
                cmd: cmd_hook::HookCmd::Add { session, line },
            } => {
                assert_eq!(session, "s1");
                assert_eq!(line, " -secret");
            }
            _ => panic!("expected hook add"),
        }
    }

    #[test]
    fn parses_chpwd() {
        let cli = Cli::try_parse_from([
            "scopehist", "hook", "chpwd", "--session", "s1", "--from", "/tmp/a", "--to", "/tmp/b",
        ])
        .unwrap();
        assert!(matches!(
            cli.cmd,
            Command::Hook {
                cmd: cmd_hook::HookCmd::Chpwd { .. }
            }
        ));
    }

    #[test]
    fn parses_init_and_gc_defaults() {
        let cli = Cli::try_parse_from(["scopehist", "init", "zsh"]).unwrap();
        assert!(matches!(cli.cmd, Command::Init { .. }));

        let cli = Cli::try_parse_from(["scopehist", "gc"]).unwrap();
        match cli.cmd {
            Command::Gc { days, dry_run } => {
                assert_eq!(days, 7);
                assert!(!dry_run);
            }
            _ => panic!("expected gc"),
        }
    }

    #[test]
    fn parses_recall_flags() {
        let cli = Cli::try_parse_from([
            "scopehist", "recall", "--session", "s1", "--encoded",
        ])
        .unwrap();
        match cli.cmd {
            Command::Recall {
                session,
                reverse,
                encoded,
            } => {
                assert_eq!(session, "s1");
                assert!(!reverse);
                assert!(encoded);
            }
            _ => panic!("expected recall"),
        }
    }

    #[test]
    fn rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["scopehist", "init", "tcsh"]).is_err());
    }
}
