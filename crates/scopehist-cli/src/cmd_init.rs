use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Zsh,
}

/// Key bindings the snippet installs.
#[derive(Debug, Clone, Copy)]
pub struct Keys<'a> {
    pub toggle: &'a str,
    pub recall: &'a str,
}

// The session id stays shell-local: child shells source this again and get
// their own record. zsh keeps only its in-memory ring (HISTFILE unset), which
// is reloaded from the session buffer whenever scopehist rebuilds it.
const ZSH_TEMPLATE: &str = r#"# scopehist: per-directory / per-repository history
typeset -g _scopehist_session="$(scopehist session-id)"

export SCOPEHIST_GLOBAL_HISTFILE="${SCOPEHIST_GLOBAL_HISTFILE:-${HISTFILE:-$HOME/.zsh_history}}"
unset HISTFILE
SAVEHIST=0

_scopehist_sync() {
  local file="${TMPDIR:-/tmp}/scopehist.$$.history" size=$HISTSIZE
  scopehist recall --session "$_scopehist_session" --encoded >| "$file" || return
  HISTSIZE=0
  HISTSIZE=$size
  fc -R "$file"
  command rm -f -- "$file"
}

_scopehist_addhistory() {
  scopehist hook add --session "$_scopehist_session" -- "${1%%$'\n'}"
  return 0
}

_scopehist_chpwd() {
  scopehist hook chpwd --session "$_scopehist_session" --from "$OLDPWD" --to "$PWD"
  _scopehist_sync
}

_scopehist_exit() {
  scopehist hook exit --session "$_scopehist_session"
}

_scopehist_toggle() {
  zle -I
  scopehist hook toggle --session "$_scopehist_session" --cwd "$PWD"
  _scopehist_sync
}

_scopehist_recall() {
  local selected
  selected="$(scopehist recall --session "$_scopehist_session" --reverse \
    | ${SCOPEHIST_PICKER:-fzf})" || return
  BUFFER="$selected"
  CURSOR=${#BUFFER}
  zle reset-prompt
}

autoload -Uz add-zsh-hook
add-zsh-hook zshaddhistory _scopehist_addhistory
add-zsh-hook chpwd _scopehist_chpwd
add-zsh-hook zshexit _scopehist_exit

zle -N scopehist-toggle _scopehist_toggle
zle -N scopehist-recall _scopehist_recall
bindkey '@TOGGLE_KEY@' scopehist-toggle
bindkey '@RECALL_KEY@' scopehist-recall

scopehist hook start --session "$_scopehist_session" --cwd "$PWD"
_scopehist_sync
"#;

fn single_quoted(raw: &str) -> String {
    raw.replace('\'', r"'\''")
}

/// Shell snippet with the configured keys bound.
pub fn snippet(shell: Shell, keys: Keys<'_>) -> String {
    match shell {
        Shell::Zsh => ZSH_TEMPLATE
            .replace("@TOGGLE_KEY@", &single_quoted(keys.toggle))
            .replace("@RECALL_KEY@", &single_quoted(keys.recall)),
    }
}

/// `scopehist init <shell>`
pub fn execute(shell: Shell, keys: Keys<'_>) -> anyhow::Result<()> {
    print!("{}", snippet(shell, keys));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: Keys<'static> = Keys {
        toggle: "^G",
        recall: "^R",
    };

    #[test]
    fn zsh_snippet_binds_toggle_key() {
        let s = snippet(Shell::Zsh, KEYS);
        assert!(s.contains("bindkey '^G' scopehist-toggle"));
        assert!(s.contains("add-zsh-hook chpwd _scopehist_chpwd"));
        assert!(s.contains("scopehist hook start"));
        assert!(!s.contains("@TOGGLE_KEY@"));
    }

    #[test]
    fn zsh_snippet_binds_recall_key() {
        let s = snippet(
            Shell::Zsh,
            Keys {
                toggle: "^G",
                recall: "^X^R",
            },
        );
        assert!(s.contains("zle -N scopehist-recall _scopehist_recall"));
        assert!(s.contains("bindkey '^X^R' scopehist-recall"));
        assert!(!s.contains("@RECALL_KEY@"));
    }

    #[test]
    fn session_id_is_not_exported() {
        let s = snippet(Shell::Zsh, KEYS);
        assert!(!s.contains("export SCOPEHIST_SESSION"));
        assert!(s.contains(r#"typeset -g _scopehist_session="$(scopehist session-id)""#));
        for line in s.lines().filter(|l| l.contains("scopehist hook ")) {
            assert!(
                line.contains(r#"--session "$_scopehist_session""#),
                "hook call without session: {line}"
            );
        }
    }

    #[test]
    fn native_history_stays_off_the_global_file() {
        let s = snippet(Shell::Zsh, KEYS);
        let unset = s.find("unset HISTFILE").unwrap();
        let export = s.find("export SCOPEHIST_GLOBAL_HISTFILE").unwrap();
        assert!(export < unset);
        assert!(s.contains("SAVEHIST=0"));
        // The in-memory ring is rebuilt after every event that rebuilds the buffer.
        assert_eq!(s.matches("\n  _scopehist_sync\n").count(), 2);
        assert!(s.trim_end().ends_with("_scopehist_sync"));
        assert!(s.contains("fc -R \"$file\""));
    }

    #[test]
    fn quotes_in_key_are_escaped() {
        let s = snippet(
            Shell::Zsh,
            Keys {
                toggle: "x'y",
                recall: "^R",
            },
        );
        assert!(s.contains(r"bindkey 'x'\''y' scopehist-toggle"));
    }
}
