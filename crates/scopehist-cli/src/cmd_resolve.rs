use scopehist_core::Config;
use scopehist_scope::{detector_for, ScopeResolver};
use scopehist_store::ScopePaths;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct ResolveOutput {
    kind: &'static str,
    anchor: PathBuf,
    file: PathBuf,
    exists: bool,
}

fn resolve(config: &Config, dir: &Path) -> ResolveOutput {
    let resolver = ScopeResolver::new(
        detector_for(config.detection),
        ScopePaths::from_config(config),
    );
    let scope = resolver.resolve_scope(dir);
    ResolveOutput {
        kind: scope.identity.kind_str(),
        anchor: scope.identity.anchor().to_path_buf(),
        exists: scope.file.exists(),
        file: scope.file,
    }
}

/// `scopehist resolve [dir]`
pub fn execute(config: &Config, dir: &Path, json: bool) -> anyhow::Result<()> {
    let out = resolve(config, dir);
    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}\t{}", out.kind, out.file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_repo_and_plain_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = tmp.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        std::fs::create_dir_all(repo.join("src")).unwrap();
        let plain = tmp.path().join("plain");
        std::fs::create_dir_all(&plain).unwrap();

        let base = tmp.path().join("base").display().to_string();
        let config = Config::from_lookup(|k| match k {
            "SCOPEHIST_DETECT" => Some("walk".into()),
            "SCOPEHIST_BASE_DIR" => Some(base.clone()),
            _ => None,
        });

        let out = resolve(&config, &repo.join("src"));
        assert_eq!(out.kind, "repo");
        assert_eq!(out.file, repo.canonicalize().unwrap().join(".zsh_history"));
        assert!(!out.exists);

        let out = resolve(&config, &plain);
        assert_eq!(out.kind, "path");
        assert!(out.file.starts_with(tmp.path().join("base")));
        assert!(out.file.ends_with("plain/history"));
    }
}
