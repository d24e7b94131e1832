use scopehist_core::Config;
use scopehist_host::codec;
use scopehist_scope::{detector_for, ScopeResolver};
use scopehist_store::ScopePaths;
use std::path::{Path, PathBuf};

fn target_file(config: &Config, dir: &Path, global: bool) -> PathBuf {
    if global {
        return config.global_file.clone();
    }
    ScopeResolver::new(detector_for(config.detection), ScopePaths::from_config(config))
        .resolve_scope(dir)
        .file
}

/// Last `limit` entries of a history file, oldest first. `limit == 0` means all.
fn read_tail(path: &Path, limit: usize) -> anyhow::Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = std::fs::read(path)?;
    let mut entries = codec::decode(&String::from_utf8_lossy(&bytes));
    if limit > 0 && entries.len() > limit {
        entries.drain(..entries.len() - limit);
    }
    Ok(entries)
}

/// `scopehist show [dir] [--global] [--limit N]`
pub fn execute(config: &Config, dir: &Path, global: bool, limit: usize) -> anyhow::Result<()> {
    let file = target_file(config, dir, global);
    let entries = read_tail(&file, limit)?;
    if entries.is_empty() {
        eprintln!("(no history in {})", file.display());
        return Ok(());
    }
    for entry in entries {
        println!("{entry}");
    }
    Ok(())
}
