use crate::cmd_hook::store_root;
use scopehist_core::Config;
use scopehist_session::SessionRecord;
use std::path::Path;

/// Remove session records not updated within `days`. Returns ids removed.
fn collect(store: &Path, days: u32, dry_run: bool) -> anyhow::Result<Vec<String>> {
    let dir = scopehist_store::state_dir(store);
    let entries = match std::fs::read_dir(&dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let now = time::OffsetDateTime::now_utc();
    let limit = time::Duration::days(i64::from(days));
    let mut removed = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        let Some(sid) = name
            .strip_prefix("session.")
            .and_then(|s| s.strip_suffix(".json"))
        else {
            continue;
        };
        let stale = match SessionRecord::load(store, sid) {
            Ok(Some(rec)) => rec.age(now).is_none_or(|age| age > limit),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("removing unreadable session record: {e}");
                true
            }
        };
        if stale {
            if !dry_run {
                SessionRecord::remove(store, sid)?;
            }
            removed.push(sid.to_string());
        }
    }
    removed.sort();
    Ok(removed)
}

/// `scopehist gc [--days N] [--dry-run]`
pub fn execute(config: &Config, days: u32, dry_run: bool) -> anyhow::Result<()> {
    let removed = collect(&store_root(config), days, dry_run)?;
    let verb = if dry_run { "Would remove" } else { "Removed" };
    println!("{verb} {} stale session(s)", removed.len());
    for sid in removed {
        println!("  {sid}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopehist_session::Mode;

    #[test]
    fn removes_only_stale_records() {
        let tmp = tempfile::tempdir().unwrap();
        let mut fresh = SessionRecord::new("fresh", Mode::Scoped, 10);
        fresh.save(tmp.path()).unwrap();

        let mut old = SessionRecord::new("old", Mode::Scoped, 10);
        old.save(tmp.path()).unwrap();
        old.updated_at = "2020-01-01T00:00:00Z".into();
        let path = scopehist_store::session_record_path(tmp.path(), "old");
        std::fs::write(&path, serde_json::to_string(&old).unwrap()).unwrap();

        let dry = collect(tmp.path(), 7, true).unwrap();
        assert_eq!(dry, vec!["old"]);
        assert!(path.exists());

        let removed = collect(tmp.path(), 7, false).unwrap();
        assert_eq!(removed, vec!["old"]);
        assert!(!path.exists());
        assert!(SessionRecord::load(tmp.path(), "fresh").unwrap().is_some());
    }

    #[test]
    fn missing_state_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(collect(tmp.path(), 1, false).unwrap().is_empty());
    }
}
