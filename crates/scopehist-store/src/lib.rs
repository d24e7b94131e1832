pub mod paths;

pub use paths::ScopePaths;

use scopehist_core::{HistError, HistResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Return the per-user store root: `<data_dir>/scopehist/`
/// (falls back to `~/.scopehist/`). `override_root` wins when set.
pub fn store_root(override_root: Option<&Path>) -> PathBuf {
    if let Some(root) = override_root {
        root.to_path_buf()
    } else if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("scopehist")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".scopehist")
    } else {
        PathBuf::from(".scopehist-store")
    }
}

/// Return the session state directory: `store_root/state/`
pub fn state_dir(store_root: &Path) -> PathBuf {
    store_root.join("state")
}

/// Path of the record for one interactive session.
pub fn session_record_path(store_root: &Path, session_id: &str) -> PathBuf {
    state_dir(store_root).join(format!("session.{session_id}.json"))
}

/// Atomic write: write to temp file in same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> HistResult<()> {
    let parent = path.parent().ok_or_else(|| {
        HistError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"),
        )
    })?;
    fs::create_dir_all(parent).map_err(|source| HistError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| HistError::io(path, e))?;
    tmp.write_all(data).map_err(|e| HistError::io(path, e))?;
    tmp.flush().map_err(|e| HistError::io(path, e))?;
    tmp.persist(path).map_err(|e| HistError::io(path, e.error))?;
    Ok(())
}
