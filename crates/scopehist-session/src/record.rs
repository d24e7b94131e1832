//! Per-session record persisted between hook invocations.
//!
//! Location: `<store>/state/session.<id>.json`

use crate::state::SessionState;
use crate::toggle::Mode;
use scopehist_core::{HistError, HistResult};
use scopehist_host::HistoryBuffer;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub started_at: String,
    pub updated_at: String,
    pub state: SessionState,
    pub buffer: HistoryBuffer,
}

impl SessionRecord {
    pub fn new(session_id: &str, mode: Mode, capacity: usize) -> Self {
        let now = now_rfc3339();
        Self {
            session_id: session_id.to_string(),
            started_at: now.clone(),
            updated_at: now,
            state: SessionState::new(mode),
            buffer: HistoryBuffer::new(capacity),
        }
    }

    pub fn load(store_root: &Path, session_id: &str) -> HistResult<Option<Self>> {
        let path = scopehist_store::session_record_path(store_root, session_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path).map_err(|e| HistError::io(&path, e))?;
        let record: Self = serde_json::from_str(&content).map_err(|e| HistError::State {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(record))
    }

    /// Load the record, or start a fresh one when none exists yet.
    pub fn load_or_new(
        store_root: &Path,
        session_id: &str,
        mode: Mode,
        capacity: usize,
    ) -> HistResult<Self> {
        let mut record = match Self::load(store_root, session_id)? {
            Some(r) => r,
            None => Self::new(session_id, mode, capacity),
        };
        record.buffer.set_capacity(capacity);
        Ok(record)
    }

    pub fn save(&mut self, store_root: &Path) -> HistResult<()> {
        self.updated_at = now_rfc3339();
        let path = scopehist_store::session_record_path(store_root, &self.session_id);
        let data = serde_json::to_string(self)?;
        scopehist_store::write_atomic(&path, data.as_bytes())
    }

    /// Age of the record relative to `now`, from `updated_at`.
    /// `None` when the timestamp cannot be parsed.
    pub fn age(&self, now: time::OffsetDateTime) -> Option<time::Duration> {
        time::OffsetDateTime::parse(
            &self.updated_at,
            &time::format_description::well_known::Rfc3339,
        )
        .ok()
        .map(|ts| now - ts)
    }

    pub fn remove(store_root: &Path, session_id: &str) -> HistResult<()> {
        let path = scopehist_store::session_record_path(store_root, session_id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HistError::io(&path, e)),
        }
    }
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
