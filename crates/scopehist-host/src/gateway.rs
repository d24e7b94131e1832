use crate::buffer::HistoryBuffer;
use crate::codec;
use scopehist_core::{HistError, HistResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// The host history primitives the session logic is allowed to use.
///
/// This is the only seam that touches the in-memory buffer.
pub trait HistoryGateway {
    /// Append buffered entries not yet written to `path`. The buffer is kept.
    /// Returns how many entries were written.
    fn append_buffer_to(&mut self, path: &Path) -> HistResult<usize>;

    /// Discard the in-memory buffer without touching any file.
    fn clear_buffer(&mut self);

    /// Replace the buffer with the contents of `path` if it exists.
    /// Returns whether the file existed.
    fn load_into_buffer(&mut self, path: &Path) -> HistResult<bool>;

    /// Offer a freshly submitted line. Returns `false` when the line was
    /// dropped and reached no log.
    fn emit_entry(&mut self, raw_line: &str) -> bool;

    /// Point default persistence (e.g. at shell exit) at `path`.
    fn set_backing_file(&mut self, path: &Path);

    fn backing_file(&self) -> Option<&Path>;
}

/// File-backed host history: a [`HistoryBuffer`] plus the acceptance policy.
#[derive(Debug, Clone)]
pub struct HostHistory {
    buffer: HistoryBuffer,
    ignore_space: bool,
}

impl HostHistory {
    pub fn new(buffer: HistoryBuffer, ignore_space: bool) -> Self {
        Self {
            buffer,
            ignore_space,
        }
    }

    pub fn buffer(&self) -> &HistoryBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> HistoryBuffer {
        self.buffer
    }
}

impl HistoryGateway for HostHistory {
    fn append_buffer_to(&mut self, path: &Path) -> HistResult<usize> {
        let pending = self.buffer.pending_for(path);
        let count = pending.len();
        if count == 0 {
            return Ok(0);
        }
        // One write call so concurrent O_APPEND writers interleave by batch.
        let data = codec::encode_all(pending);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| HistError::io(path, e))?;
        file.write_all(data.as_bytes())
            .map_err(|e| HistError::io(path, e))?;
        self.buffer.mark_written(path);
        tracing::debug!(file = %path.display(), count, "appended history");
        Ok(count)
    }

    fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    fn load_into_buffer(&mut self, path: &Path) -> HistResult<bool> {
        if !path.exists() {
            tracing::debug!(file = %path.display(), "no history yet");
            return Ok(false);
        }
        let bytes = std::fs::read(path).map_err(|e| HistError::io(path, e))?;
        let entries = codec::decode(&String::from_utf8_lossy(&bytes));
        tracing::debug!(file = %path.display(), count = entries.len(), "loaded history");
        self.buffer.replace_with_old(entries);
        Ok(true)
    }

    fn emit_entry(&mut self, raw_line: &str) -> bool {
        if self.ignore_space && raw_line.starts_with(char::is_whitespace) {
            tracing::debug!("dropped space-prefixed command");
            return false;
        }
        let line = raw_line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(raw_line);
        if line.trim().is_empty() {
            return false;
        }
        self.buffer.push(line.to_string());
        true
    }

    fn set_backing_file(&mut self, path: &Path) {
        self.buffer.set_backing_file(path);
    }

    fn backing_file(&self) -> Option<&Path> {
        self.buffer.backing_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(ignore_space: bool) -> HostHistory {
        HostHistory::new(HistoryBuffer::new(100), ignore_space)
    }

    fn entries(h: &HostHistory) -> Vec<String> {
        h.buffer().entries().map(str::to_string).collect()
    }

    #[test]
    fn append_clear_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("history");
        let mut h = host(false);
        h.emit_entry("echo one\n");
        h.emit_entry("echo two\nand more");
        h.emit_entry("echo three");
        assert_eq!(h.append_buffer_to(&file).unwrap(), 3);

        h.clear_buffer();
        assert!(h.buffer().is_empty());
        assert!(h.load_into_buffer(&file).unwrap());
        assert_eq!(entries(&h), vec!["echo one", "echo two\nand more", "echo three"]);
    }

    #[test]
    fn append_is_incremental_and_keeps_buffer() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("history");
        let mut h = host(false);
        h.emit_entry("a");
        h.append_buffer_to(&file).unwrap();
        h.emit_entry("b");
        h.append_buffer_to(&file).unwrap();
        assert_eq!(h.append_buffer_to(&file).unwrap(), 0);

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "a\nb\n");
        assert_eq!(entries(&h), vec!["a", "b"]);
    }

    #[test]
    fn loaded_entries_are_not_reappended() {
        let tmp = tempfile::tempdir().unwrap();
        let scope = tmp.path().join("scope");
        let global = tmp.path().join("global");
        std::fs::write(&scope, "old\n").unwrap();

        let mut h = host(false);
        h.load_into_buffer(&scope).unwrap();
        h.emit_entry("new");
        h.append_buffer_to(&global).unwrap();
        h.append_buffer_to(&scope).unwrap();

        assert_eq!(std::fs::read_to_string(&global).unwrap(), "new\n");
        assert_eq!(std::fs::read_to_string(&scope).unwrap(), "old\nnew\n");
    }

    #[test]
    fn load_missing_file_leaves_buffer() {
        let tmp = tempfile::tempdir().unwrap();
        let mut h = host(false);
        h.clear_buffer();
        assert!(!h.load_into_buffer(&tmp.path().join("nope")).unwrap());
        assert!(h.buffer().is_empty());
    }

    #[test]
    fn append_without_pending_does_not_create_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("history");
        let mut h = host(false);
        assert_eq!(h.append_buffer_to(&file).unwrap(), 0);
        assert!(!file.exists());
    }

    #[test]
    fn append_into_missing_directory_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut h = host(false);
        h.emit_entry("x");
        let err = h
            .append_buffer_to(&tmp.path().join("missing").join("history"))
            .unwrap_err();
        assert!(matches!(err, HistError::Io { .. }));
    }

    #[test]
    fn leading_space_dropped_only_when_enabled() {
        let mut h = host(true);
        assert!(!h.emit_entry(" secret"));
        assert!(!h.emit_entry("\tsecret"));
        assert!(h.emit_entry("ls -la"));
        assert_eq!(entries(&h), vec!["ls -la"]);

        let mut h = host(false);
        assert!(h.emit_entry(" visible"));
        assert_eq!(entries(&h), vec![" visible"]);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let mut h = host(false);
        assert!(!h.emit_entry("\n"));
        assert!(!h.emit_entry(""));
        assert!(h.buffer().is_empty());
    }

    #[test]
    fn backing_file_is_tracked() {
        let mut h = host(false);
        assert_eq!(h.backing_file(), None);
        h.set_backing_file(Path::new("/s/history"));
        assert_eq!(h.backing_file(), Some(Path::new("/s/history")));
    }
}
