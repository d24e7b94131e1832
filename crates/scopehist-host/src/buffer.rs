use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

/// Ordered, capacity-bounded ring of history entries.
///
/// Every entry carries an implicit sequence number (`first_seq + index`).
/// Entries that came from a file are *old*; entries pushed afterwards are
/// *fresh*. Incremental appends only ever write fresh entries, and remember
/// per target file how far they got.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryBuffer {
    capacity: usize,
    entries: VecDeque<String>,
    first_seq: u64,
    fresh_from: u64,
    #[serde(default)]
    marks: BTreeMap<PathBuf, u64>,
    #[serde(default)]
    backing_file: Option<PathBuf>,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
            first_seq: 0,
            fresh_from: 0,
            marks: BTreeMap::new(),
            backing_file: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change capacity, evicting the oldest entries when shrinking.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.evict();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    fn next_seq(&self) -> u64 {
        self.first_seq + self.entries.len() as u64
    }

    /// Add a fresh entry.
    pub fn push(&mut self, entry: String) {
        self.entries.push_back(entry);
        self.evict();
    }

    fn evict(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.first_seq += 1;
        }
    }

    /// Drop every entry and every append mark. Files are not touched.
    pub fn clear(&mut self) {
        self.first_seq = self.next_seq();
        self.fresh_from = self.first_seq;
        self.entries.clear();
        self.marks.clear();
    }

    /// Replace the contents with entries read from a file; all become old.
    pub fn replace_with_old(&mut self, entries: Vec<String>) {
        self.clear();
        for entry in entries {
            self.entries.push_back(entry);
            self.evict();
        }
        self.fresh_from = self.next_seq();
    }

    /// Fresh entries not yet appended to `path`, oldest first.
    pub fn pending_for(&self, path: &Path) -> Vec<&str> {
        let mark = self
            .marks
            .get(path)
            .copied()
            .unwrap_or(0)
            .max(self.fresh_from)
            .max(self.first_seq);
        let skip = (mark - self.first_seq) as usize;
        self.entries.iter().skip(skip).map(String::as_str).collect()
    }

    /// Record that everything currently buffered has reached `path`.
    pub fn mark_written(&mut self, path: &Path) {
        let next = self.next_seq();
        self.marks.insert(path.to_path_buf(), next);
    }

    pub fn backing_file(&self) -> Option<&Path> {
        self.backing_file.as_deref()
    }

    pub fn set_backing_file(&mut self, path: &Path) {
        self.backing_file = Some(path.to_path_buf());
    }
}
