use super::interface::Location;

/// An in-memory address bar with browser-like back/forward history.
///
/// Useful for tests and the CLI, where no real browser exists. Every hash
/// written through [`Location::set_hash`] is also kept in `writes` so callers
/// can assert on exactly what the controller wrote.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    entries: Vec<String>,
    cursor: usize,
    writes: Vec<String>,
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::with_hash("")
    }
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on a page that already carries a hash fragment.
    pub fn with_hash(hash: &str) -> Self {
        Self {
            entries: vec![hash.to_owned()],
            cursor: 0,
            writes: Vec::new(),
        }
    }

    /// Every hash written through `set_hash`, oldest first.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// Number of history entries (the current one included).
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Step back one history entry, as the browser back button does.
    ///
    /// Returns the new hash, or `None` when already at the oldest entry.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        tracing::debug!("location: back to {:?}", self.entries[self.cursor]);
        Some(&self.entries[self.cursor])
    }

    /// Step forward one history entry.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        tracing::debug!("location: forward to {:?}", self.entries[self.cursor]);
        Some(&self.entries[self.cursor])
    }

    /// The user typed a new fragment into the address bar.
    ///
    /// Same history semantics as `set_hash`, but not recorded in `writes`.
    pub fn navigate(&mut self, hash: &str) {
        tracing::debug!("location: user navigated to {hash:?}");
        self.push_entry(hash);
    }

    fn push_entry(&mut self, hash: &str) {
        if self.entries[self.cursor] == hash {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(hash.to_owned());
        self.cursor = self.entries.len() - 1;
    }
}

impl Location for MemoryLocation {
    fn hash(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn set_hash(&mut self, hash: &str) {
        self.writes.push(hash.to_owned());
        self.push_entry(hash);
    }
}
