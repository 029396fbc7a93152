//! Command history ring
//!
//! Entries are kept oldest first. The cursor `k` ranges over `0..=n`; `k == n`
//! means the user is typing a fresh line, anything lower means entry `k` is
//! on display. The scratch slot holds the fresh line while browsing.

use std::sync::Arc;
use tracing::trace;

/// Submitted lines plus browsing state
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
    scratch: String,
    snapshot: Arc<[String]>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            scratch: String::new(),
            snapshot: Arc::from(Vec::new()),
        }
    }

    /// Append a submitted line and stop browsing.
    ///
    /// Every submission is kept, including empty lines and repeats.
    pub fn submit(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = self.entries.len();
        self.scratch.clear();
        self.snapshot = Arc::from(self.entries.as_slice());
        trace!(subsystem = "history", entries = self.entries.len(), "Line submitted");
    }

    /// Step to the next older entry.
    ///
    /// `current_input` is stashed in the scratch slot when browsing starts.
    /// Returns `None` at the oldest entry.
    pub fn up(&mut self, current_input: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        if !self.is_browsing() {
            self.scratch = current_input.to_string();
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step to the next newer entry, or back to the scratch line.
    ///
    /// Returns `None` when not browsing.
    pub fn down(&mut self) -> Option<String> {
        if !self.is_browsing() {
            return None;
        }
        self.cursor += 1;
        if self.cursor == self.entries.len() {
            Some(self.scratch.clone())
        } else {
            Some(self.entries[self.cursor].clone())
        }
    }

    /// Whether an older entry is currently displayed
    pub fn is_browsing(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Browsing cursor, `len()` when not browsing
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been submitted yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Shared immutable copy of the entries.
    ///
    /// Each submit replaces the shared copy; earlier snapshots are unaffected.
    pub fn snapshot(&self) -> Arc<[String]> {
        Arc::clone(&self.snapshot)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
