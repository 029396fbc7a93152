//! HueConsole document buffer
//!
//! A character store with per-character foreground colors and a single
//! commit boundary, the *limit*. Characters below the limit are committed
//! console output and never change; characters from the limit to the end
//! are the user's input line. The caret guard keeps the caret inside the
//! input region.
//!
//! Every mutation is recorded in an edit journal that the controller drains
//! and forwards to its render target.

#![warn(missing_docs)]
#![deny(unsafe_code)]

use hueconsole_core::{DocError, Run, RunColor};
use tracing::{instrument, trace, warn};

/// One character and its foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// The character
    pub ch: char,
    /// Its foreground
    pub color: RunColor,
}

/// A change to the document, in character offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// `text` was inserted at `offset` in a single color
    Insert {
        /// Insertion offset
        offset: usize,
        /// Foreground of the inserted text
        color: RunColor,
        /// Inserted characters
        text: String,
    },
    /// `len` characters starting at `offset` were removed
    Remove {
        /// First removed offset
        offset: usize,
        /// Number of removed characters
        len: usize,
    },
    /// All content was discarded
    Clear,
}

/// Document buffer with commit boundary and caret guard
#[derive(Debug, Clone, Default)]
pub struct Document {
    glyphs: Vec<Glyph>,
    limit: usize,
    caret: usize,
    journal: Vec<Edit>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the document holds no characters
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Commit boundary
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Caret offset
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Append committed runs at the end and move limit and caret there.
    ///
    /// Any input region becomes committed as well.
    pub fn append_committed(&mut self, runs: &[Run]) {
        for run in runs {
            let offset = self.glyphs.len();
            self.insert_raw(offset, run.color, &run.text);
        }
        self.limit = self.glyphs.len();
        self.caret = self.limit;
    }

    /// Insert committed runs at the limit, pushing the input region down.
    ///
    /// Returns the number of characters inserted. With an empty input region
    /// this is the same as [`Self::append_committed`].
    pub fn insert_committed(&mut self, runs: &[Run]) -> usize {
        let mut inserted = 0;
        for run in runs {
            let count = self.insert_raw(self.limit, run.color, &run.text);
            self.limit += count;
            inserted += count;
        }
        self.caret = (self.caret + inserted).clamp(self.limit, self.glyphs.len());
        inserted
    }

    /// Append text to the input region and put the caret at the end
    pub fn append_input(&mut self, text: &str, color: RunColor) {
        let offset = self.glyphs.len();
        self.insert_raw(offset, color, text);
        self.caret = self.glyphs.len();
    }

    /// Insert text at the caret and advance the caret past it
    pub fn insert_at_caret(&mut self, text: &str, color: RunColor) -> Result<(), DocError> {
        if self.caret < self.limit {
            return Err(self.invalid_offset(self.caret));
        }
        self.caret += self.insert_raw(self.caret, color, text);
        Ok(())
    }

    /// Replace the whole input region with `text`
    pub fn replace_input(&mut self, text: &str, color: RunColor) {
        let input_len = self.glyphs.len() - self.limit;
        if input_len > 0 {
            self.remove_raw(self.limit, input_len);
        }
        self.append_input(text, color);
    }

    /// Delete up to `n` characters ending at the caret, never crossing the limit.
    ///
    /// Returns how many characters were removed.
    pub fn delete_before_caret(&mut self, n: usize) -> usize {
        let available = self.caret.saturating_sub(self.limit);
        let count = n.min(available);
        if count == 0 {
            trace!(subsystem = "document", caret = self.caret, "Delete at limit ignored");
            return 0;
        }
        self.caret -= count;
        self.remove_raw(self.caret, count);
        count
    }

    /// Remove `len` characters at `offset`, which must lie in the input region
    pub fn remove(&mut self, offset: usize, len: usize) -> Result<(), DocError> {
        let end = offset.checked_add(len).ok_or_else(|| self.invalid_offset(offset))?;
        if offset < self.limit || end > self.glyphs.len() {
            return Err(self.invalid_offset(offset));
        }
        if len == 0 {
            return Ok(());
        }
        self.remove_raw(offset, len);
        if self.caret > offset {
            self.caret -= (self.caret - offset).min(len);
        }
        Ok(())
    }

    /// The input region as a string
    pub fn user_input(&self) -> String {
        self.glyphs[self.limit..].iter().map(|g| g.ch).collect()
    }

    /// Promote the input region to committed output and return it
    #[instrument(name = "document_commit_input", skip(self))]
    pub fn commit_input(&mut self) -> String {
        let input = self.user_input();
        self.limit = self.glyphs.len();
        self.caret = self.limit;
        input
    }

    /// Discard all content and reset limit and caret to zero
    #[instrument(name = "document_clear", skip(self))]
    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.limit = 0;
        self.caret = 0;
        self.journal.push(Edit::Clear);
    }

    /// Move the caret, clamped to `[limit, length]`
    pub fn set_caret(&mut self, offset: usize) -> usize {
        self.caret = offset.clamp(self.limit, self.glyphs.len());
        self.caret
    }

    /// Move the caret by `delta` characters, clamped to the input region
    pub fn move_caret(&mut self, delta: isize) -> usize {
        let target = if delta.is_negative() {
            self.caret.saturating_sub(delta.unsigned_abs())
        } else {
            self.caret.saturating_add(delta.unsigned_abs())
        };
        self.set_caret(target)
    }

    /// Record a caret move made by the host widget.
    ///
    /// The offset is only bounded by the length; it may sit below the limit
    /// until [`Self::make_caret_valid`] runs.
    pub fn host_caret_moved(&mut self, offset: usize) {
        self.caret = offset.min(self.glyphs.len());
    }

    /// Whether `limit <= caret <= length`
    pub fn is_caret_valid(&self) -> bool {
        self.limit <= self.caret && self.caret <= self.glyphs.len()
    }

    /// Pull an out-of-range caret back to the limit, the start of the input.
    ///
    /// Returns true when the caret moved.
    pub fn make_caret_valid(&mut self) -> bool {
        if self.is_caret_valid() {
            return false;
        }
        trace!(
            subsystem = "document",
            caret = self.caret,
            limit = self.limit,
            "Caret restored to limit"
        );
        self.caret = self.limit;
        true
    }

    /// Whole document text
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }

    /// Text below the limit
    pub fn committed_text(&self) -> String {
        self.glyphs[..self.limit].iter().map(|g| g.ch).collect()
    }

    /// Glyph at `offset`
    pub fn glyph(&self, offset: usize) -> Option<Glyph> {
        self.glyphs.get(offset).copied()
    }

    /// The document as maximal same-color runs
    pub fn runs(&self) -> Vec<Run> {
        runs_of(&self.glyphs)
    }

    /// Committed output as maximal same-color runs
    pub fn committed_runs(&self) -> Vec<Run> {
        runs_of(&self.glyphs[..self.limit])
    }

    /// Take the edits recorded since the last call
    pub fn drain_edits(&mut self) -> Vec<Edit> {
        std::mem::take(&mut self.journal)
    }

    fn insert_raw(&mut self, offset: usize, color: RunColor, text: &str) -> usize {
        let before = self.glyphs.len();
        self.glyphs
            .splice(offset..offset, text.chars().map(|ch| Glyph { ch, color }));
        let inserted = self.glyphs.len() - before;
        if inserted > 0 {
            self.journal.push(Edit::Insert {
                offset,
                color,
                text: text.to_string(),
            });
        }
        inserted
    }

    fn remove_raw(&mut self, offset: usize, len: usize) {
        self.glyphs.drain(offset..offset + len);
        self.journal.push(Edit::Remove { offset, len });
    }

    fn invalid_offset(&self, offset: usize) -> DocError {
        warn!(
            subsystem = "document",
            offset = offset,
            limit = self.limit,
            length = self.glyphs.len(),
            "Edit outside the input region ignored"
        );
        DocError::InvalidOffset {
            offset,
            limit: self.limit,
            length: self.glyphs.len(),
        }
    }
}

fn runs_of(glyphs: &[Glyph]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for glyph in glyphs {
        match runs.last_mut() {
            Some(run) if run.color == glyph.color => run.text.push(glyph.ch),
            _ => runs.push(Run::new(glyph.color, glyph.ch.to_string())),
        }
    }
    runs
}
