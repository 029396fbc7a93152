//! Render boundary
//!
//! The controller never draws. It emits [`RenderOp`]s, with colors already
//! resolved, to whatever [`RenderTarget`] the host supplies.

use hueconsole_core::Color;

/// Font selection
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Family name
    pub family: String,
    /// Point size
    pub size: f32,
    /// Bold weight
    pub bold: bool,
    /// Italic style
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
            size: 14.0,
            bold: true,
            italic: false,
        }
    }
}

/// A single display update, in character offsets
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    /// Insert `text` at `offset` in `color`
    Insert {
        /// Insertion offset
        offset: usize,
        /// Resolved foreground
        color: Color,
        /// The characters
        text: String,
    },
    /// Remove `len` characters at `offset`
    Remove {
        /// First removed offset
        offset: usize,
        /// Number of characters
        len: usize,
    },
    /// Discard everything
    Clear,
    /// Caret moved
    Caret(usize),
    /// Audible signal (no completion, no more history)
    Bell,
    /// Default foreground changed
    SetForeground(Color),
    /// Background changed
    SetBackground(Color),
    /// Font changed
    SetFont(Font),
}

/// Receiver of render operations
pub trait RenderTarget {
    /// Apply one operation
    fn apply(&mut self, op: RenderOp);
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn apply(&mut self, op: RenderOp) {
        (**self).apply(op)
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for Box<T> {
    fn apply(&mut self, op: RenderOp) {
        (**self).apply(op)
    }
}

/// Discards every operation
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTarget;

impl RenderTarget for NullTarget {
    fn apply(&mut self, _op: RenderOp) {}
}

/// In-memory mirror of the display
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    cells: Vec<(char, Color)>,
    caret: usize,
    bells: usize,
    foreground: Option<Color>,
    background: Option<Color>,
    font: Option<Font>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed text
    pub fn text(&self) -> String {
        self.cells.iter().map(|(c, _)| *c).collect()
    }

    /// Displayed text as maximal same-color runs
    pub fn runs(&self) -> Vec<(Color, String)> {
        let mut runs: Vec<(Color, String)> = Vec::new();
        for &(c, color) in &self.cells {
            match runs.last_mut() {
                Some((last, text)) if *last == color => text.push(c),
                _ => runs.push((color, c.to_string())),
            }
        }
        runs
    }

    /// Caret offset
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Number of bells rung
    pub fn bells(&self) -> usize {
        self.bells
    }

    /// Last foreground set
    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    /// Last background set
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Last font set
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }
}

impl RenderTarget for Transcript {
    fn apply(&mut self, op: RenderOp) {
        match op {
            RenderOp::Insert {
                offset,
                color,
                text,
            } => {
                let at = offset.min(self.cells.len());
                self.cells.splice(at..at, text.chars().map(|c| (c, color)));
            }
            RenderOp::Remove { offset, len } => {
                let start = offset.min(self.cells.len());
                let end = offset.saturating_add(len).min(self.cells.len());
                self.cells.drain(start..end);
            }
            RenderOp::Clear => {
                self.cells.clear();
                self.caret = 0;
            }
            RenderOp::Caret(offset) => self.caret = offset.min(self.cells.len()),
            RenderOp::Bell => self.bells += 1,
            RenderOp::SetForeground(color) => self.foreground = Some(color),
            RenderOp::SetBackground(color) => self.background = Some(color),
            RenderOp::SetFont(font) => self.font = Some(font),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_applies_edits() {
        let red = Color::rgb(255, 0, 0);
        let mut transcript = Transcript::new();
        transcript.apply(RenderOp::Insert {
            offset: 0,
            color: Color::GREEN,
            text: "hello".to_string(),
        });
        transcript.apply(RenderOp::Insert {
            offset: 5,
            color: red,
            text: "!!".to_string(),
        });
        transcript.apply(RenderOp::Remove { offset: 0, len: 1 });
        transcript.apply(RenderOp::Caret(6));
        transcript.apply(RenderOp::Bell);

        assert_eq!(transcript.text(), "ello!!");
        assert_eq!(
            transcript.runs(),
            vec![(Color::GREEN, "ello".to_string()), (red, "!!".to_string())]
        );
        assert_eq!(transcript.caret(), 6);
        assert_eq!(transcript.bells(), 1);
    }

    #[test]
    fn test_transcript_tolerates_out_of_range_ops() {
        let mut transcript = Transcript::new();
        transcript.apply(RenderOp::Remove { offset: 3, len: 10 });
        transcript.apply(RenderOp::Insert {
            offset: 9,
            color: Color::WHITE,
            text: "x".to_string(),
        });
        transcript.apply(RenderOp::Caret(40));
        assert_eq!(transcript.text(), "x");
        assert_eq!(transcript.caret(), 1);
    }

    #[test]
    fn test_transcript_tracks_appearance() {
        let mut transcript = Transcript::new();
        transcript.apply(RenderOp::SetBackground(Color::BLACK));
        transcript.apply(RenderOp::SetFont(Font::default()));
        assert_eq!(transcript.background(), Some(Color::BLACK));
        assert_eq!(transcript.font().map(|f| f.size), Some(14.0));
        assert_eq!(transcript.foreground(), None);
    }
}
