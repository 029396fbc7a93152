//! Streaming color-directive decoder
//!
//! [`EscapeDecoder::feed`] accepts text in arbitrary chunks and returns the
//! colored runs it contains. A chunk that ends in the middle of an escape
//! sequence (or a hex directive) leaves the unfinished tail in the partial
//! buffer, and the next chunk is decoded as if it had been appended to it.
//! The decoder never fails: malformed sequences are consumed, logged and
//! queued as [`DocError::MalformedEscape`] warnings.

use crate::{table, ESC};
use hueconsole_core::{Color, DocError, Run, RunColor};
use tracing::{trace, warn};

/// Length of a `0xRRGGBB` directive
pub const HEX_DIRECTIVE_LEN: usize = 8;

/// Longest parameter string accepted between `ESC[` and the final byte
pub const MAX_SEQUENCE_PARAMS: usize = 16;

/// Warnings kept for [`EscapeDecoder::take_warnings`]; older ones are dropped
const MAX_PENDING_WARNINGS: usize = 32;

/// Decoder policy knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderSettings {
    /// Interpret `ESC[...m` sequences; when false `ESC` is plain text
    pub enable_ansi: bool,
    /// Interpret `0xRRGGBB` directives; when false they are plain text
    pub enable_hex: bool,
    /// Restore the default foreground at the start of every [`EscapeDecoder::feed`]
    pub reset_color_after_each_msg: bool,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Self {
            enable_ansi: true,
            enable_hex: true,
            reset_color_after_each_msg: true,
        }
    }
}

/// Outcome of scanning from an `ESC`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeScan {
    /// Input ends before the sequence does
    Incomplete,
    /// `ESC [ params m`, `len` chars long
    Sgr { len: usize },
    /// A well-formed CSI sequence with a final byte other than `m`
    Unsupported { len: usize },
    /// Not a CSI sequence; drop `len` chars and continue after them
    Broken { len: usize },
}

/// Outcome of scanning from a `0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HexScan {
    Incomplete,
    Match(Color),
    NoMatch,
}

/// Stateful, restartable ANSI/hex color decoder
#[derive(Debug, Clone)]
pub struct EscapeDecoder {
    settings: DecoderSettings,
    current: RunColor,
    pending: String,
    warnings: Vec<DocError>,
}

impl EscapeDecoder {
    /// Create a decoder whose current color is the default foreground
    pub fn new(settings: DecoderSettings) -> Self {
        Self {
            settings,
            current: RunColor::Default,
            pending: String::new(),
            warnings: Vec::new(),
        }
    }

    /// Current policy
    pub fn settings(&self) -> DecoderSettings {
        self.settings
    }

    /// Replace the policy; buffered state is kept
    pub fn set_settings(&mut self, settings: DecoderSettings) {
        self.settings = settings;
    }

    /// Color applied to the next emitted text
    pub fn current_color(&self) -> RunColor {
        self.current
    }

    /// Override the current color
    pub fn set_color(&mut self, color: RunColor) {
        self.current = color;
    }

    /// Unterminated tail held back from the previous chunk
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Clear the partial buffer and restore the default foreground
    pub fn reset(&mut self) {
        self.pending.clear();
        self.current = RunColor::Default;
    }

    /// Decode one message: applies the reset policy, then [`Self::decode`]
    pub fn feed(&mut self, text: &str) -> Vec<Run> {
        self.begin_message();
        self.decode(text)
    }

    /// Apply the reset-after-each-message policy
    pub fn begin_message(&mut self) {
        if self.settings.reset_color_after_each_msg {
            self.current = RunColor::Default;
        }
    }

    /// Decode a chunk without touching the reset policy
    pub fn decode(&mut self, text: &str) -> Vec<Run> {
        let mut input = std::mem::take(&mut self.pending);
        input.push_str(text);
        let chars: Vec<char> = input.chars().collect();

        let mut runs = RunBuilder::default();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];

            if c == ESC && self.settings.enable_ansi {
                match scan_escape(&chars[i..]) {
                    EscapeScan::Incomplete => {
                        self.pending = chars[i..].iter().collect();
                        break;
                    }
                    EscapeScan::Sgr { len } => {
                        let params: String = chars[i + 2..i + len - 1].iter().collect();
                        self.apply_sgr(&params);
                        i += len;
                    }
                    EscapeScan::Unsupported { len } | EscapeScan::Broken { len } => {
                        let raw: String = chars[i..i + len].iter().collect();
                        self.malformed(&raw);
                        i += len;
                    }
                }
                continue;
            }

            if c == '0' && self.settings.enable_hex {
                match scan_hex(&chars[i..]) {
                    HexScan::Incomplete => {
                        self.pending = chars[i..].iter().collect();
                        break;
                    }
                    HexScan::Match(color) => {
                        trace!(subsystem = "ansi", color = %color, "Hex directive");
                        self.current = RunColor::Rgb(color);
                        i += HEX_DIRECTIVE_LEN;
                        continue;
                    }
                    HexScan::NoMatch => {}
                }
            }

            runs.push(self.current, c);
            i += 1;
        }

        if !self.pending.is_empty() {
            trace!(subsystem = "ansi", pending = ?self.pending, "Holding partial directive");
        }
        runs.finish()
    }

    /// Emit a held-back hex candidate (e.g. a trailing `0x1`) as plain text.
    ///
    /// A partial `ESC` sequence stays buffered.
    pub fn flush(&mut self) -> Vec<Run> {
        if self.pending.is_empty() || self.pending.starts_with(ESC) {
            return Vec::new();
        }
        let text = std::mem::take(&mut self.pending);
        vec![Run::new(self.current, text)]
    }

    /// Drain the malformed-sequence warnings collected so far
    pub fn take_warnings(&mut self) -> Vec<DocError> {
        std::mem::take(&mut self.warnings)
    }

    fn apply_sgr(&mut self, params: &str) {
        match table::lookup(params) {
            Some(selected) => {
                trace!(subsystem = "ansi", params = params, "SGR color");
                self.current = selected.run_color();
            }
            None => {
                self.malformed(&format!("{}[{}m", ESC, params));
                self.current = RunColor::Default;
            }
        }
    }

    fn malformed(&mut self, raw: &str) {
        let printable = raw.replace(ESC, "\\u001B");
        warn!(
            subsystem = "ansi",
            sequence = %printable,
            supported = %table::supported_sequences(" "),
            "Unsupported escape sequence"
        );
        if self.warnings.len() == MAX_PENDING_WARNINGS {
            self.warnings.remove(0);
        }
        self.warnings.push(DocError::MalformedEscape(printable));
    }
}

impl Default for EscapeDecoder {
    fn default() -> Self {
        Self::new(DecoderSettings::default())
    }
}

/// Scan a sequence starting at `chars[0] == ESC`
fn scan_escape(chars: &[char]) -> EscapeScan {
    match chars.get(1) {
        None => return EscapeScan::Incomplete,
        Some('[') => {}
        Some(_) => return EscapeScan::Broken { len: 1 },
    }

    let mut j = 2;
    while j < chars.len() && is_parameter_byte(chars[j]) {
        if j - 2 == MAX_SEQUENCE_PARAMS {
            return EscapeScan::Broken { len: j };
        }
        j += 1;
    }

    match chars.get(j) {
        None => EscapeScan::Incomplete,
        Some('m') => EscapeScan::Sgr { len: j + 1 },
        Some(&c) if is_final_byte(c) => EscapeScan::Unsupported { len: j + 1 },
        Some(_) => EscapeScan::Broken { len: j },
    }
}

/// Scan a directive starting at `chars[0] == '0'`.
///
/// Only a tail that already reads `0x` is held back; a lone trailing `0` is
/// ordinary text.
fn scan_hex(chars: &[char]) -> HexScan {
    if chars.len() < 2 {
        return HexScan::NoMatch;
    }
    for k in 1..HEX_DIRECTIVE_LEN {
        let Some(&c) = chars.get(k) else {
            return HexScan::Incomplete;
        };
        let valid = if k == 1 { c == 'x' } else { c.is_ascii_hexdigit() };
        if !valid {
            return HexScan::NoMatch;
        }
    }

    let directive: String = chars[..HEX_DIRECTIVE_LEN].iter().collect();
    match Color::from_hex_directive(&directive) {
        Some(color) => HexScan::Match(color),
        None => HexScan::NoMatch,
    }
}

/// CSI parameter and intermediate bytes (0x20-0x3F)
fn is_parameter_byte(c: char) -> bool {
    ('\u{20}'..='\u{3f}').contains(&c)
}

/// CSI final bytes (0x40-0x7E)
fn is_final_byte(c: char) -> bool {
    ('\u{40}'..='\u{7e}').contains(&c)
}

/// Collects characters into runs, starting a new run only when the color changes
#[derive(Default)]
struct RunBuilder {
    runs: Vec<Run>,
}

impl RunBuilder {
    fn push(&mut self, color: RunColor, c: char) {
        match self.runs.last_mut() {
            Some(run) if run.color == color => run.text.push(c),
            _ => self.runs.push(Run::new(color, c.to_string())),
        }
    }

    fn finish(self) -> Vec<Run> {
        self.runs
    }
}
