//! HueConsole color directives
//!
//! The SGR color table and the streaming decoder that turns text with
//! embedded ANSI color sequences and `0xRRGGBB` hex directives into colored
//! runs.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod decoder;
pub mod table;

pub use decoder::{DecoderSettings, EscapeDecoder};
pub use table::{Hue, Intensity, SgrColor};

/// The escape character that starts every ANSI sequence
pub const ESC: char = '\u{1b}';
