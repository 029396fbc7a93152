//! HueConsole command-line host
//!
//! A headless host that feeds stdin lines to the console controller and
//! prints its committed output with 24-bit colors.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod app;

pub use app::{render_ansi, ClearWatch, HeadlessApp};
