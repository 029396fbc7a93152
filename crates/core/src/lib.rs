//! HueConsole Core
//!
//! Shared types for the HueConsole embeddable console: colors, colored runs,
//! error types and the logging bootstrap.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod error;
pub mod logging;

pub use color::{Color, ColorParseError, Run, RunColor};
pub use error::{ConsoleError, DocError};

/// Core result type for HueConsole operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Version information for HueConsole
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert_eq!(VERSION, "0.1.0");
    }
}
