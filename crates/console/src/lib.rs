//! HueConsole interactive console
//!
//! The console controller and the pieces it orchestrates: history ring,
//! completion, line tokenizer, command dispatch and the render boundary.
//!
//! ```
//! use hueconsole_console::{handler_fn, Console, ConsoleOptions, Key, Transcript};
//!
//! let mut options = ConsoleOptions { prompt: "> ".into(), ..ConsoleOptions::default() };
//! options.commands.insert("hello", handler_fn(|console, _line, _args| console.println("hi")));
//!
//! let mut console = Console::new(options, Transcript::new());
//! console.type_text("hello");
//! console.press(Key::Enter);
//! assert_eq!(console.document().text(), "> hello\nhi\n> ");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod completion;
pub mod controller;
pub mod handler;
pub mod history;
pub mod key;
pub mod profile;
pub mod reader;
pub mod registry;
pub mod render;
pub mod tokenize;

pub use completion::{CompletionSource, VocabularyCompleter};
pub use controller::{Console, ConsoleOptions, Mode};
pub use handler::{handler_fn, CommandHandler, CommandSet, Facade, WriteOptions};
pub use history::History;
pub use key::{Key, KeyAction, KeyEvent};
pub use profile::Profile;
pub use reader::LineReader;
pub use registry::ConsoleRegistry;
pub use render::{Font, NullTarget, RenderOp, RenderTarget, Transcript};
pub use tokenize::parse_line;
