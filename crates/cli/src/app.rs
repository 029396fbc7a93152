//! HueConsole headless application
//!
//! Drives a console from whole lines of text and renders newly committed
//! output as 24-bit ANSI for a terminal.

use hueconsole_config::Config;
use hueconsole_console::{handler_fn, Console, Key, RenderOp, RenderTarget};
use hueconsole_core::{Color, Run};
use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;
use tracing::{debug, info};

/// Terminal sequence that clears the screen and homes the cursor
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Terminal sequence that restores default attributes
const RESET_ATTRIBUTES: &str = "\u{1b}[0m";

/// Render target that only notices when the display is wiped
#[derive(Debug, Default)]
pub struct ClearWatch {
    cleared: bool,
}

impl RenderTarget for ClearWatch {
    fn apply(&mut self, op: RenderOp) {
        if op == RenderOp::Clear {
            self.cleared = true;
        }
    }
}

/// Main HueConsole headless application
pub struct HeadlessApp {
    console: Console<ClearWatch>,
    printed: usize,
    quit: Rc<Cell<bool>>,
}

impl HeadlessApp {
    /// Build the console from configuration and register the built-in commands
    pub fn new(config: &Config) -> Self {
        let quit = Rc::new(Cell::new(false));
        let mut options = config.console_options();

        options
            .commands
            .insert("cls", handler_fn(|console, _line, _args| console.clear_screen()));
        options.commands.insert(
            "history",
            handler_fn(|console, _line, _args| {
                let history = console.history();
                for (index, line) in history.iter().enumerate() {
                    console.println(&format!("{:>4}  {}", index + 1, line));
                }
            }),
        );
        for name in ["exit", "close"] {
            let quit = Rc::clone(&quit);
            options.commands.insert(
                name,
                handler_fn(move |console, _line, _args| {
                    console.println("bye");
                    quit.set(true);
                }),
            );
        }
        options
            .commands
            .set_unrecognized(handler_fn(|console, _line, args| {
                let name = args.first().map(String::as_str).unwrap_or_default();
                if !name.is_empty() {
                    console.println(&format!("\u{1b}[1;31mUnrecognized command:\u{1b}[0m {}", name));
                }
            }));

        let console = Console::new(options, ClearWatch::default());
        info!(
            subsystem = "cli",
            commands = ?console.commands().names(),
            "Headless console ready"
        );

        Self {
            console,
            printed: 0,
            quit,
        }
    }

    /// Type `line` and submit it; returns the terminal output it produced
    pub fn feed_line(&mut self, line: &str) -> String {
        debug!(subsystem = "cli", line = line, "Input line");
        self.console.type_text(line);
        // The terminal already echoed the typed line and its newline
        self.printed = self.console.document().len() + 1;
        self.console.press(Key::Enter);
        self.take_output()
    }

    /// Committed output not yet handed to the terminal
    pub fn take_output(&mut self) -> String {
        let mut out = String::new();
        if std::mem::take(&mut self.console.target_mut().cleared) {
            out.push_str(CLEAR_SCREEN);
            self.printed = 0;
        }

        let document = self.console.document();
        let start = self.printed.min(document.limit());
        out.push_str(&render_ansi(
            &document.committed_runs(),
            start,
            self.console.foreground(),
        ));
        self.printed = document.limit();
        out
    }

    /// Flush anything the decoder is holding back and restore the terminal
    pub fn finish(&mut self) -> String {
        self.console.flush_decoder();
        let mut out = self.take_output();
        out.push_str(RESET_ATTRIBUTES);
        out.push('\n');
        out
    }

    /// Whether `exit` or `close` was entered
    pub fn should_quit(&self) -> bool {
        self.quit.get()
    }

    /// The underlying console
    pub fn console(&self) -> &Console<ClearWatch> {
        &self.console
    }
}

/// Render runs as 24-bit ANSI, skipping the first `skip` characters
pub fn render_ansi(runs: &[Run], skip: usize, foreground: Color) -> String {
    let mut out = String::new();
    let mut remaining = skip;
    for run in runs {
        let len = run.char_len();
        if remaining >= len {
            remaining -= len;
            continue;
        }
        let text: String = run.text.chars().skip(remaining).collect();
        remaining = 0;
        let color = run.color.resolve(foreground);
        let _ = write!(out, "\u{1b}[38;2;{};{};{}m{}", color.r, color.g, color.b, text);
    }
    if !out.is_empty() {
        out.push_str(RESET_ATTRIBUTES);
    }
    out
}
