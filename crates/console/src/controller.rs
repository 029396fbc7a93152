//! Console controller
//!
//! Owns the document, the escape decoder, the history ring and the completion
//! source. Key events and programmatic writes go in; render operations and
//! handler dispatches come out.

use crate::completion::{CompletionSource, VocabularyCompleter, DEFAULT_CACHE_CAPACITY};
use crate::handler::{CommandHandler, CommandSet, Facade, WriteOptions};
use crate::history::History;
use crate::key::{Key, KeyAction, KeyEvent};
use crate::reader::LineReader;
use crate::render::{Font, RenderOp, RenderTarget};
use crate::tokenize::parse_line;
use hueconsole_ansi::{DecoderSettings, EscapeDecoder};
use hueconsole_core::{Color, DocError, Run, RunColor};
use hueconsole_document::{Document, Edit};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace, warn};

/// Controller sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Editing a fresh line
    Typing,
    /// An older history entry is on display
    Browsing,
}

/// Everything needed to build a [`Console`]
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Prompt written at the start of each input round
    pub prompt: String,
    /// Escape decoder policy
    pub decoder: DecoderSettings,
    /// Default foreground; the reset color resolves to it
    pub foreground: Color,
    /// Background
    pub background: Color,
    /// Font
    pub font: Font,
    /// Color of typed input; `None` uses the default foreground
    pub input_color: Option<Color>,
    /// Explicit completion vocabulary; `None` completes command names
    pub vocabulary: Option<Vec<String>>,
    /// Memoized completion prefixes
    pub cache_capacity: usize,
    /// Submitted-line handlers
    pub commands: CommandSet,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            decoder: DecoderSettings::default(),
            foreground: Color::GREEN,
            background: Color::BLACK,
            font: Font::default(),
            input_color: None,
            vocabulary: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            commands: CommandSet::new(),
        }
    }
}

/// Interactive console state machine
pub struct Console<T: RenderTarget> {
    target: T,
    document: Document,
    decoder: EscapeDecoder,
    history: History,
    completion: Box<dyn CompletionSource>,
    vocabulary_from_commands: bool,
    cache_capacity: usize,
    commands: CommandSet,
    prompt: String,
    foreground: Color,
    background: Color,
    font: Font,
    input_color: RunColor,
    dispatching: bool,
    rendered_caret: Option<usize>,
    readers: Vec<UnboundedSender<String>>,
}

impl<T: RenderTarget> Console<T> {
    /// Create a console and write the first prompt
    pub fn new(options: ConsoleOptions, target: T) -> Self {
        let ConsoleOptions {
            prompt,
            decoder,
            foreground,
            background,
            font,
            input_color,
            vocabulary,
            cache_capacity,
            commands,
        } = options;

        let vocabulary_from_commands = vocabulary.is_none();
        let vocabulary = vocabulary.unwrap_or_else(|| commands.names());

        let mut console = Self {
            target,
            document: Document::new(),
            decoder: EscapeDecoder::new(decoder),
            history: History::new(),
            completion: Box::new(VocabularyCompleter::new(vocabulary, cache_capacity)),
            vocabulary_from_commands,
            cache_capacity,
            commands,
            prompt,
            foreground,
            background,
            font,
            input_color: input_color.map_or(RunColor::Default, RunColor::Rgb),
            dispatching: false,
            rendered_caret: None,
            readers: Vec::new(),
        };

        console.target.apply(RenderOp::SetForeground(foreground));
        console.target.apply(RenderOp::SetBackground(background));
        console.target.apply(RenderOp::SetFont(console.font.clone()));
        console.write_prompt();
        console.flush_edits();

        debug!(
            subsystem = "console",
            prompt = %console.prompt,
            commands = console.commands.names().len(),
            "Console created"
        );
        console
    }

    /// Feed one key event
    pub fn handle_key(&mut self, event: KeyEvent) {
        match event.action {
            KeyAction::Pressed => self.key_pressed(event.key),
            KeyAction::Released => self.key_released(event.key),
        }
        self.flush_edits();
    }

    /// Press and release a key
    pub fn press(&mut self, key: Key) {
        self.handle_key(KeyEvent::pressed(key));
        self.handle_key(KeyEvent::released(key));
    }

    /// Type each character of `text` as a keystroke
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(Key::Char(c));
        }
    }

    /// Write committed output.
    ///
    /// Output goes in at the commit boundary, so an input line being typed
    /// stays below it.
    pub fn write(&mut self, text: &str, options: WriteOptions) {
        self.document.make_caret_valid();
        self.decoder.begin_message();
        if let Some(color) = options.color {
            self.decoder.set_color(RunColor::Rgb(color));
        }

        let mut body = text.to_string();
        if options.newline {
            body.push('\n');
        }
        let runs = if options.raw {
            vec![Run::new(self.decoder.current_color(), body)]
        } else {
            self.decoder.decode(&body)
        };

        let inserted = self.document.insert_committed(&runs);
        trace!(subsystem = "console", chars = inserted, "Output written");
        self.flush_edits();
    }

    /// Emit a held-back hex candidate as plain text
    pub fn flush_decoder(&mut self) {
        let runs = self.decoder.flush();
        if !runs.is_empty() {
            self.document.insert_committed(&runs);
            self.flush_edits();
        }
    }

    /// Discard all output; the history survives.
    ///
    /// A fresh prompt is written unless a handler is running, in which case
    /// the submit flow writes it once the handler returns.
    pub fn clear_screen(&mut self) {
        debug!(subsystem = "console", dispatching = self.dispatching, "Clear screen");
        self.document.clear();
        self.decoder.reset();
        if !self.dispatching {
            self.write_prompt();
        }
        self.flush_edits();
    }

    /// Record a caret move made by the host widget
    pub fn host_caret_moved(&mut self, offset: usize) {
        self.document.host_caret_moved(offset);
        self.rendered_caret = Some(self.document.caret());
    }

    /// Prompt used from the next input round on
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    /// Current prompt
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Change the default foreground
    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
        self.target.apply(RenderOp::SetForeground(color));
    }

    /// Default foreground
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Change the background
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.target.apply(RenderOp::SetBackground(color));
    }

    /// Background
    pub fn background(&self) -> Color {
        self.background
    }

    /// Change the font
    pub fn set_font(&mut self, font: Font) {
        self.font = font.clone();
        self.target.apply(RenderOp::SetFont(font));
    }

    /// Font
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Color of typed input; `None` uses the default foreground
    pub fn set_input_color(&mut self, color: Option<Color>) {
        self.input_color = color.map_or(RunColor::Default, RunColor::Rgb);
    }

    /// Replace the decoder policy
    pub fn set_decoder_settings(&mut self, settings: DecoderSettings) {
        self.decoder.set_settings(settings);
    }

    /// Decoder policy
    pub fn decoder_settings(&self) -> DecoderSettings {
        self.decoder.settings()
    }

    /// Replace every handler
    pub fn set_commands(&mut self, commands: CommandSet) {
        self.commands = commands;
        self.refresh_command_vocabulary();
    }

    /// Register one command
    pub fn register_command(&mut self, name: &str, handler: impl CommandHandler + 'static) {
        self.commands.insert(name, handler);
        self.refresh_command_vocabulary();
    }

    /// The registered handlers
    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Complete against an explicit vocabulary
    pub fn set_vocabulary(&mut self, vocabulary: Vec<String>) {
        self.vocabulary_from_commands = false;
        self.completion = Box::new(VocabularyCompleter::new(vocabulary, self.cache_capacity));
    }

    /// Complete against the sorted command names, following later registrations
    pub fn use_command_vocabulary(&mut self) {
        self.vocabulary_from_commands = true;
        self.refresh_command_vocabulary();
    }

    /// Use a caller-provided completion source
    pub fn set_completion_source(&mut self, source: Box<dyn CompletionSource>) {
        self.vocabulary_from_commands = false;
        self.completion = source;
    }

    /// A stream of every line submitted from now on
    pub fn subscribe(&mut self) -> LineReader {
        let (tx, reader) = LineReader::channel();
        self.readers.push(tx);
        reader
    }

    /// Submitted lines, oldest first
    pub fn history(&self) -> Arc<[String]> {
        self.history.snapshot()
    }

    /// Typing or browsing history
    pub fn mode(&self) -> Mode {
        if self.history.is_browsing() {
            Mode::Browsing
        } else {
            Mode::Typing
        }
    }

    /// The document buffer
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Text the user is typing
    pub fn user_input(&self) -> String {
        self.document.user_input()
    }

    /// Malformed escape sequences seen since the last call
    pub fn take_decoder_warnings(&mut self) -> Vec<DocError> {
        self.decoder.take_warnings()
    }

    /// The render target
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The render target, mutably
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Give up the console and keep the render target
    pub fn into_target(self) -> T {
        self.target
    }

    fn key_pressed(&mut self, key: Key) {
        if self.document.make_caret_valid() {
            self.rendered_caret = None;
        }

        match key {
            Key::Tab => self.complete(),
            Key::Up => self.history_up(),
            Key::Down => self.history_down(),
            Key::Backspace => {
                self.document.delete_before_caret(1);
            }
            Key::Left => {
                self.document.move_caret(-1);
            }
            Key::Right => {
                self.document.move_caret(1);
            }
            Key::Home => {
                self.document.set_caret(self.document.limit());
            }
            Key::End => {
                self.document.set_caret(self.document.len());
            }
            Key::Char(c) if !c.is_control() => {
                let mut buf = [0u8; 4];
                if let Err(err) = self
                    .document
                    .insert_at_caret(c.encode_utf8(&mut buf), self.input_color)
                {
                    warn!(subsystem = "console", error = %err, "Typed character dropped");
                }
            }
            Key::Char(_) | Key::Enter => {}
        }
    }

    fn key_released(&mut self, key: Key) {
        if key == Key::Enter {
            self.submit();
        }
    }

    fn complete(&mut self) {
        let input = self.document.user_input();
        let typed = input.trim();
        let completions = self.completion.complete(typed);

        match completions.as_slice() {
            [] => self.bell("no completion"),
            [only] => {
                let suffix: String = only.chars().skip(typed.chars().count()).collect();
                trace!(subsystem = "console", completion = %only, "Single completion");
                self.document.append_input(&suffix, self.input_color);
            }
            many => {
                let listing = format!("\n{}\n{}", many.join(" "), self.prompt);
                self.document.commit_input();
                self.document
                    .append_committed(&[Run::new(RunColor::Default, listing)]);
                self.document.append_input(typed, self.input_color);
            }
        }
    }

    fn history_up(&mut self) {
        let current = self.document.user_input();
        match self.history.up(&current) {
            Some(line) => {
                trace!(subsystem = "console", cursor = self.history.cursor(), "History up");
                self.document.replace_input(&line, self.input_color);
            }
            None => self.bell("no older history"),
        }
    }

    fn history_down(&mut self) {
        match self.history.down() {
            Some(line) => {
                trace!(subsystem = "console", cursor = self.history.cursor(), "History down");
                self.document.replace_input(&line, self.input_color);
            }
            None => self.bell("no newer history"),
        }
    }

    fn submit(&mut self) {
        let line = self.document.user_input().trim().to_string();
        let args = parse_line(&line);

        self.document.append_input("\n", self.input_color);
        self.document.commit_input();
        self.history.submit(line.clone());
        self.readers.retain(|tx| tx.send(line.clone()).is_ok());
        self.flush_edits();

        debug!(subsystem = "console", line = %line, args = args.len(), "Line submitted");

        self.dispatching = true;
        for handler in self.commands.route(&args) {
            handler.handle(self, &line, &args);
        }
        self.dispatching = false;

        self.write_prompt();
    }

    fn write_prompt(&mut self) {
        let tail = self.decoder.flush();
        if !tail.is_empty() {
            self.document.insert_committed(&tail);
        }
        let prompt = Run::new(RunColor::Default, self.prompt.clone());
        self.document.insert_committed(&[prompt]);
    }

    fn refresh_command_vocabulary(&mut self) {
        if self.vocabulary_from_commands {
            self.completion = Box::new(VocabularyCompleter::new(
                self.commands.names(),
                self.cache_capacity,
            ));
        }
    }

    fn bell(&mut self, reason: &'static str) {
        debug!(subsystem = "console", reason = reason, "Bell");
        self.flush_edits();
        self.target.apply(RenderOp::Bell);
    }

    fn flush_edits(&mut self) {
        let edits = self.document.drain_edits();
        let dirty = !edits.is_empty();
        for edit in edits {
            let op = match edit {
                Edit::Insert {
                    offset,
                    color,
                    text,
                } => RenderOp::Insert {
                    offset,
                    color: color.resolve(self.foreground),
                    text,
                },
                Edit::Remove { offset, len } => RenderOp::Remove { offset, len },
                Edit::Clear => RenderOp::Clear,
            };
            self.target.apply(op);
        }

        let caret = self.document.caret();
        if dirty || self.rendered_caret != Some(caret) {
            self.rendered_caret = Some(caret);
            self.target.apply(RenderOp::Caret(caret));
        }
    }
}

impl<T: RenderTarget> Facade for Console<T> {
    fn write(&mut self, text: &str, options: WriteOptions) {
        Console::write(self, text, options);
    }

    fn clear_screen(&mut self) {
        Console::clear_screen(self);
    }

    fn set_prompt(&mut self, prompt: &str) {
        Console::set_prompt(self, prompt);
    }

    fn prompt(&self) -> &str {
        Console::prompt(self)
    }

    fn history(&self) -> Arc<[String]> {
        Console::history(self)
    }

    fn set_foreground(&mut self, color: Color) {
        Console::set_foreground(self, color);
    }
}

impl<T: RenderTarget + std::fmt::Debug> std::fmt::Debug for Console<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("target", &self.target)
            .field("document", &self.document)
            .field("prompt", &self.prompt)
            .field("mode", &self.mode())
            .field("commands", &self.commands)
            .finish()
    }
}
