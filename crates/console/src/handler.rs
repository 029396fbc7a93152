//! Command handlers and the console facade they receive

use hueconsole_core::Color;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// How a programmatic write is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Start decoding in this color instead of the decoder's current one
    pub color: Option<Color>,
    /// Append a newline
    pub newline: bool,
    /// Insert the text literally, without ANSI or hex decoding
    pub raw: bool,
}

impl WriteOptions {
    /// Options for a line of output
    pub fn line() -> Self {
        Self {
            newline: true,
            ..Self::default()
        }
    }

    /// Options for text in an explicit color
    pub fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }
}

/// The console as seen from a command handler
pub trait Facade {
    /// Write text as committed output
    fn write(&mut self, text: &str, options: WriteOptions);

    /// Discard all output and start over with a fresh prompt
    fn clear_screen(&mut self);

    /// Prompt used from the next input round on
    fn set_prompt(&mut self, prompt: &str);

    /// Current prompt
    fn prompt(&self) -> &str;

    /// Submitted lines, oldest first
    fn history(&self) -> Arc<[String]>;

    /// Change the default foreground
    fn set_foreground(&mut self, color: Color);

    /// Write text with color directives decoded
    fn print(&mut self, text: &str) {
        self.write(text, WriteOptions::default());
    }

    /// Write text followed by a newline
    fn println(&mut self, text: &str) {
        self.write(text, WriteOptions::line());
    }

    /// Write text in an explicit color
    fn print_colored(&mut self, text: &str, color: Color) {
        self.write(text, WriteOptions::colored(color));
    }
}

/// Reacts to a submitted line
pub trait CommandHandler {
    /// Handle `line`, already split into `args`
    fn handle(&self, console: &mut dyn Facade, line: &str, args: &[String]);
}

impl<F> CommandHandler for F
where
    F: Fn(&mut dyn Facade, &str, &[String]),
{
    fn handle(&self, console: &mut dyn Facade, line: &str, args: &[String]) {
        self(console, line, args)
    }
}

/// Pin a closure to the handler signature so its argument types are inferred
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&mut dyn Facade, &str, &[String]),
{
    f
}

/// Handlers consulted when a line is submitted.
///
/// The processor (if any) sees every line first. Then the handler registered
/// under the lowercased first argument runs, or the unrecognized handler when
/// there is none.
#[derive(Clone, Default)]
pub struct CommandSet {
    processor: Option<Arc<dyn CommandHandler>>,
    commands: BTreeMap<String, Arc<dyn CommandHandler>>,
    unrecognized: Option<Arc<dyn CommandHandler>>,
}

impl CommandSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command; names are matched case-insensitively
    pub fn insert(&mut self, name: &str, handler: impl CommandHandler + 'static) {
        self.commands.insert(name.to_lowercase(), Arc::new(handler));
    }

    /// Builder form of [`Self::insert`]
    pub fn with(mut self, name: &str, handler: impl CommandHandler + 'static) -> Self {
        self.insert(name, handler);
        self
    }

    /// Remove a command
    pub fn remove(&mut self, name: &str) -> bool {
        self.commands.remove(&name.to_lowercase()).is_some()
    }

    /// Handler that sees every line before command lookup
    pub fn set_processor(&mut self, handler: impl CommandHandler + 'static) {
        self.processor = Some(Arc::new(handler));
    }

    /// Handler for lines whose first argument is not a registered command
    pub fn set_unrecognized(&mut self, handler: impl CommandHandler + 'static) {
        self.unrecognized = Some(Arc::new(handler));
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Whether no commands are registered
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Handlers to run for a line, in order
    pub(crate) fn route(&self, args: &[String]) -> Vec<Arc<dyn CommandHandler>> {
        let mut route = Vec::with_capacity(2);
        if let Some(processor) = &self.processor {
            route.push(Arc::clone(processor));
        }
        let command = args
            .first()
            .and_then(|name| self.commands.get(&name.to_lowercase()));
        if let Some(handler) = command.or(self.unrecognized.as_ref()) {
            route.push(Arc::clone(handler));
        }
        route
    }
}

impl fmt::Debug for CommandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSet")
            .field("processor", &self.processor.is_some())
            .field("commands", &self.names())
            .field("unrecognized", &self.unrecognized.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        written: Vec<String>,
    }

    impl Facade for Recorder {
        fn write(&mut self, text: &str, _options: WriteOptions) {
            self.written.push(text.to_string());
        }
        fn clear_screen(&mut self) {}
        fn set_prompt(&mut self, _prompt: &str) {}
        fn prompt(&self) -> &str {
            ""
        }
        fn history(&self) -> Arc<[String]> {
            Arc::from(Vec::new())
        }
        fn set_foreground(&mut self, _color: Color) {}
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(set: &CommandSet, line: &str, argv: &[String], facade: &mut Recorder) {
        for handler in set.route(argv) {
            handler.handle(facade, line, argv);
        }
    }

    #[test]
    fn test_route_by_lowercased_name() {
        let set = CommandSet::new()
            .with("echo", handler_fn(|c, _line, args| c.print(&args[1..].join(" "))));
        let mut facade = Recorder::default();
        let argv = args(&["ECHO", "hi", "there"]);
        run(&set, "ECHO hi there", &argv, &mut facade);
        assert_eq!(facade.written, vec!["hi there"]);
    }

    #[test]
    fn test_processor_runs_first_then_unrecognized() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut set = CommandSet::new();
        let seen = Rc::clone(&order);
        set.set_processor(handler_fn(move |_c, line, _args| {
            seen.borrow_mut().push(format!("processor:{}", line))
        }));
        let seen = Rc::clone(&order);
        set.set_unrecognized(handler_fn(move |_c, _line, args| {
            seen.borrow_mut().push(format!("unknown:{}", args[0]))
        }));

        let mut facade = Recorder::default();
        run(&set, "nope", &args(&["nope", ""]), &mut facade);
        assert_eq!(*order.borrow(), vec!["processor:nope", "unknown:nope"]);
    }

    #[test]
    fn test_no_handlers_is_silent() {
        let set = CommandSet::new();
        assert!(set.route(&args(&["x"])).is_empty());
    }

    #[test]
    fn test_names_are_sorted_and_folded() {
        let noop = handler_fn(|_c, _line, _args| {});
        let mut set = CommandSet::new().with("Help", noop).with("cls", noop);
        assert_eq!(set.names(), vec!["cls", "help"]);
        assert!(set.remove("HELP"));
        assert!(!set.remove("help"));
        assert_eq!(
            format!("{:?}", set),
            "CommandSet { processor: false, commands: [\"cls\"], unrecognized: false }"
        );
    }

    #[test]
    fn test_facade_helpers() {
        let mut facade = Recorder::default();
        facade.println("a");
        facade.print_colored("b", Color::WHITE);
        assert_eq!(facade.written, vec!["a", "b"]);
    }
}
