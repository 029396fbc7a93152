//! Named console presets
//!
//! A host can keep several profiles (a shell, a chat, a game screen) and
//! switch a live console between them without losing its history.

use crate::controller::{Console, ConsoleOptions};
use crate::handler::CommandSet;
use crate::render::{Font, RenderTarget};
use hueconsole_ansi::DecoderSettings;
use hueconsole_core::Color;
use tracing::info;

/// A console preset
#[derive(Debug, Clone)]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Prompt for the next and later input rounds
    pub prompt: String,
    /// Default foreground
    pub foreground: Color,
    /// Background
    pub background: Color,
    /// Font
    pub font: Font,
    /// Restore the default foreground before each write
    pub reset_color_after_each_msg: bool,
    /// Handlers; their sorted names become the completion vocabulary
    pub commands: CommandSet,
}

impl Profile {
    /// A profile with the stock appearance and no commands
    pub fn new(name: impl Into<String>) -> Self {
        let defaults = ConsoleOptions::default();
        Self {
            name: name.into(),
            prompt: defaults.prompt,
            foreground: defaults.foreground,
            background: defaults.background,
            font: defaults.font,
            reset_color_after_each_msg: defaults.decoder.reset_color_after_each_msg,
            commands: defaults.commands,
        }
    }

    /// Options for a new console that starts in this profile
    pub fn options(&self) -> ConsoleOptions {
        ConsoleOptions {
            prompt: self.prompt.clone(),
            decoder: DecoderSettings {
                reset_color_after_each_msg: self.reset_color_after_each_msg,
                ..DecoderSettings::default()
            },
            foreground: self.foreground,
            background: self.background,
            font: self.font.clone(),
            commands: self.commands.clone(),
            ..ConsoleOptions::default()
        }
    }
}

impl<T: RenderTarget> Console<T> {
    /// Switch to `profile`.
    ///
    /// Appearance changes at once; the new prompt is used from the next input
    /// round. History and existing output are kept.
    pub fn apply_profile(&mut self, profile: &Profile) {
        info!(subsystem = "console", profile = %profile.name, "Applying profile");
        self.set_commands(profile.commands.clone());
        self.use_command_vocabulary();
        self.set_foreground(profile.foreground);
        self.set_background(profile.background);
        self.set_font(profile.font.clone());
        self.set_prompt(&profile.prompt);
        self.set_decoder_settings(DecoderSettings {
            reset_color_after_each_msg: profile.reset_color_after_each_msg,
            ..self.decoder_settings()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use crate::key::Key;
    use crate::render::Transcript;

    fn shell() -> Profile {
        let mut profile = Profile::new("shell");
        profile.prompt = "$ ".to_string();
        profile.background = Color::rgb(10, 10, 30);
        profile.commands.insert("pwd", handler_fn(|c, _line, _args| c.println("/")));
        profile
    }

    #[test]
    fn test_new_profile_matches_defaults() {
        let profile = Profile::new("plain");
        assert_eq!(profile.foreground, Color::GREEN);
        assert_eq!(profile.background, Color::BLACK);
        assert!(profile.reset_color_after_each_msg);
        assert!(profile.commands.is_empty());
    }

    #[test]
    fn test_console_from_profile_options() {
        let console = Console::new(shell().options(), Transcript::new());
        assert_eq!(console.document().text(), "$ ");
        assert_eq!(console.background(), Color::rgb(10, 10, 30));
    }

    #[test]
    fn test_apply_profile_switches_handlers_and_prompt() {
        let mut console = Console::new(Profile::new("start").options(), Transcript::new());
        console.type_text("a");
        console.press(Key::Enter);

        let mut profile = shell();
        profile.reset_color_after_each_msg = false;
        console.apply_profile(&profile);
        assert_eq!(console.target().background(), Some(Color::rgb(10, 10, 30)));
        assert!(!console.decoder_settings().reset_color_after_each_msg);

        console.type_text("p");
        console.press(Key::Tab);
        assert_eq!(console.user_input(), "pwd");
        console.press(Key::Enter);

        assert_eq!(console.document().text(), "a\npwd\n/\n$ ");
        assert_eq!(console.history().len(), 2);
    }
}
