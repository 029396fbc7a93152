//! HueConsole configuration management and parsing
//!
//! A TOML file with `[logging]`, `[console]`, `[appearance]` and
//! `[completion]` sections. Every field has a default, so a partial file (or
//! none at all) is valid.

#![warn(missing_docs)]
#![deny(unsafe_code)]

use hueconsole_ansi::DecoderSettings;
use hueconsole_console::{ConsoleOptions, Font};
use hueconsole_core::logging::{LogLevel, LoggingConfig};
use hueconsole_core::{Color, ConsoleError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Main configuration structure for HueConsole
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Input and decoding behaviour
    pub console: ConsoleSettings,
    /// Colors and font
    pub appearance: AppearanceSettings,
    /// Tab completion
    pub completion: CompletionSettings,
}

/// Input and decoding behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Prompt written at the start of each input round
    pub prompt: String,
    /// Decode ANSI color sequences
    pub enable_ansi: bool,
    /// Decode `0xRRGGBB` directives
    pub enable_hex: bool,
    /// Restore the default foreground before each write
    pub reset_color_after_each_msg: bool,
    /// Color of typed input; unset uses the foreground
    pub input_color: Option<Color>,
}

/// Colors and font
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    /// Default foreground
    pub foreground: Color,
    /// Background
    pub background: Color,
    /// Font
    pub font: FontSpec,
}

/// Font selection as written in the file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Family name
    pub family: String,
    /// Point size
    pub size: f32,
    /// Bold weight
    pub bold: bool,
    /// Italic style
    pub italic: bool,
}

/// Tab completion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Terms to complete; empty completes registered command names
    pub vocabulary: Vec<String>,
    /// Memoized prefixes
    pub cache_capacity: usize,
}

/// A configuration value out of range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Font size must be positive
    #[error("Font size must be greater than 0 (got {0})")]
    FontSize(f32),
    /// Font family must be named
    #[error("Font family must not be empty")]
    FontFamily,
    /// Cache must hold at least one prefix
    #[error("Completion cache capacity must be greater than 0")]
    CacheCapacity,
    /// Prompt must fit on one line
    #[error("Prompt must not contain line breaks")]
    MultilinePrompt,
}

impl From<ValidationError> for ConsoleError {
    fn from(err: ValidationError) -> Self {
        ConsoleError::Configuration(err.to_string())
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            enable_ansi: true,
            enable_hex: true,
            reset_color_after_each_msg: true,
            input_color: None,
        }
    }
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            foreground: Color::GREEN,
            background: Color::BLACK,
            font: FontSpec::default(),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        let font = Font::default();
        Self {
            family: font.family,
            size: font.size,
            bold: font.bold,
            italic: font.italic,
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            vocabulary: Vec::new(),
            cache_capacity: hueconsole_console::completion::DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl From<&FontSpec> for Font {
    fn from(spec: &FontSpec) -> Self {
        Font {
            family: spec.family.clone(),
            size: spec.size,
            bold: spec.bold,
            italic: spec.italic,
        }
    }
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from file
    #[instrument(name = "config_load", skip(path))]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> hueconsole_core::Result<Self> {
        let path = path.as_ref();
        info!(
            subsystem = "config",
            config_file = ?path,
            "Loading configuration from file"
        );

        let content = std::fs::read_to_string(path).map_err(|e| {
            error!(
                subsystem = "config",
                config_file = ?path,
                error = %e,
                "Failed to read configuration file"
            );
            ConsoleError::Configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            error!(
                subsystem = "config",
                config_file = ?path,
                error = %e,
                "Failed to parse configuration file"
            );
            ConsoleError::Configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(
            subsystem = "config",
            config_file = ?path,
            logging_level = ?config.logging.global_level,
            prompt = %config.console.prompt,
            vocabulary = config.completion.vocabulary.len(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to file
    #[instrument(name = "config_save", skip(self, path))]
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> hueconsole_core::Result<()> {
        let path = path.as_ref();
        info!(
            subsystem = "config",
            config_file = ?path,
            "Saving configuration to file"
        );

        let content = toml::to_string_pretty(self).map_err(|e| {
            error!(
                subsystem = "config",
                error = %e,
                "Failed to serialize configuration"
            );
            ConsoleError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content).map_err(|e| {
            error!(
                subsystem = "config",
                config_file = ?path,
                error = %e,
                "Failed to write configuration file"
            );
            ConsoleError::Configuration(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(
            subsystem = "config",
            config_file = ?path,
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> hueconsole_core::Result<PathBuf> {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("hueconsole")
        } else {
            warn!(
                subsystem = "config",
                "No standard config directory found, using current directory"
            );
            PathBuf::from(".")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration with fallback to defaults
    #[instrument(name = "config_load_or_default")]
    pub fn load_or_default() -> Self {
        match Self::default_config_path() {
            Ok(path) => Self::load_path_or_default(&path),
            Err(e) => {
                warn!(
                    subsystem = "config",
                    error = %e,
                    "Failed to determine config path, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Load `path` if it exists, falling back to defaults on any failure
    pub fn load_path_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(
                subsystem = "config",
                config_file = ?path,
                "Configuration file does not exist, using defaults"
            );
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(config) => {
                info!(
                    subsystem = "config",
                    config_file = ?path,
                    "Configuration loaded from file"
                );
                config
            }
            Err(e) => {
                warn!(
                    subsystem = "config",
                    config_file = ?path,
                    error = %e,
                    "Failed to load config file, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Update logging level for a specific module
    #[instrument(name = "config_update_log_level", skip(self))]
    pub fn update_log_level(&mut self, module: &str, level: LogLevel) {
        debug!(
            subsystem = "config",
            module = module,
            level = ?level,
            "Updating log level for module"
        );
        self.logging.module_levels.insert(module.to_string(), level);
    }

    /// Validate configuration values
    #[instrument(name = "config_validate", skip(self))]
    pub fn validate(&self) -> hueconsole_core::Result<()> {
        debug!(subsystem = "config", "Validating configuration");

        if let Err(e) = self.check() {
            error!(subsystem = "config", error = %e, "Invalid configuration");
            return Err(e.into());
        }

        debug!(subsystem = "config", "Configuration validation passed");
        Ok(())
    }

    fn check(&self) -> Result<(), ValidationError> {
        let font = &self.appearance.font;
        if font.size.is_nan() || font.size <= 0.0 {
            return Err(ValidationError::FontSize(font.size));
        }
        if font.family.trim().is_empty() {
            return Err(ValidationError::FontFamily);
        }
        if self.completion.cache_capacity == 0 {
            return Err(ValidationError::CacheCapacity);
        }
        if self.console.prompt.contains(['\n', '\r']) {
            return Err(ValidationError::MultilinePrompt);
        }
        Ok(())
    }

    /// Runtime options for a console built from this configuration.
    ///
    /// Handlers are not part of the file; the returned options carry an empty
    /// command set for the host to fill in.
    pub fn console_options(&self) -> ConsoleOptions {
        let vocabulary = if self.completion.vocabulary.is_empty() {
            None
        } else {
            Some(self.completion.vocabulary.clone())
        };

        ConsoleOptions {
            prompt: self.console.prompt.clone(),
            decoder: DecoderSettings {
                enable_ansi: self.console.enable_ansi,
                enable_hex: self.console.enable_hex,
                reset_color_after_each_msg: self.console.reset_color_after_each_msg,
            },
            foreground: self.appearance.foreground,
            background: self.appearance.background,
            font: Font::from(&self.appearance.font),
            input_color: self.console.input_color,
            vocabulary,
            cache_capacity: self.completion.cache_capacity,
            ..ConsoleOptions::default()
        }
    }
}
