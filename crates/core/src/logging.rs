//! HueConsole structured logging infrastructure
//!
//! Centralized logging configuration with per-module level controls and
//! structured metadata. Hosts that already install a `tracing` subscriber can
//! skip [`init_logging`] entirely; every crate only emits through `tracing`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{warn, Level};
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable that overrides the configured filter
pub const LOG_ENV_VAR: &str = "HUECONSOLE_LOG";

/// Logging configuration for HueConsole
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (applies when module-specific level not set)
    pub global_level: LogLevel,
    /// Whether to include timestamps in log output
    pub include_timestamps: bool,
    /// Whether to include severity levels in log output
    pub include_severity: bool,
    /// Whether to include subsystem/module names in log output
    pub include_subsystem: bool,
    /// Whether to use JSON format for structured output
    pub json_format: bool,
    /// Whether to use ANSI colors in output (when not JSON)
    pub use_colors: bool,
    /// Per-module log level overrides
    pub module_levels: HashMap<String, LogLevel>,
}

/// Log levels for HueConsole modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show all logs including trace
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above (default)
    Info,
    /// Show warnings and above
    Warn,
    /// Show only errors
    Error,
    /// Disable all logging for this module
    Off,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_level: LogLevel::Info,
            module_levels: HashMap::new(),
            include_timestamps: true,
            include_severity: true,
            include_subsystem: true,
            json_format: false,
            use_colors: true,
        }
    }
}

impl LogLevel {
    /// Directive value understood by `EnvFilter`
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
            // tracing has no "off" level; filters use the "off" directive instead
            LogLevel::Off => Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter())
    }
}

/// Module names for per-module logging configuration
pub mod modules {
    /// Core module logging identifier
    pub const CORE: &str = "hueconsole_core";
    /// Escape decoder logging identifier
    pub const ANSI: &str = "hueconsole_ansi";
    /// Document buffer logging identifier
    pub const DOCUMENT: &str = "hueconsole_document";
    /// Console controller logging identifier
    pub const CONSOLE: &str = "hueconsole_console";
    /// Configuration module logging identifier
    pub const CONFIG: &str = "hueconsole_config";
    /// CLI module logging identifier
    pub const CLI: &str = "hueconsole_cli";

    /// Every HueConsole module, in dependency order
    pub const ALL: [&str; 6] = [CORE, ANSI, DOCUMENT, CONSOLE, CONFIG, CLI];
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: &LoggingConfig) -> crate::Result<()> {
    let (env_filter, rejected) = env_filter_with_rejects(config);
    let registry = Registry::default().with(env_filter);

    let result = if config.json_format {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_timer(ChronoUtc::rfc_3339());
        registry.with(json_layer).try_init()
    } else if config.include_timestamps {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_subsystem)
            .with_level(config.include_severity)
            .with_ansi(config.use_colors)
            .with_timer(ChronoUtc::rfc_3339());
        registry.with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_subsystem)
            .with_level(config.include_severity)
            .with_ansi(config.use_colors)
            .without_time();
        registry.with(fmt_layer).try_init()
    };

    result.map_err(|e| {
        crate::ConsoleError::Configuration(format!("Failed to initialize logging: {}", e))
    })?;

    for (part, reason) in rejected {
        warn!(
            subsystem = "logging",
            directive = %part,
            error = %reason,
            "Ignoring invalid {} directive",
            LOG_ENV_VAR
        );
    }
    Ok(())
}

/// Build an environment filter from the logging configuration
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    env_filter_with_rejects(config).0
}

fn env_filter_with_rejects(config: &LoggingConfig) -> (EnvFilter, Vec<(String, String)>) {
    let mut filter = EnvFilter::new("");

    for module in modules::ALL {
        if let Some(directive) = directive(module, config.global_level) {
            filter = filter.add_directive(directive);
        }
    }

    // Module overrides are added after the global level so they win
    for (module, level) in &config.module_levels {
        if let Some(directive) = directive(module, *level) {
            filter = filter.add_directive(directive);
        }
    }

    let mut rejected = Vec::new();
    if let Ok(env_filter) = std::env::var(LOG_ENV_VAR) {
        let (directives, bad) = parse_directives(&env_filter);
        for directive in directives {
            filter = filter.add_directive(directive);
        }
        rejected = bad;
    }

    (filter, rejected)
}

/// Split a comma-separated filter string into directives and the parts that
/// failed to parse, each paired with its parse error.
fn parse_directives(spec: &str) -> (Vec<Directive>, Vec<(String, String)>) {
    let mut directives = Vec::new();
    let mut rejected = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse::<Directive>() {
            Ok(directive) => directives.push(directive),
            Err(e) => rejected.push((part.to_string(), e.to_string())),
        }
    }
    (directives, rejected)
}

fn directive(module: &str, level: LogLevel) -> Option<Directive> {
    format!("{}={}", module, level.as_filter()).parse().ok()
}

/// Get default development logging configuration
pub fn dev_config() -> LoggingConfig {
    let mut config = LoggingConfig {
        global_level: LogLevel::Debug,
        use_colors: true,
        json_format: false,
        ..LoggingConfig::default()
    };

    config.module_levels.insert(modules::ANSI.to_string(), LogLevel::Debug);
    config.module_levels.insert(modules::CONSOLE.to_string(), LogLevel::Debug);
    config.module_levels.insert(modules::DOCUMENT.to_string(), LogLevel::Info);

    config
}

/// Get default production logging configuration
pub fn prod_config() -> LoggingConfig {
    let mut config = LoggingConfig {
        global_level: LogLevel::Info,
        use_colors: false,
        json_format: true,
        ..LoggingConfig::default()
    };

    config.module_levels.insert(modules::ANSI.to_string(), LogLevel::Warn);
    config.module_levels.insert(modules::DOCUMENT.to_string(), LogLevel::Warn);
    config.module_levels.insert(modules::CONSOLE.to_string(), LogLevel::Info);
    config.module_levels.insert(modules::CONFIG.to_string(), LogLevel::Info);
    config.module_levels.insert(modules::CLI.to_string(), LogLevel::Info);

    config
}

/// Get CI/testing logging configuration
pub fn ci_config() -> LoggingConfig {
    let mut config = LoggingConfig {
        global_level: LogLevel::Info,
        use_colors: false,
        json_format: true,
        include_timestamps: true,
        include_severity: true,
        include_subsystem: true,
        ..LoggingConfig::default()
    };

    config.module_levels.insert(modules::CORE.to_string(), LogLevel::Debug);
    config.module_levels.insert(modules::ANSI.to_string(), LogLevel::Debug);
    config.module_levels.insert(modules::DOCUMENT.to_string(), LogLevel::Debug);

    config
}
