//! Integration tests for HueConsole

use hueconsole_config::Config;
use hueconsole_core::logging::{ci_config, dev_config, prod_config, LogLevel};

pub mod properties;
pub mod scenarios;

#[test]
fn test_logging_configurations() {
    let dev_config = dev_config();
    assert_eq!(dev_config.global_level, LogLevel::Debug);
    assert!(!dev_config.json_format);
    assert!(dev_config.use_colors);

    let prod_config = prod_config();
    assert_eq!(prod_config.global_level, LogLevel::Info);
    assert!(prod_config.json_format);
    assert!(!prod_config.use_colors);

    let ci_config = ci_config();
    assert_eq!(ci_config.global_level, LogLevel::Info);
    assert!(ci_config.json_format);
    assert!(!ci_config.use_colors);
    assert!(ci_config.include_timestamps);
}

#[test]
fn test_config_file_drives_console() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.console.prompt = "hue> ".to_string();
    config.completion.vocabulary = vec!["alpha".to_string(), "beta".to_string()];
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.console.prompt, "hue> ");
    loaded.validate().unwrap();

    let mut console = hueconsole_console::Console::new(
        loaded.console_options(),
        hueconsole_console::Transcript::new(),
    );
    console.type_text("al");
    console.press(hueconsole_console::Key::Tab);
    assert_eq!(console.user_input(), "alpha");
    assert_eq!(console.target().text(), "hue> alpha");
}
