/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;
use anyhow::Result;
use log::LevelFilter;
use svg_standalone::app_config::{Config, LogLevel};
use svg_standalone::errors::ConfigError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.input_dir, PathBuf::from("./modular/"));
    assert_eq!(config.output_dir, PathBuf::from("./standalone/"));
    assert_eq!(config.output_suffix, "_Standalone");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.output_suffix = String::new();
    assert_eq!(config.validate(), Err(ConfigError::EmptySuffix));

    config.output_suffix = "_out/x".to_string();
    assert_eq!(config.validate(), Err(ConfigError::SuffixWithSeparator("_out/x".to_string())));

    config.output_suffix = "_Standalone".to_string();
    config.output_dir = config.input_dir.clone();
    assert_eq!(config.validate(), Err(ConfigError::SameDirectories(config.input_dir.clone())));
}

/// Test that the same existing directory spelled differently is rejected
#[test]
fn test_config_validation_withAliasedDirectories_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config {
        input_dir: temp_dir.path().to_path_buf(),
        output_dir: temp_dir.path().join("."),
        ..Config::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::SameDirectories(_))));

    Ok(())
}

/// Test loading a partial configuration file
#[test]
fn test_load_or_default_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "output_dir": "build/", "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.output_dir, PathBuf::from("build/"));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.input_dir, PathBuf::from("./modular/"));
    assert_eq!(config.output_suffix, "_Standalone");

    Ok(())
}

/// Test that a missing configuration file yields the defaults
#[test]
fn test_load_or_default_withMissingFile_shouldReturnDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let config = Config::load_or_default(temp_dir.path().join("conf.json"))?;

    assert_eq!(config, Config::default());

    Ok(())
}

/// Test that malformed JSON is reported
#[test]
fn test_load_or_default_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_default(&path).is_err());

    Ok(())
}

/// Test configuration serialization round trip
#[test]
fn test_config_serialization_shouldUseLowercaseLogLevel() -> Result<()> {
    let config = Config {
        log_level: LogLevel::Warn,
        ..Config::default()
    };

    let json = serde_json::to_string(&config)?;
    assert!(json.contains("\"log_level\":\"warn\""));

    Ok(())
}

#[test]
fn test_log_level_conversion_shouldMapToLevelFilter() {
    assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
    assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
}
