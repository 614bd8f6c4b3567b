/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;

use isoref::app_config::{Config, LogLevel};

use crate::common::{create_temp_dir, create_test_file};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.database_path, None);
    assert_eq!(config.countries_file, PathBuf::from("data/iso_3166-1.json"));
    assert_eq!(config.languages_file, PathBuf::from("data/iso_639-2.json"));
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::load_or_create(&path).unwrap(), config);
}

/// Test loading an existing config file
#[test]
fn test_load_or_create_withExistingFile_shouldParseValues() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        dir.path(),
        "conf.json",
        r#"{"database_path": "catalog.db", "log_level": "warn"}"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.database_path, Some(PathBuf::from("catalog.db")));
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.resolved_database_path().unwrap(), PathBuf::from("catalog.db"));
}

/// Test that malformed config files are reported
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    let err = Config::load_or_create(&path).unwrap_err();

    assert!(err.to_string().contains("Failed to parse config file"));
}

/// Test configuration validation
#[test]
fn test_config_validation_withDirectoryDatabase_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let config = Config {
        database_path: Some(dir.path().to_path_buf()),
        ..Config::default()
    };

    assert!(config.validate().is_err());
}

/// Test log level conversion
#[test]
fn test_log_level_conversion_shouldMapToLevelFilter() {
    assert_eq!(log::LevelFilter::from(LogLevel::Error), log::LevelFilter::Error);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}
