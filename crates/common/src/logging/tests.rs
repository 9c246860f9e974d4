//! Unit tests for the logging subsystem.

use std::path::PathBuf;

use super::{service::logger_config, *};

#[test]
fn test_format_service_name() {
    assert_eq!(format_service_name("momoka", None), "momoka");
    assert_eq!(format_service_name("momoka", Some("prod")), "momoka%prod");
}

#[test]
fn test_logger_config_defaults() {
    let config = LoggerConfig::new("test-service".to_owned());
    assert_eq!(config.service_name, "test-service");
    assert!(!config.stdout_config.json_format);
    assert!(config.file_logging_config.is_none());
}

#[test]
fn test_file_logging_config_builder() {
    let config = FileLoggingConfig::new(PathBuf::from("/tmp/logs"), "momoka".to_owned())
        .with_json_format(true);
    assert_eq!(config.directory, PathBuf::from("/tmp/logs"));
    assert_eq!(config.file_name_prefix, "momoka");
    assert!(config.json_format);
}

#[test]
fn test_init_config_without_log_dir_has_no_file_layer() {
    let lconfig = logger_config(&LoggingInitConfig {
        service_base_name: "momoka-verifier",
        service_label: Some("dev"),
        log_dir: None,
        log_file_prefix: Some("ignored"),
        json_format: Some(true),
        default_log_prefix: "momoka",
    });
    assert_eq!(lconfig.service_name, "momoka-verifier%dev");
    assert!(lconfig.stdout_config.json_format);
    assert!(lconfig.file_logging_config.is_none());
}

#[test]
fn test_init_config_falls_back_to_default_prefix() {
    let dir = PathBuf::from("/var/log/momoka");
    let lconfig = logger_config(&LoggingInitConfig {
        service_base_name: "momoka-verifier",
        service_label: None,
        log_dir: Some(&dir),
        log_file_prefix: None,
        json_format: None,
        default_log_prefix: "momoka",
    });
    let file = lconfig.file_logging_config.unwrap();
    assert_eq!(file.directory, dir);
    assert_eq!(file.file_name_prefix, "momoka");
    assert!(!file.json_format);
}
