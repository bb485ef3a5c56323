// ABOUTME: Tests for logging configuration and environment variable handling
// ABOUTME: Validates format selection, production defaults, and stderr routing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use coach_engine::logging::{init_from_env, LogFormat, LoggingConfig, DEFAULT_SERVICE_NAME};
use serial_test::serial;
use std::env;

const LOGGING_VARS: [&str; 8] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "SERVICE_NAME",
    "LOG_TO_STDERR",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    "LOG_INCLUDE_SPANS",
];

fn clear_logging_env() {
    for var in LOGGING_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_logging_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "coach-worker");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "coach-worker");
    // Production turns on every diagnostic field
    assert!(config.include_location);
    assert!(config.include_thread);
    assert!(config.include_spans);
    assert!(!config.use_stderr);

    clear_logging_env();
}

#[test]
#[serial]
fn test_development_defaults_from_env() {
    clear_logging_env();
    env::set_var("LOG_FORMAT", "compact");
    env::set_var("LOG_TO_STDERR", "1");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
    assert!(!config.include_location);
    assert!(config.use_stderr);

    clear_logging_env();
}

#[test]
#[serial]
fn test_stderr_opt_out_values() {
    clear_logging_env();
    for value in ["false", "0"] {
        env::set_var("LOG_TO_STDERR", value);
        assert!(!LoggingConfig::from_env().use_stderr, "{value}");
    }
    clear_logging_env();
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
}

#[test]
#[serial]
fn test_second_init_reports_error() {
    clear_logging_env();
    let config = LoggingConfig::default().with_level("warn").with_stderr();

    // Whichever call installs the subscriber first, the other must fail cleanly
    let first = config.init();
    let second = init_from_env();
    assert!(first.is_err() || second.is_err());
}
