// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging setup and biometric/routing fixtures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `coach_engine`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use coach_engine::models::{ActivityLevel, BiometricProfile, DietaryPreference, Sex};
use coach_engine::routing::WebSearchDetector;
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN, // Default to WARN for quiet tests
        };

        // Another test binary helper may already have installed a subscriber
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Lean, heavy male: 90 kg, 175 cm, 30 years, 12% body fat, moderate activity
pub fn lean_male_profile() -> BiometricProfile {
    BiometricProfile::new(Sex::Male, 90.0, 175.0, 30).with_body_fat(12.0)
}

/// Sedentary female without a body-fat reading: 60 kg, 165 cm, 25 years
pub fn sedentary_female_profile() -> BiometricProfile {
    BiometricProfile::new(Sex::Female, 60.0, 165.0, 25)
        .with_activity_level(ActivityLevel::Sedentary)
}

/// Heavy very-active keto profile whose protein and fat exceed TDEE
pub fn carb_deficit_profile() -> BiometricProfile {
    BiometricProfile::new(Sex::Female, 150.0, 160.0, 60)
        .with_activity_level(ActivityLevel::Very)
        .with_dietary_preference(DietaryPreference::CarnivoreKeto)
}

/// Web-search detector with a fixed answer
pub struct FixedWebSearch(pub bool);

impl WebSearchDetector for FixedWebSearch {
    fn needs_web_search(&self, _text: &str) -> bool {
        self.0
    }
}

/// Assert two floats are within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
