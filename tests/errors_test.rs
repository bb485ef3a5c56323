// ABOUTME: Tests for the unified error type and the serialisable error envelope
// ABOUTME: Verifies codes, field context, source chaining, and wire format of engine errors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use coach_engine::config::MetabolicConfig;
use coach_engine::errors::{AppError, ErrorCode, ErrorResponse};
use coach_engine::intelligence::calculate_tdee_and_macros;
use coach_engine::models::{BiometricProfile, Sex};
use serde_json::json;
use std::error::Error;

#[test]
fn test_missing_field_envelope_for_onboarding() {
    let mut profile = BiometricProfile::new(Sex::Female, 62.0, 168.0, 33);
    profile.age = None;

    let error = calculate_tdee_and_macros(&profile, &MetabolicConfig::default()).unwrap_err();
    let response = ErrorResponse::from(error);
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(json["error"]["field"], "age");
    assert_eq!(json["error"]["message"], "age is required");
}

#[test]
fn test_display_includes_description_and_message() {
    let error = AppError::out_of_range("BMR must be positive");

    assert_eq!(
        error.to_string(),
        "The provided value is outside the acceptable range: BMR must be positive"
    );
    assert!(error.code.is_usage_error());
}

#[test]
fn test_details_and_source_are_preserved() {
    let cause = "x".parse::<f64>().unwrap_err();
    let error = AppError::new(ErrorCode::ConfigError, "bad factor")
        .with_details(json!({ "variable": "COACH_ACTIVITY_FACTOR_VERY" }))
        .with_source(cause);

    assert!(error.source().is_some());
    let response = ErrorResponse::from(error);
    assert_eq!(response.error.code, ErrorCode::ConfigError);
    assert_eq!(
        response.error.details["variable"],
        "COACH_ACTIVITY_FACTOR_VERY"
    );
    assert!(response.error.field.is_none());
}

#[test]
fn test_error_codes_round_trip_through_serde() {
    let code: ErrorCode = serde_json::from_str("\"VALUE_OUT_OF_RANGE\"").unwrap();
    assert_eq!(code, ErrorCode::ValueOutOfRange);
    assert!(serde_json::from_str::<ErrorCode>("\"AUTH_REQUIRED\"").is_err());
}
