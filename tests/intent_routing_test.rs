// ABOUTME: Integration tests for intent normalization, routing decisions, and role triggers
// ABOUTME: Covers tier precedence, web-search merging, and strict router JSON validation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use coach_engine::models::{Intent, RouteTarget};
use coach_engine::routing::{
    detect_intent, normalize_nutrition_intent, parse_router_decision, resolve_router_decision,
    should_trigger_role, KeywordWebSearchDetector, NoWebSearch, RouteReason, WebSearchDetector,
};
use common::{init_test_logging, FixedWebSearch};

// ============================================================================
// Normalizer tiers
// ============================================================================

#[test]
fn test_reference_classifications() {
    let logging = normalize_nutrition_intent("I ate 2 eggs and a cup of oatmeal");
    assert_eq!(logging.final_intent, Intent::MealLogging);
    assert!(!logging.ama_nutrition_estimate);

    let question = normalize_nutrition_intent("what are the macros for a big mac");
    assert_eq!(question.final_intent, Intent::Ama);
    assert!(question.ama_nutrition_estimate);

    let general = normalize_nutrition_intent("why is ribeye so tender");
    assert_eq!(general.final_intent, Intent::General);
    assert!(!general.ama_nutrition_estimate);
}

#[test]
fn test_logging_prefixes_are_case_insensitive() {
    for text in [
        "i had a protein shake",
        "LOG THIS: greek yogurt",
        "Add this to lunch please",
        "  I Ate something earlier",
    ] {
        assert_eq!(
            normalize_nutrition_intent(text).final_intent,
            Intent::MealLogging,
            "{text}"
        );
    }
}

#[test]
fn test_prefix_must_open_the_message() {
    let result = normalize_nutrition_intent("yesterday I ate too late");
    assert_eq!(result.final_intent, Intent::General);
}

#[test]
fn test_food_with_quantity_infers_logging() {
    let result = normalize_nutrition_intent("6 oz salmon and 1 cup rice");
    assert_eq!(result.final_intent, Intent::MealLogging);
    assert!(result.confidence < normalize_nutrition_intent("I ate salmon").confidence);
}

#[test]
fn test_macro_keyword_without_food_is_general() {
    let result = normalize_nutrition_intent("how much protein do I need");
    assert_eq!(result.final_intent, Intent::General);
}

// ============================================================================
// Routing decisions
// ============================================================================

#[test]
fn test_meal_logging_routes_to_tmwya() {
    init_test_logging();
    let decision = detect_intent("I had 3 eggs", &FixedWebSearch(true));

    assert_eq!(decision.route_to, RouteTarget::Tmwya);
    assert_eq!(decision.reason, RouteReason::MealLogging);
    assert!(!decision.use_gemini);
    assert!(decision.is_valid());
}

#[test]
fn test_web_search_only_applies_to_ama() {
    let question = detect_intent("calories in a chicken burrito", &FixedWebSearch(true));
    assert_eq!(question.route_to, RouteTarget::Ama);
    assert!(question.use_gemini);
    assert_eq!(question.reason, RouteReason::AmaNeedsWeb);
    assert!(question.ama_nutrition_estimate);

    let chat = detect_intent("tell me a joke", &FixedWebSearch(true));
    assert_eq!(chat.route_to, RouteTarget::Ama);
    assert!(!chat.use_gemini);
    assert_eq!(chat.reason, RouteReason::General);
}

#[test]
fn test_nutrition_question_without_web_signal() {
    let decision = detect_intent("what are the macros for a big mac", &NoWebSearch);

    assert_eq!(decision.intent, Intent::Ama);
    assert_eq!(decision.reason, RouteReason::NutritionEstimate);
    assert!(!decision.use_gemini);
}

#[test]
fn test_keyword_detector_spots_recency() {
    let detector = KeywordWebSearchDetector;

    assert!(detector.needs_web_search("what's the latest research on eggs"));
    assert!(detector.needs_web_search("any news about the salmon recall"));
    assert!(!detector.needs_web_search("how many carbs in a banana"));
}

#[test]
fn test_detection_is_deterministic() {
    let text = "how many calories in the newest big mac";
    let first = detect_intent(text, &KeywordWebSearchDetector);
    let second = detect_intent(text, &KeywordWebSearchDetector);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ============================================================================
// Router JSON validation
// ============================================================================

const VALID_ROUTER_JSON: &str = r#"{
    "intent": "ama",
    "route_to": "ama",
    "use_gemini": true,
    "reason": "ama_needs_web",
    "confidence": 0.72,
    "needs_clarification": true,
    "clarifier": "Which restaurant?"
}"#;

#[test]
fn test_valid_router_json_is_accepted() {
    let decision = parse_router_decision(VALID_ROUTER_JSON).unwrap();

    assert_eq!(decision.intent, Intent::Ama);
    assert!(decision.use_gemini);
    assert_eq!(decision.clarifier.as_deref(), Some("Which restaurant?"));
    assert!(!decision.ama_nutrition_estimate);
}

#[test]
fn test_invalid_router_json_is_discarded() {
    let cases = [
        ("not json", "{intent: ama"),
        (
            "unknown field",
            r#"{"intent":"ama","route_to":"ama","use_gemini":false,"reason":"general","confidence":0.5,"model":"x"}"#,
        ),
        (
            "unknown intent",
            r#"{"intent":"snack","route_to":"ama","use_gemini":false,"reason":"general","confidence":0.5}"#,
        ),
        (
            "confidence above one",
            r#"{"intent":"ama","route_to":"ama","use_gemini":false,"reason":"general","confidence":1.2}"#,
        ),
        (
            "negative confidence",
            r#"{"intent":"general","route_to":"ama","use_gemini":false,"reason":"general","confidence":-0.1}"#,
        ),
        (
            "route mismatch",
            r#"{"intent":"meal_logging","route_to":"ama","use_gemini":false,"reason":"meal_logging","confidence":0.9}"#,
        ),
        (
            "gemini outside ama",
            r#"{"intent":"meal_logging","route_to":"tmwya","use_gemini":true,"reason":"meal_logging","confidence":0.9}"#,
        ),
        (
            "clarification without clarifier",
            r#"{"intent":"ama","route_to":"ama","use_gemini":false,"reason":"general","confidence":0.5,"needs_clarification":true}"#,
        ),
        (
            "missing confidence",
            r#"{"intent":"ama","route_to":"ama","use_gemini":false,"reason":"general"}"#,
        ),
    ];

    for (label, json) in cases {
        assert!(parse_router_decision(json).is_none(), "{label}");
    }
}

#[test]
fn test_resolve_prefers_valid_llm_decision() {
    let resolved = resolve_router_decision(
        Some(VALID_ROUTER_JSON),
        "I ate 2 eggs",
        &NoWebSearch,
    );
    assert_eq!(resolved.intent, Intent::Ama);
    assert!(resolved.needs_clarification);
}

#[test]
fn test_resolve_falls_back_to_detection() {
    let fallback = resolve_router_decision(
        Some(r#"{"intent":"ama","confidence":7}"#),
        "I ate 2 eggs",
        &NoWebSearch,
    );
    assert_eq!(fallback, detect_intent("I ate 2 eggs", &NoWebSearch));

    let absent = resolve_router_decision(None, "why is ribeye so tender", &NoWebSearch);
    assert_eq!(absent.intent, Intent::General);
}

// ============================================================================
// Role triggers
// ============================================================================

#[test]
fn test_role_trigger_allow_list() {
    for intent in [
        "food_question",
        "food_log",
        "food_undo",
        "kpi_today",
        "kpi_remaining",
    ] {
        assert!(should_trigger_role(intent), "{intent}");
    }

    for intent in ["general", "ama", "meal_logging", "FOOD_LOG", "food_log ", ""] {
        assert!(!should_trigger_role(intent), "{intent:?}");
    }
}
