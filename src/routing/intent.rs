// ABOUTME: Deterministic intent classification and routing decisions for chat messages
// ABOUTME: Regex tiers for meal logging vs nutrition questions, web-search signal, router JSON validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intent Routing
//!
//! Classification runs in three tiers, first match wins:
//!
//! 1. **Logging**: the message opens with "I ate", "I had", "log this" or
//!    "add this", or it names a food together with a quantity and unit.
//! 2. **Nutrition question**: a food term plus a macro keyword.
//! 3. **General**: everything else.
//!
//! Logging outranks questions: a user who states quantities wants an entry
//! recorded. Without explicit quantities the router stays advisory.
//!
//! An LLM router may supply its own decision as JSON. That payload is
//! untrusted; [`parse_router_decision`] validates it strictly and
//! [`resolve_router_decision`] falls back to [`detect_intent`] whenever it is
//! missing or invalid.

use coach_core::constants::routing::{
    CONFIDENCE_EXPLICIT_LOGGING, CONFIDENCE_GENERAL, CONFIDENCE_INFERRED_LOGGING,
    CONFIDENCE_NUTRITION_QUESTION, ROLE_TRIGGER_INTENTS,
};
use coach_core::models::{Intent, RouteTarget};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

// ============================================================================
// Patterns
// ============================================================================

/// Explicit logging phrases at the start of the message
static LOGGING_PREFIX_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "I ate ...", "i had ...", "Log this: ...", "add this"
    Regex::new(r"(?i)^\s*(?:i\s+ate|i\s+had|log\s+this|add\s+this)\b").ok()
});

/// Numeric quantity followed by a unit
static QUANTITY_UNIT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 2 oz, 1 cup, 150g, 0.5 lb, 3 slices
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?\s*(?:oz|ounces?|g|grams?|kg|lbs?|pounds?|cups?|tbsp|tsp|tablespoons?|teaspoons?|slices?|pieces?|servings?|scoops?|bowls?|eggs?)\b",
    )
    .ok()
});

/// Common foods and dishes
static FOOD_TERM_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:eggs?|oatmeal|oats|chicken|beef|steak|ribeye|sirloin|salmon|tuna|fish|shrimp|pork|bacon|turkey|ham|sausages?|rice|bread|toast|pasta|noodles|potato(?:es)?|fries|banana|apples?|berries|avocado|cheese|milk|yogurt|butter|nuts|almonds|peanut\s+butter|beans|tofu|broccoli|salad|pizza|burgers?|big\s+mac|sandwich|burrito|tacos?|cereal|smoothie|shake|cookies?|chocolate)\b",
    )
    .ok()
});

/// Macro and nutrition keywords
static MACRO_KEYWORD_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:macros?|calories|calorie|kcal|protein|carbs?|fats?|breakdown)\b").ok()
});

/// Recency and current-events cues that need a live web search
static WEB_SEARCH_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:latest|newest|recent(?:ly)?|current(?:ly)?|today'?s|this\s+(?:week|month|year)|news|new\s+(?:study|research|guidelines?)|price\s+of|near\s+me|recall(?:ed)?)\b",
    )
    .ok()
});

fn matches(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

// ============================================================================
// Nutrition normalizer
// ============================================================================

/// Outcome of the regex tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionIntent {
    /// Classified intent
    pub final_intent: Intent,
    /// Answer conversationally but offer a structured estimate
    pub ama_nutrition_estimate: bool,
    /// Heuristic confidence of the tier that matched
    pub confidence: f64,
}

/// Classify a message into meal logging, nutrition question, or general chat
#[must_use]
pub fn normalize_nutrition_intent(text: &str) -> NutritionIntent {
    if matches(&LOGGING_PREFIX_PATTERN, text) {
        return NutritionIntent {
            final_intent: Intent::MealLogging,
            ama_nutrition_estimate: false,
            confidence: CONFIDENCE_EXPLICIT_LOGGING,
        };
    }

    let has_food = matches(&FOOD_TERM_PATTERN, text);
    if has_food && matches(&QUANTITY_UNIT_PATTERN, text) {
        return NutritionIntent {
            final_intent: Intent::MealLogging,
            ama_nutrition_estimate: false,
            confidence: CONFIDENCE_INFERRED_LOGGING,
        };
    }

    if has_food && matches(&MACRO_KEYWORD_PATTERN, text) {
        return NutritionIntent {
            final_intent: Intent::Ama,
            ama_nutrition_estimate: true,
            confidence: CONFIDENCE_NUTRITION_QUESTION,
        };
    }

    NutritionIntent {
        final_intent: Intent::General,
        ama_nutrition_estimate: false,
        confidence: CONFIDENCE_GENERAL,
    }
}

// ============================================================================
// Web search signal
// ============================================================================

/// Signal that a question needs fresh information from the web
pub trait WebSearchDetector: Send + Sync {
    /// Whether answering `text` requires a live web search
    fn needs_web_search(&self, text: &str) -> bool;
}

/// Detector that never asks for web search
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWebSearch;

impl WebSearchDetector for NoWebSearch {
    fn needs_web_search(&self, _text: &str) -> bool {
        false
    }
}

/// Detector keyed on recency and current-events vocabulary
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordWebSearchDetector;

impl WebSearchDetector for KeywordWebSearchDetector {
    fn needs_web_search(&self, text: &str) -> bool {
        matches(&WEB_SEARCH_PATTERN, text)
    }
}

// ============================================================================
// Router decision
// ============================================================================

/// Diagnostic tag explaining a routing decision
///
/// Only meant for logs; callers must not branch on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RouteReason {
    /// Meal-logging tier matched
    MealLogging,
    /// Nutrition question answered with an estimate
    NutritionEstimate,
    /// General conversation
    General,
    /// Question routed to Gemini for a web search
    AmaNeedsWeb,
}

impl fmt::Display for RouteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MealLogging => f.write_str("meal_logging"),
            Self::NutritionEstimate => f.write_str("nutrition_estimate"),
            Self::General => f.write_str("general"),
            Self::AmaNeedsWeb => f.write_str("ama_needs_web"),
        }
    }
}

/// Routing decision for a single message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterDecision {
    /// Classified intent
    pub intent: Intent,
    /// Pipeline receiving the message
    pub route_to: RouteTarget,
    /// Answer with Gemini (web-grounded) instead of the default provider
    pub use_gemini: bool,
    /// Diagnostic reason tag
    pub reason: RouteReason,
    /// Classifier confidence in [0, 1]
    pub confidence: f64,
    /// Whether the assistant should ask a follow-up question first
    #[serde(default)]
    pub needs_clarification: bool,
    /// Follow-up question to ask
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarifier: Option<String>,
    /// Offer a structured nutrition estimate with the answer
    #[serde(default)]
    pub ama_nutrition_estimate: bool,
}

impl RouterDecision {
    /// Check the cross-field invariants serde cannot express
    fn validation_failure(&self) -> Option<&'static str> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Some("confidence outside [0, 1]");
        }
        if self.route_to != self.intent.route_target() {
            return Some("route_to does not match intent");
        }
        if self.use_gemini && self.intent != Intent::Ama {
            return Some("use_gemini set for a non-ama intent");
        }
        let has_clarifier = self
            .clarifier
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty());
        if self.needs_clarification && !has_clarifier {
            return Some("needs_clarification without a clarifier");
        }
        None
    }

    /// Whether the decision satisfies every invariant
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_failure().is_none()
    }
}

/// Build a routing decision from deterministic classification plus a web-search signal
#[must_use]
pub fn detect_intent(text: &str, detector: &dyn WebSearchDetector) -> RouterDecision {
    let normalized = normalize_nutrition_intent(text);
    let route_to = normalized.final_intent.route_target();

    let mut reason = match normalized.final_intent {
        Intent::MealLogging => RouteReason::MealLogging,
        Intent::Ama => RouteReason::NutritionEstimate,
        Intent::General => RouteReason::General,
    };

    let use_gemini =
        normalized.final_intent == Intent::Ama && detector.needs_web_search(text);
    if use_gemini {
        reason = RouteReason::AmaNeedsWeb;
    }

    debug!(
        intent = %normalized.final_intent,
        route_to = %route_to,
        reason = %reason,
        use_gemini,
        "Routed message"
    );

    RouterDecision {
        intent: normalized.final_intent,
        route_to,
        use_gemini,
        reason,
        confidence: normalized.confidence,
        needs_clarification: false,
        clarifier: None,
        ama_nutrition_estimate: normalized.ama_nutrition_estimate,
    }
}

/// Strictly parse an LLM router payload
///
/// Unknown fields, out-of-domain enum values, out-of-range confidence or
/// inconsistent fields all yield `None`.
#[must_use]
pub fn parse_router_decision(json: &str) -> Option<RouterDecision> {
    let decision: RouterDecision = match serde_json::from_str(json) {
        Ok(decision) => decision,
        Err(e) => {
            warn!("Discarding malformed router decision: {e}");
            return None;
        }
    };

    if let Some(failure) = decision.validation_failure() {
        warn!("Discarding invalid router decision: {failure}");
        return None;
    }
    Some(decision)
}

/// Use a valid LLM router decision when present, otherwise classify deterministically
#[must_use]
pub fn resolve_router_decision(
    llm_json: Option<&str>,
    text: &str,
    detector: &dyn WebSearchDetector,
) -> RouterDecision {
    llm_json
        .and_then(parse_router_decision)
        .unwrap_or_else(|| detect_intent(text, detector))
}

/// Whether an orchestrator intent hands the turn to a specialised pipeline
#[must_use]
pub fn should_trigger_role(intent: &str) -> bool {
    ROLE_TRIGGER_INTENTS.contains(&intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(LOGGING_PREFIX_PATTERN.is_some());
        assert!(QUANTITY_UNIT_PATTERN.is_some());
        assert!(FOOD_TERM_PATTERN.is_some());
        assert!(MACRO_KEYWORD_PATTERN.is_some());
        assert!(WEB_SEARCH_PATTERN.is_some());
    }

    #[test]
    fn test_quantity_without_food_is_not_logging() {
        let result = normalize_nutrition_intent("I ran 5 miles in 40 minutes, 2 cups of effort");
        assert_eq!(result.final_intent, Intent::General);
    }

    #[test]
    fn test_logging_outranks_question() {
        let result = normalize_nutrition_intent("how much protein in 6 oz chicken");
        assert_eq!(result.final_intent, Intent::MealLogging);
        assert!(!result.ama_nutrition_estimate);
    }

    #[test]
    fn test_route_reason_wire_names() {
        assert_eq!(
            serde_json::to_string(&RouteReason::AmaNeedsWeb).unwrap(),
            "\"ama_needs_web\""
        );
    }
}
