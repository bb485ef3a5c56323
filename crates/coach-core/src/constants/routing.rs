// ABOUTME: Chat routing constants for intent triggers and model selection
// ABOUTME: Role-trigger allow-list, escalation thresholds, token heuristics, and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Intents that hand the turn to a specialised pipeline instead of general chat
pub const ROLE_TRIGGER_INTENTS: [&str; 5] = [
    "food_question",
    "food_log",
    "food_undo",
    "kpi_today",
    "kpi_remaining",
];

/// Intent confidence below which the router escalates to a better reasoner
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Sampling temperature for conversational replies
pub const CONVERSATIONAL_TEMPERATURE: f64 = 0.55;

/// Rough characters-per-token ratio for English chat text
pub const CHARS_PER_TOKEN: usize = 4;

/// Token allowance reserved for system prompt and completion
pub const COMPLETION_TOKEN_BUDGET: u32 = 500;

/// Cost (USD) reported for a model missing from the pricing table
pub const DEFAULT_COST_ESTIMATE_USD: f64 = 0.001;

/// Confidence assigned when a logging phrase opens the message
pub const CONFIDENCE_EXPLICIT_LOGGING: f64 = 0.95;

/// Confidence assigned when logging is inferred from food plus quantity
pub const CONFIDENCE_INFERRED_LOGGING: f64 = 0.85;

/// Confidence assigned to nutrition questions
pub const CONFIDENCE_NUTRITION_QUESTION: f64 = 0.8;

/// Confidence assigned to general chat
pub const CONFIDENCE_GENERAL: f64 = 0.7;

/// Environment variable overriding the economy (cheapest) model id
pub const ENV_MODEL_ECONOMY: &str = "COACH_MODEL_ECONOMY";

/// Environment variable overriding the conversational model id
pub const ENV_MODEL_CONVERSATIONAL: &str = "COACH_MODEL_CONVERSATIONAL";

/// Environment variable overriding the mid-tier model id
pub const ENV_MODEL_MID_TIER: &str = "COACH_MODEL_MID_TIER";

/// Environment variable overriding the expert model id
pub const ENV_MODEL_EXPERT: &str = "COACH_MODEL_EXPERT";

/// Environment variable overriding the low-confidence threshold
pub const ENV_LOW_CONFIDENCE_THRESHOLD: &str = "COACH_LOW_CONFIDENCE_THRESHOLD";
