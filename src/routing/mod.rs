// ABOUTME: Message routing decision engine for the chat assistant
// ABOUTME: Intent classification, role triggers, router JSON validation, model selection and cost
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Intent classification and routing decisions
pub mod intent;

/// Model selection and cost estimation
pub mod model_selection;

pub use intent::{
    detect_intent, normalize_nutrition_intent, parse_router_decision, resolve_router_decision,
    should_trigger_role, KeywordWebSearchDetector, NoWebSearch, NutritionIntent, RouteReason,
    RouterDecision, WebSearchDetector,
};
pub use model_selection::{
    estimate_cost, estimate_tokens, select_model, ModelRouterContext, ModelSelection,
    SelectionReason,
};
