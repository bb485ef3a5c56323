// ABOUTME: Cost-aware model selection driven by an ordered rule table
// ABOUTME: Escalates on explicit requests, failures, and low confidence; otherwise picks the cheapest model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Model Selection
//!
//! Rules are evaluated top to bottom and the first match wins. Escalation
//! signals (explicit request, previous failure) always outrank cost
//! optimisation, and a retry never reuses the model that just failed.

use crate::config::{ModelCatalog, ModelSpec, ModelTier, RoutingConfig};
use coach_core::constants::routing::CHARS_PER_TOKEN;
use coach_core::models::{Intent, LlmProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Request attributes that drive model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelRouterContext {
    /// Orchestrator intent label (e.g. `general`, `food_log`), if classified
    pub intent: Option<String>,
    /// Classifier confidence in [0, 1]
    pub intent_confidence: f64,
    /// Message length in characters
    pub message_length: usize,
    /// Keep the conversational `OpenAI` voice (greetings and personality turns)
    pub force_openai: bool,
    /// The user asked for the best available answer
    pub user_requested_expert: bool,
    /// Failed attempts for this turn so far
    pub previous_failures: u32,
    /// The caller needs JSON or another strict output format
    pub requires_structured_output: bool,
}

impl Default for ModelRouterContext {
    fn default() -> Self {
        Self {
            intent: None,
            intent_confidence: 1.0,
            message_length: 0,
            force_openai: false,
            user_requested_expert: false,
            previous_failures: 0,
            requires_structured_output: false,
        }
    }
}

impl ModelRouterContext {
    /// Context for a message with a classified intent
    #[must_use]
    pub fn for_message(intent: Intent, intent_confidence: f64, message: &str) -> Self {
        Self {
            intent: Some(intent.as_str().to_owned()),
            intent_confidence,
            message_length: message.chars().count(),
            ..Self::default()
        }
    }

    fn is_general(&self) -> bool {
        self.intent
            .as_deref()
            .is_some_and(|intent| intent.trim().eq_ignore_ascii_case(Intent::General.as_str()))
    }
}

/// Why a model was chosen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// General chat uses the conversational model
    ConversationalDefault,
    /// Forced onto the conversational `OpenAI` voice
    PersonalityInteraction,
    /// User explicitly asked for the strongest model
    UserRequestedExpert,
    /// Previous attempt failed; step up capability
    RetryWithStrongerModel,
    /// Ambiguous intent needs a better reasoner
    LowConfidenceNeedsBetterUnderstanding,
    /// Output format reliability matters
    StructuredOutputRequired,
    /// No escalation signal; cheapest model
    DefaultCostOptimized,
}

impl SelectionReason {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConversationalDefault => "conversational_default",
            Self::PersonalityInteraction => "personality_interaction",
            Self::UserRequestedExpert => "user_requested_expert",
            Self::RetryWithStrongerModel => "retry_with_stronger_model",
            Self::LowConfidenceNeedsBetterUnderstanding => {
                "low_confidence_needs_better_understanding"
            }
            Self::StructuredOutputRequired => "structured_output_required",
            Self::DefaultCostOptimized => "default_cost_optimized",
        }
    }
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chosen model for a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSelection {
    /// Provider serving the model
    pub provider: LlmProvider,
    /// Model identifier
    pub model: String,
    /// Estimated prompt plus completion tokens
    pub tokens_estimate: u32,
    /// Sampling temperature, when the rule pins one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Rule that produced the selection
    pub reason: SelectionReason,
}

/// One row of the selection table
struct SelectionRule {
    applies: fn(&ModelRouterContext, &RoutingConfig) -> bool,
    tier: ModelTier,
    conversational: bool,
    reason: SelectionReason,
}

fn is_general(ctx: &ModelRouterContext, _: &RoutingConfig) -> bool {
    ctx.is_general()
}

fn forces_openai(ctx: &ModelRouterContext, _: &RoutingConfig) -> bool {
    ctx.force_openai
}

fn wants_expert(ctx: &ModelRouterContext, _: &RoutingConfig) -> bool {
    ctx.user_requested_expert
}

fn has_failed_before(ctx: &ModelRouterContext, _: &RoutingConfig) -> bool {
    ctx.previous_failures > 0
}

fn is_low_confidence(ctx: &ModelRouterContext, config: &RoutingConfig) -> bool {
    !ctx.intent_confidence.is_finite() || ctx.intent_confidence < config.low_confidence_threshold
}

fn needs_structured_output(ctx: &ModelRouterContext, _: &RoutingConfig) -> bool {
    ctx.requires_structured_output
}

const fn always(_: &ModelRouterContext, _: &RoutingConfig) -> bool {
    true
}

const RULE_COUNT: usize = 7;

/// Index of the default rule
const DEFAULT_RULE: usize = RULE_COUNT - 1;

/// Selection rules in priority order; the last row always matches
static SELECTION_RULES: [SelectionRule; RULE_COUNT] = [
    SelectionRule {
        applies: is_general,
        tier: ModelTier::Conversational,
        conversational: true,
        reason: SelectionReason::ConversationalDefault,
    },
    SelectionRule {
        applies: forces_openai,
        tier: ModelTier::Conversational,
        conversational: true,
        reason: SelectionReason::PersonalityInteraction,
    },
    SelectionRule {
        applies: wants_expert,
        tier: ModelTier::Expert,
        conversational: false,
        reason: SelectionReason::UserRequestedExpert,
    },
    SelectionRule {
        applies: has_failed_before,
        tier: ModelTier::Expert,
        conversational: false,
        reason: SelectionReason::RetryWithStrongerModel,
    },
    SelectionRule {
        applies: is_low_confidence,
        tier: ModelTier::MidTier,
        conversational: false,
        reason: SelectionReason::LowConfidenceNeedsBetterUnderstanding,
    },
    SelectionRule {
        applies: needs_structured_output,
        tier: ModelTier::MidTier,
        conversational: false,
        reason: SelectionReason::StructuredOutputRequired,
    },
    SelectionRule {
        applies: always,
        tier: ModelTier::Economy,
        conversational: false,
        reason: SelectionReason::DefaultCostOptimized,
    },
];

/// Estimate prompt plus completion tokens for a message length
#[must_use]
pub fn estimate_tokens(message_length: usize, config: &RoutingConfig) -> u32 {
    let prompt_tokens =
        u32::try_from(message_length.div_ceil(CHARS_PER_TOKEN)).unwrap_or(u32::MAX);
    prompt_tokens.saturating_add(config.completion_token_budget)
}

/// Model for a rule; conversational rules are always served by `OpenAI`
fn resolve_spec(rule: &SelectionRule, config: &RoutingConfig) -> ModelSpec {
    let spec = config.catalog.spec(rule.tier);
    if rule.conversational && spec.provider != LlmProvider::OpenAi {
        let fallback = ModelCatalog::default().conversational;
        warn!(
            configured = %spec.model,
            fallback = %fallback.model,
            "Conversational model is not served by OpenAI, using default"
        );
        return fallback;
    }
    spec.clone()
}

/// Pick the model for a request
#[must_use]
pub fn select_model(context: &ModelRouterContext, config: &RoutingConfig) -> ModelSelection {
    let rule = SELECTION_RULES
        .iter()
        .find(|rule| (rule.applies)(context, config))
        .unwrap_or(&SELECTION_RULES[DEFAULT_RULE]);

    let spec = resolve_spec(rule, config);
    let selection = ModelSelection {
        provider: spec.provider,
        model: spec.model,
        tokens_estimate: estimate_tokens(context.message_length, config),
        temperature: rule
            .conversational
            .then_some(config.conversational_temperature),
        reason: rule.reason,
    };

    debug!(
        model = %selection.model,
        provider = %selection.provider,
        reason = %selection.reason,
        tokens = selection.tokens_estimate,
        "Selected model"
    );
    selection
}

/// Estimated cost in USD for a selection
///
/// Models missing from the pricing table report the configured default estimate.
#[must_use]
pub fn estimate_cost(selection: &ModelSelection, config: &RoutingConfig) -> f64 {
    config.cost_per_1k(&selection.model).map_or_else(
        || {
            debug!(model = %selection.model, "No pricing for model, using default estimate");
            config.default_cost_estimate_usd
        },
        |cost_per_1k| f64::from(selection.tokens_estimate) / 1000.0 * cost_per_1k,
    )
}
