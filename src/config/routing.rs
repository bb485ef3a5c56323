// ABOUTME: Model catalog and pricing configuration for chat routing
// ABOUTME: Environment-gated model ids, escalation threshold, token budget, and cost table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::routing::{
    COMPLETION_TOKEN_BUDGET, CONVERSATIONAL_TEMPERATURE, DEFAULT_COST_ESTIMATE_USD,
    ENV_LOW_CONFIDENCE_THRESHOLD, ENV_MODEL_CONVERSATIONAL, ENV_MODEL_ECONOMY, ENV_MODEL_EXPERT,
    ENV_MODEL_MID_TIER, LOW_CONFIDENCE_THRESHOLD,
};
use coach_core::models::LlmProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Known model ids with their cost in USD per 1k tokens
const MODEL_PRICING: [(&str, f64); 8] = [
    ("gemini-1.5-flash", 0.000_075),
    ("gemini-2.0-flash", 0.000_1),
    ("gemini-1.5-pro", 0.001_25),
    ("gpt-4o-mini", 0.000_15),
    ("gpt-4.1-mini", 0.000_4),
    ("gpt-4.1", 0.002),
    ("gpt-4o", 0.002_5),
    ("o3-mini", 0.001_1),
];

static ROUTING_CONFIG: OnceLock<RoutingConfig> = OnceLock::new();

/// Capability tier a selection rule resolves to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Cheapest model for routine structured work
    Economy,
    /// Cheap model with a conversational voice
    Conversational,
    /// Better reasoner for ambiguous or format-sensitive requests
    MidTier,
    /// Strongest available model
    Expert,
}

/// A concrete model bound to its provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Provider serving the model
    pub provider: LlmProvider,
    /// Provider-specific model identifier
    pub model: String,
}

impl ModelSpec {
    /// Bind a model id to the provider its name belongs to
    #[must_use]
    pub fn from_model_id(model: impl Into<String>) -> Self {
        let model = model.into();
        let provider = if model.to_lowercase().starts_with("gemini") {
            LlmProvider::Gemini
        } else {
            LlmProvider::OpenAi
        };
        Self { provider, model }
    }
}

/// Models used for each tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Economy tier
    pub economy: ModelSpec,
    /// Conversational tier
    pub conversational: ModelSpec,
    /// Mid tier
    pub mid_tier: ModelSpec,
    /// Expert tier
    pub expert: ModelSpec,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            economy: ModelSpec::from_model_id("gemini-1.5-flash"),
            conversational: ModelSpec::from_model_id("gpt-4o-mini"),
            mid_tier: ModelSpec::from_model_id("gpt-4.1-mini"),
            expert: ModelSpec::from_model_id("gpt-4o"),
        }
    }
}

impl ModelCatalog {
    /// Model for a tier
    #[must_use]
    pub const fn spec(&self, tier: ModelTier) -> &ModelSpec {
        match tier {
            ModelTier::Economy => &self.economy,
            ModelTier::Conversational => &self.conversational,
            ModelTier::MidTier => &self.mid_tier,
            ModelTier::Expert => &self.expert,
        }
    }

    /// Load model ids from `COACH_MODEL_*`, keeping defaults for unset or empty variables
    ///
    /// The conversational tier is the `OpenAI` voice; an override naming another
    /// provider's model is ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let conversational = match model_from_env(ENV_MODEL_CONVERSATIONAL) {
            Some(spec) if spec.provider == LlmProvider::OpenAi => spec,
            Some(spec) => {
                warn!(
                    "{ENV_MODEL_CONVERSATIONAL}={} is not an OpenAI model, using {}",
                    spec.model, defaults.conversational.model
                );
                defaults.conversational
            }
            None => defaults.conversational,
        };
        Self {
            economy: model_from_env(ENV_MODEL_ECONOMY).unwrap_or(defaults.economy),
            conversational,
            mid_tier: model_from_env(ENV_MODEL_MID_TIER).unwrap_or(defaults.mid_tier),
            expert: model_from_env(ENV_MODEL_EXPERT).unwrap_or(defaults.expert),
        }
    }
}

fn model_from_env(var: &str) -> Option<ModelSpec> {
    match env::var(var) {
        Ok(model) if !model.trim().is_empty() => {
            debug!("{var} overrides model id with {model}");
            Some(ModelSpec::from_model_id(model.trim()))
        }
        _ => None,
    }
}

/// Chat routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Models per tier
    pub catalog: ModelCatalog,
    /// Cost per 1k tokens keyed by model id
    pub pricing: HashMap<String, f64>,
    /// Intent confidence below which selection escalates to the mid tier
    pub low_confidence_threshold: f64,
    /// Temperature for conversational replies
    pub conversational_temperature: f64,
    /// Tokens added to every estimate for system prompt and completion
    pub completion_token_budget: u32,
    /// Cost reported for models missing from `pricing`
    pub default_cost_estimate_usd: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            catalog: ModelCatalog::default(),
            pricing: MODEL_PRICING
                .iter()
                .map(|(model, cost)| ((*model).to_owned(), *cost))
                .collect(),
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
            conversational_temperature: CONVERSATIONAL_TEMPERATURE,
            completion_token_budget: COMPLETION_TOKEN_BUDGET,
            default_cost_estimate_usd: DEFAULT_COST_ESTIMATE_USD,
        }
    }
}

impl RoutingConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ROUTING_CONFIG.get_or_init(Self::from_env)
    }

    /// Load configuration from environment variables
    ///
    /// Invalid values are logged and replaced by defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self {
            catalog: ModelCatalog::from_env(),
            ..Self::default()
        };

        if let Ok(raw) = env::var(ENV_LOW_CONFIDENCE_THRESHOLD) {
            match raw.parse::<f64>() {
                Ok(threshold) if (0.0..=1.0).contains(&threshold) => {
                    config.low_confidence_threshold = threshold;
                }
                _ => warn!(
                    "Invalid {ENV_LOW_CONFIDENCE_THRESHOLD}={raw}, using {LOW_CONFIDENCE_THRESHOLD}"
                ),
            }
        }

        config
    }

    /// Cost per 1k tokens for a model id, if priced
    #[must_use]
    pub fn cost_per_1k(&self, model: &str) -> Option<f64> {
        self.pricing.get(model).copied()
    }
}
