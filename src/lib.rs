// ABOUTME: Main library entry point for the coach engine
// ABOUTME: Message routing, model selection, logging, and re-exported metabolic calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Coach Engine
//!
//! Deterministic core of a nutrition coaching assistant.
//!
//! ## Features
//!
//! - **Energy targets**: BMR formula selection, TDEE, macro split and thermic
//!   effect of food (see [`intelligence`])
//! - **Message routing**: intent classification, role triggers and router
//!   JSON validation (see [`routing`])
//! - **Model selection**: cost-aware model choice with explicit escalation
//!   rules and cost estimation
//!
//! ## Example Usage
//!
//! ```rust
//! use coach_engine::config::RoutingConfig;
//! use coach_engine::routing::{detect_intent, select_model, ModelRouterContext, NoWebSearch};
//!
//! let decision = detect_intent("I ate 2 eggs and a cup of oatmeal", &NoWebSearch);
//! let context = ModelRouterContext::for_message(
//!     decision.intent,
//!     decision.confidence,
//!     "I ate 2 eggs and a cup of oatmeal",
//! );
//! let selection = select_model(&context, &RoutingConfig::default());
//! assert_eq!(selection.reason.as_str(), "default_cost_optimized");
//! ```

/// Configuration management
pub mod config;

/// Logging configuration and structured logging setup
pub mod logging;

/// Intent routing and model selection
pub mod routing;

/// Unified error types
pub use coach_core::errors;

/// Domain models shared with the metabolic engine
pub use coach_core::models;

/// Metabolic calculations and portion defaults
pub use coach_intelligence as intelligence;
