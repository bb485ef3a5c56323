// ABOUTME: Configuration module for the routing engine and re-exported metabolic settings
// ABOUTME: Environment-only configuration with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration for the coach engine
//!
//! - **Routing**: model catalog, pricing, and escalation threshold
//! - **Metabolic**: formula coefficients and macro targets (from `coach-intelligence`)

/// Model catalog and pricing for chat routing
pub mod routing;

pub use coach_intelligence::config::{ConfigError, MetabolicConfig};
pub use routing::{ModelCatalog, ModelSpec, ModelTier, RoutingConfig};
