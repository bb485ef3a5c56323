// ABOUTME: Metabolic calculation engine for onboarding energy targets
// ABOUTME: BMR formula selection, TDEE, macro partitioning, TEF, and portion-default caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Intelligence
//!
//! Deterministic energy-expenditure calculations. Every function here is a
//! pure projection of its inputs and configuration: no I/O, no clock, no
//! randomness. The only stateful type is [`portions::PortionCache`], which is
//! injected by callers rather than living in module-level state.

/// Metabolic engine configuration with environment overrides
pub mod config;

/// BMR, TDEE, macro and TEF calculations
pub mod metabolic;

/// Read-through portion-default cache and gram conversion
pub mod portions;

pub use config::{ConfigError, MetabolicConfig};
pub use metabolic::{
    calculate_tdee_and_macros, get_bmr, pick_formula, BmrFormula, BmrParams, BmrResult,
    EnergyResult,
};
pub use portions::{PortionCache, PortionSource, RefreshPolicy, StaticPortionSource};
