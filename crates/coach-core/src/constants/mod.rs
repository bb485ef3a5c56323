// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for energy math, unit conversion, portion caching, and routing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Energy density and thermic-effect constants
pub mod energy;
/// Portion-default cache constants
pub mod portions;
/// Chat routing and model selection constants
pub mod routing;
/// Unit conversion and measurement constants
pub mod units;
