// ABOUTME: Portion-default cache constants
// ABOUTME: Refresh interval and fallback portion size for gram conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default refresh interval for TTL-based portion caches (24 hours)
pub const DEFAULT_PORTION_TTL_SECS: u64 = 86_400;

/// Grams assumed for one portion of a food with no known default
pub const FALLBACK_PORTION_GRAMS: f64 = 100.0;
