// ABOUTME: Unit conversion constants for body mass and food portions
// ABOUTME: Provides named constants to eliminate magic numbers in calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.204_62;

/// Grams per kilogram
pub const GRAMS_PER_KG: f64 = 1000.0;

/// Grams per avoirdupois ounce
pub const GRAMS_PER_OZ: f64 = 28.349_5;

/// Grams per pound
pub const GRAMS_PER_LB: f64 = 453.592;
