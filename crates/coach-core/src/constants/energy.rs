// ABOUTME: Energy density constants for macronutrients and thermic effect of food
// ABOUTME: Atwater factors and macro-specific TEF coefficients used by the metabolic engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Protein energy density (kcal per gram)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;

/// Carbohydrate energy density (kcal per gram)
pub const KCAL_PER_G_CARB: f64 = 4.0;

/// Fat energy density (kcal per gram)
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Fraction of protein calories spent on digestion
pub const TEF_PROTEIN_FRACTION: f64 = 0.25;

/// Fraction of carbohydrate calories spent on digestion
pub const TEF_CARB_FRACTION: f64 = 0.11;

/// Fraction of fat calories spent on digestion
pub const TEF_FAT_FRACTION: f64 = 0.03;

/// Lowest body-fat percentage trusted by the engine
pub const BODY_FAT_MIN_PERCENT: f64 = 3.0;

/// Highest body-fat percentage trusted by the engine
pub const BODY_FAT_MAX_PERCENT: f64 = 60.0;
