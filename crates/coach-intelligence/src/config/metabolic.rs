// ABOUTME: Metabolic engine configuration for BMR, TDEE, macro, and TEF calculations
// ABOUTME: Formula coefficients, body-fat cutoffs, activity factors, protein and fat targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metabolic Engine Configuration
//!
//! # Scientific References
//!
//! - Mifflin-St Jeor: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Katch-McArdle: `McArdle`, Katch & Katch (2010) Exercise Physiology
//! - TEF: Westerterp (2004) DOI: 10.1186/1743-7075-1-5

use coach_core::constants::energy::{
    BODY_FAT_MAX_PERCENT, BODY_FAT_MIN_PERCENT, TEF_CARB_FRACTION, TEF_FAT_FRACTION,
    TEF_PROTEIN_FRACTION,
};
use coach_core::models::{ActivityLevel, DietaryPreference, Sex};
use serde::{Deserialize, Serialize};

/// BMR (Basal Metabolic Rate) calculation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
    /// Katch-McArdle intercept (370)
    pub katch_base: f64,
    /// Katch-McArdle lean-mass coefficient (21.6)
    pub katch_lean_mass_coef: f64,
    /// Body-fat cutoffs choosing between the two formulas
    pub cutoffs: FormulaCutoffsConfig,
}

/// Body-fat cutoffs used by formula selection
///
/// Katch-McArdle is trusted when body fat is low enough for the lean-mass
/// estimate to be reliable; Mifflin-St Jeor once fat mass dominates the error.
/// Between the two cutoffs both are averaged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaCutoffsConfig {
    /// Men at or below this body fat use Katch-McArdle (15%)
    pub male_katch_max_pct: f64,
    /// Men at or above this body fat use Mifflin-St Jeor (25%)
    pub male_mifflin_min_pct: f64,
    /// Women at or below this body fat use Katch-McArdle (22%)
    pub female_katch_max_pct: f64,
    /// Women at or above this body fat use Mifflin-St Jeor (35%)
    pub female_mifflin_min_pct: f64,
    /// Reported body fat is clamped up to this value (3%)
    pub body_fat_min_pct: f64,
    /// Reported body fat is clamped down to this value (60%)
    pub body_fat_max_pct: f64,
}

impl FormulaCutoffsConfig {
    /// `(katch_max, mifflin_min)` for a sex
    #[must_use]
    pub const fn for_sex(&self, sex: Sex) -> (f64, f64) {
        match sex {
            Sex::Male => (self.male_katch_max_pct, self.male_mifflin_min_pct),
            Sex::Female => (self.female_katch_max_pct, self.female_mifflin_min_pct),
        }
    }

    /// Clamp a reported body-fat percentage into the trusted range
    #[must_use]
    pub fn clamp(&self, body_fat_pct: f64) -> f64 {
        body_fat_pct.clamp(self.body_fat_min_pct, self.body_fat_max_pct)
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub light: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderate: f64,
    /// Very active (6-7 days/week): 1.725
    pub very: f64,
    /// Super active (hard training 2x/day): 1.9
    pub super_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Very => self.very,
            ActivityLevel::Super => self.super_active,
        }
    }
}

/// Protein target in grams per pound of lean (or total) body mass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProteinConfig {
    /// Sedentary: 0.8 g/lb
    pub sedentary_g_per_lb: f64,
    /// Light: 0.9 g/lb
    pub light_g_per_lb: f64,
    /// Moderate: 1.0 g/lb
    pub moderate_g_per_lb: f64,
    /// Very: 1.2 g/lb
    pub very_g_per_lb: f64,
    /// Super: 1.2 g/lb by default, configured independently of `very`
    pub super_active_g_per_lb: f64,
}

impl ProteinConfig {
    /// Protein multiplier for an activity level
    #[must_use]
    pub const fn g_per_lb(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary_g_per_lb,
            ActivityLevel::Light => self.light_g_per_lb,
            ActivityLevel::Moderate => self.moderate_g_per_lb,
            ActivityLevel::Very => self.very_g_per_lb,
            ActivityLevel::Super => self.super_active_g_per_lb,
        }
    }
}

/// Fat share of TDEE per dietary preference (midpoints of the documented ranges)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietaryFatConfig {
    /// Carnivore / keto: 70-80% → 75%
    pub carnivore_keto_pct: f64,
    /// Ketovore: 60-70% → 65%
    pub ketovore_pct: f64,
    /// Low carb: 30-40% → 35%
    pub low_carb_pct: f64,
    /// Balanced omnivore: 25-30% → 27.5%
    pub balanced_omnivore_pct: f64,
}

impl DietaryFatConfig {
    /// Fat percentage of TDEE for a preference
    #[must_use]
    pub const fn percent(&self, preference: DietaryPreference) -> f64 {
        match preference {
            DietaryPreference::CarnivoreKeto => self.carnivore_keto_pct,
            DietaryPreference::Ketovore => self.ketovore_pct,
            DietaryPreference::LowCarb => self.low_carb_pct,
            DietaryPreference::BalancedOmnivore => self.balanced_omnivore_pct,
        }
    }
}

/// Thermic effect of food coefficients (fraction of each macro's calories)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TefConfig {
    /// Protein: 0.25
    pub protein: f64,
    /// Carbohydrate: 0.11
    pub carb: f64,
    /// Fat: 0.03
    pub fat: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            katch_base: 370.0,
            katch_lean_mass_coef: 21.6,
            cutoffs: FormulaCutoffsConfig::default(),
        }
    }
}

impl Default for FormulaCutoffsConfig {
    fn default() -> Self {
        Self {
            male_katch_max_pct: 15.0,
            male_mifflin_min_pct: 25.0,
            female_katch_max_pct: 22.0,
            female_mifflin_min_pct: 35.0,
            body_fat_min_pct: BODY_FAT_MIN_PERCENT,
            body_fat_max_pct: BODY_FAT_MAX_PERCENT,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            very: 1.725,
            super_active: 1.9,
        }
    }
}

impl Default for ProteinConfig {
    fn default() -> Self {
        Self {
            sedentary_g_per_lb: 0.8,
            light_g_per_lb: 0.9,
            moderate_g_per_lb: 1.0,
            very_g_per_lb: 1.2,
            super_active_g_per_lb: 1.2,
        }
    }
}

impl Default for DietaryFatConfig {
    fn default() -> Self {
        Self {
            carnivore_keto_pct: 75.0,
            ketovore_pct: 65.0,
            low_carb_pct: 35.0,
            balanced_omnivore_pct: 27.5,
        }
    }
}

impl Default for TefConfig {
    fn default() -> Self {
        Self {
            protein: TEF_PROTEIN_FRACTION,
            carb: TEF_CARB_FRACTION,
            fat: TEF_FAT_FRACTION,
        }
    }
}
