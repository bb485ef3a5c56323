// ABOUTME: Metabolic engine configuration container with validation and env loading
// ABOUTME: Orchestrates domain configs and exposes a lazily-initialised global instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metabolic Engine Configuration Module
//!
//! Defaults reproduce the published formulas. Deployments may override
//! individual values through `COACH_*` environment variables; the result is
//! validated before use and an invalid override falls back to defaults in
//! [`MetabolicConfig::global`].

pub mod error;
pub mod metabolic;

pub use error::ConfigError;
pub use metabolic::{
    ActivityFactorsConfig, BmrConfig, DietaryFatConfig, FormulaCutoffsConfig, ProteinConfig,
    TefConfig,
};

use coach_core::models::ActivityLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static METABOLIC_CONFIG: OnceLock<MetabolicConfig> = OnceLock::new();

/// Main metabolic configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetabolicConfig {
    /// BMR formula coefficients and selection cutoffs
    pub bmr: BmrConfig,
    /// TDEE multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// Protein targets per activity level
    pub protein: ProteinConfig,
    /// Fat share of TDEE per dietary preference
    pub dietary_fat: DietaryFatConfig,
    /// Thermic effect of food coefficients
    pub tef: TefConfig,
}

impl MetabolicConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        METABOLIC_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load metabolic config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when cutoffs overlap, factors are out of order, or
    /// percentages and coefficients leave their plausible ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_bmr()?;
        self.validate_activity_factors()?;
        self.validate_macros()
    }

    fn validate_bmr(&self) -> Result<(), ConfigError> {
        let bmr = &self.bmr;
        if bmr.msj_weight_coef <= 0.0 || bmr.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }
        if bmr.katch_lean_mass_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Katch-McArdle lean mass coefficient must be positive",
            ));
        }

        let cutoffs = &bmr.cutoffs;
        if !(0.0..100.0).contains(&cutoffs.body_fat_min_pct)
            || cutoffs.body_fat_max_pct > 100.0
            || cutoffs.body_fat_min_pct >= cutoffs.body_fat_max_pct
        {
            return Err(ConfigError::InvalidRange(
                "body fat clamp must satisfy 0 <= min < max <= 100",
            ));
        }
        if cutoffs.male_katch_max_pct >= cutoffs.male_mifflin_min_pct
            || cutoffs.female_katch_max_pct >= cutoffs.female_mifflin_min_pct
        {
            return Err(ConfigError::InvalidRange(
                "Katch cutoff must be below the Mifflin cutoff",
            ));
        }
        Ok(())
    }

    fn validate_activity_factors(&self) -> Result<(), ConfigError> {
        let factors = ActivityLevel::ALL.map(|level| self.activity_factors.factor(level));
        if factors[0] < 1.0 || factors[4] > 2.5 {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }
        Ok(())
    }

    fn validate_macros(&self) -> Result<(), ConfigError> {
        if ActivityLevel::ALL
            .iter()
            .map(|level| self.protein.g_per_lb(*level))
            .any(|g| g <= 0.0 || g > 2.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Protein targets must be between 0 and 2.0 g/lb",
            ));
        }

        let fat = &self.dietary_fat;
        if [
            fat.carnivore_keto_pct,
            fat.ketovore_pct,
            fat.low_carb_pct,
            fat.balanced_omnivore_pct,
        ]
        .iter()
        .any(|pct| *pct <= 0.0 || *pct >= 100.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Fat percentages must be between 0 and 100",
            ));
        }

        let tef = &self.tef;
        if [tef.protein, tef.carb, tef.fat]
            .iter()
            .any(|c| !(0.0..1.0).contains(c))
        {
            return Err(ConfigError::ValueOutOfRange(
                "TEF coefficients must be within [0, 1)",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Activity factors
        Self::apply_env_var(
            "COACH_ACTIVITY_FACTOR_SEDENTARY",
            &mut self.activity_factors.sedentary,
        )?;
        Self::apply_env_var("COACH_ACTIVITY_FACTOR_LIGHT", &mut self.activity_factors.light)?;
        Self::apply_env_var(
            "COACH_ACTIVITY_FACTOR_MODERATE",
            &mut self.activity_factors.moderate,
        )?;
        Self::apply_env_var("COACH_ACTIVITY_FACTOR_VERY", &mut self.activity_factors.very)?;
        Self::apply_env_var(
            "COACH_ACTIVITY_FACTOR_SUPER",
            &mut self.activity_factors.super_active,
        )?;

        // Formula cutoffs
        Self::apply_env_var(
            "COACH_MALE_KATCH_MAX_PCT",
            &mut self.bmr.cutoffs.male_katch_max_pct,
        )?;
        Self::apply_env_var(
            "COACH_MALE_MIFFLIN_MIN_PCT",
            &mut self.bmr.cutoffs.male_mifflin_min_pct,
        )?;
        Self::apply_env_var(
            "COACH_FEMALE_KATCH_MAX_PCT",
            &mut self.bmr.cutoffs.female_katch_max_pct,
        )?;
        Self::apply_env_var(
            "COACH_FEMALE_MIFFLIN_MIN_PCT",
            &mut self.bmr.cutoffs.female_mifflin_min_pct,
        )?;

        // Macro targets
        Self::apply_env_var(
            "COACH_PROTEIN_SUPER_G_PER_LB",
            &mut self.protein.super_active_g_per_lb,
        )?;
        Self::apply_env_var(
            "COACH_FAT_PCT_BALANCED_OMNIVORE",
            &mut self.dietary_fat.balanced_omnivore_pct,
        )?;

        Ok(self)
    }
}
