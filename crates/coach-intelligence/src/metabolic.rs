// ABOUTME: Metabolic calculation engine using peer-reviewed energy expenditure formulas
// ABOUTME: BMR formula selection, TDEE scaling, macro partitioning, and thermic effect of food
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metabolic Calculation Engine
//!
//! Derives daily energy targets from a [`BiometricProfile`]. Every function is
//! a pure projection: identical inputs and configuration always produce
//! identical outputs. Intermediate values stay in `f64`; rounding to whole
//! kcal/grams happens once, when the result record is built.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology:
//!   Nutrition, Energy, and Human Performance (lean-mass BMR equation).
//!
//! - Westerterp, K.R. (2004). Diet induced thermogenesis.
//!   *Nutrition & Metabolism*, 1, 5. <https://doi.org/10.1186/1743-7075-1-5>

use crate::config::{BmrConfig, FormulaCutoffsConfig, MetabolicConfig};
use coach_core::constants::energy::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use coach_core::constants::units::LB_PER_KG;
use coach_core::errors::{AppError, AppResult};
use coach_core::models::{ActivityLevel, BiometricProfile, DietaryPreference, Sex};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// BMR equation used for a calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Mifflin-St Jeor (population average from weight, height, age, sex)
    Mifflin,
    /// Katch-McArdle (lean body mass)
    Katch,
    /// Mean of both equations
    Average,
}

impl fmt::Display for BmrFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mifflin => f.write_str("mifflin"),
            Self::Katch => f.write_str("katch"),
            Self::Average => f.write_str("average"),
        }
    }
}

/// Inputs for a BMR calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrParams {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: u32,
    /// Biological sex
    pub sex: Sex,
    /// Reported body-fat percentage, if known
    pub body_fat_pct: Option<f64>,
}

/// BMR values produced by [`get_bmr`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmrResult {
    /// Mifflin-St Jeor estimate (kcal/day)
    pub mifflin: i32,
    /// Katch-McArdle estimate; `None` when body fat was not supplied
    pub katch: Option<i32>,
    /// Estimate used downstream (kcal/day)
    pub chosen_bmr: i32,
    /// Formula that produced `chosen_bmr`
    pub formula_used: BmrFormula,
}

/// Complete daily energy calculation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyResult {
    /// Mifflin-St Jeor BMR (kcal/day)
    pub mifflin_bmr: i32,
    /// Katch-McArdle BMR (kcal/day), present only when body fat was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub katch_bmr: Option<i32>,
    /// BMR used for TDEE (kcal/day)
    pub chosen_bmr: i32,
    /// Formula that produced `chosen_bmr`
    pub formula_used: BmrFormula,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee: i32,
    /// Daily protein target (grams)
    pub protein_g: i32,
    /// Calories from protein
    pub protein_cal: i32,
    /// Daily fat target (grams)
    pub fat_g: i32,
    /// Calories from fat
    pub fat_cal: i32,
    /// Daily carbohydrate target (grams), never negative
    pub carb_g: i32,
    /// Calories from carbohydrate, never negative
    pub carb_cal: i32,
    /// Thermic effect of food (kcal/day)
    pub tef_cal: i32,
    /// TDEE net of TEF (kcal/day)
    pub net_cal: i32,
    /// Activity level used
    pub activity_level: ActivityLevel,
    /// Dietary preference used
    pub dietary_preference: DietaryPreference,
}

/// Drop unusable body-fat readings and clamp the rest into the trusted range
fn usable_body_fat(body_fat_pct: Option<f64>, cutoffs: &FormulaCutoffsConfig) -> Option<f64> {
    let raw = body_fat_pct?;
    if !raw.is_finite() {
        warn!("Ignoring non-finite body fat reading");
        return None;
    }
    let clamped = cutoffs.clamp(raw);
    if (clamped - raw).abs() > f64::EPSILON {
        debug!(raw, clamped, "Body fat clamped into trusted range");
    }
    Some(clamped)
}

/// Select the BMR equation for a sex and (optional) body-fat percentage
///
/// Without body fat the answer is always Mifflin-St Jeor. Otherwise the reading
/// is clamped and compared against the sex-specific cutoffs, both inclusive:
/// at or below the Katch cutoff → Katch-McArdle, at or above the Mifflin
/// cutoff → Mifflin-St Jeor, anything between → average of both.
#[must_use]
pub fn pick_formula(
    sex: Sex,
    body_fat_pct: Option<f64>,
    cutoffs: &FormulaCutoffsConfig,
) -> BmrFormula {
    let Some(body_fat) = usable_body_fat(body_fat_pct, cutoffs) else {
        return BmrFormula::Mifflin;
    };

    let (katch_max, mifflin_min) = cutoffs.for_sex(sex);
    if body_fat <= katch_max {
        BmrFormula::Katch
    } else if body_fat >= mifflin_min {
        BmrFormula::Mifflin
    } else {
        BmrFormula::Average
    }
}

/// Mifflin-St Jeor: 10·W + 6.25·H − 5·A + (5 | −161)
fn mifflin_st_jeor(params: &BmrParams, config: &BmrConfig) -> f64 {
    let sex_constant = match params.sex {
        Sex::Male => config.msj_male_constant,
        Sex::Female => config.msj_female_constant,
    };
    config.msj_age_coef.mul_add(
        f64::from(params.age),
        config
            .msj_weight_coef
            .mul_add(params.weight_kg, config.msj_height_coef * params.height_cm),
    ) + sex_constant
}

/// Katch-McArdle: 370 + 21.6·lean mass (kg)
fn katch_mcardle(weight_kg: f64, body_fat_pct: f64, config: &BmrConfig) -> f64 {
    let lean_mass_kg = weight_kg * (1.0 - body_fat_pct / 100.0);
    config
        .katch_lean_mass_coef
        .mul_add(lean_mass_kg, config.katch_base)
}

/// Unrounded BMR figures shared by [`get_bmr`] and the TDEE pipeline
struct RawBmr {
    mifflin: f64,
    katch: Option<f64>,
    chosen: f64,
    formula_used: BmrFormula,
}

fn compute_bmr(params: &BmrParams, config: &BmrConfig) -> RawBmr {
    let body_fat = usable_body_fat(params.body_fat_pct, &config.cutoffs);
    let mifflin = mifflin_st_jeor(params, config);
    let katch = body_fat.map(|bf| katch_mcardle(params.weight_kg, bf, config));

    let picked = pick_formula(params.sex, body_fat, &config.cutoffs);
    let (chosen, formula_used) = match (picked, katch) {
        (BmrFormula::Katch, Some(k)) => (k, BmrFormula::Katch),
        (BmrFormula::Average, Some(k)) => (0.5 * (mifflin + k), BmrFormula::Average),
        (BmrFormula::Mifflin, _) => (mifflin, BmrFormula::Mifflin),
        (BmrFormula::Katch | BmrFormula::Average, None) => {
            warn!(formula = %picked, "Lean-mass formula picked without body fat, using Mifflin");
            (mifflin, BmrFormula::Mifflin)
        }
    };

    debug!(
        sex = %params.sex,
        body_fat = ?body_fat,
        formula = %formula_used,
        "Selected BMR formula"
    );

    RawBmr {
        mifflin,
        katch,
        chosen,
        formula_used,
    }
}

/// Compute Mifflin-St Jeor, Katch-McArdle (when body fat is known) and the chosen BMR
///
/// Never fails: a missing or unusable body-fat reading simply means Katch is
/// not computed (`katch` is `None`, never zero) and Mifflin is chosen.
#[must_use]
pub fn get_bmr(params: &BmrParams, config: &BmrConfig) -> BmrResult {
    let raw = compute_bmr(params, config);
    BmrResult {
        mifflin: round_whole(raw.mifflin),
        katch: raw.katch.map(round_whole),
        chosen_bmr: round_whole(raw.chosen),
        formula_used: raw.formula_used,
    }
}

fn round_whole(value: f64) -> i32 {
    value.round() as i32
}

/// Mandatory, validated profile attributes
struct ValidatedProfile {
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    activity_level: ActivityLevel,
}

fn require_positive(value: Option<f64>, field: &str) -> AppResult<f64> {
    let value = value.ok_or_else(|| AppError::missing_field(field))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(
            AppError::invalid_input(format!("{field} must be a positive number")).with_field(field),
        );
    }
    Ok(value)
}

fn validate_profile(profile: &BiometricProfile) -> AppResult<ValidatedProfile> {
    let sex = profile.sex.ok_or_else(|| AppError::missing_field("sex"))?;
    let age = profile.age.ok_or_else(|| AppError::missing_field("age"))?;
    if age == 0 {
        return Err(AppError::invalid_input("age must be a positive number").with_field("age"));
    }
    let height_cm = require_positive(profile.height_cm, "height_cm")?;
    let weight_kg = require_positive(profile.weight_kg, "weight_kg")?;
    let activity_level = profile
        .activity_level
        .ok_or_else(|| AppError::missing_field("activity_level"))?;

    Ok(ValidatedProfile {
        sex,
        weight_kg,
        height_cm,
        age,
        activity_level,
    })
}

/// Calculate BMR, TDEE, macro targets and thermic effect for a profile
///
/// - TDEE = chosen BMR × activity multiplier
/// - Protein = g/lb multiplier × lean mass in lb (total weight when body fat is unknown)
/// - Fat = dietary-preference share of TDEE
/// - Carbohydrate = whatever remains, floored at zero
/// - TEF = 0.25·protein kcal + 0.11·carb kcal + 0.03·fat kcal; net = TDEE − TEF
///
/// # Errors
///
/// Returns a `MissingRequiredField` error when sex, age, height, weight or
/// activity level is absent, `InvalidInput` when a present value is not a
/// positive number, and `ValueOutOfRange` when the resulting BMR is not positive.
pub fn calculate_tdee_and_macros(
    profile: &BiometricProfile,
    config: &MetabolicConfig,
) -> AppResult<EnergyResult> {
    let valid = validate_profile(profile)?;
    let dietary_preference = profile.dietary_preference.unwrap_or_default();

    let body_fat = usable_body_fat(profile.body_fat_pct, &config.bmr.cutoffs);
    let params = BmrParams {
        weight_kg: valid.weight_kg,
        height_cm: valid.height_cm,
        age: valid.age,
        sex: valid.sex,
        body_fat_pct: body_fat,
    };
    let bmr = compute_bmr(&params, &config.bmr);
    if !bmr.chosen.is_finite() || bmr.chosen <= 0.0 {
        return Err(AppError::out_of_range(format!(
            "Computed BMR {:.1} kcal/day is not positive; check weight, height and age",
            bmr.chosen
        )));
    }

    let tdee = bmr.chosen * config.activity_factors.factor(valid.activity_level);

    let weight_lb = valid.weight_kg * LB_PER_KG;
    let protein_basis_lb = body_fat.map_or(weight_lb, |bf| weight_lb * (1.0 - bf / 100.0));
    let protein_g = protein_basis_lb * config.protein.g_per_lb(valid.activity_level);
    let protein_cal = protein_g * KCAL_PER_G_PROTEIN;

    let fat_cal = tdee * config.dietary_fat.percent(dietary_preference) / 100.0;
    let fat_g = fat_cal / KCAL_PER_G_FAT;

    let carb_cal = (tdee - protein_cal - fat_cal).max(0.0);
    let carb_g = carb_cal / KCAL_PER_G_CARB;

    let tef_cal = config.tef.fat.mul_add(
        fat_cal,
        config
            .tef
            .protein
            .mul_add(protein_cal, config.tef.carb * carb_cal),
    );
    let net_cal = tdee - tef_cal;

    debug!(
        tdee,
        protein_cal,
        fat_cal,
        carb_cal,
        tef_cal,
        activity = %valid.activity_level,
        diet = %dietary_preference,
        "Calculated energy targets"
    );

    Ok(EnergyResult {
        mifflin_bmr: round_whole(bmr.mifflin),
        katch_bmr: bmr.katch.map(round_whole),
        chosen_bmr: round_whole(bmr.chosen),
        formula_used: bmr.formula_used,
        tdee: round_whole(tdee),
        protein_g: round_whole(protein_g),
        protein_cal: round_whole(protein_cal),
        fat_g: round_whole(fat_g),
        fat_cal: round_whole(fat_cal),
        carb_g: round_whole(carb_g),
        carb_cal: round_whole(carb_cal),
        tef_cal: round_whole(tef_cal),
        net_cal: round_whole(net_cal),
        activity_level: valid.activity_level,
        dietary_preference,
    })
}
