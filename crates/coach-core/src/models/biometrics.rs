// ABOUTME: Biometric profile model consumed by the metabolic calculation engine
// ABOUTME: Sex, activity level, and dietary preference enums with lenient string parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex used by the BMR equations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (+5 Mifflin constant)
    Male,
    /// Female (-161 Mifflin constant)
    Female,
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!("Unknown sex: {other}")).with_field("sex")),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Very,
    /// Hard training twice a day or a physical job
    Super,
}

impl ActivityLevel {
    /// All levels, least to most active
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Very,
        Self::Super,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Very => "very",
            Self::Super => "super",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" | "lightly_active" => Ok(Self::Light),
            "moderate" | "moderately_active" => Ok(Self::Moderate),
            "very" | "very_active" => Ok(Self::Very),
            "super" | "extra_active" => Ok(Self::Super),
            other => Err(AppError::invalid_input(format!("Unknown activity level: {other}"))
                .with_field("activity_level")),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dietary preference driving the fat share of TDEE
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    /// Carnivore / strict keto
    CarnivoreKeto,
    /// Keto-leaning carnivore with some plants
    Ketovore,
    /// Reduced carbohydrate
    LowCarb,
    /// Mixed omnivorous diet
    #[default]
    BalancedOmnivore,
}

impl DietaryPreference {
    /// Canonical snake_case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CarnivoreKeto => "carnivore_keto",
            Self::Ketovore => "ketovore",
            Self::LowCarb => "low_carb",
            Self::BalancedOmnivore => "balanced_omnivore",
        }
    }
}

impl FromStr for DietaryPreference {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "carnivore_keto" | "carnivore" | "keto" => Ok(Self::CarnivoreKeto),
            "ketovore" => Ok(Self::Ketovore),
            "low_carb" => Ok(Self::LowCarb),
            "balanced_omnivore" | "balanced" | "omnivore" => Ok(Self::BalancedOmnivore),
            other => Err(
                AppError::invalid_input(format!("Unknown dietary preference: {other}"))
                    .with_field("dietary_preference"),
            ),
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User attributes collected by onboarding
///
/// Mandatory attributes are still `Option` so a record assembled from an
/// incomplete onboarding flow can be rejected with a precise usage error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiometricProfile {
    /// Biological sex
    #[serde(default, alias = "gender")]
    pub sex: Option<Sex>,
    /// Body weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Age in whole years
    #[serde(default)]
    pub age: Option<u32>,
    /// Body-fat percentage (clamped to 3-60 before use)
    #[serde(default)]
    pub body_fat_pct: Option<f64>,
    /// Activity level
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    /// Dietary preference (defaults to balanced omnivore)
    #[serde(default)]
    pub dietary_preference: Option<DietaryPreference>,
}

impl BiometricProfile {
    /// Profile with every mandatory attribute present and moderate activity
    #[must_use]
    pub const fn new(sex: Sex, weight_kg: f64, height_cm: f64, age: u32) -> Self {
        Self {
            sex: Some(sex),
            weight_kg: Some(weight_kg),
            height_cm: Some(height_cm),
            age: Some(age),
            body_fat_pct: None,
            activity_level: Some(ActivityLevel::Moderate),
            dietary_preference: None,
        }
    }

    /// Set body-fat percentage
    #[must_use]
    pub fn with_body_fat(mut self, body_fat_pct: f64) -> Self {
        self.body_fat_pct = Some(body_fat_pct);
        self
    }

    /// Set activity level
    #[must_use]
    pub fn with_activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    /// Set dietary preference
    #[must_use]
    pub fn with_dietary_preference(mut self, preference: DietaryPreference) -> Self {
        self.dietary_preference = Some(preference);
        self
    }
}
