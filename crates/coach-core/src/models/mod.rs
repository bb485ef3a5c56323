// ABOUTME: Core data models shared by the metabolic and routing engines
// ABOUTME: Re-exports biometric profile types and chat routing vocabulary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Biometric input record and its enumerations
pub mod biometrics;
/// Chat intents, pipelines, and LLM providers
pub mod chat;

pub use biometrics::{ActivityLevel, BiometricProfile, DietaryPreference, Sex};
pub use chat::{Intent, LlmProvider, RouteTarget};
