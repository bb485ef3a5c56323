// ABOUTME: Chat routing vocabulary shared by intent detection and model selection
// ABOUTME: Intent, downstream pipeline, and LLM provider enums with serde wire names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classified purpose of a user utterance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Ask-me-anything: a question answered conversationally
    Ama,
    /// The user wants a meal recorded
    MealLogging,
    /// Small talk or anything unmatched
    General,
}

impl Intent {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ama => "ama",
            Self::MealLogging => "meal_logging",
            Self::General => "general",
        }
    }

    /// Pipeline that handles this intent
    #[must_use]
    pub const fn route_target(&self) -> RouteTarget {
        match self {
            Self::MealLogging => RouteTarget::Tmwya,
            Self::Ama | Self::General => RouteTarget::Ama,
        }
    }
}

impl FromStr for Intent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ama" => Ok(Self::Ama),
            "meal_logging" => Ok(Self::MealLogging),
            "general" => Ok(Self::General),
            other => {
                Err(AppError::invalid_input(format!("Unknown intent: {other}")).with_field("intent"))
            }
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Downstream pipeline receiving a routed message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    /// "Tell me what you ate" meal-logging pipeline
    Tmwya,
    /// Conversational question-answering pipeline
    Ama,
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tmwya => f.write_str("tmwya"),
            Self::Ama => f.write_str("ama"),
        }
    }
}

/// LLM vendor serving a request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// `OpenAI` chat completions
    #[serde(rename = "openai")]
    OpenAi,
    /// Google Gemini
    Gemini,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => f.write_str("openai"),
            Self::Gemini => f.write_str("gemini"),
        }
    }
}
