// ABOUTME: Core types and constants for the coach metabolic and routing engines
// ABOUTME: Foundation crate with error handling, shared models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Core
//!
//! Foundation crate providing shared types and constants for the coach
//! engines. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Energy, unit and routing constants organized by domain
//! - **models**: Biometric input records and chat routing vocabulary

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (biometric profile, intents, providers)
pub mod models;
