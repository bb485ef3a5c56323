// ABOUTME: Coach CLI - operator tool for energy targets, intent routing, and model selection
// ABOUTME: Prints engine results as pretty JSON and errors as the ErrorResponse envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Daily energy targets
//! coach-cli energy --sex male --weight-kg 90 --height-cm 175 --age 30 --body-fat 12
//!
//! # Deterministic intent classification
//! coach-cli intent "what are the macros for a big mac"
//!
//! # Validate an LLM router payload, falling back to deterministic detection
//! coach-cli route "I had 3 eggs" --router-json '{"intent":"meal_logging",...}'
//!
//! # Model choice and cost for a request
//! coach-cli model "hey there" --intent general
//!
//! # Convert a logged portion to grams
//! coach-cli grams eggs 3
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use coach_engine::config::{MetabolicConfig, RoutingConfig};
use coach_engine::errors::{AppError, AppResult, ErrorResponse};
use coach_engine::intelligence::{calculate_tdee_and_macros, PortionCache};
use coach_engine::logging::LoggingConfig;
use coach_engine::models::{ActivityLevel, BiometricProfile, DietaryPreference, Intent, Sex};
use coach_engine::routing::{
    estimate_cost, normalize_nutrition_intent, resolve_router_decision, select_model,
    should_trigger_role, KeywordWebSearchDetector, ModelRouterContext, NoWebSearch,
    WebSearchDetector,
};
use serde::Serialize;
use serde_json::json;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "coach-cli",
    about = "Coach engine operator CLI",
    long_about = "Run the energy-target and message-routing engines from the command line and inspect their JSON output."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (written to stderr)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Calculate BMR, TDEE, macro targets and thermic effect
    Energy {
        /// Biological sex (male, female)
        #[arg(long)]
        sex: Option<Sex>,

        /// Body weight in kilograms
        #[arg(long)]
        weight_kg: Option<f64>,

        /// Height in centimeters
        #[arg(long)]
        height_cm: Option<f64>,

        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Body-fat percentage
        #[arg(long)]
        body_fat: Option<f64>,

        /// Activity level (sedentary, light, moderate, very, super)
        #[arg(long, default_value = "moderate")]
        activity: ActivityLevel,

        /// Dietary preference (`carnivore_keto`, ketovore, `low_carb`, `balanced_omnivore`)
        #[arg(long, default_value = "balanced_omnivore")]
        diet: DietaryPreference,
    },

    /// Classify a message without building a full routing decision
    Intent {
        /// Message text
        text: String,
    },

    /// Build the routing decision for a message
    Route {
        /// Message text
        text: String,

        /// LLM router payload to validate before falling back
        #[arg(long)]
        router_json: Option<String>,

        /// Web-search signal to merge into the decision
        #[arg(long, value_enum, default_value = "keywords")]
        web_search: WebSearchMode,

        /// Orchestrator intent to test against the role-trigger list
        #[arg(long)]
        role_intent: Option<String>,
    },

    /// Select a model and estimate its cost
    Model {
        /// Message text (used for the token estimate)
        text: String,

        /// Intent label; classified from the text when omitted
        #[arg(long)]
        intent: Option<String>,

        /// Intent confidence; taken from classification when omitted
        #[arg(long)]
        confidence: Option<f64>,

        /// Keep the conversational `OpenAI` voice
        #[arg(long)]
        force_openai: bool,

        /// The user asked for the strongest model
        #[arg(long)]
        expert: bool,

        /// Failed attempts so far
        #[arg(long, default_value = "0")]
        previous_failures: u32,

        /// Caller needs structured output
        #[arg(long)]
        structured: bool,
    },

    /// Convert a logged food quantity to grams
    Grams {
        /// Food name
        food: String,

        /// Quantity in `unit`, or number of portions
        quantity: f64,

        /// Unit (g, kg, oz, lb); omit to count default portions
        #[arg(long)]
        unit: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum WebSearchMode {
    /// Never route to web search
    Off,
    /// Recency keywords trigger web search
    Keywords,
}

impl WebSearchMode {
    fn detector(self) -> &'static dyn WebSearchDetector {
        match self {
            Self::Off => &NoWebSearch,
            Self::Keywords => &KeywordWebSearchDetector,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_energy(profile: &BiometricProfile) -> AppResult<()> {
    let result = calculate_tdee_and_macros(profile, MetabolicConfig::global())?;
    print_json(&result)
}

fn run_route(
    text: &str,
    router_json: Option<&str>,
    web_search: WebSearchMode,
    role_intent: Option<&str>,
) -> AppResult<()> {
    let decision = resolve_router_decision(router_json, text, web_search.detector());
    let mut output = serde_json::to_value(&decision)?;
    if let (Some(intent), Some(map)) = (role_intent, output.as_object_mut()) {
        map.insert("role_intent".into(), json!(intent));
        map.insert("trigger_role".into(), json!(should_trigger_role(intent)));
    }
    print_json(&output)
}

fn run_model(text: &str, context: ModelRouterContext) -> AppResult<()> {
    let config = RoutingConfig::global();
    let selection = select_model(&context, config);
    let cost = estimate_cost(&selection, config);
    print_json(&json!({
        "selection": selection,
        "estimated_cost_usd": cost,
        "message_chars": text.chars().count(),
    }))
}

fn model_context(
    text: &str,
    intent: Option<String>,
    confidence: Option<f64>,
) -> AppResult<ModelRouterContext> {
    if let Some(confidence) = confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(
                AppError::out_of_range("confidence must be within [0, 1]").with_field("confidence")
            );
        }
    }

    // Core intent labels are canonicalised; orchestrator labels pass through
    let intent = intent.map(|label| {
        label
            .parse::<Intent>()
            .map_or(label, |parsed| parsed.as_str().to_owned())
    });
    let classified = normalize_nutrition_intent(text);
    Ok(ModelRouterContext {
        intent: intent.or_else(|| Some(classified.final_intent.as_str().to_owned())),
        intent_confidence: confidence.unwrap_or(classified.confidence),
        message_length: text.chars().count(),
        ..ModelRouterContext::default()
    })
}

fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Command::Energy {
            sex,
            weight_kg,
            height_cm,
            age,
            body_fat,
            activity,
            diet,
        } => {
            let profile = BiometricProfile {
                sex,
                weight_kg,
                height_cm,
                age,
                body_fat_pct: body_fat,
                activity_level: Some(activity),
                dietary_preference: Some(diet),
            };
            run_energy(&profile)
        }
        Command::Intent { text } => print_json(&normalize_nutrition_intent(&text)),
        Command::Route {
            text,
            router_json,
            web_search,
            role_intent,
        } => run_route(
            &text,
            router_json.as_deref(),
            web_search,
            role_intent.as_deref(),
        ),
        Command::Model {
            text,
            intent,
            confidence,
            force_openai,
            expert,
            previous_failures,
            structured,
        } => {
            let context = ModelRouterContext {
                force_openai,
                user_requested_expert: expert,
                previous_failures,
                requires_structured_output: structured,
                ..model_context(&text, intent, confidence)?
            };
            run_model(&text, context)
        }
        Command::Grams {
            food,
            quantity,
            unit,
        } => {
            let cache = PortionCache::default();
            let grams = cache.to_grams(&food, quantity, unit.as_deref())?;
            print_json(&json!({ "food": food, "quantity": quantity, "unit": unit, "grams": grams }))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = LoggingConfig::from_env()
        .with_level(level)
        .with_stderr()
        .init()
    {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!("Command failed: {error}");
            let response = ErrorResponse::from(error);
            match serde_json::to_string_pretty(&response) {
                Ok(body) => eprintln!("{body}"),
                Err(_) => eprintln!("{}", response.error.message),
            }
            ExitCode::FAILURE
        }
    }
}
