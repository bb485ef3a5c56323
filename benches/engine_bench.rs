// ABOUTME: Criterion benchmarks for the metabolic and routing engines
// ABOUTME: Measures energy-target calculation, intent classification, and model selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the coach engines.
//!
//! Both engines sit on the request path of every onboarding step and chat
//! turn, so their per-call cost should stay in the microsecond range.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use coach_engine::config::{MetabolicConfig, RoutingConfig};
use coach_engine::intelligence::{calculate_tdee_and_macros, PortionCache};
use coach_engine::models::{ActivityLevel, BiometricProfile, DietaryPreference, Sex};
use coach_engine::routing::{
    detect_intent, estimate_cost, normalize_nutrition_intent, select_model,
    KeywordWebSearchDetector, ModelRouterContext,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Representative chat messages across all three intent tiers
const MESSAGES: [&str; 6] = [
    "I ate 2 eggs and a cup of oatmeal",
    "had 6 oz salmon with 1 cup rice for lunch",
    "what are the macros for a big mac",
    "how many calories in a ribeye steak",
    "why is ribeye so tender",
    "what's the latest research on creatine timing",
];

fn bench_energy_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("energy_targets");
    let config = MetabolicConfig::default();

    let profiles = [
        (
            "mifflin_no_body_fat",
            BiometricProfile::new(Sex::Female, 60.0, 165.0, 25)
                .with_activity_level(ActivityLevel::Sedentary),
        ),
        (
            "katch_lean",
            BiometricProfile::new(Sex::Male, 90.0, 175.0, 30).with_body_fat(12.0),
        ),
        (
            "average_keto",
            BiometricProfile::new(Sex::Female, 70.0, 170.0, 40)
                .with_body_fat(28.0)
                .with_dietary_preference(DietaryPreference::CarnivoreKeto),
        ),
    ];

    for (name, profile) in &profiles {
        group.bench_with_input(BenchmarkId::new("calculate", name), profile, |b, profile| {
            b.iter(|| calculate_tdee_and_macros(black_box(profile), &config));
        });
    }

    group.finish();
}

fn bench_intent_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("intent");
    group.throughput(Throughput::Elements(MESSAGES.len() as u64));

    group.bench_function("normalize_batch", |b| {
        b.iter(|| {
            MESSAGES
                .iter()
                .map(|text| normalize_nutrition_intent(black_box(text)))
                .count()
        });
    });

    group.bench_function("detect_with_web_signal", |b| {
        b.iter(|| {
            MESSAGES
                .iter()
                .filter(|text| detect_intent(black_box(text), &KeywordWebSearchDetector).use_gemini)
                .count()
        });
    });

    group.finish();
}

fn bench_model_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_selection");
    let config = RoutingConfig::default();

    let contexts = MESSAGES.map(|text| {
        let decision = detect_intent(text, &KeywordWebSearchDetector);
        ModelRouterContext::for_message(decision.intent, decision.confidence, text)
    });

    group.throughput(Throughput::Elements(contexts.len() as u64));
    group.bench_function("select_and_price", |b| {
        b.iter(|| {
            contexts
                .iter()
                .map(|context| estimate_cost(&select_model(black_box(context), &config), &config))
                .sum::<f64>()
        });
    });

    group.finish();
}

fn bench_portion_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("portions");
    let cache = PortionCache::default();

    group.bench_function("warm_cache_lookup", |b| {
        b.iter(|| cache.to_grams(black_box("eggs"), black_box(3.0), None));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_energy_targets,
    bench_intent_classification,
    bench_model_selection,
    bench_portion_conversion,
);
criterion_main!(benches);
