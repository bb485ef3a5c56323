// ABOUTME: Tests for the portion-default cache refresh policies and gram conversion
// ABOUTME: Uses counting and failing sources to observe loads, invalidation, and stale serving
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use coach_engine::errors::{AppError, AppResult, ErrorCode};
use coach_engine::intelligence::{
    PortionCache, PortionSource, RefreshPolicy, StaticPortionSource,
};
use common::{assert_close, init_test_logging};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Source that counts loads and can be switched into failure
#[derive(Debug, Default)]
struct CountingSource {
    loads: AtomicUsize,
    failing: AtomicBool,
}

impl CountingSource {
    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl PortionSource for CountingSource {
    fn load_defaults(&self) -> AppResult<HashMap<String, f64>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::internal("portion store unavailable"));
        }
        Ok(HashMap::from([("egg".to_owned(), 50.0), ("banana".to_owned(), 118.0)]))
    }
}

#[test]
fn test_load_once_reads_source_a_single_time() {
    init_test_logging();
    let source = Arc::new(CountingSource::default());
    let cache = PortionCache::new(Arc::clone(&source), RefreshPolicy::LoadOnce);

    assert!(!cache.is_loaded());
    for _ in 0..5 {
        assert_close(cache.grams_per_portion("egg").unwrap(), 50.0, f64::EPSILON);
    }

    assert_eq!(source.loads(), 1);
    assert!(cache.is_loaded());
}

#[test]
fn test_zero_ttl_reloads_every_lookup() {
    let source = Arc::new(CountingSource::default());
    let cache = PortionCache::new(Arc::clone(&source), RefreshPolicy::Ttl(Duration::ZERO));

    cache.grams_per_portion("egg").unwrap();
    cache.grams_per_portion("egg").unwrap();
    cache.grams_per_portion("banana").unwrap();

    assert_eq!(source.loads(), 3);
}

#[test]
fn test_long_ttl_serves_cached_snapshot() {
    let source = Arc::new(CountingSource::default());
    let cache = PortionCache::new(Arc::clone(&source), RefreshPolicy::default());

    cache.grams_per_portion("egg").unwrap();
    cache.grams_per_portion("banana").unwrap();

    assert_eq!(source.loads(), 1);
}

#[test]
fn test_invalidate_forces_reload() {
    let source = Arc::new(CountingSource::default());
    let cache = PortionCache::new(Arc::clone(&source), RefreshPolicy::LoadOnce);

    cache.grams_per_portion("egg").unwrap();
    cache.invalidate().unwrap();
    assert!(!cache.is_loaded());

    cache.grams_per_portion("egg").unwrap();
    assert_eq!(source.loads(), 2);
}

#[test]
fn test_failed_refresh_serves_previous_snapshot() {
    let source = Arc::new(CountingSource::default());
    let cache = PortionCache::new(Arc::clone(&source), RefreshPolicy::Ttl(Duration::ZERO));

    cache.grams_per_portion("banana").unwrap();
    source.fail(true);

    assert_close(cache.grams_per_portion("banana").unwrap(), 118.0, f64::EPSILON);
    assert_eq!(source.loads(), 2);
}

#[test]
fn test_failed_first_load_is_an_error() {
    let source = Arc::new(CountingSource::default());
    source.fail(true);
    let cache = PortionCache::new(Arc::clone(&source), RefreshPolicy::LoadOnce);

    let error = cache.to_grams("egg", 2.0, None).unwrap_err();
    assert_eq!(error.code, ErrorCode::InternalError);
    assert!(!cache.is_loaded());
}

#[test]
fn test_concurrent_readers_share_one_load() {
    let source = Arc::new(CountingSource::default());
    let cache = Arc::new(PortionCache::new(
        Arc::clone(&source),
        RefreshPolicy::LoadOnce,
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.to_grams("egg", 2.0, None).unwrap())
        })
        .collect();

    for handle in handles {
        assert_close(handle.join().unwrap(), 100.0, f64::EPSILON);
    }
    assert_eq!(source.loads(), 1);
}

#[test]
fn test_mass_units_and_portions() {
    let cache = PortionCache::default();

    assert_close(cache.to_grams("rice", 1.5, Some("kg")).unwrap(), 1500.0, 1e-9);
    assert_close(cache.to_grams("steak", 1.0, Some("LB")).unwrap(), 453.592, 1e-9);
    assert_close(cache.to_grams("salmon", 100.0, Some("grams")).unwrap(), 100.0, 1e-9);
    assert_close(cache.to_grams("banana", 2.0, Some("pieces")).unwrap(), 236.0, 1e-9);
    assert_close(cache.to_grams("mystery stew", 1.0, None).unwrap(), 100.0, 1e-9);
}

#[test]
fn test_custom_static_source_normalizes_keys() {
    let source = StaticPortionSource::with_defaults(HashMap::from([(
        "  Protein Bar ".to_owned(),
        60.0,
    )]));
    let cache = PortionCache::new(source, RefreshPolicy::LoadOnce);

    assert_close(cache.grams_per_portion("protein bar").unwrap(), 60.0, f64::EPSILON);
    assert_eq!(cache.policy(), RefreshPolicy::LoadOnce);
}
