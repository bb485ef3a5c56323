// ABOUTME: Read-through cache of default portion sizes with explicit refresh policy
// ABOUTME: Converts logged food quantities to grams using mass units or cached portion defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Portion Defaults Cache
//!
//! Meal logging turns "2 eggs" or "1 cup rice" into grams. Mass units convert
//! directly; everything else is multiplied by the food's default portion size.
//! Defaults come from a [`PortionSource`] and are held in a [`PortionCache`]
//! that callers construct and share explicitly.
//!
//! # Thread Safety
//!
//! The cache uses `RwLock` internally and is safe to share across threads via `Arc`.
//! Readers clone an `Arc` to the current snapshot, so the lock is never held
//! while a caller works with the data.

use coach_core::constants::portions::{DEFAULT_PORTION_TTL_SECS, FALLBACK_PORTION_GRAMS};
use coach_core::constants::units::{GRAMS_PER_KG, GRAMS_PER_LB, GRAMS_PER_OZ};
use coach_core::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Supplier of default portion sizes, keyed by lowercase food name
pub trait PortionSource: Send + Sync {
    /// Load the full table of grams-per-portion defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn load_defaults(&self) -> AppResult<HashMap<String, f64>>;
}

/// Built-in portion defaults for common whole foods
#[derive(Debug, Clone)]
pub struct StaticPortionSource {
    defaults: HashMap<String, f64>,
}

impl StaticPortionSource {
    /// Source with the built-in table
    #[must_use]
    pub fn new() -> Self {
        let defaults = [
            ("egg", 50.0),
            ("eggs", 50.0),
            ("banana", 118.0),
            ("apple", 182.0),
            ("slice of bread", 28.0),
            ("bread", 28.0),
            ("chicken breast", 174.0),
            ("steak", 221.0),
            ("cup of rice", 158.0),
            ("rice", 158.0),
            ("avocado", 150.0),
            ("bacon", 8.0),
            ("potato", 173.0),
            ("salmon", 154.0),
            ("yogurt", 170.0),
        ]
        .into_iter()
        .map(|(name, grams)| (name.to_owned(), grams))
        .collect();
        Self { defaults }
    }

    /// Source with a caller-provided table
    #[must_use]
    pub fn with_defaults(defaults: HashMap<String, f64>) -> Self {
        let defaults = defaults
            .into_iter()
            .map(|(name, grams)| (normalize_food_key(&name), grams))
            .collect();
        Self { defaults }
    }
}

impl Default for StaticPortionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PortionSource for StaticPortionSource {
    fn load_defaults(&self) -> AppResult<HashMap<String, f64>> {
        Ok(self.defaults.clone())
    }
}

impl<S: PortionSource + ?Sized> PortionSource for Arc<S> {
    fn load_defaults(&self) -> AppResult<HashMap<String, f64>> {
        (**self).load_defaults()
    }
}

/// When a loaded snapshot must be reloaded from its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Load on first use and keep until [`PortionCache::invalidate`]
    LoadOnce,
    /// Reload once the snapshot is older than the duration
    Ttl(Duration),
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::Ttl(Duration::from_secs(DEFAULT_PORTION_TTL_SECS))
    }
}

#[derive(Debug)]
struct Snapshot {
    defaults: Arc<HashMap<String, f64>>,
    loaded_at: Instant,
}

/// Read-through cache in front of a [`PortionSource`]
#[derive(Debug)]
pub struct PortionCache<S: PortionSource> {
    source: S,
    policy: RefreshPolicy,
    snapshot: RwLock<Option<Snapshot>>,
}

impl<S: PortionSource> PortionCache<S> {
    /// Create an empty cache; nothing is loaded until first use
    #[must_use]
    pub const fn new(source: S, policy: RefreshPolicy) -> Self {
        Self {
            source,
            policy,
            snapshot: RwLock::new(None),
        }
    }

    /// Refresh policy in effect
    #[must_use]
    pub const fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Whether a snapshot is currently held
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.snapshot.read().is_ok_and(|guard| guard.is_some())
    }

    /// Drop the current snapshot so the next lookup reloads from the source
    ///
    /// # Errors
    ///
    /// Returns an error if the cache lock is poisoned
    pub fn invalidate(&self) -> AppResult<()> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| AppError::internal(format!("Portion cache lock poisoned: {e}")))?;
        *guard = None;
        debug!("Portion cache invalidated");
        Ok(())
    }

    fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        match self.policy {
            RefreshPolicy::LoadOnce => true,
            RefreshPolicy::Ttl(ttl) => snapshot.loaded_at.elapsed() < ttl,
        }
    }

    /// Current defaults, loading or refreshing from the source when needed
    ///
    /// A failed refresh keeps serving the previous snapshot when one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned, or if the source fails and no
    /// previous snapshot is available
    pub fn defaults(&self) -> AppResult<Arc<HashMap<String, f64>>> {
        {
            let guard = self
                .snapshot
                .read()
                .map_err(|e| AppError::internal(format!("Portion cache lock poisoned: {e}")))?;
            if let Some(snapshot) = guard.as_ref().filter(|s| self.is_fresh(s)) {
                return Ok(Arc::clone(&snapshot.defaults));
            }
        }

        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| AppError::internal(format!("Portion cache lock poisoned: {e}")))?;

        // Another thread may have refreshed while we waited for the write lock
        if let Some(snapshot) = guard.as_ref().filter(|s| self.is_fresh(s)) {
            return Ok(Arc::clone(&snapshot.defaults));
        }

        match self.source.load_defaults() {
            Ok(loaded) => {
                debug!(entries = loaded.len(), "Loaded portion defaults");
                let defaults = Arc::new(loaded);
                *guard = Some(Snapshot {
                    defaults: Arc::clone(&defaults),
                    loaded_at: Instant::now(),
                });
                Ok(defaults)
            }
            Err(e) => guard.as_ref().map_or(Err(e), |stale| {
                warn!("Portion defaults refresh failed, serving previous snapshot");
                Ok(Arc::clone(&stale.defaults))
            }),
        }
    }

    /// Grams in one default portion of `food`
    ///
    /// Unknown foods fall back to a 100 g portion.
    ///
    /// # Errors
    ///
    /// Returns an error if the defaults cannot be loaded
    pub fn grams_per_portion(&self, food: &str) -> AppResult<f64> {
        let defaults = self.defaults()?;
        let key = normalize_food_key(food);
        Ok(defaults.get(&key).copied().unwrap_or_else(|| {
            debug!(food = %key, "No portion default, using fallback");
            FALLBACK_PORTION_GRAMS
        }))
    }

    /// Convert a logged quantity to grams
    ///
    /// `g`, `kg`, `oz` and `lb` (and their spelled-out forms) convert directly
    /// without touching the cache; any other unit, or none, counts portions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative or non-finite quantity, or an
    /// error if portion defaults are needed and cannot be loaded
    pub fn to_grams(&self, food: &str, quantity: f64, unit: Option<&str>) -> AppResult<f64> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(
                AppError::invalid_input("quantity must be a non-negative number")
                    .with_field("quantity"),
            );
        }

        if let Some(grams_per_unit) = unit.and_then(mass_unit_grams) {
            return Ok(quantity * grams_per_unit);
        }
        Ok(quantity * self.grams_per_portion(food)?)
    }
}

impl Default for PortionCache<StaticPortionSource> {
    fn default() -> Self {
        Self::new(StaticPortionSource::new(), RefreshPolicy::LoadOnce)
    }
}

fn normalize_food_key(food: &str) -> String {
    food.trim().to_lowercase()
}

/// Grams per unit for recognised mass units
fn mass_unit_grams(unit: &str) -> Option<f64> {
    match unit.trim().to_lowercase().as_str() {
        "g" | "gram" | "grams" => Some(1.0),
        "kg" | "kilogram" | "kilograms" => Some(GRAMS_PER_KG),
        "oz" | "ounce" | "ounces" => Some(GRAMS_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(GRAMS_PER_LB),
        _ => None,
    }
}
