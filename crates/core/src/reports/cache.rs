//! Report result caching using Moka.
//!
//! Every report is a pure function of the snapshot and the filter, so results
//! are keyed by snapshot version and filter.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

use compta_shared::config::ReportsConfig;

use super::types::{GeneralLedger, ProgressiveBalance, TrialBalance};
use crate::ledger::LineFilter;

/// Default cache capacity (number of entries per report kind).
const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Cache key: snapshot version and filter.
pub type ReportKey = (u64, LineFilter);

fn build<V: Clone + Send + Sync + 'static>(max_capacity: u64, ttl_secs: u64) -> Cache<ReportKey, V> {
    Cache::builder()
        .max_capacity(max_capacity)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

fn get_or_compute<T: Send + Sync + 'static>(
    cache: &Cache<ReportKey, Arc<T>>,
    key: ReportKey,
    compute: impl FnOnce() -> T,
) -> Arc<T> {
    if let Some(cached) = cache.get(&key) {
        return cached;
    }

    let result = Arc::new(compute());
    cache.insert(key, Arc::clone(&result));
    result
}

/// Cache of computed reports.
///
/// Thread-safe and cheap to clone.
#[derive(Clone)]
pub struct ReportCache {
    trial_balances: Cache<ReportKey, Arc<TrialBalance>>,
    progressive_balances: Cache<ReportKey, Arc<ProgressiveBalance>>,
    general_ledgers: Cache<ReportKey, Arc<GeneralLedger>>,
}

impl ReportCache {
    /// Creates a cache with default settings (100 entries, 5 minute TTL).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        Self {
            trial_balances: build(max_capacity, ttl_secs),
            progressive_balances: build(max_capacity, ttl_secs),
            general_ledgers: build(max_capacity, ttl_secs),
        }
    }

    /// Creates a cache from the reports configuration section.
    #[must_use]
    pub fn from_config(config: &ReportsConfig) -> Self {
        Self::with_config(config.cache_capacity, config.cache_ttl_secs)
    }

    /// Returns the cached trial balance, computing it on a miss.
    pub fn trial_balance(
        &self,
        version: u64,
        filter: &LineFilter,
        compute: impl FnOnce() -> TrialBalance,
    ) -> Arc<TrialBalance> {
        get_or_compute(&self.trial_balances, (version, filter.clone()), compute)
    }

    /// Returns the cached progressive balance, computing it on a miss.
    pub fn progressive_balance(
        &self,
        version: u64,
        filter: &LineFilter,
        compute: impl FnOnce() -> ProgressiveBalance,
    ) -> Arc<ProgressiveBalance> {
        get_or_compute(&self.progressive_balances, (version, filter.clone()), compute)
    }

    /// Returns the cached general ledger, computing it on a miss.
    pub fn general_ledger(
        &self,
        version: u64,
        filter: &LineFilter,
        compute: impl FnOnce() -> GeneralLedger,
    ) -> Arc<GeneralLedger> {
        get_or_compute(&self.general_ledgers, (version, filter.clone()), compute)
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.trial_balances.invalidate_all();
        self.progressive_balances.invalidate_all();
        self.general_ledgers.invalidate_all();
    }

    /// Returns the number of entries currently cached.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.trial_balances.entry_count()
            + self.progressive_balances.entry_count()
            + self.general_ledgers.entry_count()
    }

    /// Runs cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.trial_balances.run_pending_tasks();
        self.progressive_balances.run_pending_tasks();
        self.general_ledgers.run_pending_tasks();
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}
