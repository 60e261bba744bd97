//! Request counters and health reporting.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::provider::{ProviderCategory, ProviderInfo};

/// Monotonic request counters, shared across concurrent requests.
#[derive(Debug, Default)]
pub struct RequestStats {
    total_requests: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    broker_requests: AtomicU64,
    market_data_requests: AtomicU64,
    errors: AtomicU64,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_request(&self, category: ProviderCategory) {
        match category {
            ProviderCategory::Broker => {
                self.broker_requests.fetch_add(1, Ordering::Relaxed);
            }
            ProviderCategory::MarketData => {
                self.market_data_requests.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RequestStatsSnapshot {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        RequestStatsSnapshot {
            total_requests,
            cache_hits,
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            broker_requests: self.broker_requests.load(Ordering::Relaxed),
            market_data_requests: self.market_data_requests.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            cache_hit_rate: percentage(cache_hits, total_requests),
        }
    }
}

/// Division guarded against a zero denominator, reported as percent.
fn percentage(part: u64, whole: u64) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatsSnapshot {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub broker_requests: u64,
    pub market_data_requests: u64,
    pub errors: u64,
    pub cache_hit_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
}

/// Operational health summary, fit for a monitoring endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    pub total_providers: usize,
    pub connected_providers: usize,
    pub broker_providers: usize,
    pub connected_broker_providers: usize,
    pub market_data_providers: usize,
    pub connected_market_data_providers: usize,
    pub cache_enabled: bool,
    pub total_requests: u64,
    pub error_rate: f64,
}

/// Full statistics view: counters plus per-provider details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterStats {
    pub requests: RequestStatsSnapshot,
    pub providers: Vec<ProviderInfo>,
    pub cache_enabled: bool,
}

pub(crate) fn error_rate(errors: u64, total: u64) -> f64 {
    percentage(errors, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_guard_zero_totals() {
        let stats = RequestStats::new();
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.cache_hit_rate, 0.0);
        assert_eq!(error_rate(0, 0), 0.0);
    }

    #[test]
    fn test_hit_rate_is_percent_of_total_requests() {
        let stats = RequestStats::new();
        for _ in 0..4 {
            stats.record_request();
        }
        for _ in 0..3 {
            stats.record_cache_hit();
        }
        stats.record_cache_miss();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_requests, 4);
        assert_eq!(snapshot.cache_hits, 3);
        assert_eq!(snapshot.cache_misses, 1);
        assert_eq!(snapshot.cache_hit_rate, 75.0);
    }

    #[test]
    fn test_provider_requests_split_by_category() {
        let stats = RequestStats::new();
        stats.record_provider_request(ProviderCategory::Broker);
        stats.record_provider_request(ProviderCategory::MarketData);
        stats.record_provider_request(ProviderCategory::MarketData);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.broker_requests, 1);
        assert_eq!(snapshot.market_data_requests, 2);
    }
}
