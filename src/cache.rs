//! Response cache with per-kind TTLs.
//!
//! Entries are stamped with their insertion instant and expire lazily: an
//! expired entry is removed on the lookup that finds it stale. Lookups on a
//! disabled cache always miss, and writes are dropped.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use dashmap::DashMap;

use crate::models::DataResponse;

#[derive(Clone)]
struct CacheEntry {
    response: DataResponse,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    // Live iff now - inserted_at < ttl; the exact ttl mark is expired.
    fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.inserted_at) >= self.ttl
    }
}

/// Concurrent TTL cache for [`DataResponse`] values.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    enabled: bool,
}

impl ResponseCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: DashMap::new(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A live entry comes back marked `cached`; an expired one is evicted
    /// and reported as a miss.
    pub fn get(&self, key: &str) -> Option<DataResponse> {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<DataResponse> {
        if !self.enabled {
            return None;
        }
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.is_expired_at(now) {
                    true
                } else {
                    return Some(entry.response.clone().into_cached());
                }
            }
            None => return None,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn put(&self, key: &str, response: DataResponse, ttl: Duration) {
        self.put_at(key, response, ttl, Instant::now());
    }

    pub(crate) fn put_at(&self, key: &str, response: DataResponse, ttl: Duration, now: Instant) {
        if !self.enabled {
            return;
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                response,
                inserted_at: now,
                ttl,
            },
        );
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, including any not yet evicted.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Key for a cached quote, e.g. `quote:SPY`. Symbols must already be
/// normalized.
pub fn quote_key(symbol: &str) -> String {
    format!("quote:{symbol}")
}

/// Key for a cached options chain, e.g. `options:SPY:2025-06-20` or
/// `options:SPY:all` when no expiration filter was given.
pub fn options_key(underlying: &str, expiration: Option<NaiveDate>) -> String {
    match expiration {
        Some(date) => format!("options:{underlying}:{date}"),
        None => format!("options:{underlying}:all"),
    }
}

/// Key for cached historical bars, e.g.
/// `historical:SPY:2025-01-01:2025-06-30:1d`.
pub fn historical_key(symbol: &str, start: NaiveDate, end: NaiveDate, interval: &str) -> String {
    format!("historical:{symbol}:{start}:{end}:{interval}")
}
