use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, Position};
use super::bar::HistoricalBar;
use super::options::OptionsChain;
use super::quote::Quote;

/// Kind-specific payload carried by a successful [`DataResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum DataPayload {
    Quote(Quote),
    OptionsChain(OptionsChain),
    HistoricalBars(Vec<HistoricalBar>),
    Account(Account),
    Positions(Vec<Position>),
}

/// Normalized envelope returned by every coordinator operation.
///
/// Invariants, enforced by the constructors:
/// - `success == false` implies `payload` is `None` and `error` is set;
/// - `cached == true` implies the response was served without a live
///   provider call in this invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    pub success: bool,
    pub payload: Option<DataPayload>,
    pub error: Option<String>,
    /// Name of the provider that produced the payload, when known.
    pub source: Option<String>,
    pub cached: bool,
    pub timestamp: DateTime<Utc>,
    pub latency_ms: Option<u64>,
}

impl DataResponse {
    pub fn ok(payload: DataPayload, source: &str, latency_ms: Option<u64>) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
            source: Some(source.to_string()),
            cached: false,
            timestamp: Utc::now(),
            latency_ms,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(error.into()),
            source: None,
            cached: false,
            timestamp: Utc::now(),
            latency_ms: None,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    /// Marks this response as served from cache.
    pub fn into_cached(mut self) -> Self {
        self.cached = true;
        self
    }
}

/// Result of a batch quote fan-out. Keys are normalized (uppercased)
/// symbols; a symbol appears in `quotes` on success or in `errors` on
/// failure, never in both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchQuoteResult {
    pub total_requested: usize,
    pub successful: usize,
    pub failed: usize,
    pub quotes: HashMap<String, DataResponse>,
    pub errors: HashMap<String, String>,
}
