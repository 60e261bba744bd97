//! Request coordinator.
//!
//! [`DataManager`] is the single entry point callers use: it normalizes the
//! symbol, consults the cache, routes to a provider, and folds the outcome
//! into a [`DataResponse`]. Data operations never return `Err`; provider
//! failures and routing dead ends become `success == false` responses.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use futures::future::join_all;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::cache::{self, ResponseCache};
use crate::config::RouterConfig;
use crate::errors::RouterError;
use crate::models::{normalize_symbol, BatchQuoteResult, DataKind, DataPayload, DataResponse};
use crate::provider::{DataProvider, ProviderCategory, ProviderRegistry};
use crate::routing::{select_provider, RoutingContext};
use crate::stats::{self, HealthState, HealthStatus, RequestStats, RouterStats};

/// Coordinates providers, cache, and statistics behind one facade.
pub struct DataManager {
    registry: ProviderRegistry,
    cache: ResponseCache,
    stats: RequestStats,
}

impl DataManager {
    pub fn new(
        config: &RouterConfig,
        providers: Vec<Arc<dyn DataProvider>>,
    ) -> Result<Self, RouterError> {
        let registry = ProviderRegistry::from_config(config, providers)?;
        Ok(Self {
            registry,
            cache: ResponseCache::new(config.cache_enabled),
            stats: RequestStats::new(),
        })
    }

    /// Connects every registered provider. A provider that fails to connect
    /// is logged and left registered; routing skips disconnected providers.
    pub async fn initialize(&self) {
        for provider in self.registry.ordered() {
            match provider.connect().await {
                Ok(true) => info!("Connected to provider '{}'", provider.name()),
                Ok(false) => warn!("Provider '{}' declined to connect", provider.name()),
                Err(e) => warn!("Failed to connect provider '{}': {}", provider.name(), e),
            }
        }
        let counts = self.registry.counts();
        info!(
            "Initialized with {}/{} providers connected",
            counts.connected, counts.total
        );
    }

    pub async fn shutdown(&self) {
        for provider in self.registry.ordered() {
            if let Err(e) = provider.disconnect().await {
                warn!("Failed to disconnect provider '{}': {}", provider.name(), e);
            }
        }
        info!("All providers disconnected");
    }

    /// Fetches a quote, served from cache when a live entry exists.
    pub async fn get_quote(
        &self,
        symbol: &str,
        account_id: Option<&str>,
        source_preference: Option<&str>,
    ) -> DataResponse {
        self.stats.record_request();
        let symbol = normalize_symbol(symbol);
        let key = cache::quote_key(&symbol);

        if let Some(hit) = self.cache.get(&key) {
            self.stats.record_cache_hit();
            debug!("Cache hit for {}", key);
            return hit;
        }
        self.stats.record_cache_miss();

        let ctx = RoutingContext {
            symbol: &symbol,
            kind: DataKind::Quote,
            source_preference,
            account_id,
        };
        let Some(provider) = select_provider(&ctx, &self.registry) else {
            return self.no_provider_failure(&symbol, "quote");
        };

        let started = Instant::now();
        self.stats.record_provider_request(provider.category());
        match provider.get_quote(&symbol).await {
            Ok(quote) => {
                let response = DataResponse::ok(
                    DataPayload::Quote(quote),
                    provider.name(),
                    Some(elapsed_ms(started)),
                );
                self.cache
                    .put(&key, response.clone(), DataKind::Quote.cache_ttl());
                response
            }
            Err(e) => self.provider_failure(provider.name(), &symbol, e, started),
        }
    }

    /// Fetches quotes for several symbols concurrently. Per-symbol failures
    /// are collected, never propagated; each normalized symbol lands in
    /// either the quote map or the error map, never both.
    pub async fn get_quotes_batch(
        &self,
        symbols: &[&str],
        account_id: Option<&str>,
        source_preference: Option<&str>,
    ) -> BatchQuoteResult {
        let normalized: Vec<String> = symbols.iter().map(|s| normalize_symbol(s)).collect();
        let futures = normalized
            .iter()
            .map(|symbol| self.get_quote(symbol, account_id, source_preference));
        let responses = join_all(futures).await;

        let mut result = BatchQuoteResult {
            total_requested: normalized.len(),
            successful: 0,
            failed: 0,
            quotes: Default::default(),
            errors: Default::default(),
        };
        for (symbol, response) in normalized.into_iter().zip(responses) {
            if response.success {
                result.successful += 1;
                result.quotes.insert(symbol, response);
            } else {
                result.failed += 1;
                result.errors.insert(
                    symbol,
                    response
                        .error
                        .unwrap_or_else(|| "unknown error".to_string()),
                );
            }
        }
        result
    }

    /// Fetches an options chain, optionally filtered to one expiration.
    /// Cached per underlying and expiration filter.
    pub async fn get_options_chain(
        &self,
        underlying: &str,
        expiration: Option<NaiveDate>,
        strike_range: Option<(Decimal, Decimal)>,
        account_id: Option<&str>,
        source_preference: Option<&str>,
    ) -> DataResponse {
        self.stats.record_request();
        let underlying = normalize_symbol(underlying);
        let key = cache::options_key(&underlying, expiration);

        if let Some(hit) = self.cache.get(&key) {
            self.stats.record_cache_hit();
            debug!("Cache hit for {}", key);
            return hit;
        }
        self.stats.record_cache_miss();

        let ctx = RoutingContext {
            symbol: &underlying,
            kind: DataKind::OptionsChain,
            source_preference,
            account_id,
        };
        let Some(provider) = select_provider(&ctx, &self.registry) else {
            return self.no_provider_failure(&underlying, "options");
        };

        let started = Instant::now();
        self.stats.record_provider_request(provider.category());
        match provider
            .get_options_chain(&underlying, expiration, strike_range)
            .await
        {
            Ok(chain) => {
                let response = DataResponse::ok(
                    DataPayload::OptionsChain(chain),
                    provider.name(),
                    Some(elapsed_ms(started)),
                );
                self.cache
                    .put(&key, response.clone(), DataKind::OptionsChain.cache_ttl());
                response
            }
            Err(e) => self.provider_failure(provider.name(), &underlying, e, started),
        }
    }

    /// Fetches historical bars. Brokers are never selected implicitly for
    /// historical data, though an explicit `source_preference` may name one.
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: &str,
        account_id: Option<&str>,
        source_preference: Option<&str>,
    ) -> DataResponse {
        self.stats.record_request();
        let symbol = normalize_symbol(symbol);
        let key = cache::historical_key(&symbol, start, end, interval);

        if let Some(hit) = self.cache.get(&key) {
            self.stats.record_cache_hit();
            debug!("Cache hit for {}", key);
            return hit;
        }
        self.stats.record_cache_miss();

        // account_id flows into the context but historical routing never
        // selects brokers implicitly.
        let ctx = RoutingContext {
            symbol: &symbol,
            kind: DataKind::Historical,
            source_preference,
            account_id,
        };
        let Some(provider) = select_provider(&ctx, &self.registry) else {
            return self.no_provider_failure(&symbol, "historical");
        };

        let started = Instant::now();
        self.stats.record_provider_request(provider.category());
        match provider
            .get_historical_data(&symbol, start, end, interval)
            .await
        {
            Ok(bars) => {
                let response = DataResponse::ok(
                    DataPayload::HistoricalBars(bars),
                    provider.name(),
                    Some(elapsed_ms(started)),
                );
                self.cache
                    .put(&key, response.clone(), DataKind::Historical.cache_ttl());
                response
            }
            Err(e) => self.provider_failure(provider.name(), &symbol, e, started),
        }
    }

    /// Fetches account balances from a named broker. Never cached.
    pub async fn get_account_info(&self, account_id: &str, broker: &str) -> DataResponse {
        self.stats.record_request();
        let Some(provider) = self.connected_broker(broker) else {
            self.stats.record_error();
            warn!("Broker '{}' not available for account info", broker);
            return DataResponse::failure(format!("Broker {broker} not available"));
        };

        let started = Instant::now();
        self.stats.record_provider_request(ProviderCategory::Broker);
        match provider.get_account_info(account_id).await {
            Ok(account) => DataResponse::ok(
                DataPayload::Account(account),
                provider.name(),
                Some(elapsed_ms(started)),
            ),
            Err(e) => self.provider_failure(provider.name(), account_id, e, started),
        }
    }

    /// Fetches open positions from a named broker. Never cached.
    pub async fn get_positions(&self, account_id: &str, broker: &str) -> DataResponse {
        self.stats.record_request();
        let Some(provider) = self.connected_broker(broker) else {
            self.stats.record_error();
            warn!("Broker '{}' not available for positions", broker);
            return DataResponse::failure(format!("Broker {broker} not available"));
        };

        let started = Instant::now();
        self.stats.record_provider_request(ProviderCategory::Broker);
        match provider.get_positions(account_id).await {
            Ok(positions) => DataResponse::ok(
                DataPayload::Positions(positions),
                provider.name(),
                Some(elapsed_ms(started)),
            ),
            Err(e) => self.provider_failure(provider.name(), account_id, e, started),
        }
    }

    pub fn get_stats(&self) -> RouterStats {
        RouterStats {
            requests: self.stats.snapshot(),
            providers: self.registry.infos(),
            cache_enabled: self.cache.is_enabled(),
        }
    }

    /// Healthy while at least one provider is connected.
    pub fn get_health_status(&self) -> HealthStatus {
        let counts = self.registry.counts();
        let snapshot = self.stats.snapshot();
        let status = if counts.connected > 0 {
            HealthState::Healthy
        } else {
            HealthState::Degraded
        };
        HealthStatus {
            status,
            total_providers: counts.total,
            connected_providers: counts.connected,
            broker_providers: counts.brokers,
            connected_broker_providers: counts.connected_brokers,
            market_data_providers: counts.market_data,
            connected_market_data_providers: counts.connected_market_data,
            cache_enabled: self.cache.is_enabled(),
            total_requests: snapshot.total_requests,
            error_rate: stats::error_rate(snapshot.errors, snapshot.total_requests),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Response cache cleared");
    }

    fn connected_broker(&self, broker: &str) -> Option<&Arc<dyn DataProvider>> {
        self.registry.get_broker(broker).filter(|p| p.is_connected())
    }

    fn no_provider_failure(&self, symbol: &str, kind: &str) -> DataResponse {
        self.stats.record_error();
        warn!("No available providers for {} data ({})", kind, symbol);
        DataResponse::failure(format!("No available providers for {kind} data"))
    }

    fn provider_failure(
        &self,
        provider: &str,
        subject: &str,
        error: crate::errors::ProviderError,
        started: Instant,
    ) -> DataResponse {
        self.stats.record_error();
        warn!("Provider '{}' failed for {}: {}", provider, subject, error);
        DataResponse::failure(error.to_string())
            .with_source(provider)
            .with_latency(elapsed_ms(started))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
