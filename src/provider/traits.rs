//! Provider trait definition.
//!
//! Every upstream source, whether a brokerage API or a market-data vendor,
//! is modeled as one implementation of [`DataProvider`]. Expected failures
//! (network errors, vendor rejections, missing data) come back as
//! `Err(ProviderError)`, never as panics crossing the trait boundary.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::models::{Account, HistoricalBar, OptionsChain, Order, OrderRequest, Position, Quote};

/// Classification of a provider as a broker (account + trading capable)
/// or a pure market-data vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderCategory {
    MarketData,
    Broker,
}

impl fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderCategory::MarketData => write!(f, "market-data"),
            ProviderCategory::Broker => write!(f, "broker"),
        }
    }
}

/// Capability flags a provider reports. Checked against the configured
/// category once at registration time, not per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCapabilities {
    pub supports_account_data: bool,
    pub supports_trading: bool,
}

impl ProviderCapabilities {
    pub fn for_category(category: ProviderCategory) -> Self {
        match category {
            ProviderCategory::MarketData => Self {
                supports_account_data: false,
                supports_trading: false,
            },
            ProviderCategory::Broker => Self {
                supports_account_data: true,
                supports_trading: true,
            },
        }
    }

    /// Whether these flags are consistent with the given category.
    pub fn matches_category(&self, category: ProviderCategory) -> bool {
        match category {
            ProviderCategory::MarketData => !self.supports_account_data && !self.supports_trading,
            ProviderCategory::Broker => self.supports_account_data,
        }
    }
}

/// Point-in-time description of a provider, for stats reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub name: String,
    pub category: ProviderCategory,
    pub connected: bool,
    pub request_count: u64,
    pub last_error: Option<String>,
    pub supports_account_data: bool,
    pub supports_trading: bool,
}

/// Uniform connector to one upstream data source.
///
/// Implement this trait to add a new vendor or broker adapter. Market-data
/// providers get working defaults for the broker-only operations, which
/// report `NotSupported` rather than failing unpredictably.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Unique provider name, e.g. "POLYGON", "SCHWAB".
    fn name(&self) -> &str;

    fn category(&self) -> ProviderCategory;

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::for_category(self.category())
    }

    /// Current connectivity state. Mutated only by `connect`/`disconnect`
    /// or a failed health check, never by data operations.
    fn is_connected(&self) -> bool;

    /// Account identifiers this provider currently serves. Brokers only;
    /// market-data providers serve none.
    fn connected_accounts(&self) -> Vec<String> {
        Vec::new()
    }

    fn serves_account(&self, account_id: &str) -> bool {
        self.connected_accounts().iter().any(|a| a == account_id)
    }

    /// Requests issued against this provider since startup.
    fn request_count(&self) -> u64 {
        0
    }

    fn last_error(&self) -> Option<String> {
        None
    }

    fn info(&self) -> ProviderInfo {
        let capabilities = self.capabilities();
        ProviderInfo {
            name: self.name().to_string(),
            category: self.category(),
            connected: self.is_connected(),
            request_count: self.request_count(),
            last_error: self.last_error(),
            supports_account_data: capabilities.supports_account_data,
            supports_trading: capabilities.supports_trading,
        }
    }

    /// Establish the upstream connection. Must leave `is_connected`
    /// consistent with the returned value.
    async fn connect(&self) -> Result<bool, ProviderError>;

    async fn disconnect(&self) -> Result<bool, ProviderError>;

    /// Check that the connection is alive and usable.
    async fn test_connection(&self) -> Result<bool, ProviderError>;

    async fn get_quote(&self, symbol: &str) -> Result<Quote, ProviderError>;

    async fn get_options_chain(
        &self,
        underlying: &str,
        expiration: Option<NaiveDate>,
        strike_range: Option<(Decimal, Decimal)>,
    ) -> Result<OptionsChain, ProviderError>;

    async fn get_historical_data(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: &str,
    ) -> Result<Vec<HistoricalBar>, ProviderError>;

    async fn get_account_info(&self, account_id: &str) -> Result<Account, ProviderError> {
        let _ = account_id;
        Err(ProviderError::not_supported("account info", self.name()))
    }

    async fn get_positions(&self, account_id: &str) -> Result<Vec<Position>, ProviderError> {
        let _ = account_id;
        Err(ProviderError::not_supported("positions", self.name()))
    }

    async fn get_orders(&self, account_id: &str) -> Result<Vec<Order>, ProviderError> {
        let _ = account_id;
        Err(ProviderError::not_supported("orders", self.name()))
    }

    async fn place_order(&self, order: &OrderRequest) -> Result<Order, ProviderError> {
        let _ = order;
        Err(ProviderError::not_supported("order placement", self.name()))
    }
}
