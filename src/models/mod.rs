//! Domain models shared across providers, cache, and coordinator.

mod account;
mod bar;
mod options;
mod quote;
mod response;

pub use account::{
    Account, Order, OrderRequest, OrderSide, OrderStatus, OrderType, Position, PositionSide,
};
pub use bar::HistoricalBar;
pub use options::{Greeks, OptionContract, OptionType, OptionsChain};
pub use quote::Quote;
pub use response::{BatchQuoteResult, DataPayload, DataResponse};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{HISTORICAL_TTL, OPTIONS_CHAIN_TTL, QUOTE_TTL};

/// The kind of market data a request is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    Quote,
    OptionsChain,
    Historical,
}

impl DataKind {
    /// Cache lifetime for this kind. Fixed per kind, not per entry.
    pub fn cache_ttl(&self) -> Duration {
        match self {
            DataKind::Quote => QUOTE_TTL,
            DataKind::OptionsChain => OPTIONS_CHAIN_TTL,
            DataKind::Historical => HISTORICAL_TTL,
        }
    }
}

/// Uppercase-and-trim a symbol so cache keys and provider requests agree.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
