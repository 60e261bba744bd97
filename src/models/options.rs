use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

/// Options greeks, as supplied by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Greeks {
    pub delta: Option<Decimal>,
    pub gamma: Option<Decimal>,
    pub theta: Option<Decimal>,
    pub vega: Option<Decimal>,
    pub rho: Option<Decimal>,
    pub implied_volatility: Option<Decimal>,
}

/// A single option contract within a chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    pub symbol: String,
    pub underlying_symbol: String,
    pub option_type: OptionType,
    pub strike_price: Decimal,
    pub expiration_date: NaiveDate,
    pub days_to_expiration: Option<i64>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub last: Option<Decimal>,
    pub mark: Option<Decimal>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
    pub greeks: Option<Greeks>,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl OptionContract {
    pub fn bid_ask_spread(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }
}

/// The set of option contracts for an underlying, grouped by expiration.
///
/// Keys of `expirations` are ISO dates (`YYYY-MM-DD`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsChain {
    pub underlying_symbol: String,
    pub underlying_price: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub expirations: HashMap<String, Vec<OptionContract>>,
    pub market_hours: bool,
    pub total_contracts: usize,
}

impl OptionsChain {
    /// Contracts for a specific expiration, empty when none are listed.
    pub fn contracts_for_expiration(&self, expiration: NaiveDate) -> &[OptionContract] {
        self.expirations
            .get(&expiration.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct strikes available for an expiration, ascending.
    pub fn strikes_for_expiration(&self, expiration: NaiveDate) -> Vec<Decimal> {
        let mut strikes: Vec<Decimal> = self
            .contracts_for_expiration(expiration)
            .iter()
            .map(|c| c.strike_price)
            .collect();
        strikes.sort();
        strikes.dedup();
        strikes
    }

    pub fn find_contract(
        &self,
        strike: Decimal,
        expiration: NaiveDate,
        option_type: OptionType,
    ) -> Option<&OptionContract> {
        self.contracts_for_expiration(expiration)
            .iter()
            .find(|c| c.strike_price == strike && c.option_type == option_type)
    }
}
