//! In-memory provider used by the test suites.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::ProviderError;
use crate::models::{
    Account, HistoricalBar, OptionContract, OptionType, OptionsChain, Position, PositionSide,
    Quote,
};
use crate::provider::traits::{DataProvider, ProviderCategory};

/// Scriptable provider: serves canned data, fails on request, and counts
/// every data call it receives.
pub struct MockProvider {
    name: String,
    category: ProviderCategory,
    connected: AtomicBool,
    accounts: Vec<String>,
    fail_symbols: Vec<String>,
    call_count: AtomicUsize,
}

impl MockProvider {
    pub fn market_data(name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: ProviderCategory::MarketData,
            connected: AtomicBool::new(true),
            accounts: Vec::new(),
            fail_symbols: Vec::new(),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn broker(name: &str, accounts: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category: ProviderCategory::Broker,
            connected: AtomicBool::new(true),
            accounts: accounts.iter().map(|a| a.to_string()).collect(),
            fail_symbols: Vec::new(),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Makes data calls for these symbols fail with `DataNotAvailable`.
    pub fn failing_for(mut self, symbols: &[&str]) -> Self {
        self.fail_symbols = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn disconnected(self) -> Self {
        self.connected.store(false, Ordering::SeqCst);
        self
    }

    /// Data calls received so far (connect/disconnect excluded).
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn record_call(&self, symbol: &str) -> Result<(), ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_symbols.iter().any(|s| s == symbol) {
            return Err(ProviderError::data_not_available(
                symbol,
                "symbol not found",
            ));
        }
        Ok(())
    }

    fn sample_quote(&self, symbol: &str) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            bid: Some(dec!(449.50)),
            ask: Some(dec!(450.50)),
            last: Some(dec!(450.00)),
            mark: Some(dec!(450.00)),
            bid_size: Some(10),
            ask_size: Some(12),
            volume: Some(1_000_000),
            open: Some(dec!(448.00)),
            high: Some(dec!(451.00)),
            low: Some(dec!(447.50)),
            close: Some(dec!(448.25)),
            change: Some(dec!(1.75)),
            change_percent: Some(dec!(0.39)),
            timestamp: Utc::now(),
            market_hours: true,
            source: self.name.clone(),
        }
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> ProviderCategory {
        self.category
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn connected_accounts(&self) -> Vec<String> {
        self.accounts.clone()
    }

    fn request_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst) as u64
    }

    async fn connect(&self) -> Result<bool, ProviderError> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(true)
    }

    async fn disconnect(&self) -> Result<bool, ProviderError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(true)
    }

    async fn test_connection(&self) -> Result<bool, ProviderError> {
        Ok(self.is_connected())
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        self.record_call(symbol)?;
        Ok(self.sample_quote(symbol))
    }

    async fn get_options_chain(
        &self,
        underlying: &str,
        expiration: Option<NaiveDate>,
        _strike_range: Option<(Decimal, Decimal)>,
    ) -> Result<OptionsChain, ProviderError> {
        self.record_call(underlying)?;
        let expiration = expiration
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());
        let contract = OptionContract {
            symbol: format!("{underlying}250620C00450000"),
            underlying_symbol: underlying.to_string(),
            option_type: OptionType::Call,
            strike_price: dec!(450),
            expiration_date: expiration,
            days_to_expiration: Some(30),
            bid: Some(dec!(5.10)),
            ask: Some(dec!(5.30)),
            last: Some(dec!(5.20)),
            mark: Some(dec!(5.20)),
            volume: Some(1200),
            open_interest: Some(5000),
            greeks: None,
            timestamp: Utc::now(),
            source: self.name.clone(),
        };
        let mut expirations = HashMap::new();
        expirations.insert(expiration.to_string(), vec![contract]);
        Ok(OptionsChain {
            underlying_symbol: underlying.to_string(),
            underlying_price: Some(dec!(450.00)),
            timestamp: Utc::now(),
            source: self.name.clone(),
            expirations,
            market_hours: true,
            total_contracts: 1,
        })
    }

    async fn get_historical_data(
        &self,
        symbol: &str,
        start: NaiveDate,
        _end: NaiveDate,
        _interval: &str,
    ) -> Result<Vec<HistoricalBar>, ProviderError> {
        self.record_call(symbol)?;
        let timestamp = Utc
            .from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap());
        Ok(vec![HistoricalBar {
            symbol: symbol.to_string(),
            timestamp,
            open: dec!(448.00),
            high: dec!(451.00),
            low: dec!(447.50),
            close: dec!(450.00),
            volume: 1_000_000,
        }])
    }

    async fn get_account_info(&self, account_id: &str) -> Result<Account, ProviderError> {
        if self.category != ProviderCategory::Broker {
            return Err(ProviderError::not_supported("account info", &self.name));
        }
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(Account {
            account_id: account_id.to_string(),
            broker: self.name.clone(),
            account_type: "margin".to_string(),
            total_value: Some(dec!(100000)),
            cash_balance: Some(dec!(25000)),
            buying_power: Some(dec!(50000)),
            margin_used: Some(dec!(0)),
            day_pnl: Some(dec!(125.50)),
            total_pnl: Some(dec!(4200)),
            is_active: true,
            last_updated: Utc::now(),
        })
    }

    async fn get_positions(&self, account_id: &str) -> Result<Vec<Position>, ProviderError> {
        if self.category != ProviderCategory::Broker {
            return Err(ProviderError::not_supported("positions", &self.name));
        }
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Position {
            symbol: "SPY".to_string(),
            quantity: dec!(100),
            average_price: Some(dec!(440.00)),
            market_value: Some(dec!(45000)),
            cost_basis: Some(dec!(44000)),
            unrealized_pnl: Some(dec!(1000)),
            realized_pnl: None,
            underlying_symbol: None,
            option_type: None,
            strike_price: None,
            expiration_date: None,
            side: PositionSide::Long,
            account_id: account_id.to_string(),
            broker: self.name.clone(),
            timestamp: Utc::now(),
        }])
    }
}
