use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::options::OptionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
    BuyToOpen,
    SellToOpen,
    BuyToClose,
    SellToClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Working,
    Filled,
    Cancelled,
    Rejected,
    Expired,
}

/// Broker account balances and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,
    pub broker: String,
    pub account_type: String,
    pub total_value: Option<Decimal>,
    pub cash_balance: Option<Decimal>,
    pub buying_power: Option<Decimal>,
    pub margin_used: Option<Decimal>,
    pub day_pnl: Option<Decimal>,
    pub total_pnl: Option<Decimal>,
    pub is_active: bool,
    pub last_updated: DateTime<Utc>,
}

/// An open position within a broker account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub quantity: Decimal,
    pub average_price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    pub cost_basis: Option<Decimal>,
    pub unrealized_pnl: Option<Decimal>,
    pub realized_pnl: Option<Decimal>,
    pub underlying_symbol: Option<String>,
    pub option_type: Option<OptionType>,
    pub strike_price: Option<Decimal>,
    pub expiration_date: Option<NaiveDate>,
    pub side: PositionSide,
    pub account_id: String,
    pub broker: String,
    pub timestamp: DateTime<Utc>,
}

impl Position {
    pub fn is_option(&self) -> bool {
        self.option_type.is_some()
    }
}

/// A working or historical order at a broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub symbol: String,
    pub quantity: Decimal,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub limit_price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub filled_price: Option<Decimal>,
    pub filled_quantity: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub filled_at: Option<DateTime<Utc>>,
    pub account_id: String,
    pub broker: String,
}

/// Parameters for placing a new order through a broker provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: String,
    pub quantity: Decimal,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub limit_price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub account_id: String,
}
