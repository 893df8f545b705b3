//! Stock and aggregate options position models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::Symbol;

/// Direction of a position or leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionType {
    /// Long position
    Long,
    /// Short position
    Short,
}

/// A stock position in an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// URL of the owning account
    pub account: String,
    /// URL of the instrument held
    pub instrument: String,
    /// Number of shares held
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    /// Average cost basis per share
    #[serde(with = "rust_decimal::serde::str")]
    pub average_buy_price: Decimal,
    /// Average cost basis for shares acquired today
    #[serde(with = "rust_decimal::serde::str")]
    pub intraday_average_buy_price: Decimal,
    /// Shares acquired today
    #[serde(with = "rust_decimal::serde::str")]
    pub intraday_quantity: Decimal,
    /// Shares reserved for open buy orders
    #[serde(with = "rust_decimal::serde::str")]
    pub shares_held_for_buys: Decimal,
    /// Shares reserved for open sell orders
    #[serde(with = "rust_decimal::serde::str")]
    pub shares_held_for_sells: Decimal,
    /// Resource URL of this position
    #[serde(default)]
    pub url: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An aggregate options position (one strategy, one or more legs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionPosition {
    /// Unique id of this aggregate position
    pub id: String,
    /// URL of the option chain
    pub chain: String,
    /// Underlying symbol
    pub symbol: Symbol,
    /// URL of the owning account
    pub account: String,
    /// Strategy name (e.g., "long_call", "short_put_spread")
    pub strategy: String,
    /// Net direction of the aggregate position
    pub direction: String,
    /// Number of contracts held
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    /// Average open price across the legs
    #[serde(with = "rust_decimal::serde::str")]
    pub average_open_price: Decimal,
    /// Average open price for contracts opened today
    #[serde(with = "rust_decimal::serde::str")]
    pub intraday_average_open_price: Decimal,
    /// Contracts opened today
    #[serde(default)]
    pub intraday_quantity: Option<String>,
    /// Intraday direction of the position
    #[serde(default)]
    pub intraday_direction: Option<String>,
    /// Contract multiplier, as reported by the API
    #[serde(default)]
    pub trade_value_multiplier: Option<String>,
    /// The individual legs of the strategy
    #[serde(default)]
    pub legs: Vec<LegPosition>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One contract within an aggregate options position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegPosition {
    /// Unique id of this leg
    pub id: String,
    /// URL of the underlying single-option position
    pub position: String,
    /// Whether the leg is held long or short
    pub position_type: PositionType,
    /// URL of the option instrument
    pub option: String,
    /// Contracts of this leg per unit of the strategy
    pub ratio_quantity: i32,
    /// Contract expiration date
    pub expiration_date: NaiveDate,
    /// Strike price of the contract
    #[serde(with = "rust_decimal::serde::str")]
    pub strike_price: Decimal,
    /// "call" or "put"
    pub option_type: String,
}
