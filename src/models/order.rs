//! Options order models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::{OrderId, Symbol};

/// Whether an order's net premium is paid or received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionDirection {
    /// Premium is paid (e.g., buying options)
    Debit,
    /// Premium is received (e.g., selling options)
    Credit,
}

/// Side of an order leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy
    Buy,
    /// Sell
    Sell,
}

/// Order execution type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Execute at the given price or better
    Limit,
    /// Execute immediately at the current market price
    Market,
}

/// How long an order remains active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    /// Good for day
    Gfd,
    /// Good till cancelled
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
    /// Execute at market open
    Opg,
}

/// Lifecycle state of an options order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionOrderState {
    /// Accepted, waiting to be confirmed
    Queued,
    /// Received but not yet acknowledged
    Unconfirmed,
    /// Acknowledged by the venue
    Confirmed,
    /// Some contracts have executed
    PartiallyFilled,
    /// All contracts executed
    Filled,
    /// Rejected by the broker or venue
    Rejected,
    /// Cancelled before completion
    Cancelled,
    /// Failed during processing
    Failed,
    /// Any state this crate does not know about
    #[serde(other)]
    Unknown,
}

/// Common choices when placing an options order.
///
/// # Example
///
/// ```
/// use robinhood_rs::models::{
///     OptionDirection, OptionOrderOpts, OrderSide, OrderType, TimeInForce,
/// };
/// use rust_decimal_macros::dec;
///
/// let opts = OptionOrderOpts {
///     quantity: dec!(2),
///     price: dec!(0.45),
///     direction: OptionDirection::Debit,
///     side: OrderSide::Buy,
///     order_type: OrderType::Limit,
///     time_in_force: TimeInForce::Gfd,
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OptionOrderOpts {
    /// Number of contracts
    pub quantity: Decimal,
    /// Limit price per contract
    pub price: Decimal,
    /// Net premium direction
    pub direction: OptionDirection,
    /// Time in force
    pub time_in_force: TimeInForce,
    /// Order type
    pub order_type: OrderType,
    /// Buy or sell
    pub side: OrderSide,
}

impl Default for OptionOrderOpts {
    fn default() -> Self {
        Self {
            quantity: Decimal::ZERO,
            price: Decimal::ZERO,
            direction: OptionDirection::Debit,
            time_in_force: TimeInForce::Gfd,
            order_type: OrderType::Limit,
            side: OrderSide::Buy,
        }
    }
}

/// A single fill against an order leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    /// Unique id of this execution
    pub id: String,
    /// Execution price per contract
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Contracts filled in this execution
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    /// Settlement date
    pub settlement_date: NaiveDate,
    /// When the execution occurred
    pub timestamp: DateTime<Utc>,
}

/// One option contract within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLeg {
    /// Unique id of this leg
    pub id: String,
    /// URL of the option instrument
    pub option: String,
    /// "open" or "close"
    pub position_effect: String,
    /// Contracts of this leg per unit of the order.
    ///
    /// Unlike the other numeric fields, listings deliver this one as a
    /// native JSON number, and it round-trips as one.
    #[serde(with = "rust_decimal::serde::float")]
    pub ratio_quantity: Decimal,
    /// Buy or sell
    pub side: OrderSide,
    /// Fills recorded against this leg
    #[serde(default)]
    pub executions: Vec<Execution>,
}

/// An options order as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionOrder {
    /// Unique order id
    pub id: OrderId,
    /// Client-generated idempotency reference
    pub ref_id: String,
    /// Current lifecycle state
    pub state: OptionOrderState,
    /// Net premium direction
    pub direction: OptionDirection,
    /// The order's legs
    pub legs: Vec<OrderLeg>,
    /// Total contracts requested
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    /// Limit price per contract
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Contracts not yet filled
    #[serde(with = "rust_decimal::serde::str")]
    pub pending_quantity: Decimal,
    /// Contracts filled so far
    #[serde(with = "rust_decimal::serde::str")]
    pub processed_quantity: Decimal,
    /// Contracts cancelled before filling
    #[serde(with = "rust_decimal::serde::str")]
    pub canceled_quantity: Decimal,
    /// Total premium of the order
    #[serde(with = "rust_decimal::serde::str")]
    pub premium: Decimal,
    /// Premium of the filled portion
    #[serde(with = "rust_decimal::serde::str")]
    pub processed_premium: Decimal,
    /// Stop price, for stop orders
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub stop_price: Option<Decimal>,
    /// Trigger condition ("immediate" for plain orders)
    pub trigger: String,
    /// Order execution type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Time in force
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    /// URL to POST to in order to cancel, while cancellable
    #[serde(default)]
    pub cancel_url: Option<String>,
    /// Id of the option chain
    pub chain_id: String,
    /// Underlying symbol of the chain
    pub chain_symbol: Symbol,
    /// Strategy used to open, if this order opened a position
    #[serde(default)]
    pub opening_strategy: Option<String>,
    /// Strategy being closed, if this order closes a position
    #[serde(default)]
    pub closing_strategy: Option<String>,
    /// Broker response category, when present
    #[serde(default)]
    pub response_category: Option<String>,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// When the order was last updated
    pub updated_at: DateTime<Utc>,
}

impl OptionOrder {
    /// Returns `true` if this order closes an existing position.
    pub fn is_closing_order(&self) -> bool {
        self.closing_strategy.as_deref().is_some_and(|s| !s.is_empty())
    }
}
