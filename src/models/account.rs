//! Account and portfolio models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A brokerage account.
///
/// The `url` is the account's canonical resource URL; order bodies reference
/// the account by this URL rather than by number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Canonical resource URL for this account
    pub url: String,
    /// Human-facing account number
    pub account_number: String,
    /// Account classification (e.g., "cash", "margin")
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    /// Available buying power
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub buying_power: Option<Decimal>,
    /// Settled cash balance
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub cash: Option<Decimal>,
    /// When the account was opened
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A point-in-time portfolio summary for an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    /// URL of the account this portfolio belongs to
    pub account: String,
    /// Total account equity
    #[serde(with = "rust_decimal::serde::str")]
    pub equity: Decimal,
    /// Market value of held positions
    #[serde(with = "rust_decimal::serde::str")]
    pub market_value: Decimal,
    /// Equity including extended-hours moves, when the market is closed
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub extended_hours_equity: Option<Decimal>,
    /// Amount currently withdrawable
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub withdrawable_amount: Option<Decimal>,
    /// Equity at the last market close
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub last_core_equity: Option<Decimal>,
}
