//! Data models for the Robinhood API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Newtype identifiers like `Symbol` and `OrderId`
//! - [`account`] - Account and portfolio models
//! - [`position`] - Stock and aggregate options positions
//! - [`order`] - Options orders, legs, and executions
//!
//! A quirk of the upstream wire format: numeric fields in domain payloads
//! arrive as JSON **strings** (`"0.45000000"`), not native numbers. Models
//! decode them through `rust_decimal`'s string serde modules and re-encode
//! them the same way.

pub mod account;
pub mod order;
pub mod position;
pub mod primitives;

pub use account::*;
pub use order::*;
pub use position::*;
pub use primitives::*;
