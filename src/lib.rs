//! # robinhood-rs
//!
//! A Rust client for the Robinhood private HTTP API.
//!
//! This crate covers authentication (including SMS multi-factor), on-disk
//! token caching, and typed access to account data: positions, portfolios,
//! and options orders, with cursor pagination over list endpoints.
//!
//! ## Features
//!
//! - **Authentication**: username/password login with a one-shot MFA
//!   challenge/response flow
//! - **Token caching**: tokens persist across process runs, so MFA is only
//!   prompted once per cache lifetime
//! - **Positions & portfolios**: typed access with the API's
//!   string-encoded numeric wire format preserved via `rust_decimal`
//! - **Options orders**: listing, cursor iteration over full history, and
//!   single-leg placement with client-generated idempotency ids
//! - **Async-first**: built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use robinhood_rs::auth::{Credentials, TokenCache};
//! use robinhood_rs::RobinhoodClient;
//!
//! #[tokio::main]
//! async fn main() -> robinhood_rs::Result<()> {
//!     let creds = Credentials::new("user@example.com", "hunter2");
//!     let cache = TokenCache::with_default_path(creds)?;
//!     let client = RobinhoodClient::dial(cache).await?;
//!
//!     for position in client.positions().list().await? {
//!         println!("{} x {}", position.instrument, position.quantity);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## MFA Challenge
//!
//! When an account requires a second factor, the first dial fails with a
//! distinguished error; prompt the user and retry with the code:
//!
//! ```rust,no_run
//! use robinhood_rs::auth::Credentials;
//! use robinhood_rs::RobinhoodClient;
//!
//! # async fn example(code_from_user: String) -> robinhood_rs::Result<()> {
//! let client = match RobinhoodClient::dial(
//!     Credentials::new("user@example.com", "hunter2"),
//! ).await {
//!     Err(e) if e.is_missing_mfa() => {
//!         RobinhoodClient::dial(
//!             Credentials::new("user@example.com", "hunter2")
//!                 .with_mfa(code_from_user),
//!         ).await?
//!     }
//!     other => other?,
//! };
//! # Ok(())
//! # }
//! ```
//!
//! ## Iterating Order History
//!
//! ```rust,no_run
//! # async fn example(client: robinhood_rs::RobinhoodClient) -> robinhood_rs::Result<()> {
//! let mut orders = client.orders().iter_options();
//! while orders.has_next() {
//!     for order in orders.next_page().await? {
//!         println!("{} {:?}", order.chain_symbol, order.state);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Token, TokenCache, TokenSource};
pub use client::{ClientConfig, PageStream, Paginated, RobinhoodClient};
pub use error::{Error, Result};
pub use models::{OrderId, Symbol};

/// Prelude module for convenient imports.
///
/// ```rust
/// use robinhood_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{AccountsService, OrdersService, PositionParams, PositionsService};
    pub use crate::auth::{Credentials, Token, TokenCache, TokenSource};
    pub use crate::client::{ClientConfig, PageStream, Paginated, RobinhoodClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Account, Execution, LegPosition, OptionDirection, OptionOrder, OptionOrderOpts,
        OptionOrderState, OptionPosition, OrderId, OrderLeg, OrderSide, OrderType, Portfolio,
        Position, PositionType, Symbol, TimeInForce,
    };
}
