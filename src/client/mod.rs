//! HTTP client and request executor for the Robinhood API.
//!
//! This module provides the main entry point [`RobinhoodClient`], created
//! via a [`dial`](RobinhoodClient::dial) handshake that validates
//! credentials and loads the trading account.
//!
//! # Example
//!
//! ```no_run
//! use robinhood_rs::auth::Credentials;
//! use robinhood_rs::RobinhoodClient;
//!
//! # async fn example() -> robinhood_rs::Result<()> {
//! let client = RobinhoodClient::dial(
//!     Credentials::new("user@example.com", "hunter2"),
//! ).await?;
//!
//! let portfolios = client.accounts().portfolios().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use http::RobinhoodClient;
pub use paginated::{PageStream, Paginated};
pub(crate) use http::{ClientInner, Page};
