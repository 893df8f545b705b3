//! Authentication and token lifecycle for the Robinhood API.
//!
//! Two composable [`TokenSource`] implementations are provided:
//!
//! 1. [`Credentials`] - username/password login (with optional MFA code)
//! 2. [`TokenCache`] - decorates any source with on-disk persistence
//!
//! # Typical flow
//!
//! ```no_run
//! use robinhood_rs::auth::{Credentials, TokenCache};
//! use robinhood_rs::RobinhoodClient;
//!
//! # async fn example() -> robinhood_rs::Result<()> {
//! let creds = Credentials::new("user@example.com", "hunter2");
//! let cache = TokenCache::with_default_path(creds)?;
//! let client = RobinhoodClient::dial(cache).await?;
//! # Ok(())
//! # }
//! ```
//!
//! If the account requires a second factor, the first dial fails with an
//! error for which [`Error::is_missing_mfa`](crate::Error::is_missing_mfa)
//! returns `true`; prompt the user and dial again with
//! [`Credentials::with_mfa`] filled in.

mod cache;
mod oauth;
mod token;

pub use cache::TokenCache;
pub use oauth::{Credentials, DEFAULT_CLIENT_ID, DEFAULT_TOKEN_ENDPOINT};
pub use token::{Token, TokenSource};
