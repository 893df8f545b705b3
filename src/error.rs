//! Error types for the Robinhood API client.
//!
//! This module provides a single error type covering every failure mode in
//! this crate, from transport errors to authentication challenges to
//! token-cache I/O.

use thiserror::Error;

use crate::auth::Token;

/// A specialized `Result` type for Robinhood operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Robinhood API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("API error: status={status}, body={body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body for diagnostics
        body: String,
    },

    /// Credentials rejected by the identity service
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Login requires a multi-factor code that was not supplied.
    ///
    /// The caller should prompt for the code and retry the login with
    /// [`Credentials::with_mfa`](crate::auth::Credentials::with_mfa) filled
    /// in. Detect this variant with [`Error::is_missing_mfa`].
    #[error("Login requires a multi-factor authentication code")]
    MissingMfa,

    /// File-system failure in the token cache
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fresh token was obtained but could not be written to the cache.
    ///
    /// The token itself is still valid and is carried inside this variant;
    /// recover it with [`Error::persisted_token`].
    #[error("Token obtained but could not be persisted: {source}")]
    CachePersist {
        /// The freshly obtained token, usable despite the write failure
        token: Box<Token>,
        /// The underlying write error
        source: std::io::Error,
    },

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this error signals that a login attempt needs a
    /// multi-factor code before a token can be issued.
    ///
    /// This drives control flow in callers; matching on message text is
    /// never required.
    pub fn is_missing_mfa(&self) -> bool {
        matches!(self, Error::MissingMfa)
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_) | Error::MissingMfa)
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::InvalidInput(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Recover the token carried by a [`Error::CachePersist`] failure.
    ///
    /// Returns `None` for every other variant.
    pub fn persisted_token(&self) -> Option<&Token> {
        match self {
            Error::CachePersist { token, .. } => Some(token),
            _ => None,
        }
    }
}
