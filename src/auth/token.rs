//! Bearer token and the token-source seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A bearer credential pair for the Robinhood API.
///
/// A token is usable only when both the access and refresh tokens are
/// non-empty. The `expiry` field is stored for informational purposes but is
/// never consulted by this crate: a stale access token is detected by the
/// remote API (401), at which point the caller re-acquires through its
/// [`TokenSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Short-lived bearer token attached to API requests
    pub access_token: String,
    /// Token type, normally `Bearer`
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Long-lived token used to obtain fresh access tokens
    pub refresh_token: String,
    /// Expiry timestamp, if the identity service reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    /// Create a token from an access/refresh pair with no expiry.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            refresh_token: refresh_token.into(),
            expiry: None,
        }
    }

    /// Returns `true` if both the access and refresh tokens are populated.
    pub fn is_usable(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }

    /// The `Authorization` header value for this token.
    pub fn bearer_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Anything that can produce a [`Token`], fallibly.
///
/// Two implementations ship with this crate:
///
/// - [`Credentials`](crate::auth::Credentials) authenticates against the
///   identity endpoint with username/password (and optionally an MFA code).
/// - [`TokenCache`](crate::auth::TokenCache) decorates any other source with
///   on-disk persistence so a token survives process restarts.
///
/// The client re-resolves the token through this seam on every request, so
/// an implementation is free to return a cached value or perform I/O.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Produce a token, authenticating if necessary.
    async fn token(&self) -> Result<Token>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_requires_both_fields() {
        assert!(Token::new("a", "r").is_usable());
        assert!(!Token::new("", "r").is_usable());
        assert!(!Token::new("a", "").is_usable());
    }

    #[test]
    fn test_bearer_header() {
        let token = Token::new("abc123", "r");
        assert_eq!(token.bearer_header(), "Bearer abc123");
    }

    #[test]
    fn test_deserialize_defaults_token_type() {
        let token: Token =
            serde_json::from_str(r#"{"access_token":"a","refresh_token":"r"}"#).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert!(token.expiry.is_none());
    }
}
