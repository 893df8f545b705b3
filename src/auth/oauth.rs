//! Username/password authentication against the Robinhood identity endpoint.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::{Token, TokenSource};

/// OAuth client id used by the official Robinhood web client.
pub const DEFAULT_CLIENT_ID: &str = "c82SH0WZOsabOXGP2sxqcj34FxkvfnWRZBKlBjFS";

/// Production token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://api.robinhood.com/oauth2/token/";

const TOKEN_LIFETIME_SECS: i64 = 86400;

/// Primary credential source: authenticates with username and password.
///
/// If the account has multi-factor authentication enabled and no code was
/// supplied, [`token`](TokenSource::token) fails with
/// [`Error::MissingMfa`]. The caller should prompt for the code and retry
/// with [`with_mfa`](Credentials::with_mfa) filled in; the source itself
/// never loops waiting for a code.
///
/// # Example
///
/// ```no_run
/// use robinhood_rs::auth::{Credentials, TokenSource};
///
/// # async fn example() -> robinhood_rs::Result<()> {
/// let creds = Credentials::new("user@example.com", "hunter2");
/// let attempt = creds.token().await;
/// let token = match attempt {
///     Err(e) if e.is_missing_mfa() => {
///         let code = prompt_for_sms_code();
///         creds.with_mfa(code).token().await?
///     }
///     other => other?,
/// };
/// # Ok(())
/// # }
/// # fn prompt_for_sms_code() -> String { String::new() }
/// ```
pub struct Credentials {
    username: String,
    password: SecretString,
    mfa: Option<String>,
    client_id: String,
    device_token: String,
    endpoint: String,
    http: tokio::sync::OnceCell<reqwest::Client>,
}

impl Credentials {
    /// Create a credential source for a username/password pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            mfa: None,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            device_token: uuid::Uuid::new_v4().to_string(),
            endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            http: tokio::sync::OnceCell::new(),
        }
    }

    /// Supply a multi-factor code for the next login attempt.
    pub fn with_mfa(mut self, code: impl Into<String>) -> Self {
        self.mfa = Some(code.into());
        self
    }

    /// Override the OAuth client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Override the token endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    grant_type: &'static str,
    scope: &'static str,
    client_id: &'a str,
    device_token: &'a str,
    expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mfa_code: Option<&'a str>,
}

#[derive(Deserialize)]
struct Challenge {
    #[serde(default)]
    mfa_required: bool,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[async_trait]
impl TokenSource for Credentials {
    async fn token(&self) -> Result<Token> {
        let body = LoginRequest {
            username: &self.username,
            password: self.password.expose_secret(),
            grant_type: "password",
            scope: "internal",
            client_id: &self.client_id,
            device_token: &self.device_token,
            expires_in: TOKEN_LIFETIME_SECS,
            mfa_code: self.mfa.as_deref(),
        };

        // Built once per source; a TLS initialization failure surfaces as
        // an error rather than a panic.
        let client = self
            .http
            .get_or_try_init(|| async { reqwest::Client::builder().build() })
            .await?;
        let response = client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Authentication(format!(
                "login failed ({}): {}",
                status.as_u16(),
                text
            )));
        }

        // A successful status can still be an MFA challenge rather than a
        // token grant.
        if let Ok(challenge) = serde_json::from_str::<Challenge>(&text) {
            if challenge.mfa_required {
                return Err(Error::MissingMfa);
            }
        }

        let grant: TokenResponse = serde_json::from_str(&text)?;
        Ok(Token {
            access_token: grant.access_token,
            token_type: grant.token_type.unwrap_or_else(|| "Bearer".to_string()),
            refresh_token: grant.refresh_token,
            expiry: grant
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("mfa", &self.mfa.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
