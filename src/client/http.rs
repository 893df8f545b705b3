//! HTTP client implementation for the Robinhood API.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{AccountsService, OrdersService, PositionsService};
use crate::auth::TokenSource;
use crate::models::Account;
use crate::{Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the Robinhood API.
///
/// A client is created through [`dial`](RobinhoodClient::dial), which
/// validates credentials by resolving a token and loading the account the
/// session will trade against. Domain calls are grouped into services.
///
/// The client holds no background resources; dropping it tears nothing
/// down. Dropping an in-flight request future cancels the HTTP call, never
/// a server-side effect the broker has already accepted.
///
/// # Example
///
/// ```no_run
/// use robinhood_rs::auth::{Credentials, TokenCache};
/// use robinhood_rs::RobinhoodClient;
///
/// # async fn example() -> robinhood_rs::Result<()> {
/// let creds = Credentials::new("user@example.com", "hunter2");
/// let cache = TokenCache::with_default_path(creds)?;
/// let client = RobinhoodClient::dial(cache).await?;
///
/// let positions = client.positions().list().await?;
/// let mut orders = client.orders().iter_options();
/// while orders.has_next() {
///     for order in orders.next_page().await? {
///         println!("{:?}", order.state);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct RobinhoodClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) source: Arc<dyn TokenSource>,
    pub(crate) config: ClientConfig,
    pub(crate) account: Option<Account>,
}

impl RobinhoodClient {
    /// Connect with the default configuration.
    ///
    /// Resolves a token through `source` (which may read the cache or log
    /// in, including failing with a missing-MFA challenge) and performs the
    /// initial `/accounts/` handshake.
    pub async fn dial(source: impl TokenSource + 'static) -> Result<Self> {
        Self::dial_with_config(source, ClientConfig::default()).await
    }

    /// Connect with a custom configuration.
    pub async fn dial_with_config(
        source: impl TokenSource + 'static,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let mut inner = ClientInner {
            http,
            source: Arc::new(source),
            config,
            account: None,
        };

        // Validates credentials: a bad password or MFA challenge surfaces
        // here rather than on the first domain call.
        inner.source.token().await?;

        let page: Page<Account> = inner
            .get_and_decode(&inner.config.url("/accounts/"))
            .await?;
        inner.account = page.results.into_iter().next();

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Get the accounts and portfolios service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the positions service.
    pub fn positions(&self) -> PositionsService {
        PositionsService::new(self.inner.clone())
    }

    /// Get the options orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// The account loaded during the dial handshake, if any.
    pub fn account(&self) -> Option<&Account> {
        self.inner.account.as_ref()
    }
}

impl ClientInner {
    /// Issue a GET against a full URL and decode the JSON response.
    ///
    /// The bearer token is re-resolved from the token source on every call;
    /// the executor itself never caches it in memory.
    pub(crate) async fn get_and_decode<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.http.get(url);
        self.do_and_decode(url, request).await
    }

    /// Issue a POST with a JSON body against a full URL and decode the
    /// response.
    pub(crate) async fn post_and_decode<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http.post(url).json(body);
        self.do_and_decode(url, request).await
    }

    /// Attach the bearer token, send, and decode.
    ///
    /// No retry at this layer: a transient transport failure or a 401 from
    /// an expired access token is the caller's to handle.
    async fn do_and_decode<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let token = self.source.token().await?;

        let response = request
            .header(AUTHORIZATION, token.bearer_header())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if self.config.debug {
            tracing::debug!(%url, status = status.as_u16(), %body, "api response");
        }

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// URL of the account loaded at dial time.
    pub(crate) fn account_url(&self) -> Result<&str> {
        self.account
            .as_ref()
            .map(|a| a.url.as_str())
            .ok_or_else(|| Error::Config("no account was loaded during dial".into()))
    }
}

/// A single page of a cursor-paginated list response.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

impl Clone for RobinhoodClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for RobinhoodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobinhoodClient")
            .field("config", &self.inner.config)
            .field(
                "account",
                &self.inner.account.as_ref().map(|a| &a.account_number),
            )
            .finish()
    }
}
