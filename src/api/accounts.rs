//! Accounts and portfolios service.

use std::sync::Arc;

use crate::client::{ClientInner, Page};
use crate::models::{Account, Portfolio};
use crate::Result;

/// Service for account and portfolio operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: robinhood_rs::RobinhoodClient) -> robinhood_rs::Result<()> {
/// for portfolio in client.accounts().portfolios().await? {
///     println!("equity: {}", portfolio.equity);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the accounts visible to the current session.
    pub async fn list(&self) -> Result<Vec<Account>> {
        let page: Page<Account> = self
            .inner
            .get_and_decode(&self.inner.config.url("/accounts/"))
            .await?;
        Ok(page.results)
    }

    /// Get the portfolio summaries for all accounts.
    pub async fn portfolios(&self) -> Result<Vec<Portfolio>> {
        let page: Page<Portfolio> = self
            .inner
            .get_and_decode(&self.inner.config.url("/portfolios/"))
            .await?;
        Ok(page.results)
    }
}
