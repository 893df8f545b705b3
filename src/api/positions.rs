//! Stock and options positions service.

use std::sync::Arc;

use crate::client::{ClientInner, Page};
use crate::models::{OptionPosition, Position};
use crate::Result;

/// Parameters understood by the positions endpoints.
///
/// By default, positions with zero quantity are included in results;
/// excluding them is opt-in.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionParams {
    /// Only return positions with a non-zero quantity
    pub nonzero: bool,
}

impl PositionParams {
    /// Parameters that exclude zero-quantity positions.
    pub fn nonzero() -> Self {
        Self { nonzero: true }
    }

    /// Apply these parameters to an endpoint URL.
    fn apply(&self, endpoint: &str) -> Result<String> {
        let mut url = url::Url::parse(endpoint)?;
        if self.nonzero {
            // The API expects a capitalized boolean here.
            url.query_pairs_mut().append_pair("nonzero", "True");
        }
        Ok(url.to_string())
    }
}

/// Service for position listings.
///
/// # Example
///
/// ```no_run
/// use robinhood_rs::api::PositionParams;
///
/// # async fn example(client: robinhood_rs::RobinhoodClient) -> robinhood_rs::Result<()> {
/// // All positions, zero-quantity included.
/// let all = client.positions().list().await?;
///
/// // Open options positions only.
/// let open = client
///     .positions()
///     .options_with(PositionParams::nonzero())
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct PositionsService {
    inner: Arc<ClientInner>,
}

impl PositionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List all stock positions for the account.
    pub async fn list(&self) -> Result<Vec<Position>> {
        self.list_with(PositionParams::default()).await
    }

    /// List stock positions with explicit parameters.
    pub async fn list_with(&self, params: PositionParams) -> Result<Vec<Position>> {
        let url = params.apply(&self.inner.config.url("/positions/"))?;
        let page: Page<Position> = self.inner.get_and_decode(&url).await?;
        Ok(page.results)
    }

    /// List aggregate options positions for the account.
    pub async fn options(&self) -> Result<Vec<OptionPosition>> {
        self.options_with(PositionParams::default()).await
    }

    /// List aggregate options positions with explicit parameters.
    pub async fn options_with(&self, params: PositionParams) -> Result<Vec<OptionPosition>> {
        let url = params.apply(&self.inner.config.url("/options/aggregate_positions/"))?;
        let page: Page<OptionPosition> = self.inner.get_and_decode(&url).await?;
        Ok(page.results)
    }
}
