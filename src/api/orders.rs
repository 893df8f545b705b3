//! Options orders service: listing, pagination, and placement.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::client::paginated::Paginated;
use crate::client::{ClientInner, Page};
use crate::models::{OptionDirection, OptionOrder, OptionOrderOpts, OrderSide, OrderType, TimeInForce};
use crate::Result;

/// Service for options order operations.
///
/// # Example
///
/// ```no_run
/// use robinhood_rs::models::{OptionOrderOpts, OrderSide};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: robinhood_rs::RobinhoodClient) -> robinhood_rs::Result<()> {
/// let opts = OptionOrderOpts {
///     quantity: dec!(1),
///     price: dec!(0.45),
///     side: OrderSide::Buy,
///     ..Default::default()
/// };
/// let placed = client
///     .orders()
///     .place("https://api.robinhood.com/options/instruments/abc/", opts)
///     .await?;
/// println!("{}", placed);
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the first page of options orders.
    ///
    /// Use [`iter_options`](Self::iter_options) to walk the full history.
    pub async fn options(&self) -> Result<Vec<OptionOrder>> {
        let page: Page<OptionOrder> = self
            .inner
            .get_and_decode(&self.inner.config.url("/options/orders/"))
            .await?;
        Ok(page.results)
    }

    /// Iterate over every options order ever seen, page by page.
    pub fn iter_options(&self) -> Paginated<OptionOrder> {
        Paginated::new(self.inner.clone(), self.inner.config.url("/options/orders/"))
    }

    /// Place a single-leg options order.
    ///
    /// `option_url` is the option instrument's resource URL. The leg's
    /// position effect is "open" for buys and "close" for sells. Each call
    /// generates a fresh `ref_id`; retrying a failed call therefore places a
    /// *new* order rather than replaying the old one. Callers wanting
    /// at-most-once behavior must track the returned order themselves.
    ///
    /// Dropping the returned future cancels the HTTP request, never an
    /// order the broker has already accepted.
    pub async fn place(
        &self,
        option_url: &str,
        opts: OptionOrderOpts,
    ) -> Result<serde_json::Value> {
        let body = OrderInput::new(self.inner.account_url()?, option_url, &opts);
        self.inner
            .post_and_decode(&self.inner.config.url("/options/orders/"), &body)
            .await
    }
}

/// Wire-format order body.
#[derive(Debug, Serialize)]
struct OrderInput<'a> {
    account: &'a str,
    direction: OptionDirection,
    legs: Vec<LegInput<'a>>,
    override_day_trade_checks: bool,
    override_dtbp_checks: bool,
    #[serde(with = "rust_decimal::serde::str")]
    price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    quantity: Decimal,
    ref_id: String,
    time_in_force: TimeInForce,
    trigger: &'static str,
    #[serde(rename = "type")]
    order_type: OrderType,
}

#[derive(Debug, Serialize)]
struct LegInput<'a> {
    option: &'a str,
    position_effect: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    ratio_quantity: Decimal,
    side: OrderSide,
}

impl<'a> OrderInput<'a> {
    fn new(account: &'a str, option_url: &'a str, opts: &OptionOrderOpts) -> Self {
        let position_effect = match opts.side {
            OrderSide::Buy => "open",
            OrderSide::Sell => "close",
        };
        Self {
            account,
            direction: opts.direction,
            legs: vec![LegInput {
                option: option_url,
                position_effect,
                ratio_quantity: Decimal::ONE,
                side: opts.side,
            }],
            override_day_trade_checks: false,
            override_dtbp_checks: false,
            price: opts.price,
            quantity: opts.quantity,
            ref_id: uuid::Uuid::new_v4().to_string(),
            time_in_force: opts.time_in_force,
            trigger: "immediate",
            order_type: opts.order_type,
        }
    }
}
