//! API service modules for Robinhood endpoints.
//!
//! Each service provides methods for one subset of the API. Services are
//! cheap handles over the shared client and can be created freely.

mod accounts;
mod orders;
mod positions;

pub use accounts::AccountsService;
pub use orders::OrdersService;
pub use positions::{PositionParams, PositionsService};
