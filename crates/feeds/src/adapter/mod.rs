//! Per-exchange REST ticker adapters.
//!
//! Every adapter fetches its venue's public ticker endpoint(s) and
//! returns quotes in the venue's native currency, restricted to the
//! monitored symbol whitelist. Normalization happens downstream.

mod binance;
mod bitfinex;
mod bitoasis;
mod bittrex;
mod btcturk;
mod gdax;
mod koineks;
mod koinim;
mod paribu;
mod poloniex;
mod vebitcoin;

pub use binance::BinanceAdapter;
pub use bitfinex::BitfinexAdapter;
pub use bitoasis::BitoasisAdapter;
pub use bittrex::BittrexAdapter;
pub use btcturk::BtcTurkAdapter;
pub use gdax::{GdaxAdapter, GDAX_SYMBOLS};
pub use koineks::KoineksAdapter;
pub use koinim::KoinimAdapter;
pub use paribu::ParibuAdapter;
pub use poloniex::PoloniexAdapter;
pub use vebitcoin::VebitcoinAdapter;

use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Exchange, Quote};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// A polled ticker source for one exchange.
#[async_trait]
pub trait TickerAdapter: Send + Sync {
    fn exchange(&self) -> Exchange;

    /// Fetch the current quotes for every monitored symbol this venue
    /// lists. An error means the whole venue is unusable this cycle.
    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError>;
}

/// GET a JSON endpoint, mapping non-2xx statuses to a feed error.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    exchange: Exchange,
    url: &str,
) -> Result<T, FeedError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            exchange,
            status: status.as_u16(),
        });
    }
    Ok(response.json().await?)
}

/// Parse a string-encoded price field.
pub(crate) fn parse_price(exchange: Exchange, field: &str, raw: &str) -> Result<f64, FeedError> {
    raw.trim()
        .parse()
        .map_err(|_| FeedError::malformed(exchange, format!("bad {field} price {raw:?}")))
}
