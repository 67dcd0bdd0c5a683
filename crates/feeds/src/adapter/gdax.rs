//! Reference exchange REST fallback.
//!
//! The websocket push feed normally keeps the reference prices fresh;
//! this adapter seeds them at startup and backfills when the stream is
//! down.

use super::{get_json, parse_price, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.exchange.coinbase.com";

/// USD products the reference exchange lists.
pub const GDAX_SYMBOLS: &[Symbol] = &[
    Symbol::Btc,
    Symbol::Eth,
    Symbol::Ltc,
    Symbol::Bch,
    Symbol::Etc,
    Symbol::Zrx,
    Symbol::Xrp,
    Symbol::Xlm,
];

/// Level-1 book: `{"bids":[["price","size",count]],"asks":[...]}`.
#[derive(Debug, Deserialize)]
struct Level1Book {
    bids: Vec<(String, String, u32)>,
    asks: Vec<(String, String, u32)>,
}

pub struct GdaxAdapter;

#[async_trait]
impl TickerAdapter for GdaxAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Gdax
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let mut quotes = Vec::with_capacity(GDAX_SYMBOLS.len());
        for &symbol in GDAX_SYMBOLS {
            let url = format!("{BASE_URL}/products/{symbol}-USD/book?level=1");
            let book: Level1Book = get_json(client, Exchange::Gdax, &url).await?;

            let best_ask = book
                .asks
                .first()
                .ok_or_else(|| FeedError::malformed(Exchange::Gdax, format!("{symbol}: empty asks")))?;
            let best_bid = book
                .bids
                .first()
                .ok_or_else(|| FeedError::malformed(Exchange::Gdax, format!("{symbol}: empty bids")))?;

            let ask = parse_price(Exchange::Gdax, "ask", &best_ask.0)?;
            let bid = parse_price(Exchange::Gdax, "bid", &best_bid.0)?;
            quotes.push(Quote::new(Exchange::Gdax, Currency::Usd, symbol, ask, bid));
        }
        Ok(quotes)
    }
}
