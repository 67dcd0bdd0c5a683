use super::{get_json, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "http://koinim.com/api/v1/ticker";

const SYMBOLS: &[Symbol] = &[
    Symbol::Btc,
    Symbol::Eth,
    Symbol::Ltc,
    Symbol::Bch,
    Symbol::Doge,
];

#[derive(Debug, Deserialize)]
struct Ticker {
    ask: f64,
    bid: f64,
}

pub struct KoinimAdapter;

#[async_trait]
impl TickerAdapter for KoinimAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Koinim
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let mut quotes = Vec::with_capacity(SYMBOLS.len());
        for &symbol in SYMBOLS {
            let url = format!("{BASE_URL}/{symbol}_TRY/");
            let ticker: Ticker = get_json(client, Exchange::Koinim, &url).await?;
            quotes.push(Quote::new(
                Exchange::Koinim,
                Currency::Try,
                symbol,
                ticker.ask,
                ticker.bid,
            ));
        }
        Ok(quotes)
    }
}
