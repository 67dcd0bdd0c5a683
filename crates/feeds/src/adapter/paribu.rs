use super::{get_json, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

const TICKER_URL: &str = "https://www.paribu.com/ticker";

/// One market out of the `"BTC_TL": {...}` ticker object.
#[derive(Debug, Deserialize)]
struct ParibuTicker {
    #[serde(rename = "lowestAsk")]
    lowest_ask: f64,
    #[serde(rename = "highestBid")]
    highest_bid: f64,
}

pub struct ParibuAdapter;

#[async_trait]
impl TickerAdapter for ParibuAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Paribu
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let tickers: HashMap<String, ParibuTicker> =
            get_json(client, Exchange::Paribu, TICKER_URL).await?;

        let mut quotes = Vec::new();
        for (pair, ticker) in &tickers {
            // Markets are keyed "{SYMBOL}_TL".
            let Some(symbol) = pair.strip_suffix("_TL").and_then(Symbol::from_str) else {
                continue;
            };
            quotes.push(Quote::new(
                Exchange::Paribu,
                Currency::Try,
                symbol,
                ticker.lowest_ask,
                ticker.highest_bid,
            ));
        }
        Ok(quotes)
    }
}
