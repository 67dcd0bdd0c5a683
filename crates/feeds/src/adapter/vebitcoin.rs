use super::{get_json, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const TICKER_URL: &str = "https://prod-data-publisher.azurewebsites.net/api/ticker";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MarketTicker {
    source_coin_code: String,
    target_coin_code: String,
    ask: f64,
    bid: f64,
}

pub struct VebitcoinAdapter;

#[async_trait]
impl TickerAdapter for VebitcoinAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Vebitcoin
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let tickers: Vec<MarketTicker> =
            get_json(client, Exchange::Vebitcoin, TICKER_URL).await?;

        let mut quotes = Vec::new();
        for ticker in &tickers {
            if ticker.target_coin_code != "TRY" {
                continue;
            }
            let Some(symbol) = Symbol::from_str(&ticker.source_coin_code) else {
                continue;
            };
            // The upstream API swaps the fields: the real ask price is
            // published under "Bid" and vice versa.
            quotes.push(Quote::new(
                Exchange::Vebitcoin,
                Currency::Try,
                symbol,
                ticker.bid,
                ticker.ask,
            ));
        }
        Ok(quotes)
    }
}
