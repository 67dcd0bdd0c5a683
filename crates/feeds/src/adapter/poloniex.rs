use super::{get_json, parse_price, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

const TICKER_URL: &str = "https://poloniex.com/public?command=returnTicker";

#[derive(Debug, Deserialize)]
struct PoloniexTicker {
    #[serde(rename = "lowestAsk")]
    lowest_ask: String,
    #[serde(rename = "highestBid")]
    highest_bid: String,
}

pub struct PoloniexAdapter;

impl PoloniexAdapter {
    /// Map a Poloniex pair name to a monitored symbol. BTC_* markets
    /// carry the altcoins; USDT_BTC is the inverse dollar pair.
    fn symbol_for_pair(pair: &str) -> Option<Symbol> {
        if pair == "USDT_BTC" {
            return Some(Symbol::Usdt);
        }
        let base = pair.strip_prefix("BTC_")?;
        Symbol::from_str(base)
    }
}

#[async_trait]
impl TickerAdapter for PoloniexAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Poloniex
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let tickers: HashMap<String, PoloniexTicker> =
            get_json(client, Exchange::Poloniex, TICKER_URL).await?;

        let mut quotes = Vec::new();
        for (pair, ticker) in &tickers {
            let Some(symbol) = Self::symbol_for_pair(pair) else {
                continue;
            };
            let ask = parse_price(Exchange::Poloniex, "ask", &ticker.lowest_ask)?;
            let bid = parse_price(Exchange::Poloniex, "bid", &ticker.highest_bid)?;
            quotes.push(Quote::new(Exchange::Poloniex, Currency::Btc, symbol, ask, bid));
        }
        Ok(quotes)
    }
}
