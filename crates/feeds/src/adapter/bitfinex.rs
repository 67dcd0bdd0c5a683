use super::{get_json, parse_price, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.bitfinex.com/v1/pubticker";

const SYMBOLS: &[Symbol] = &[Symbol::Btc, Symbol::Eth, Symbol::Ltc, Symbol::Xlm];

#[derive(Debug, Deserialize)]
struct PubTicker {
    ask: String,
    bid: String,
}

pub struct BitfinexAdapter;

#[async_trait]
impl TickerAdapter for BitfinexAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Bitfinex
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let mut quotes = Vec::with_capacity(SYMBOLS.len());
        for &symbol in SYMBOLS {
            let pair = format!("{}USD", symbol).to_lowercase();
            let url = format!("{BASE_URL}/{pair}");
            let ticker: PubTicker = get_json(client, Exchange::Bitfinex, &url).await?;

            let ask = parse_price(Exchange::Bitfinex, "ask", &ticker.ask)?;
            let bid = parse_price(Exchange::Bitfinex, "bid", &ticker.bid)?;
            quotes.push(Quote::new(Exchange::Bitfinex, Currency::Usd, symbol, ask, bid));
        }
        Ok(quotes)
    }
}
