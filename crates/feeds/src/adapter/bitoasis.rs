use super::{get_json, parse_price, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.bitoasis.net/v1/exchange/ticker";

const SYMBOLS: &[Symbol] = &[
    Symbol::Btc,
    Symbol::Eth,
    Symbol::Ltc,
    Symbol::Xrp,
    Symbol::Xlm,
];

#[derive(Debug, Deserialize)]
struct TickerEnvelope {
    ticker: Ticker,
}

#[derive(Debug, Deserialize)]
struct Ticker {
    ask: String,
    bid: String,
}

pub struct BitoasisAdapter;

#[async_trait]
impl TickerAdapter for BitoasisAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Bitoasis
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let mut quotes = Vec::with_capacity(SYMBOLS.len());
        for &symbol in SYMBOLS {
            let url = format!("{BASE_URL}/{symbol}-AED");
            let envelope: TickerEnvelope = get_json(client, Exchange::Bitoasis, &url).await?;

            let ask = parse_price(Exchange::Bitoasis, "ask", &envelope.ticker.ask)?;
            let bid = parse_price(Exchange::Bitoasis, "bid", &envelope.ticker.bid)?;
            quotes.push(Quote::new(Exchange::Bitoasis, Currency::Aed, symbol, ask, bid));
        }
        Ok(quotes)
    }
}
