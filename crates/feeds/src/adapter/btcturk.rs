use super::{get_json, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const TICKER_URL: &str = "https://api.btcturk.com/api/v2/ticker";

#[derive(Debug, Deserialize)]
struct TickerEnvelope {
    data: Vec<PairTicker>,
}

#[derive(Debug, Deserialize)]
struct PairTicker {
    pair: String,
    ask: f64,
    bid: f64,
}

pub struct BtcTurkAdapter;

#[async_trait]
impl TickerAdapter for BtcTurkAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::BtcTurk
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let envelope: TickerEnvelope = get_json(client, Exchange::BtcTurk, TICKER_URL).await?;

        let mut quotes = Vec::new();
        for ticker in &envelope.data {
            let Some(symbol) = ticker.pair.strip_suffix("TRY").and_then(Symbol::from_str) else {
                continue;
            };
            quotes.push(Quote::new(
                Exchange::BtcTurk,
                Currency::Try,
                symbol,
                ticker.ask,
                ticker.bid,
            ));
        }
        Ok(quotes)
    }
}
