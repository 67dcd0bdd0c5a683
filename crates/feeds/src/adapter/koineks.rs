use super::{get_json, parse_price, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.thodex.com/v1/public/order-depth";

const SYMBOLS: &[Symbol] = &[
    Symbol::Btc,
    Symbol::Eth,
    Symbol::Ltc,
    Symbol::Bch,
    Symbol::Usdt,
    Symbol::Etc,
    Symbol::Doge,
    Symbol::Xlm,
];

/// Depth response: `{"result":{"asks":[["price","qty"]],"bids":[...]}}`.
#[derive(Debug, Deserialize)]
struct DepthEnvelope {
    result: Depth,
}

#[derive(Debug, Deserialize)]
struct Depth {
    asks: Vec<(String, String)>,
    bids: Vec<(String, String)>,
}

pub struct KoineksAdapter;

#[async_trait]
impl TickerAdapter for KoineksAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Koineks
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let mut quotes = Vec::with_capacity(SYMBOLS.len());
        for &symbol in SYMBOLS {
            let url = format!("{BASE_URL}?market={symbol}TRY&limit=1");
            let envelope: DepthEnvelope = get_json(client, Exchange::Koineks, &url).await?;

            let best_ask = envelope.result.asks.first().ok_or_else(|| {
                FeedError::malformed(Exchange::Koineks, format!("{symbol}: empty asks"))
            })?;
            let best_bid = envelope.result.bids.first().ok_or_else(|| {
                FeedError::malformed(Exchange::Koineks, format!("{symbol}: empty bids"))
            })?;

            let ask = parse_price(Exchange::Koineks, "ask", &best_ask.0)?;
            let bid = parse_price(Exchange::Koineks, "bid", &best_bid.0)?;
            quotes.push(Quote::new(Exchange::Koineks, Currency::Try, symbol, ask, bid));
        }
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_decodes() {
        let raw = r#"{"result":{"asks":[["1360000","0.2"]],"bids":[["1355000","0.4"]]},"code":200}"#;
        let envelope: DepthEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.result.asks[0].0, "1360000");
        assert_eq!(envelope.result.bids[0].0, "1355000");
    }
}
