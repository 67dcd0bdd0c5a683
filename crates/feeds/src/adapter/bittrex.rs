use super::{get_json, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://bittrex.com/api/v1.1/public/getticker";

/// Bittrex market names put the quote currency first. The USDT market
/// is dollar-quoted, which the normalizer treats as a passthrough.
const MARKETS: &[(Symbol, &str)] = &[
    (Symbol::Usdt, "USD-USDT"),
    (Symbol::Doge, "BTC-DOGE"),
    (Symbol::Xlm, "BTC-XLM"),
];

#[derive(Debug, Deserialize)]
struct TickerEnvelope {
    success: bool,
    result: Option<TickerResult>,
}

#[derive(Debug, Deserialize)]
struct TickerResult {
    #[serde(rename = "Ask")]
    ask: f64,
    #[serde(rename = "Bid")]
    bid: f64,
}

pub struct BittrexAdapter;

#[async_trait]
impl TickerAdapter for BittrexAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Bittrex
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let mut quotes = Vec::with_capacity(MARKETS.len());
        for &(symbol, market) in MARKETS {
            let url = format!("{BASE_URL}?market={market}");
            let envelope: TickerEnvelope = get_json(client, Exchange::Bittrex, &url).await?;

            let ticker = match envelope {
                TickerEnvelope {
                    success: true,
                    result: Some(result),
                } => result,
                _ => {
                    return Err(FeedError::malformed(
                        Exchange::Bittrex,
                        format!("{market}: unsuccessful ticker response"),
                    ))
                }
            };
            quotes.push(Quote::new(
                Exchange::Bittrex,
                Currency::Btc,
                symbol,
                ticker.ask,
                ticker.bid,
            ));
        }
        Ok(quotes)
    }
}
