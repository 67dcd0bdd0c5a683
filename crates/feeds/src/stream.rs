//! Websocket push feed for the reference exchange.
//!
//! Ticks are forwarded to the polling side over a channel and written
//! into the reference price table between polling cycles. The
//! connection is re-established after a short delay on any error.

use crate::adapter::GDAX_SYMBOLS;
use crate::FeedError;
use futures_util::{SinkExt, StreamExt};
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, warn};

const WS_URL: &str = "wss://ws-feed.exchange.coinbase.com";
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct TickerEvent {
    #[serde(rename = "type")]
    kind: String,
    product_id: Option<String>,
    best_ask: Option<String>,
    best_bid: Option<String>,
}

/// Extract a reference quote from one inbound frame. Non-ticker events
/// and unmonitored products yield None.
fn parse_tick(text: &str) -> Option<Quote> {
    let event: TickerEvent = serde_json::from_str(text).ok()?;
    if event.kind != "ticker" {
        return None;
    }
    let symbol = event
        .product_id?
        .strip_suffix("-USD")
        .and_then(Symbol::from_str)?;
    let ask: f64 = event.best_ask?.parse().ok()?;
    let bid: f64 = event.best_bid?.parse().ok()?;
    if ask < 0.0 || bid < 0.0 {
        return None;
    }
    Some(Quote::new(Exchange::Gdax, Currency::Usd, symbol, ask, bid))
}

/// Run the push feed until the receiving side is dropped.
pub async fn run_push_feed(tx: mpsc::Sender<Quote>) {
    loop {
        match stream_once(&tx).await {
            Ok(()) => {
                debug!("push feed consumer dropped, stopping");
                return;
            }
            Err(error) => warn!(%error, "push feed connection lost, reconnecting"),
        }
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

async fn stream_once(tx: &mpsc::Sender<Quote>) -> Result<(), FeedError> {
    let (ws, _) = connect_async(WS_URL).await?;
    let (mut write, mut read) = ws.split();

    let products: Vec<String> = GDAX_SYMBOLS.iter().map(|s| format!("{s}-USD")).collect();
    let subscribe = json!({
        "type": "subscribe",
        "channels": [{"name": "ticker", "product_ids": products}],
    });
    write.send(Message::Text(subscribe.to_string())).await?;

    while let Some(message) = read.next().await {
        match message? {
            Message::Text(text) => {
                if let Some(quote) = parse_tick(&text) {
                    if tx.send(quote).await.is_err() {
                        return Ok(());
                    }
                }
            }
            Message::Ping(payload) => write.send(Message::Pong(payload)).await?,
            Message::Close(_) => break,
            _ => {}
        }
    }
    Err(FeedError::Disconnected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_ticker_event() {
        let raw = r#"{"type":"ticker","product_id":"BTC-USD","best_ask":"50000.00","best_bid":"49950.00","price":"49990.00"}"#;
        let quote = parse_tick(raw).unwrap();
        assert_eq!(quote.exchange, Exchange::Gdax);
        assert_eq!(quote.symbol, Symbol::Btc);
        assert_eq!(quote.ask, 50000.0);
        assert_eq!(quote.bid, 49950.0);
    }

    #[test]
    fn test_non_ticker_events_ignored() {
        let raw = r#"{"type":"subscriptions","channels":[{"name":"ticker","product_ids":["BTC-USD"]}]}"#;
        assert!(parse_tick(raw).is_none());
    }

    #[test]
    fn test_unmonitored_product_ignored() {
        let raw = r#"{"type":"ticker","product_id":"SOL-USD","best_ask":"150.0","best_bid":"149.5"}"#;
        assert!(parse_tick(raw).is_none());
        let raw = r#"{"type":"ticker","product_id":"BTC-EUR","best_ask":"45000.0","best_bid":"44950.0"}"#;
        assert!(parse_tick(raw).is_none());
    }
}
