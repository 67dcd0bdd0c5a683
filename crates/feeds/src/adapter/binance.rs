use super::{get_json, parse_price, TickerAdapter};
use crate::FeedError;
use async_trait::async_trait;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.binance.com/api/v3/ticker/bookTicker";

/// Monitored Binance markets. Altcoins trade against BTC; the USDT
/// book is the inverse BTCUSDT pair, and XRP/XLM come straight from
/// their stable markets.
const MARKETS: &[(Symbol, &str)] = &[
    (Symbol::Eth, "ETHBTC"),
    (Symbol::Ltc, "LTCBTC"),
    (Symbol::Bch, "BCHBTC"),
    (Symbol::Etc, "ETCBTC"),
    (Symbol::Doge, "DOGEBTC"),
    (Symbol::Xem, "XEMBTC"),
    (Symbol::Usdt, "BTCUSDT"),
    (Symbol::Xrp, "XRPUSDT"),
    (Symbol::Xlm, "XLMUSDT"),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookTicker {
    ask_price: String,
    bid_price: String,
}

pub struct BinanceAdapter;

#[async_trait]
impl TickerAdapter for BinanceAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Binance
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Quote>, FeedError> {
        let mut quotes = Vec::with_capacity(MARKETS.len());
        for &(symbol, market) in MARKETS {
            let url = format!("{BASE_URL}?symbol={market}");
            let ticker: BookTicker = get_json(client, Exchange::Binance, &url).await?;

            let ask = parse_price(Exchange::Binance, "ask", &ticker.ask_price)?;
            let bid = parse_price(Exchange::Binance, "bid", &ticker.bid_price)?;
            quotes.push(Quote::new(Exchange::Binance, Currency::Btc, symbol, ask, bid));
        }
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_ticker_decodes() {
        let raw = r#"{"symbol":"ETHBTC","bidPrice":"0.03899000","bidQty":"12.5","askPrice":"0.03900000","askQty":"4.1"}"#;
        let ticker: BookTicker = serde_json::from_str(raw).unwrap();
        assert_eq!(ticker.ask_price, "0.03900000");
        assert_eq!(ticker.bid_price, "0.03899000");
    }

    #[test]
    fn test_markets_cover_binance_anchored_symbols() {
        for symbol in [Symbol::Usdt, Symbol::Doge, Symbol::Xem] {
            assert!(MARKETS.iter().any(|&(s, _)| s == symbol));
        }
    }
}
