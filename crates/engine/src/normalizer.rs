//! Quote normalization onto the reference fiat currency.
//!
//! Cross-exchange altcoin markets are BTC-quoted and are chained through
//! the reference exchange's BTC/USD anchor. A handful of
//! (exchange, symbol) pairs are exceptions: stable-denominated markets
//! pass through untouched, and inverse USDT pairs divide instead of
//! multiply.

use crate::MarketBoard;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use std::collections::HashMap;
use tracing::warn;

/// USD-to-target conversion rates, refreshed on a slow cadence.
///
/// A rate of zero means "conversion unavailable"; readers must skip the
/// currency instead of publishing zero prices.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<Currency, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a rate. Zero and negative values are rejected so a bad
    /// provider response cannot wipe a previously good rate.
    pub fn set(&mut self, currency: Currency, rate: f64) {
        if rate > 0.0 {
            self.rates.insert(currency, rate);
        } else {
            warn!(currency = %currency, rate, "ignoring degenerate currency rate");
        }
    }

    /// Get a usable rate, or None while unavailable.
    pub fn get(&self, currency: Currency) -> Option<f64> {
        match currency {
            Currency::Usd => Some(1.0),
            _ => self.rates.get(&currency).copied().filter(|r| *r > 0.0),
        }
    }
}

/// Converts raw exchange quotes into reference-currency quotes.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    reference: Exchange,
}

impl Normalizer {
    pub fn new(reference: Exchange) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> Exchange {
        self.reference
    }

    /// (exchange, symbol) pairs that arrive already fiat-or-stable
    /// denominated and pass through untouched. Bittrex's USDT market is
    /// dollar-quoted, unlike everyone else's USDT-per-BTC books.
    fn is_stable_passthrough(exchange: Exchange, symbol: Symbol) -> bool {
        match (exchange, symbol) {
            (Exchange::Binance, Symbol::Xrp | Symbol::Xlm) => true,
            (Exchange::Bittrex, Symbol::Usdt) => true,
            _ => false,
        }
    }

    /// Convert one BTC-quoted cross-exchange quote to USD using the
    /// anchor (reference exchange BTC/USD) ask price.
    ///
    /// Returns None for quotes that cannot be converted this cycle
    /// (degenerate anchor or a zero-priced inverse pair).
    pub fn to_usd(&self, anchor_btc_ask: f64, raw: &Quote) -> Option<Quote> {
        if Self::is_stable_passthrough(raw.exchange, raw.symbol) {
            return Some(Quote {
                currency: Currency::Usd,
                ..*raw
            });
        }

        if anchor_btc_ask <= 0.0 {
            warn!(
                exchange = %raw.exchange,
                symbol = %raw.symbol,
                "skipping conversion: reference BTC anchor unavailable"
            );
            return None;
        }

        if raw.symbol == Symbol::Usdt {
            // Inverse pair: the venue quotes USDT-per-BTC.
            if raw.ask <= 0.0 || raw.bid <= 0.0 {
                warn!(exchange = %raw.exchange, "skipping zero-priced inverse USDT quote");
                return None;
            }
            return Some(Quote {
                currency: Currency::Usd,
                ask: anchor_btc_ask / raw.ask,
                bid: anchor_btc_ask / raw.bid,
                ..*raw
            });
        }

        Some(Quote {
            currency: Currency::Usd,
            ask: raw.ask * anchor_btc_ask,
            bid: raw.bid * anchor_btc_ask,
            ..*raw
        })
    }

    /// Convert a batch of cross-exchange quotes, dropping the ones that
    /// cannot be converted. A single bad quote never aborts the rest.
    pub fn normalize_cross(&self, anchor: &Quote, raw: &[Quote]) -> Vec<Quote> {
        raw.iter()
            .filter_map(|q| self.to_usd(anchor.ask, q))
            .collect()
    }

    /// Derive a target-currency variant of a USD quote, or None while
    /// the conversion rate is unavailable.
    pub fn convert(&self, usd: &Quote, target: Currency, rates: &RateTable) -> Option<Quote> {
        debug_assert_eq!(usd.currency, Currency::Usd);
        rates.get(target).map(|rate| usd.scaled(target, rate))
    }

    /// Publish USD quotes into the reference price table.
    pub fn publish_all(&self, board: &mut MarketBoard, quotes: &[Quote]) {
        for quote in quotes {
            board.publish(*quote);
        }
    }
}
