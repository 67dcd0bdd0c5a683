//! Quote value type and structured map keys.

use crate::{Currency, Exchange, Symbol};
use serde::{Deserialize, Serialize};

/// Ask/bid side of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ask,
    Bid,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Ask => "Ask",
            Side::Bid => "Bid",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single exchange's ask/bid pair for one symbol in one currency.
///
/// Immutable once constructed. Ask and bid are non-negative, but no
/// ask >= bid ordering is enforced; some upstream feeds report inverted
/// spreads and consumers must tolerate them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub exchange: Exchange,
    pub currency: Currency,
    pub symbol: Symbol,
    pub ask: f64,
    pub bid: f64,
}

impl Quote {
    pub fn new(exchange: Exchange, currency: Currency, symbol: Symbol, ask: f64, bid: f64) -> Self {
        debug_assert!(ask >= 0.0 && bid >= 0.0);
        Self {
            exchange,
            currency,
            symbol,
            ask,
            bid,
        }
    }

    /// The same quote re-denominated by multiplying both sides.
    pub fn scaled(&self, currency: Currency, factor: f64) -> Self {
        Self {
            currency,
            ask: self.ask * factor,
            bid: self.bid * factor,
            ..*self
        }
    }
}

/// Key of a deviation entry: one target exchange measured against one
/// reference exchange for a symbol's ask or bid side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffKey {
    pub reference: Exchange,
    pub exchange: Exchange,
    pub symbol: Symbol,
    pub side: Side,
}

impl DiffKey {
    pub fn new(reference: Exchange, exchange: Exchange, symbol: Symbol, side: Side) -> Self {
        Self {
            reference,
            exchange,
            symbol,
            side,
        }
    }
}

/// Key of a raw price entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceKey {
    pub exchange: Exchange,
    pub symbol: Symbol,
    pub side: Side,
}

impl PriceKey {
    pub fn new(exchange: Exchange, symbol: Symbol, side: Side) -> Self {
        Self {
            exchange,
            symbol,
            side,
        }
    }
}
