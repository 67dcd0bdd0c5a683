//! Exchange identifiers.

use crate::Currency;
use serde::{Deserialize, Serialize};

/// Exchange identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Exchange {
    // Reference and cross exchanges (USD / BTC quoted)
    Gdax = 1,
    Binance = 2,
    Bittrex = 3,
    Poloniex = 4,
    Bitfinex = 5,

    // TRY venues
    Paribu = 10,
    BtcTurk = 11,
    Koineks = 12,
    Koinim = 13,
    Vebitcoin = 14,

    // AED venue
    Bitoasis = 20,
}

impl Exchange {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Exchange::Gdax),
            2 => Some(Exchange::Binance),
            3 => Some(Exchange::Bittrex),
            4 => Some(Exchange::Poloniex),
            5 => Some(Exchange::Bitfinex),
            10 => Some(Exchange::Paribu),
            11 => Some(Exchange::BtcTurk),
            12 => Some(Exchange::Koineks),
            13 => Some(Exchange::Koinim),
            14 => Some(Exchange::Vebitcoin),
            20 => Some(Exchange::Bitoasis),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Exchange::Gdax => "GDAX",
            Exchange::Binance => "Binance",
            Exchange::Bittrex => "Bittrex",
            Exchange::Poloniex => "Poloniex",
            Exchange::Bitfinex => "Bitfinex",
            Exchange::Paribu => "Paribu",
            Exchange::BtcTurk => "BTCTurk",
            Exchange::Koineks => "Koineks",
            Exchange::Koinim => "Koinim",
            Exchange::Vebitcoin => "Vebitcoin",
            Exchange::Bitoasis => "Bitoasis",
        }
    }

    /// Native quote currency of the venue's public ticker.
    pub fn native_currency(self) -> Currency {
        match self {
            Exchange::Gdax | Exchange::Bitfinex => Currency::Usd,
            Exchange::Binance | Exchange::Bittrex | Exchange::Poloniex => Currency::Btc,
            Exchange::Paribu
            | Exchange::BtcTurk
            | Exchange::Koineks
            | Exchange::Koinim
            | Exchange::Vebitcoin => Currency::Try,
            Exchange::Bitoasis => Currency::Aed,
        }
    }

    /// Venues eligible for deviation alerts. Paribu and BTCTurk are
    /// watched on the dashboard but excluded from notifications, as is
    /// the AED venue.
    pub fn alert_targets() -> &'static [Exchange] {
        &[Exchange::Koineks, Exchange::Koinim, Exchange::Vebitcoin]
    }

    /// Local fiat venues compared against the reference each cycle.
    pub fn local_venues() -> &'static [Exchange] {
        &[
            Exchange::Paribu,
            Exchange::BtcTurk,
            Exchange::Koineks,
            Exchange::Koinim,
            Exchange::Vebitcoin,
            Exchange::Bitoasis,
        ]
    }

    /// Cross exchanges whose BTC-quoted markets are normalized through
    /// the reference anchor.
    pub fn cross_exchanges() -> &'static [Exchange] {
        &[Exchange::Bittrex, Exchange::Poloniex, Exchange::Binance]
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
