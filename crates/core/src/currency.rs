//! Quote currency types.

use serde::{Deserialize, Serialize};

/// Currency a quote is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Currency {
    /// US Dollar (the reference fiat currency)
    Usd = 1,
    /// Turkish Lira
    Try = 2,
    /// UAE Dirham
    Aed = 3,
    /// Japanese Yen
    Jpy = 4,
    /// Bitcoin (native quote of cross-exchange altcoin markets)
    Btc = 10,
}

impl Currency {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "TRY" | "TL" => Some(Currency::Try),
            "AED" => Some(Currency::Aed),
            "JPY" => Some(Currency::Jpy),
            "BTC" => Some(Currency::Btc),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Currency::Usd),
            2 => Some(Currency::Try),
            3 => Some(Currency::Aed),
            4 => Some(Currency::Jpy),
            10 => Some(Currency::Btc),
            _ => None,
        }
    }

    /// Fiat currencies derived from USD through a conversion rate.
    pub fn conversion_targets() -> &'static [Currency] {
        &[Currency::Try, Currency::Aed, Currency::Jpy]
    }

    pub fn is_fiat(self) -> bool {
        !matches!(self, Currency::Btc)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Try => "TRY",
            Currency::Aed => "AED",
            Currency::Jpy => "JPY",
            Currency::Btc => "BTC",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
