//! The fixed symbol whitelist.

use crate::Exchange;
use serde::{Deserialize, Serialize};

/// Monitored symbol. The set is closed; quotes for anything else are
/// dropped at the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Symbol {
    Btc = 1,
    Eth = 2,
    Ltc = 3,
    Bch = 4,
    Etc = 5,
    Zrx = 6,
    Xrp = 7,
    Xlm = 8,
    Usdt = 9,
    Doge = 10,
    Xem = 11,
}

impl Symbol {
    /// All monitored symbols, in comparison order.
    pub const ALL: &'static [Symbol] = &[
        Symbol::Btc,
        Symbol::Eth,
        Symbol::Ltc,
        Symbol::Bch,
        Symbol::Etc,
        Symbol::Zrx,
        Symbol::Xrp,
        Symbol::Xlm,
        Symbol::Usdt,
        Symbol::Doge,
        Symbol::Xem,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BTC" => Some(Symbol::Btc),
            "ETH" => Some(Symbol::Eth),
            "LTC" => Some(Symbol::Ltc),
            "BCH" => Some(Symbol::Bch),
            "ETC" => Some(Symbol::Etc),
            "ZRX" => Some(Symbol::Zrx),
            "XRP" => Some(Symbol::Xrp),
            "XLM" => Some(Symbol::Xlm),
            "USDT" => Some(Symbol::Usdt),
            "DOGE" => Some(Symbol::Doge),
            "XEM" => Some(Symbol::Xem),
            _ => None,
        }
    }

    /// The exchange whose quote serves as this symbol's 0% baseline.
    /// Most symbols are anchored to GDAX; the ones GDAX does not list
    /// are anchored to Binance instead.
    pub fn reference_exchange(self) -> Exchange {
        match self {
            Symbol::Usdt | Symbol::Doge | Symbol::Xem => Exchange::Binance,
            _ => Exchange::Gdax,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Btc => "BTC",
            Symbol::Eth => "ETH",
            Symbol::Ltc => "LTC",
            Symbol::Bch => "BCH",
            Symbol::Etc => "ETC",
            Symbol::Zrx => "ZRX",
            Symbol::Xrp => "XRP",
            Symbol::Xlm => "XLM",
            Symbol::Usdt => "USDT",
            Symbol::Doge => "DOGE",
            Symbol::Xem => "XEM",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_parse() {
        for &symbol in Symbol::ALL {
            assert_eq!(Symbol::from_str(symbol.as_str()), Some(symbol));
        }
        assert_eq!(Symbol::from_str("doge"), Some(Symbol::Doge));
        assert_eq!(Symbol::from_str("SHIB"), None);
    }

    #[test]
    fn test_whitelist_size() {
        assert_eq!(Symbol::ALL.len(), 11);
    }

    #[test]
    fn test_reference_exchange() {
        assert_eq!(Symbol::Btc.reference_exchange(), Exchange::Gdax);
        assert_eq!(Symbol::Xrp.reference_exchange(), Exchange::Gdax);
        assert_eq!(Symbol::Usdt.reference_exchange(), Exchange::Binance);
        assert_eq!(Symbol::Doge.reference_exchange(), Exchange::Binance);
        assert_eq!(Symbol::Xem.reference_exchange(), Exchange::Binance);
    }
}
