//! Commission margins applied to alert threshold bands.

use quotewatch_core::Exchange;
use std::collections::HashMap;

/// Per-exchange commission margin, in percentage points.
///
/// The margin widens the alert band for symbols whose reference market
/// charges a taker commission, so a deviation has to clear the trading
/// cost before it is worth an alert. Kept as explicit configuration so
/// adding an exchange never touches the notification logic.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    margins: HashMap<Exchange, f64>,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        let mut margins = HashMap::new();
        // GDAX-anchored symbols carry no adjustment; Binance-anchored
        // ones absorb the 0.1% taker commission.
        margins.insert(Exchange::Gdax, 0.0);
        margins.insert(Exchange::Binance, 0.1);
        Self { margins }
    }
}

impl FeeSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Margin for a reference exchange, 0 when unconfigured.
    pub fn margin(&self, reference: Exchange) -> f64 {
        self.margins.get(&reference).copied().unwrap_or(0.0)
    }

    pub fn set_margin(&mut self, reference: Exchange, margin: f64) {
        self.margins.insert(reference, margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quotewatch_core::Symbol;

    #[test]
    fn test_default_margins() {
        let fees = FeeSchedule::new();
        assert_eq!(fees.margin(Exchange::Gdax), 0.0);
        assert_eq!(fees.margin(Exchange::Binance), 0.1);
        assert_eq!(fees.margin(Exchange::Koineks), 0.0);
    }

    #[test]
    fn test_margin_follows_symbol_anchor() {
        let fees = FeeSchedule::new();
        assert_eq!(fees.margin(Symbol::Btc.reference_exchange()), 0.0);
        assert_eq!(fees.margin(Symbol::Usdt.reference_exchange()), 0.1);
    }

    #[test]
    fn test_override() {
        let mut fees = FeeSchedule::new();
        fees.set_margin(Exchange::Gdax, 0.25);
        assert_eq!(fees.margin(Exchange::Gdax), 0.25);
    }
}
