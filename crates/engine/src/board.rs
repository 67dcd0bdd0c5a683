//! Shared market state for one monitoring process.
//!
//! The board replaces the ad hoc global maps of earlier designs with one
//! owned aggregate: the reference price table, the deviation and raw
//! price maps, per-exchange extreme trackers, and the per-cycle warning
//! buffer. The polling cycle is the single writer; the dashboard reads.

use quotewatch_core::{Currency, DiffKey, Exchange, PriceKey, Quote, Symbol};
use serde::Serialize;
use std::collections::HashMap;

/// Sentinel outside any realistic deviation percentage.
const MIN_SENTINEL: f64 = 100.0;
const MAX_SENTINEL: f64 = -100.0;

/// Per-exchange record of the most extreme deviations seen this cycle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExtremeTracker {
    pub min_diff: f64,
    pub min_symbol: Option<Symbol>,
    pub max_diff: f64,
    pub max_symbol: Option<Symbol>,
}

impl Default for ExtremeTracker {
    fn default() -> Self {
        Self {
            min_diff: MIN_SENTINEL,
            min_symbol: None,
            max_diff: MAX_SENTINEL,
            max_symbol: None,
        }
    }
}

impl ExtremeTracker {
    /// Record a rounded ask deviation as a minimum candidate.
    pub fn observe_ask(&mut self, diff: f64, symbol: Symbol) {
        if diff < self.min_diff {
            self.min_diff = diff;
            self.min_symbol = Some(symbol);
        }
    }

    /// Record a rounded bid deviation as a maximum candidate.
    pub fn observe_bid(&mut self, diff: f64, symbol: Symbol) {
        if diff > self.max_diff {
            self.max_diff = diff;
            self.max_symbol = Some(symbol);
        }
    }
}

/// Aggregated market state: reference price table, deviations, raw
/// prices, spreads, extremes and the cycle warning buffer.
#[derive(Debug, Default)]
pub struct MarketBoard {
    /// Latest reference-currency quote per (exchange, symbol).
    /// Overwritten by the normalizer and by the push feed; entries from
    /// failed fetches simply stay stale until the next good cycle.
    reference: HashMap<(Exchange, Symbol), Quote>,
    /// Rounded deviation percentages. Stale entries persist until
    /// overwritten; symbols that failed to fetch keep last cycle's value.
    diffs: HashMap<DiffKey, f64>,
    /// Unrounded raw prices per (exchange, symbol, side).
    prices: HashMap<PriceKey, f64>,
    /// Reference-exchange ask/bid spread percentage per (exchange, symbol).
    spreads: HashMap<(Exchange, Symbol), f64>,
    /// Per-exchange extreme deviations, reset each cycle.
    extremes: HashMap<Exchange, ExtremeTracker>,
    /// Human-readable fetch/normalize warnings for the current cycle.
    warnings: Vec<String>,
}

impl MarketBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the reference table entry for (exchange, symbol).
    pub fn publish(&mut self, quote: Quote) {
        debug_assert_eq!(quote.currency, Currency::Usd);
        self.reference.insert((quote.exchange, quote.symbol), quote);
    }

    pub fn reference_quote(&self, exchange: Exchange, symbol: Symbol) -> Option<&Quote> {
        self.reference.get(&(exchange, symbol))
    }

    pub fn set_diff(&mut self, key: DiffKey, value: f64) {
        self.diffs.insert(key, value);
    }

    pub fn diff(&self, key: &DiffKey) -> Option<f64> {
        self.diffs.get(key).copied()
    }

    pub fn set_price(&mut self, key: PriceKey, value: f64) {
        self.prices.insert(key, value);
    }

    pub fn price(&self, key: &PriceKey) -> Option<f64> {
        self.prices.get(key).copied()
    }

    pub fn set_spread(&mut self, exchange: Exchange, symbol: Symbol, spread: f64) {
        self.spreads.insert((exchange, symbol), spread);
    }

    pub fn spread(&self, exchange: Exchange, symbol: Symbol) -> f64 {
        self.spreads.get(&(exchange, symbol)).copied().unwrap_or(0.0)
    }

    pub fn extremes_mut(&mut self, exchange: Exchange) -> &mut ExtremeTracker {
        self.extremes.entry(exchange).or_default()
    }

    pub fn extremes(&self, exchange: Exchange) -> Option<&ExtremeTracker> {
        self.extremes.get(&exchange)
    }

    pub fn push_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Reset transient per-cycle state. Deviations and prices are kept
    /// stale-until-overwritten; extremes and warnings are per-cycle.
    pub fn reset_cycle(&mut self) {
        for tracker in self.extremes.values_mut() {
            *tracker = ExtremeTracker::default();
        }
        self.warnings.clear();
    }
}
