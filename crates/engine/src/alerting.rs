//! Debounced notification state machine.
//!
//! Each (exchange, symbol) pair carries an armed flag and a last-fired
//! timestamp. A pair fires once when its deviation breaches the
//! threshold band, then stays armed (suppressed) until the deviation
//! returns inside the re-arm band. The re-arm band is wider than the
//! trigger band, so a deviation oscillating on the threshold cannot
//! flap.

use crate::{FeeSchedule, MarketBoard};
use quotewatch_core::{DiffKey, Exchange, PriceKey, Side, Symbol};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Runtime-tunable alert thresholds, in percentage points.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlertRule {
    /// Ask deviation at or below this fires.
    pub min_threshold: f64,
    /// Bid deviation at or above this fires.
    pub max_threshold: f64,
    /// Cross-pair threshold, held for the settings surface.
    pub pair_threshold: f64,
    /// Minimum minutes between fires for one pair.
    pub duration_mins: f64,
    /// Master switch for fiat venue notifications.
    pub fiat_alerts_enabled: bool,
}

impl Default for AlertRule {
    fn default() -> Self {
        Self {
            min_threshold: -2.0,
            max_threshold: 3.25,
            pair_threshold: 1.0,
            duration_mins: 10.0,
            fiat_alerts_enabled: true,
        }
    }
}

/// Debounce state of one (exchange, symbol) pair.
///
/// `armed = true` means an alert already fired and further fires are
/// suppressed. A pair that has never fired is eligible immediately.
#[derive(Debug, Clone, Copy, Default)]
struct AlertState {
    armed: bool,
    last_fired: Option<Instant>,
}

impl AlertState {
    fn minutes_since_fired(&self, now: Instant) -> f64 {
        match self.last_fired {
            Some(at) => now.duration_since(at).as_secs_f64() / 60.0,
            None => f64::INFINITY,
        }
    }
}

/// All pair states, created lazily on first evaluation.
#[derive(Debug, Default)]
pub struct AlertBook {
    states: HashMap<(Exchange, Symbol), AlertState>,
}

impl AlertBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every alert-eligible pair against the board's freshly
    /// computed deviations. Returns the alert lines fired this cycle.
    pub fn evaluate(
        &mut self,
        board: &MarketBoard,
        rule: &AlertRule,
        fees: &FeeSchedule,
        now: Instant,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        if !rule.fiat_alerts_enabled {
            return lines;
        }

        for &exchange in Exchange::alert_targets() {
            for &symbol in Symbol::ALL {
                let reference = symbol.reference_exchange();
                let fee = fees.margin(reference);
                let spread = board.spread(reference, symbol);

                let ask_key = DiffKey::new(reference, exchange, symbol, Side::Ask);
                let bid_key = DiffKey::new(reference, exchange, symbol, Side::Bid);
                let ask_diff = board.diff(&ask_key).unwrap_or(0.0);
                let bid_diff = board.diff(&bid_key).unwrap_or(0.0);

                // A bid above the ask means the feed is crossed; its
                // deviations are not trustworthy this cycle.
                if bid_diff > ask_diff {
                    continue;
                }

                let fire_low = ask_diff <= rule.min_threshold - fee - spread;
                let fire_high = bid_diff >= rule.max_threshold + fee;

                let state = self.states.entry((exchange, symbol)).or_default();

                if state.armed && !fire_low && !fire_high {
                    state.armed = false;
                    info!(%exchange, %symbol, "alert pair disarmed");
                }

                if !state.armed
                    && state.minutes_since_fired(now) >= rule.duration_mins
                    && (fire_low || fire_high)
                {
                    state.armed = true;
                    state.last_fired = Some(now);

                    let (diff, side) = if ask_diff <= rule.min_threshold {
                        (ask_diff, Side::Ask)
                    } else {
                        (bid_diff, Side::Bid)
                    };
                    let price = board
                        .price(&PriceKey::new(exchange, symbol, side))
                        .unwrap_or(0.0);
                    lines.push(format!(
                        "{exchange} {symbol} %{diff:.2} {}",
                        format_price(price)
                    ));
                }
            }
        }

        lines
    }
}

/// Fixed six-decimal rendering with trailing zeros (and a dangling
/// decimal point) trimmed, so 49000.000000 prints as 49000 and
/// 0.052500 as 0.0525.
pub fn format_price(price: f64) -> String {
    let fixed = format!("{price:.6}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_differences;
    use pretty_assertions::assert_eq;
    use quotewatch_core::{Currency, Quote};
    use std::time::Duration;

    fn board_with(reference_ask: f64, target_ask: f64, target_bid: f64) -> MarketBoard {
        let mut board = MarketBoard::new();
        let reference = Quote::new(
            Exchange::Gdax,
            Currency::Usd,
            Symbol::Btc,
            reference_ask,
            reference_ask - 50.0,
        );
        let target = Quote::new(
            Exchange::Koineks,
            Currency::Usd,
            Symbol::Btc,
            target_ask,
            target_bid,
        );
        compute_differences(&reference, &[target], &mut board);
        board
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(49000.0), "49000");
        assert_eq!(format_price(0.0525), "0.0525");
        assert_eq!(format_price(2000.5), "2000.5");
        assert_eq!(format_price(0.0), "0");
    }

    #[test]
    fn test_in_band_pair_stays_quiet() {
        // askDiff = 1.00, bidDiff = 0.20: inside the band, no alert.
        let board = board_with(50000.0, 50500.0, 50100.0);
        let mut book = AlertBook::new();
        let rule = AlertRule {
            min_threshold: -1.0,
            max_threshold: 3.0,
            ..AlertRule::default()
        };

        let lines = book.evaluate(&board, &rule, &FeeSchedule::new(), Instant::now());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_low_breach_fires_ask_line() {
        // askDiff = -2.00 <= min(-1.0): fires once with the ask price.
        let board = board_with(50000.0, 49000.0, 48900.0);
        let mut book = AlertBook::new();
        let rule = AlertRule {
            min_threshold: -1.0,
            max_threshold: 3.0,
            ..AlertRule::default()
        };

        let lines = book.evaluate(&board, &rule, &FeeSchedule::new(), Instant::now());
        assert_eq!(lines, vec!["Koineks BTC %-2.00 49000".to_string()]);
    }

    #[test]
    fn test_no_refire_while_breach_persists() {
        let board = board_with(50000.0, 49000.0, 48900.0);
        let mut book = AlertBook::new();
        let rule = AlertRule {
            min_threshold: -1.0,
            max_threshold: 3.0,
            ..AlertRule::default()
        };
        let fees = FeeSchedule::new();
        let t0 = Instant::now();

        assert_eq!(book.evaluate(&board, &rule, &fees, t0).len(), 1);
        // Same breach next cycles, even past the duration window.
        let t1 = t0 + Duration::from_secs(60 * 60);
        assert!(book.evaluate(&board, &rule, &fees, t1).is_empty());
        assert!(book.evaluate(&board, &rule, &fees, t1).is_empty());
    }

    #[test]
    fn test_rearm_then_duration_gates_refire() {
        let rule = AlertRule {
            min_threshold: -1.0,
            max_threshold: 3.0,
            duration_mins: 10.0,
            ..AlertRule::default()
        };
        let fees = FeeSchedule::new();
        let mut book = AlertBook::new();
        let t0 = Instant::now();

        let breached = board_with(50000.0, 49000.0, 48900.0);
        assert_eq!(book.evaluate(&breached, &rule, &fees, t0).len(), 1);

        // Deviation recovers: the pair disarms but must still wait out
        // the duration window before it may fire again.
        let calm = board_with(50000.0, 50100.0, 50050.0);
        assert!(book.evaluate(&calm, &rule, &fees, t0 + Duration::from_secs(60)).is_empty());

        let early = t0 + Duration::from_secs(5 * 60);
        assert!(book.evaluate(&breached, &rule, &fees, early).is_empty());

        let late = t0 + Duration::from_secs(11 * 60);
        assert_eq!(book.evaluate(&breached, &rule, &fees, late).len(), 1);
    }

    #[test]
    fn test_crossed_feed_skipped() {
        // bid above ask across the board: bidDiff > askDiff, skip.
        let board = board_with(50000.0, 49000.0, 52000.0);
        let mut book = AlertBook::new();
        let rule = AlertRule {
            min_threshold: -1.0,
            max_threshold: 3.0,
            ..AlertRule::default()
        };

        let lines = book.evaluate(&board, &rule, &FeeSchedule::new(), Instant::now());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_high_breach_fires_bid_line() {
        // bidDiff = 4.00 >= max(3.0): fires with the bid price.
        let board = board_with(50000.0, 52500.0, 52000.0);
        let mut book = AlertBook::new();
        let rule = AlertRule {
            min_threshold: -1.0,
            max_threshold: 3.0,
            ..AlertRule::default()
        };

        let lines = book.evaluate(&board, &rule, &FeeSchedule::new(), Instant::now());
        assert_eq!(lines, vec!["Koineks BTC %4.00 52000".to_string()]);
    }

    #[test]
    fn test_disabled_switch_suppresses_everything() {
        let board = board_with(50000.0, 49000.0, 48900.0);
        let mut book = AlertBook::new();
        let rule = AlertRule {
            min_threshold: -1.0,
            max_threshold: 3.0,
            fiat_alerts_enabled: false,
            ..AlertRule::default()
        };

        let lines = book.evaluate(&board, &rule, &FeeSchedule::new(), Instant::now());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_commission_margin_widens_band() {
        // USDT anchors to Binance, which carries a 0.1 margin. An ask
        // deviation past the bare threshold but inside the widened
        // band no longer fires.
        let mut board = MarketBoard::new();
        let reference = Quote::new(Exchange::Binance, Currency::Usd, Symbol::Usdt, 1000.0, 1000.0);
        let target = Quote::new(Exchange::Koineks, Currency::Usd, Symbol::Usdt, 989.5, 985.0);
        compute_differences(&reference, &[target], &mut board);

        let mut book = AlertBook::new();
        let rule = AlertRule {
            min_threshold: -1.0,
            max_threshold: 3.0,
            ..AlertRule::default()
        };

        // askDiff = -1.05; band edge is -1.0 - 0.1 = -1.1, so quiet.
        let lines = book.evaluate(&board, &rule, &FeeSchedule::new(), Instant::now());
        assert!(lines.is_empty());
    }
}
