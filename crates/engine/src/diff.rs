//! Deviation computation between a reference quote and target quotes.

use crate::rounding::round_half_up;
use crate::MarketBoard;
use quotewatch_core::{DiffKey, PriceKey, Quote, Side};
use tracing::warn;

/// Compute rounded percentage deviations of every target quote against
/// the reference quote's ask, and record them on the board.
///
/// Both sides of a target are measured against the reference ASK:
///
/// ```text
/// diff = (target_price - reference_ask) * 100 / reference_ask
/// ```
///
/// rounded half-up to two places. The reference exchange's own spread
/// percentage and raw prices are recorded as well. A zero reference ask
/// makes every ratio meaningless, so the whole comparison is skipped
/// with a cycle warning instead of publishing infinities.
pub fn compute_differences(reference: &Quote, others: &[Quote], board: &mut MarketBoard) {
    if reference.ask <= 0.0 {
        warn!(
            exchange = %reference.exchange,
            symbol = %reference.symbol,
            "skipping deviation pass: reference ask is zero"
        );
        board.push_warning(format!(
            "No {} reference price for {}",
            reference.exchange, reference.symbol
        ));
        return;
    }

    if reference.bid > 0.0 {
        let spread = (reference.ask - reference.bid) * 100.0 / reference.bid;
        board.set_spread(reference.exchange, reference.symbol, spread);
    }
    board.set_price(
        PriceKey::new(reference.exchange, reference.symbol, Side::Ask),
        reference.ask,
    );
    board.set_price(
        PriceKey::new(reference.exchange, reference.symbol, Side::Bid),
        reference.bid,
    );

    for quote in others {
        debug_assert_eq!(quote.currency, reference.currency);
        debug_assert_eq!(quote.symbol, reference.symbol);

        // Subtract before dividing: the difference is often exactly
        // representable where the ratio is not, and the rounded result
        // must not pick up a spurious last digit.
        let ask_diff = round_half_up((quote.ask - reference.ask) * 100.0 / reference.ask, 2);
        let bid_diff = round_half_up((quote.bid - reference.ask) * 100.0 / reference.ask, 2);

        board.set_diff(
            DiffKey::new(reference.exchange, quote.exchange, quote.symbol, Side::Ask),
            ask_diff,
        );
        board.set_diff(
            DiffKey::new(reference.exchange, quote.exchange, quote.symbol, Side::Bid),
            bid_diff,
        );
        board.set_price(PriceKey::new(quote.exchange, quote.symbol, Side::Ask), quote.ask);
        board.set_price(PriceKey::new(quote.exchange, quote.symbol, Side::Bid), quote.bid);

        let tracker = board.extremes_mut(quote.exchange);
        tracker.observe_ask(ask_diff, quote.symbol);
        tracker.observe_bid(bid_diff, quote.symbol);
    }
}
