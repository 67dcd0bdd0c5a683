//! The polling cycle: fetch, normalize, diff, alert.

use crate::state::SharedState;
use futures_util::future::join_all;
use quotewatch_core::{Currency, Exchange, Quote, Symbol};
use quotewatch_engine::{compute_differences, MarketBoard, Normalizer, RateTable};
use quotewatch_feeds::{
    rates, BinanceAdapter, BitfinexAdapter, BitoasisAdapter, BittrexAdapter, BtcTurkAdapter,
    FeedError, GdaxAdapter, KoineksAdapter, KoinimAdapter, ParibuAdapter, PoloniexAdapter,
    TickerAdapter, VebitcoinAdapter,
};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Owns the adapters and drives one cycle after another.
pub struct Poller {
    state: SharedState,
    normalizer: Normalizer,
    reference: Box<dyn TickerAdapter>,
    cross: Vec<Box<dyn TickerAdapter>>,
    venues: Vec<Box<dyn TickerAdapter>>,
}

impl Poller {
    pub fn new(state: SharedState) -> Self {
        Self::with_adapters(
            state,
            Box::new(GdaxAdapter),
            vec![
                Box::new(BittrexAdapter),
                Box::new(PoloniexAdapter),
                Box::new(BinanceAdapter),
            ],
            vec![
                Box::new(BitfinexAdapter),
                Box::new(ParibuAdapter),
                Box::new(BtcTurkAdapter),
                Box::new(KoineksAdapter),
                Box::new(KoinimAdapter),
                Box::new(VebitcoinAdapter),
                Box::new(BitoasisAdapter),
            ],
        )
    }

    pub fn with_adapters(
        state: SharedState,
        reference: Box<dyn TickerAdapter>,
        cross: Vec<Box<dyn TickerAdapter>>,
        venues: Vec<Box<dyn TickerAdapter>>,
    ) -> Self {
        Self {
            state,
            normalizer: Normalizer::new(Exchange::Gdax),
            reference,
            cross,
            venues,
        }
    }

    pub async fn run(self) {
        let interval = self.state.config.poll_interval;
        loop {
            self.cycle().await;
            tokio::time::sleep(interval).await;
        }
    }

    /// One full cycle. Every venue failure is isolated: the venue's
    /// quotes go stale for the cycle and a warning is recorded, while
    /// the rest of the board updates normally. Only a dead reference
    /// aborts the cycle, since every deviation depends on it.
    pub async fn cycle(&self) {
        let started = Instant::now();
        self.state.board.write().await.reset_cycle();

        match self.reference.fetch(&self.state.client).await {
            Ok(quotes) => {
                let mut board = self.state.board.write().await;
                for quote in quotes {
                    board.publish(quote);
                }
            }
            Err(error) => {
                warn!(%error, "reference fetch failed, skipping cycle");
                self.state
                    .board
                    .write()
                    .await
                    .push_warning(format!("Error reading GDAX prices: {error}"));
                return;
            }
        }

        let raw_cross = self.fetch_group(&self.cross).await;
        let venue_quotes = self.fetch_group(&self.venues).await;

        let anchor = self
            .state
            .board
            .read()
            .await
            .reference_quote(Exchange::Gdax, Symbol::Btc)
            .copied();
        let usd_cross = match anchor {
            Some(anchor) => self.normalizer.normalize_cross(&anchor, &raw_cross),
            None => {
                warn!("no BTC anchor available, cross quotes skipped");
                Vec::new()
            }
        };

        let rates = self.state.rates.read().await.clone();
        {
            let mut board = self.state.board.write().await;
            self.compare_all(&mut board, &usd_cross, venue_quotes, &rates);
        }

        self.fire_alerts().await;
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "cycle complete");
    }

    /// Fetch a group of venues concurrently, flattening the successes.
    /// Each failure is recorded and the venue sits out the cycle.
    async fn fetch_group(&self, adapters: &[Box<dyn TickerAdapter>]) -> Vec<Quote> {
        let results = join_all(adapters.iter().map(|adapter| async {
            (adapter.exchange(), adapter.fetch(&self.state.client).await)
        }))
        .await;

        let mut quotes = Vec::new();
        for (exchange, result) in results {
            match result {
                Ok(batch) => quotes.extend(batch),
                Err(error) => self.record_fetch_failure(exchange, &error).await,
            }
        }
        quotes
    }

    /// Run the per-symbol, per-currency comparison passes.
    ///
    /// USD quotes fan out to every convertible currency; fiat venues
    /// join only their native currency's pass. The reference quote is
    /// always the baseline of each pass.
    fn compare_all(
        &self,
        board: &mut MarketBoard,
        usd_cross: &[Quote],
        venue_quotes: Vec<Quote>,
        rates: &RateTable,
    ) {
        let (usd_venues, fiat_venues): (Vec<Quote>, Vec<Quote>) = venue_quotes
            .into_iter()
            .partition(|q| q.currency == Currency::Usd);

        self.normalizer.publish_all(board, usd_cross);
        self.normalizer.publish_all(board, &usd_venues);

        for &symbol in Symbol::ALL {
            let reference_exchange = symbol.reference_exchange();
            let Some(reference_usd) = board.reference_quote(reference_exchange, symbol).copied()
            else {
                continue;
            };

            let usd_targets: Vec<Quote> = usd_cross
                .iter()
                .chain(usd_venues.iter())
                .filter(|q| q.symbol == symbol && q.exchange != reference_exchange)
                .copied()
                .collect();

            for &currency in Currency::conversion_targets() {
                let Some(reference) = self.normalizer.convert(&reference_usd, currency, rates)
                else {
                    continue;
                };

                let mut targets: Vec<Quote> = usd_targets
                    .iter()
                    .filter_map(|q| self.normalizer.convert(q, currency, rates))
                    .collect();
                targets.extend(
                    fiat_venues
                        .iter()
                        .filter(|q| q.symbol == symbol && q.currency == currency)
                        .copied(),
                );

                compute_differences(&reference, &targets, board);
            }
        }
    }

    async fn fire_alerts(&self) {
        let lines = {
            let board = self.state.board.read().await;
            let rule = *self.state.rule.read().await;
            let mut book = self.state.alerts.lock().await;
            book.evaluate(&board, &rule, &self.state.fees, Instant::now())
        };
        if lines.is_empty() {
            return;
        }

        match &self.state.notifier {
            Some(notifier) => {
                if let Err(error) = notifier.send(&lines.join("\n")).await {
                    warn!(%error, "alert delivery failed");
                }
            }
            None => debug!(?lines, "alerts fired without a configured notifier"),
        }
    }

    async fn record_fetch_failure(&self, exchange: Exchange, error: &FeedError) {
        warn!(%exchange, %error, "ticker fetch failed");
        self.state
            .board
            .write()
            .await
            .push_warning(format!("Error reading {exchange} prices: {error}"));
    }
}

/// Write push feed ticks into the reference price table as they arrive.
pub async fn run_push_writer(state: SharedState, mut rx: mpsc::Receiver<Quote>) {
    while let Some(quote) = rx.recv().await {
        state.board.write().await.publish(quote);
    }
}

/// Refresh the fiat conversion rates on a slow cadence. Failed
/// currencies keep their previous rate.
pub async fn run_rate_loop(state: SharedState) {
    let interval = state.config.rate_interval;
    loop {
        let fetched = rates::fetch_all_rates(&state.client).await;
        {
            let mut table = state.rates.write().await;
            for (currency, rate) in fetched {
                table.set(currency, rate);
            }
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::state::create_state;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use quotewatch_core::{DiffKey, Side};
    use reqwest::Client;

    struct StubAdapter {
        exchange: Exchange,
        quotes: Vec<Quote>,
        fail: bool,
    }

    #[async_trait]
    impl TickerAdapter for StubAdapter {
        fn exchange(&self) -> Exchange {
            self.exchange
        }

        async fn fetch(&self, _client: &Client) -> Result<Vec<Quote>, FeedError> {
            if self.fail {
                return Err(FeedError::Status {
                    exchange: self.exchange,
                    status: 500,
                });
            }
            Ok(self.quotes.clone())
        }
    }

    fn stub(exchange: Exchange, quotes: Vec<Quote>) -> Box<dyn TickerAdapter> {
        Box::new(StubAdapter {
            exchange,
            quotes,
            fail: false,
        })
    }

    fn failing(exchange: Exchange) -> Box<dyn TickerAdapter> {
        Box::new(StubAdapter {
            exchange,
            quotes: Vec::new(),
            fail: true,
        })
    }

    #[tokio::test]
    async fn test_cycle_failure_isolation() {
        let state = create_state(AppConfig::default()).unwrap();
        state.rates.write().await.set(Currency::Try, 30.0);

        let reference = stub(
            Exchange::Gdax,
            vec![Quote::new(Exchange::Gdax, Currency::Usd, Symbol::Btc, 50000.0, 49950.0)],
        );
        let venues = vec![
            stub(
                Exchange::Koineks,
                vec![Quote::new(
                    Exchange::Koineks,
                    Currency::Try,
                    Symbol::Btc,
                    1_515_000.0,
                    1_503_000.0,
                )],
            ),
            failing(Exchange::Koinim),
        ];

        let poller = Poller::with_adapters(state.clone(), reference, Vec::new(), venues);
        poller.cycle().await;

        let board = state.board.read().await;
        // The healthy venue's deviations are on the board.
        let ask_key = DiffKey::new(Exchange::Gdax, Exchange::Koineks, Symbol::Btc, Side::Ask);
        let bid_key = DiffKey::new(Exchange::Gdax, Exchange::Koineks, Symbol::Btc, Side::Bid);
        assert_eq!(board.diff(&ask_key), Some(1.0));
        assert_eq!(board.diff(&bid_key), Some(0.2));
        // The dead venue left a warning, nothing else.
        assert_eq!(board.warnings().len(), 1);
        assert!(board.warnings()[0].contains("Koinim"));
    }

    #[tokio::test]
    async fn test_cycle_aborts_without_reference() {
        let state = create_state(AppConfig::default()).unwrap();
        state.rates.write().await.set(Currency::Try, 30.0);

        let venues = vec![stub(
            Exchange::Koineks,
            vec![Quote::new(
                Exchange::Koineks,
                Currency::Try,
                Symbol::Btc,
                1_515_000.0,
                1_503_000.0,
            )],
        )];
        let poller =
            Poller::with_adapters(state.clone(), failing(Exchange::Gdax), Vec::new(), venues);
        poller.cycle().await;

        let board = state.board.read().await;
        let ask_key = DiffKey::new(Exchange::Gdax, Exchange::Koineks, Symbol::Btc, Side::Ask);
        assert_eq!(board.diff(&ask_key), None);
        assert!(board.warnings()[0].contains("GDAX"));
    }

    #[tokio::test]
    async fn test_cross_quotes_normalized_and_diffed() {
        let state = create_state(AppConfig::default()).unwrap();
        state.rates.write().await.set(Currency::Try, 30.0);

        let reference = stub(
            Exchange::Gdax,
            vec![
                Quote::new(Exchange::Gdax, Currency::Usd, Symbol::Btc, 50000.0, 49950.0),
                Quote::new(Exchange::Gdax, Currency::Usd, Symbol::Eth, 2000.0, 1995.0),
            ],
        );
        // 0.0404 BTC * 50000 = 2020 USD, a 1.00% ask deviation.
        let cross = vec![stub(
            Exchange::Poloniex,
            vec![Quote::new(
                Exchange::Poloniex,
                Currency::Btc,
                Symbol::Eth,
                0.0404,
                0.0400,
            )],
        )];

        let poller = Poller::with_adapters(state.clone(), reference, cross, Vec::new());
        poller.cycle().await;

        let board = state.board.read().await;
        let ask_key = DiffKey::new(Exchange::Gdax, Exchange::Poloniex, Symbol::Eth, Side::Ask);
        assert_eq!(board.diff(&ask_key), Some(1.0));
    }

    #[tokio::test]
    async fn test_unavailable_rate_suppresses_currency_pass() {
        // No rates at all: fiat venue quotes cannot be compared, but
        // the cycle completes without publishing zero prices.
        let state = create_state(AppConfig::default()).unwrap();

        let reference = stub(
            Exchange::Gdax,
            vec![Quote::new(Exchange::Gdax, Currency::Usd, Symbol::Btc, 50000.0, 49950.0)],
        );
        let venues = vec![stub(
            Exchange::Koineks,
            vec![Quote::new(
                Exchange::Koineks,
                Currency::Try,
                Symbol::Btc,
                1_515_000.0,
                1_503_000.0,
            )],
        )];

        let poller = Poller::with_adapters(state.clone(), reference, Vec::new(), venues);
        poller.cycle().await;

        let board = state.board.read().await;
        let ask_key = DiffKey::new(Exchange::Gdax, Exchange::Koineks, Symbol::Btc, Side::Ask);
        assert_eq!(board.diff(&ask_key), None);
    }
}
