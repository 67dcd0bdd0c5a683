//! Application state shared across the pollers and HTTP handlers.

use crate::config::AppConfig;
use quotewatch_alerts::{PushoverConfig, PushoverNotifier};
use quotewatch_engine::{AlertBook, AlertRule, FeeSchedule, MarketBoard, RateTable};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Process-wide state. The polling cycle is the single writer of the
/// board; HTTP handlers only read it. Alert state has its own lock
/// because evaluation needs the board read-locked at the same time.
pub struct AppState {
    pub config: AppConfig,
    pub board: RwLock<MarketBoard>,
    pub rates: RwLock<RateTable>,
    pub rule: RwLock<AlertRule>,
    pub alerts: Mutex<AlertBook>,
    pub fees: FeeSchedule,
    pub client: reqwest::Client,
    pub notifier: Option<PushoverNotifier>,
}

pub type SharedState = Arc<AppState>;

/// Build the shared state, including the HTTP client used by every
/// outbound fetch.
pub fn create_state(config: AppConfig) -> Result<SharedState, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    let notifier = match PushoverConfig::from_env() {
        Some(credentials) => Some(PushoverNotifier::new(credentials, client.clone())),
        None => {
            info!("pushover credentials unset, alert delivery disabled");
            None
        }
    };

    Ok(Arc::new(AppState {
        config,
        board: RwLock::new(MarketBoard::new()),
        rates: RwLock::new(RateTable::new()),
        rule: RwLock::new(AlertRule::default()),
        alerts: Mutex::new(AlertBook::new()),
        fees: FeeSchedule::new(),
        client,
        notifier,
    }))
}
