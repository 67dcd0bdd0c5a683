//! Error types for feed operations.

use quotewatch_core::Exchange;
use thiserror::Error;

/// Errors that can occur while fetching or streaming tickers.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{exchange} returned HTTP {status}")]
    Status { exchange: Exchange, status: u16 },

    #[error("malformed {exchange} response: {detail}")]
    Malformed { exchange: Exchange, detail: String },

    #[error("currency rate response missing {0}")]
    MissingRate(String),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("push feed disconnected")]
    Disconnected,
}

impl FeedError {
    pub fn malformed(exchange: Exchange, detail: impl Into<String>) -> Self {
        FeedError::Malformed {
            exchange,
            detail: detail.into(),
        }
    }
}
