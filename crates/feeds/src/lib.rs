//! Exchange ticker fetchers.
//!
//! One REST adapter per exchange, each returning raw quotes in the
//! venue's native currency, plus the currency-rate fetcher and the
//! optional websocket push feed for the reference exchange.

pub mod adapter;
pub mod error;
pub mod rates;
pub mod stream;

pub use adapter::*;
pub use error::FeedError;
