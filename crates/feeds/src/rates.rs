//! Fiat conversion rate fetcher.

use crate::FeedError;
use quotewatch_core::Currency;
use reqwest::Client;
use std::collections::HashMap;
use tracing::warn;

const BASE_URL: &str = "https://free.currencyconverterapi.com/api/v3/convert";

/// Fetch the USD conversion rate for one currency.
///
/// The provider answers `{"USD_TRY": 34.05}` in compact mode.
pub async fn fetch_rate(client: &Client, currency: Currency) -> Result<f64, FeedError> {
    let key = format!("USD_{currency}");
    let url = format!("{BASE_URL}?q={key}&compact=ultra");
    let body: HashMap<String, f64> = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    body.get(&key).copied().ok_or(FeedError::MissingRate(key))
}

/// Fetch every conversion target, keeping whatever succeeds. A failed
/// currency is logged and skipped so the previous rate stays in effect.
pub async fn fetch_all_rates(client: &Client) -> Vec<(Currency, f64)> {
    let mut rates = Vec::new();
    for &currency in Currency::conversion_targets() {
        match fetch_rate(client, currency).await {
            Ok(rate) => rates.push((currency, rate)),
            Err(error) => warn!(%currency, %error, "currency rate fetch failed"),
        }
    }
    rates
}
