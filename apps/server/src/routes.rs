//! HTTP surface: the dashboard and the runtime threshold settings.

use crate::state::SharedState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use quotewatch_core::{Currency, DiffKey, Exchange, PriceKey, Side, Symbol};
use quotewatch_engine::AlertRule;
use std::collections::HashMap;
use std::fmt::Write;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/settings", get(settings_handler))
        .with_state(state)
}

async fn dashboard_handler(State(state): State<SharedState>) -> Html<String> {
    let board = state.board.read().await;
    let rates = state.rates.read().await;
    let rule = *state.rule.read().await;

    let mut page = String::with_capacity(16 * 1024);
    page.push_str("<!DOCTYPE html><html><head><title>quotewatch</title>");
    page.push_str(
        "<style>body{font-family:monospace}table{border-collapse:collapse;margin:8px 0}\
         td,th{border:1px solid #999;padding:2px 8px;text-align:right}\
         th{background:#eee}.warn{color:#b00}</style></head><body>",
    );
    page.push_str("<h1>Price Deviations</h1>");

    if !board.warnings().is_empty() {
        page.push_str("<p class=\"warn\">Warning: ");
        page.push_str(&board.warnings().join("; "));
        page.push_str("</p>");
    }

    page.push_str("<p>");
    for &currency in Currency::conversion_targets() {
        match rates.get(currency) {
            Some(rate) => {
                let _ = write!(page, "USD/{currency}: {rate:.4} ");
            }
            None => {
                let _ = write!(page, "USD/{currency}: n/a ");
            }
        }
    }
    let _ = write!(
        page,
        "| min {:.2} max {:.2} duration {:.0}m fiat {}</p>",
        rule.min_threshold, rule.max_threshold, rule.duration_mins, rule.fiat_alerts_enabled
    );

    for &symbol in Symbol::ALL {
        let reference = symbol.reference_exchange();
        let Some(quote) = board.reference_quote(reference, symbol) else {
            continue;
        };
        let _ = write!(
            page,
            "<h2>{symbol}</h2><p>{reference} ${:.5} (spread {:.2}%)</p>",
            quote.ask,
            board.spread(reference, symbol)
        );

        page.push_str(
            "<table><tr><th>Exchange</th><th>Ask %</th><th>Bid %</th>\
             <th>Ask</th><th>Bid</th></tr>",
        );
        for &venue in Exchange::local_venues() {
            let ask_diff = board.diff(&DiffKey::new(reference, venue, symbol, Side::Ask));
            let bid_diff = board.diff(&DiffKey::new(reference, venue, symbol, Side::Bid));
            if ask_diff.is_none() && bid_diff.is_none() {
                continue;
            }
            let _ = write!(page, "<tr><td>{venue}</td>");
            for diff in [ask_diff, bid_diff] {
                match diff {
                    Some(d) => {
                        let _ = write!(page, "<td>{d:.2}</td>");
                    }
                    None => page.push_str("<td>-</td>"),
                }
            }
            for side in [Side::Ask, Side::Bid] {
                match board.price(&PriceKey::new(venue, symbol, side)) {
                    Some(p) => {
                        let _ = write!(page, "<td>{p:.2}</td>");
                    }
                    None => page.push_str("<td>-</td>"),
                }
            }
            page.push_str("</tr>");
        }
        page.push_str("</table>");
    }

    page.push_str("<h2>Extremes</h2><table><tr><th>Exchange</th><th>Min %</th><th>Symbol</th><th>Max %</th><th>Symbol</th></tr>");
    for &venue in Exchange::alert_targets() {
        let Some(tracker) = board.extremes(venue) else {
            continue;
        };
        let _ = write!(page, "<tr><td>{venue}</td>");
        match tracker.min_symbol {
            Some(symbol) => {
                let _ = write!(page, "<td>{:.2}</td><td>{symbol}</td>", tracker.min_diff);
            }
            None => page.push_str("<td>-</td><td>-</td>"),
        }
        match tracker.max_symbol {
            Some(symbol) => {
                let _ = write!(page, "<td>{:.2}</td><td>{symbol}</td>", tracker.max_diff);
            }
            None => page.push_str("<td>-</td><td>-</td>"),
        }
        page.push_str("</tr>");
    }
    page.push_str("</table></body></html>");

    Html(page)
}

/// Apply the runtime threshold settings passed as query parameters.
///
/// Every numeric parameter is validated before any is applied, so a
/// malformed request never leaves the thresholds half-updated. Responds
/// with the effective configuration.
async fn settings_handler(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<AlertRule>, (StatusCode, String)> {
    let minimum = parse_param(&params, "minimum")?;
    let maximum = parse_param(&params, "maximum")?;
    let duration = parse_param(&params, "duration")?;
    let pair_threshold = parse_param(&params, "pThreshold")?;
    let fiat_enable = params
        .get("fiatEnable")
        .filter(|v| !v.is_empty())
        .map(|v| v == "true");

    let mut rule = state.rule.write().await;
    if let Some(minimum) = minimum {
        rule.min_threshold = minimum;
    }
    if let Some(maximum) = maximum {
        rule.max_threshold = maximum;
    }
    if let Some(duration) = duration {
        rule.duration_mins = duration;
    }
    if let Some(pair_threshold) = pair_threshold {
        rule.pair_threshold = pair_threshold;
    }
    if let Some(enabled) = fiat_enable {
        rule.fiat_alerts_enabled = enabled;
    }

    Ok(Json(*rule))
}

fn parse_param(
    params: &HashMap<String, String>,
    name: &str,
) -> Result<Option<f64>, (StatusCode, String)> {
    match params.get(name) {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => raw.parse::<f64>().map(Some).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("invalid value for {name}: {e}"),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::state::create_state;
    use pretty_assertions::assert_eq;
    use quotewatch_core::Quote;

    fn query(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
        Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_settings_updates_thresholds() {
        let state = create_state(AppConfig::default()).unwrap();
        let result = settings_handler(
            State(state.clone()),
            query(&[("minimum", "-1.5"), ("maximum", "4.0"), ("fiatEnable", "false")]),
        )
        .await
        .unwrap();

        assert_eq!(result.0.min_threshold, -1.5);
        assert_eq!(result.0.max_threshold, 4.0);
        assert!(!result.0.fiat_alerts_enabled);
        // Untouched parameters keep their previous values.
        assert_eq!(result.0.duration_mins, 10.0);
        let rule = state.rule.read().await;
        assert_eq!(rule.min_threshold, -1.5);
    }

    #[tokio::test]
    async fn test_settings_rejects_malformed_without_applying() {
        let state = create_state(AppConfig::default()).unwrap();
        let result = settings_handler(
            State(state.clone()),
            query(&[("minimum", "-1.5"), ("maximum", "not-a-number")]),
        )
        .await;

        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        // The valid minimum was not applied either.
        let rule = state.rule.read().await;
        assert_eq!(rule.min_threshold, -2.0);
    }

    #[tokio::test]
    async fn test_absent_fiat_flag_left_unchanged() {
        // Omitting fiatEnable must not touch the switch in either
        // direction, only an explicit value flips it.
        let state = create_state(AppConfig::default()).unwrap();
        settings_handler(State(state.clone()), query(&[("fiatEnable", "false")]))
            .await
            .unwrap();

        let result = settings_handler(State(state.clone()), query(&[("minimum", "-1.5")]))
            .await
            .unwrap();
        assert!(!result.0.fiat_alerts_enabled);

        let result = settings_handler(State(state), query(&[("fiatEnable", "true")]))
            .await
            .unwrap();
        assert!(result.0.fiat_alerts_enabled);
    }

    #[tokio::test]
    async fn test_settings_empty_query_echoes_current() {
        let state = create_state(AppConfig::default()).unwrap();
        let result = settings_handler(State(state), query(&[])).await.unwrap();
        assert_eq!(result.0.min_threshold, -2.0);
        assert!(result.0.fiat_alerts_enabled);
    }

    #[tokio::test]
    async fn test_dashboard_renders_board_contents() {
        let state = create_state(AppConfig::default()).unwrap();
        {
            let mut board = state.board.write().await;
            board.publish(Quote::new(
                Exchange::Gdax,
                Currency::Usd,
                Symbol::Btc,
                50000.0,
                49950.0,
            ));
            board.set_diff(
                DiffKey::new(Exchange::Gdax, Exchange::Koineks, Symbol::Btc, Side::Ask),
                1.25,
            );
            board.push_warning("Error reading Koinim prices: timeout".to_string());
        }

        let Html(page) = dashboard_handler(State(state)).await;
        assert!(page.contains("BTC"));
        assert!(page.contains("50000"));
        assert!(page.contains("1.25"));
        assert!(page.contains("Error reading Koinim prices"));
    }
}
