//! Pushover notification transport.
//!
//! Delivery is fire-and-forget: a failed push is logged by the caller
//! and the alert is not retried. The state machine has already latched,
//! so a lost notification stays lost until the pair re-arms.

use thiserror::Error;
use tracing::info;

const PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("pushover request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("pushover rejected the message: HTTP {0}")]
    Rejected(u16),
}

/// Pushover credentials.
#[derive(Debug, Clone)]
pub struct PushoverConfig {
    pub user: String,
    pub token: String,
}

impl PushoverConfig {
    /// Read credentials from `PUSHOVER_USER` / `PUSHOVER_APP_TOKEN`.
    /// Returns None when either is unset or empty, which disables
    /// delivery without disabling the state machine.
    pub fn from_env() -> Option<Self> {
        let user = std::env::var("PUSHOVER_USER").ok()?;
        let token = std::env::var("PUSHOVER_APP_TOKEN").ok()?;
        if user.is_empty() || token.is_empty() {
            return None;
        }
        Some(Self { user, token })
    }
}

/// The alert push channel.
pub struct PushoverNotifier {
    config: PushoverConfig,
    client: reqwest::Client,
    url: String,
}

impl PushoverNotifier {
    pub fn new(config: PushoverConfig, client: reqwest::Client) -> Self {
        Self {
            config,
            client,
            url: PUSHOVER_URL.to_string(),
        }
    }

    /// Send one message as a form POST. Empty messages are skipped so
    /// quiet cycles cost nothing.
    pub async fn send(&self, message: &str) -> Result<(), NotifyError> {
        if message.is_empty() {
            return Ok(());
        }

        let form = [
            ("user", self.config.user.as_str()),
            ("token", self.config.token.as_str()),
            ("message", message),
        ];
        let response = self.client.post(&self.url).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        info!(message, "sent alert notification");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier_with_url(url: &str) -> PushoverNotifier {
        PushoverNotifier {
            config: PushoverConfig {
                user: "user".to_string(),
                token: "token".to_string(),
            },
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_message_skipped() {
        // An unroutable URL proves no request is made for empty input.
        let notifier = notifier_with_url("http://127.0.0.1:1/messages.json");
        assert!(notifier.send("").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        let notifier = notifier_with_url("http://127.0.0.1:1/messages.json");
        assert!(notifier.send("Koineks BTC %-2.00 49000").await.is_err());
    }
}
