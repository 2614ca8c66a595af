//! Telegram Bot API notifier.

use super::{DeliveryTarget, NotifyError, NotifyOutcome, Notifier};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: Option<String>,
    /// Bot API base URL.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base: "https://api.telegram.org".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_thread_id: Option<i64>,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

/// Notifier that posts HTML messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    /// Creates a new Telegram notifier.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn bot_token(&self) -> Option<&str> {
        self.config
            .bot_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(
        &self,
        message: &str,
        target: Option<&DeliveryTarget>,
    ) -> Result<NotifyOutcome, NotifyError> {
        let target = target.filter(|t| !t.chat_id.trim().is_empty());
        let (Some(token), Some(target)) = (self.bot_token(), target) else {
            debug!("Telegram delivery not configured, skipping notification");
            return Ok(NotifyOutcome::Skipped);
        };

        let url = format!("{}/bot{}/sendMessage", self.config.api_base, token);
        let payload = SendMessage {
            chat_id: &target.chat_id,
            message_thread_id: target.thread_id,
            text: message,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let response = self.client.post(url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        debug!(chat_id = %target.chat_id, "Telegram notification sent");
        Ok(NotifyOutcome::Sent)
    }
}
