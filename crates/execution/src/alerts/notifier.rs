use async_trait::async_trait;
use thiserror::Error;

/// Where a notification should be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTarget {
    /// Chat or channel identifier.
    pub chat_id: String,
    /// Optional topic/thread inside the chat.
    pub thread_id: Option<i64>,
}

impl DeliveryTarget {
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            thread_id: None,
        }
    }

    #[must_use]
    pub fn with_thread(mut self, thread_id: i64) -> Self {
        self.thread_id = Some(thread_id);
        self
    }
}

/// What happened to a notification that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The transport accepted the message.
    Sent,
    /// Delivery is not configured; nothing was sent.
    Skipped,
}

/// Notification delivery failure.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network failure or timeout, with the request URL stripped.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// The transport rejected the message.
    #[error("delivery rejected with HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

/// Sends formatted messages to a delivery target.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `message`; an absent target means "not configured" and
    /// yields [`NotifyOutcome::Skipped`].
    async fn notify(
        &self,
        message: &str,
        target: Option<&DeliveryTarget>,
    ) -> Result<NotifyOutcome, NotifyError>;
}
