use super::HeartbeatPayload;
use crate::monitor::RunCounters;
use async_trait::async_trait;
use chrono::Utc;
use clmm_monitor_domain::WalletAddress;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Heartbeat delivery failure.
#[derive(Debug, Error)]
pub enum HeartbeatError {
    /// Network failure or timeout, with the request URL stripped.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// The collector answered with a non-success status.
    #[error("collector returned HTTP status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for HeartbeatError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

/// Reports run counters to a collector.
#[async_trait]
pub trait HeartbeatReporter: Send + Sync {
    async fn report(&self, counters: &RunCounters, uptime: Duration) -> Result<(), HeartbeatError>;
}

/// Configuration for the HTTP heartbeat.
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Collector endpoint.
    pub url: String,
    /// Service display name.
    pub service_name: String,
    /// Stable service identifier.
    pub service_id: String,
    /// Expected interval between heartbeats.
    pub interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000/heartbeat".to_string(),
            service_name: "CLMM LP Monitor".to_string(),
            service_id: "lp-monitor".to_string(),
            interval: Duration::from_secs(300),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Posts [`HeartbeatPayload`]s as JSON.
pub struct HttpHeartbeat {
    client: reqwest::Client,
    config: HeartbeatConfig,
    wallet: WalletAddress,
}

impl HttpHeartbeat {
    /// Creates a new HTTP heartbeat reporter.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: HeartbeatConfig, wallet: WalletAddress) -> Result<Self, HeartbeatError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            wallet,
        })
    }
}

#[async_trait]
impl HeartbeatReporter for HttpHeartbeat {
    async fn report(&self, counters: &RunCounters, uptime: Duration) -> Result<(), HeartbeatError> {
        let payload = HeartbeatPayload::build(
            &self.config.service_name,
            &self.config.service_id,
            self.config.interval,
            &self.wallet,
            counters,
            uptime,
            Utc::now(),
        );

        let response = self.client.post(&self.config.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HeartbeatError::Status(status.as_u16()));
        }

        info!(
            total_requests = payload.status1.total_requests,
            success_rate = %payload.status1.success_rate,
            "Heartbeat sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reporter_for(server: &MockServer) -> HttpHeartbeat {
        HttpHeartbeat::new(
            HeartbeatConfig {
                url: format!("{}/heartbeat", server.uri()),
                ..HeartbeatConfig::default()
            },
            WalletAddress::parse("0x1111111111111111111111111111111111111111").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_report_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/heartbeat"))
            .and(body_partial_json(serde_json::json!({
                "serviceId": "lp-monitor",
                "heartbeatInterval": 300000,
                "status1": { "totalRequests": 0, "successRate": "N/A" }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let counters = RunCounters::new();
        reporter_for(&server)
            .report(&counters, Duration::from_secs(5))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_report_non_success_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = reporter_for(&server)
            .report(&RunCounters::new(), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, HeartbeatError::Status(503)));
    }
}
