use super::query::positions_query;
use super::response::GraphResponse;
use crate::{PositionSource, SourceError, truncate};
use async_trait::async_trait;
use clmm_monitor_domain::{Position, WalletAddress};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Configuration for the subgraph source.
#[derive(Debug, Clone)]
pub struct SubgraphConfig {
    /// GraphQL endpoint.
    pub url: String,
    /// Gateway API key, sent as a bearer token when set.
    pub api_key: Option<String>,
    /// Maximum positions returned per query.
    pub page_size: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            url: "https://gateway.thegraph.com/api/subgraphs/id/A1BC1hzDsK4NTeXBpKQnDBphngpYZAwDUF7dEBfa3jHK"
                .to_string(),
            api_key: None,
            page_size: 50,
            timeout: Duration::from_secs(20),
        }
    }
}

/// Position source backed by the exchange subgraph.
pub struct SubgraphSource {
    client: reqwest::Client,
    config: SubgraphConfig,
}

impl SubgraphSource {
    /// Creates a new subgraph source.
    ///
    /// # Errors
    /// Returns [`SourceError::Init`] if the HTTP client cannot be built.
    pub fn new(config: SubgraphConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Init(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl PositionSource for SubgraphSource {
    fn name(&self) -> &'static str {
        "subgraph"
    }

    async fn fetch_positions(&self, wallet: &WalletAddress) -> Result<Vec<Position>, SourceError> {
        let query = positions_query(wallet, self.config.page_size);

        let mut request = self.client.post(&self.config.url).json(&json!({ "query": query }));
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let body: GraphResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.without_url().to_string()))?;
        let positions = body.into_positions()?;

        debug!(wallet = %wallet, count = positions.len(), "Fetched positions from subgraph");
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn wallet() -> WalletAddress {
        WalletAddress::parse("0x1111111111111111111111111111111111111111").unwrap()
    }

    async fn source_for(server: &MockServer, api_key: Option<&str>) -> SubgraphSource {
        SubgraphSource::new(SubgraphConfig {
            url: format!("{}/subgraph", server.uri()),
            api_key: api_key.map(str::to_string),
            ..SubgraphConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/subgraph"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "positions": [{
                    "id": "7",
                    "liquidity": "1000",
                    "tickLower": { "index": "-10" },
                    "tickUpper": { "index": "10" },
                    "pool": { "id": "0xpool", "tick": "3" }
                }]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = source_for(&server, Some("secret")).await;
        let positions = source.fetch_positions(&wallet()).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].id.as_str(), "7");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let source = source_for(&server, None).await;
        let err = source.fetch_positions(&wallet()).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 429, ref body } if body == "rate limited"));
    }

    #[tokio::test]
    async fn test_query_errors_are_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "errors": [{ "message": "bad query" }]
            })))
            .mount(&server)
            .await;

        let source = source_for(&server, None).await;
        let err = source.fetch_positions(&wallet()).await.unwrap_err();
        assert_eq!(err.kind(), "query");
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let source = source_for(&server, None).await;
        let err = source.fetch_positions(&wallet()).await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let source = SubgraphSource::new(SubgraphConfig {
            url: "http://127.0.0.1:1/subgraph".to_string(),
            timeout: Duration::from_secs(2),
            ..SubgraphConfig::default()
        })
        .unwrap();
        let err = source.fetch_positions(&wallet()).await.unwrap_err();
        assert!(matches!(err, SourceError::Transport(_)));
    }
}
