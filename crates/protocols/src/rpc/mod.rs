//! Minimal Ethereum JSON-RPC client.

use crate::{SourceError, truncate};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;

/// Configuration for the RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// HTTP(S) endpoint URL.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://binance.llamarpc.com/".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

/// JSON-RPC 2.0 client over HTTP.
pub struct JsonRpcClient {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// Creates a new client.
    ///
    /// # Errors
    /// Returns [`SourceError::Init`] if the HTTP client cannot be built.
    pub fn new(config: &RpcConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Init(e.to_string()))?;
        Ok(Self {
            client,
            url: config.url.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Sends a request and returns its `result`.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, SourceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        trace!(id, method, "Sending JSON-RPC request");

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.without_url().to_string()))?;
        if let Some(error) = body.error {
            return Err(SourceError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        body.result
            .ok_or_else(|| SourceError::Malformed(format!("{method}: missing result")))
    }

    /// Returns the chain id the endpoint serves.
    pub async fn chain_id(&self) -> Result<u64, SourceError> {
        let result = self.request("eth_chainId", json!([])).await?;
        let text = result
            .as_str()
            .ok_or_else(|| SourceError::Malformed("eth_chainId: expected hex string".to_string()))?;
        parse_quantity(text)
    }

    /// Executes a read-only call against `to` at the latest block.
    pub async fn eth_call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>, SourceError> {
        let call = json!({
            "to": to,
            "data": format!("0x{}", hex::encode(data)),
        });
        let result = self.request("eth_call", json!([call, "latest"])).await?;
        let text = result
            .as_str()
            .ok_or_else(|| SourceError::Malformed("eth_call: expected hex string".to_string()))?;
        decode_hex(text)
    }
}

/// Parses a hex quantity such as `0x38`.
pub fn parse_quantity(text: &str) -> Result<u64, SourceError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u64::from_str_radix(digits, 16)
        .map_err(|_| SourceError::Malformed(format!("invalid hex quantity `{text}`")))
}

/// Decodes `0x`-prefixed hex data.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, SourceError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|_| SourceError::Malformed(format!("invalid hex data `{text}`")))
}
