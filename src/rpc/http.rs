use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::JsonRpcTransport;
use crate::error::TransportError;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC over HTTP POST with a fixed per-request timeout.
pub struct HttpTransport {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_decode() {
        TransportError::Malformed(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl JsonRpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("RPC -> #{id} {method} {params}");

        let response = self
            .client
            .post(self.url.clone())
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id,
                method,
                params,
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("RPC <- #{id} {method} HTTP {status}");
            return Err(TransportError::Network(format!(
                "RPC endpoint answered HTTP {status}"
            )));
        }

        let body: RpcResponse = response.json().await.map_err(map_reqwest_error)?;
        if body.id.as_u64().is_some_and(|got| got != id) {
            return Err(TransportError::Malformed(format!(
                "response id {} does not match request id {id}",
                body.id
            )));
        }
        if let Some(err) = body.error {
            debug!("RPC <- #{id} {method} error {}: {}", err.code, err.message);
            return Err(TransportError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        Ok(body.result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Url;
    use serde_json::json;

    use super::{HttpTransport, JsonRpcTransport};
    use crate::error::{Error, ErrorCategory};

    #[actix_web::test]
    async fn unreachable_endpoint_is_a_network_failure() {
        // Nothing listens on port 9 on loopback.
        let url = Url::parse("http://127.0.0.1:9/").expect("url");
        let transport = HttpTransport::new(url, Duration::from_secs(2)).expect("client");
        let err = transport
            .request("eth_blockNumber", json!([]))
            .await
            .expect_err("must fail");
        let category = Error::from(err).category();
        assert!(
            category.is_transient(),
            "unexpected category {category:?}"
        );
        assert_ne!(category, ErrorCategory::Unknown);
    }
}
