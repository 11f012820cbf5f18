mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TransportError;

/// A JSON-RPC endpoint bound to one chain.
#[async_trait]
pub trait JsonRpcTransport: Send + Sync {
    /// Send one request and return its `result` member (`null` included).
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}

/// Send a request and deserialize its result.
pub async fn request_as<T: DeserializeOwned>(
    transport: &dyn JsonRpcTransport,
    method: &str,
    params: Value,
) -> Result<T, TransportError> {
    let result = transport.request(method, params).await?;
    serde_json::from_value(result)
        .map_err(|e| TransportError::Malformed(format!("{method}: {e}")))
}

/// Encode a number as a JSON-RPC quantity (`0x`-prefixed, no leading zeros).
pub fn quantity(n: u64) -> String {
    format!("{n:#x}")
}

/// Decode a JSON-RPC quantity.
pub fn parse_quantity(raw: &str) -> Result<u64, TransportError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| TransportError::Malformed(format!("quantity without 0x prefix: {raw}")))?;
    if digits.is_empty() {
        return Err(TransportError::Malformed("empty quantity".into()));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| TransportError::Malformed(format!("bad quantity {raw}: {e}")))
}

/// Decode `0x`-prefixed hex data.
pub fn parse_data(raw: &str) -> Result<Vec<u8>, TransportError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits).map_err(|e| TransportError::Malformed(format!("bad hex data: {e}")))
}

pub fn encode_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
