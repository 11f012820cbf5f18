use std::sync::Arc;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde_json::json;

use crate::error::Error;
use crate::rpc::{JsonRpcTransport, encode_data, parse_quantity, request_as};

/// A connected account able to authorize transactions.
#[async_trait]
pub trait Signer: Send + Sync {
    fn address(&self) -> Address;

    /// Chain the signer is currently connected to.
    async fn chain_id(&self) -> Result<u64, Error>;

    /// Sign and broadcast a call to `to` with `data`, returning the transaction hash.
    async fn send_transaction(&self, to: Address, data: Vec<u8>) -> Result<B256, Error>;
}

/// Account managed by the node or wallet behind a JSON-RPC endpoint; signing
/// happens there via `eth_sendTransaction`.
pub struct RpcSigner {
    transport: Arc<dyn JsonRpcTransport>,
    from: Address,
}

impl RpcSigner {
    pub fn new(transport: Arc<dyn JsonRpcTransport>, from: Address) -> Self {
        Self { transport, from }
    }
}

#[async_trait]
impl Signer for RpcSigner {
    fn address(&self) -> Address {
        self.from
    }

    async fn chain_id(&self) -> Result<u64, Error> {
        let raw: String = request_as(self.transport.as_ref(), "eth_chainId", json!([]))
            .await
            .map_err(Error::from_rpc)?;
        Ok(parse_quantity(&raw)?)
    }

    async fn send_transaction(&self, to: Address, data: Vec<u8>) -> Result<B256, Error> {
        let tx = json!({
            "from": self.from,
            "to": to,
            "data": encode_data(&data),
        });
        request_as(self.transport.as_ref(), "eth_sendTransaction", json!([tx]))
            .await
            .map_err(Error::from_rpc)
    }
}
