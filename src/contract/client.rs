use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use log::debug;
use serde_json::{Value, json};

use super::model::{RpcLog, RpcReceipt, TransactionReceipt, UpdateEvent};
use super::window::{BlockRange, BlockTag};
use super::{ValueUpdated, getValueCall};
use crate::error::{ContractError, Error};
use crate::rpc::{JsonRpcTransport, encode_data, parse_data, parse_quantity, quantity, request_as};

/// Read access to one deployed `SimpleStorage` contract.
#[derive(Clone)]
pub struct ContractClient {
    transport: Arc<dyn JsonRpcTransport>,
    address: Address,
    event_window: u64,
}

impl ContractClient {
    pub fn new(transport: Arc<dyn JsonRpcTransport>, address: Address, event_window: u64) -> Self {
        Self {
            transport,
            address,
            event_window,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn event_window(&self) -> u64 {
        self.event_window
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, Error> {
        request_as(self.transport.as_ref(), method, params)
            .await
            .map_err(Error::from_rpc)
    }

    /// Current value held by the contract (`getValue()` at `latest`).
    pub async fn read_value(&self) -> Result<U256, Error> {
        let call = json!({
            "to": self.address,
            "data": encode_data(&getValueCall::SELECTOR),
        });
        let raw: String = self.request("eth_call", json!([call, "latest"])).await?;
        let bytes = parse_data(&raw)?;
        if bytes.len() < 32 {
            // `0x` comes back when there is no code at the address.
            return Err(ContractError::Reverted(format!(
                "getValue returned {} bytes from {}",
                bytes.len(),
                self.address
            ))
            .into());
        }
        Ok(U256::from_be_slice(&bytes[..32]))
    }

    /// `ValueUpdated` events in `[from, to]`, oldest first.
    ///
    /// Without `from` the query covers the trailing event window ending at
    /// the current head; without `to` it runs up to `latest`.
    pub async fn read_events(
        &self,
        from: Option<u64>,
        to: Option<u64>,
    ) -> Result<Vec<UpdateEvent>, Error> {
        let to = to.map_or(BlockTag::Latest, BlockTag::Number);
        let range = match from {
            Some(from) => BlockRange::new(from, to)?,
            None => {
                let head = self.block_number().await?;
                let trailing = BlockRange::trailing(head, self.event_window);
                match BlockRange::new(trailing.from, to) {
                    Ok(range) => range,
                    // `to` ends before the window starts.
                    Err(_) => return Ok(Vec::new()),
                }
            }
        };
        self.logs_in(range).await
    }

    async fn logs_in(&self, range: BlockRange) -> Result<Vec<UpdateEvent>, Error> {
        let topic = ValueUpdated::SIGNATURE_HASH;
        let filter = json!({
            "address": self.address,
            "topics": [topic],
            "fromBlock": quantity(range.from),
            "toBlock": range.to.to_rpc(),
        });
        let logs: Vec<RpcLog> = self.request("eth_getLogs", json!([filter])).await?;
        debug!(
            "eth_getLogs {}..{:?} returned {} logs",
            range.from,
            range.to,
            logs.len()
        );

        let mut events = Vec::with_capacity(logs.len());
        for log in logs {
            if log.topics.first() != Some(&topic) {
                continue;
            }
            if let Some(event) = UpdateEvent::from_log(log)? {
                events.push(event);
            }
        }
        events.sort_by_key(|e| (e.block_number, e.log_index));
        Ok(events)
    }

    pub async fn block_number(&self) -> Result<u64, Error> {
        let raw: String = self.request("eth_blockNumber", json!([])).await?;
        Ok(parse_quantity(&raw)?)
    }

    pub async fn chain_id(&self) -> Result<u64, Error> {
        let raw: String = self.request("eth_chainId", json!([])).await?;
        Ok(parse_quantity(&raw)?)
    }

    /// Native-currency balance of `account`, in wei.
    pub async fn balance_of(&self, account: Address) -> Result<U256, Error> {
        self.request("eth_getBalance", json!([account, "latest"]))
            .await
    }

    pub async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, Error> {
        let raw: Option<RpcReceipt> = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        match raw {
            Some(raw) => Ok(TransactionReceipt::from_rpc(raw)?),
            None => Ok(None),
        }
    }
}
