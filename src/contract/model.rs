use alloy_primitives::{B256, U256};
use serde::Deserialize;

use crate::error::TransportError;
use crate::rpc::{parse_data, parse_quantity};

/// One `ValueUpdated` emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEvent {
    pub block_number: u64,
    pub log_index: u64,
    pub value: U256,
    pub transaction_hash: B256,
}

/// Log object as returned by `eth_getLogs`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcLog {
    #[serde(default)]
    pub topics: Vec<B256>,
    pub data: String,
    pub block_number: Option<String>,
    pub transaction_hash: Option<B256>,
    pub log_index: Option<String>,
    #[serde(default)]
    pub removed: bool,
}

impl UpdateEvent {
    /// Decode a log. Pending logs (no block yet) and logs removed by a reorg
    /// yield `None`.
    pub(crate) fn from_log(log: RpcLog) -> Result<Option<Self>, TransportError> {
        if log.removed {
            return Ok(None);
        }
        let (Some(block_number), Some(transaction_hash)) =
            (log.block_number.as_deref(), log.transaction_hash)
        else {
            return Ok(None);
        };
        let data = parse_data(&log.data)?;
        if data.len() < 32 {
            return Err(TransportError::Malformed(format!(
                "ValueUpdated data is {} bytes, expected 32",
                data.len()
            )));
        }
        let log_index = match log.log_index.as_deref() {
            Some(raw) => parse_quantity(raw)?,
            None => 0,
        };
        Ok(Some(Self {
            block_number: parse_quantity(block_number)?,
            log_index,
            value: U256::from_be_slice(&data[..32]),
            transaction_hash,
        }))
    }
}

/// Receipt fields this service cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub block_number: u64,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<String>,
    pub status: Option<String>,
}

impl TransactionReceipt {
    /// Receipts without a block number are not mined yet.
    pub(crate) fn from_rpc(raw: RpcReceipt) -> Result<Option<Self>, TransportError> {
        let Some(block_number) = raw.block_number.as_deref() else {
            return Ok(None);
        };
        // Pre-Byzantium receipts carry no status; treat them as successful.
        let success = match raw.status.as_deref() {
            Some(status) => parse_quantity(status)? == 1,
            None => true,
        };
        Ok(Some(Self {
            transaction_hash: raw.transaction_hash,
            block_number: parse_quantity(block_number)?,
            success,
        }))
    }
}
