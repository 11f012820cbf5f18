//! In-memory chain hosting one `SimpleStorage` contract, answering the
//! JSON-RPC methods the service uses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, B256, U256, keccak256};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::api::AppState;
use crate::config::Config;
use crate::contract::{ContractClient, ValueUpdated, getValueCall, setValueCall};
use crate::error::TransportError;
use crate::rpc::{JsonRpcTransport, encode_data, parse_data, parse_quantity, quantity};
use crate::wallet::{RpcSigner, WriteSubmitter};

pub const FUJI_CHAIN_ID: u64 = 0xa869;

pub fn contract_address() -> Address {
    Address::repeat_byte(0xcc)
}

/// Application state wired to `chain`, with default configuration. The
/// signer (when requested) is a node-managed account on the same chain.
pub fn app_state(chain: &MockChain, with_signer: bool) -> AppState {
    let mut config = Config::from_lookup(|_| None).expect("default config");
    config.contract_address = contract_address();
    let contract = chain.contract_client(config.event_window);
    let writer = with_signer.then(|| {
        let signer = RpcSigner::new(Arc::new(chain.clone()), Address::repeat_byte(0x42));
        WriteSubmitter::new(
            contract.clone(),
            Arc::new(signer),
            config.chain_id,
            Duration::from_millis(300),
        )
        .with_poll_interval(Duration::from_millis(10))
    });
    AppState::new(config, contract, writer)
}

struct MockLog {
    block_number: u64,
    value: U256,
    transaction_hash: B256,
}

struct ChainState {
    chain_id: u64,
    head: u64,
    value: U256,
    logs: Vec<MockLog>,
    receipts: HashMap<B256, u64>,
    balances: HashMap<Address, U256>,
    failure: Option<TransportError>,
    send_failure: Option<TransportError>,
    withhold_receipts: bool,
    calls: usize,
    sent: usize,
}

#[derive(Clone)]
pub struct MockChain {
    state: Arc<Mutex<ChainState>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ChainState {
                chain_id: FUJI_CHAIN_ID,
                head: 1,
                value: U256::ZERO,
                logs: Vec::new(),
                receipts: HashMap::new(),
                balances: HashMap::new(),
                failure: None,
                send_failure: None,
                withhold_receipts: false,
                calls: 0,
                sent: 0,
            })),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ChainState) -> R) -> R {
        let mut state = self.state.lock().expect("mutex poisoned");
        f(&mut state)
    }

    pub fn contract_client(&self, window: u64) -> ContractClient {
        ContractClient::new(Arc::new(self.clone()), contract_address(), window)
    }

    pub fn client_for_other_address(&self, window: u64) -> ContractClient {
        ContractClient::new(Arc::new(self.clone()), Address::repeat_byte(0xdd), window)
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.with_state(|s| s.chain_id = chain_id);
    }

    pub fn set_head(&self, head: u64) {
        self.with_state(|s| s.head = head);
    }

    pub fn set_value(&self, value: U256) {
        self.with_state(|s| s.value = value);
    }

    pub fn set_balance(&self, account: Address, wei: U256) {
        self.with_state(|s| s.balances.insert(account, wei));
    }

    /// Record a `ValueUpdated` log at `block_number` without touching the head.
    pub fn push_event(&self, block_number: u64, value: U256) -> B256 {
        self.with_state(|s| {
            let hash = keccak256(format!("{block_number}:{value}:{}", s.logs.len()));
            s.logs.push(MockLog {
                block_number,
                value,
                transaction_hash: hash,
            });
            hash
        })
    }

    /// Every request fails with `err` from now on.
    pub fn fail_with(&self, err: TransportError) {
        self.with_state(|s| s.failure = Some(err));
    }

    /// Only `eth_sendTransaction` fails with `err`.
    pub fn fail_sends_with(&self, err: TransportError) {
        self.with_state(|s| s.send_failure = Some(err));
    }

    /// Transactions are still accepted but never get a receipt.
    pub fn withhold_receipts(&self) {
        self.with_state(|s| s.withhold_receipts = true);
    }

    pub fn calls(&self) -> usize {
        self.with_state(|s| s.calls)
    }

    pub fn sent(&self) -> usize {
        self.with_state(|s| s.sent)
    }
}

fn param_address(value: &Value) -> Option<Address> {
    value.as_str().and_then(|s| s.parse().ok())
}

fn method_error(message: &str) -> TransportError {
    TransportError::Rpc {
        code: -32602,
        message: message.to_string(),
    }
}

impl ChainState {
    fn eth_call(&self, params: &Value) -> Result<Value, TransportError> {
        let call = &params[0];
        if param_address(&call["to"]) != Some(contract_address()) {
            return Ok(json!("0x"));
        }
        let data = parse_data(call["data"].as_str().unwrap_or_default())?;
        if data != getValueCall::SELECTOR {
            return Err(TransportError::Rpc {
                code: 3,
                message: "execution reverted".into(),
            });
        }
        Ok(json!(encode_data(&self.value.to_be_bytes::<32>())))
    }

    fn eth_get_logs(&self, params: &Value) -> Result<Value, TransportError> {
        let filter = &params[0];
        if param_address(&filter["address"]) != Some(contract_address()) {
            return Ok(json!([]));
        }
        let topic0 = ValueUpdated::SIGNATURE_HASH;
        let wanted: Option<B256> = filter["topics"][0]
            .as_str()
            .and_then(|s| s.parse().ok());
        if wanted != Some(topic0) {
            return Ok(json!([]));
        }
        let from = filter["fromBlock"]
            .as_str()
            .ok_or_else(|| method_error("fromBlock"))?;
        let from = parse_quantity(from)?;
        let to = match filter["toBlock"].as_str() {
            Some("latest") | None => self.head,
            Some(raw) => parse_quantity(raw)?,
        };
        let logs: Vec<Value> = self
            .logs
            .iter()
            .enumerate()
            .filter(|(_, l)| l.block_number >= from && l.block_number <= to)
            .map(|(i, l)| {
                json!({
                    "address": contract_address(),
                    "topics": [topic0],
                    "data": encode_data(&l.value.to_be_bytes::<32>()),
                    "blockNumber": quantity(l.block_number),
                    "transactionHash": l.transaction_hash,
                    "logIndex": quantity(i as u64),
                    "removed": false
                })
            })
            .collect();
        Ok(Value::Array(logs))
    }

    fn eth_send_transaction(&mut self, params: &Value) -> Result<Value, TransportError> {
        if let Some(err) = self.send_failure.clone() {
            return Err(err);
        }
        let tx = &params[0];
        if param_address(&tx["to"]) != Some(contract_address()) {
            return Err(method_error("unknown recipient"));
        }
        let data = parse_data(tx["data"].as_str().unwrap_or_default())?;
        if data.len() != 36 || data[..4] != setValueCall::SELECTOR {
            return Err(TransportError::Rpc {
                code: 3,
                message: "execution reverted".into(),
            });
        }
        let value = U256::from_be_slice(&data[4..36]);
        self.head += 1;
        self.value = value;
        let hash = keccak256(format!("tx:{}:{value}:{}", self.head, self.sent));
        self.logs.push(MockLog {
            block_number: self.head,
            value,
            transaction_hash: hash,
        });
        if !self.withhold_receipts {
            self.receipts.insert(hash, self.head);
        }
        self.sent += 1;
        Ok(json!(hash))
    }

    fn eth_get_transaction_receipt(&self, params: &Value) -> Result<Value, TransportError> {
        let hash: Option<B256> = params[0].as_str().and_then(|s| s.parse().ok());
        let Some(hash) = hash else {
            return Err(method_error("transaction hash"));
        };
        Ok(match self.receipts.get(&hash) {
            Some(block) => json!({
                "transactionHash": hash,
                "blockNumber": quantity(*block),
                "status": "0x1"
            }),
            None => Value::Null,
        })
    }
}

#[async_trait]
impl JsonRpcTransport for MockChain {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        self.with_state(|s| {
            s.calls += 1;
            if let Some(err) = s.failure.clone() {
                return Err(err);
            }
            match method {
                "eth_chainId" => Ok(json!(quantity(s.chain_id))),
                "eth_blockNumber" => Ok(json!(quantity(s.head))),
                "eth_call" => s.eth_call(&params),
                "eth_getLogs" => s.eth_get_logs(&params),
                "eth_getBalance" => {
                    let account =
                        param_address(&params[0]).ok_or_else(|| method_error("address"))?;
                    let wei = s.balances.get(&account).copied().unwrap_or_default();
                    Ok(json!(format!("0x{wei:x}")))
                }
                "eth_sendTransaction" => s.eth_send_transaction(&params),
                "eth_getTransactionReceipt" => s.eth_get_transaction_receipt(&params),
                other => Err(TransportError::Rpc {
                    code: -32601,
                    message: format!("the method {other} does not exist/is not available"),
                }),
            }
        })
    }
}
