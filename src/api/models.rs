use std::sync::Mutex;

use alloy_primitives::U256;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::contract::{ContractClient, UpdateEvent};
use crate::notify::{NotificationCenter, NotificationKind};
use crate::wallet::WriteSubmitter;

/// Shared application state: immutable configuration, chain clients and the
/// notification queue.
pub struct AppState {
    pub config: Config,
    pub contract: ContractClient,
    /// `None` when no signer is configured.
    pub writer: Option<WriteSubmitter>,
    pub notifications: Mutex<NotificationCenter>,
}

impl AppState {
    pub fn new(config: Config, contract: ContractClient, writer: Option<WriteSubmitter>) -> Self {
        let notifications = Mutex::new(NotificationCenter::new(config.notification_ttl));
        Self {
            config,
            contract,
            writer,
            notifications,
        }
    }

    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        let now = Utc::now();
        let mut center = self.notifications.lock().expect("mutex poisoned");
        center.expire(now);
        center.add(message, kind, now);
    }
}

/* ---------- Value API Models ---------- */

#[derive(Serialize)]
pub struct ValueResponse {
    pub value: String,
}

/// Accepts both `42` and `"42"`; the latter for values beyond `u64`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ValueInput {
    Number(u64),
    Text(String),
}

impl ValueInput {
    pub fn to_u256(&self) -> Result<U256, String> {
        match self {
            ValueInput::Number(n) => Ok(U256::from(*n)),
            ValueInput::Text(s) => s
                .trim()
                .parse::<U256>()
                .map_err(|e| format!("value {s:?} is not an unsigned integer: {e}")),
        }
    }
}

#[derive(Deserialize)]
pub struct SetValueRequest {
    pub value: ValueInput,
    /// Wait for the receipt before answering.
    #[serde(default)]
    pub wait: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetValueResponse {
    pub tx_hash: String,
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
}

/* ---------- Events API Models ---------- */

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventsRequest {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
}

/// Every field is a string so large integers survive JSON.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub block_number: String,
    pub value: String,
    pub tx_hash: String,
}

impl From<&UpdateEvent> for EventResponse {
    fn from(event: &UpdateEvent) -> Self {
        Self {
            block_number: event.block_number.to_string(),
            value: event.value.to_string(),
            tx_hash: event.transaction_hash.to_string(),
        }
    }
}

/* ---------- Balance / Status API Models ---------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub address: String,
    pub short: String,
    pub balance_wei: String,
    pub balance: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub chain_id: u64,
    pub expected_chain_id: u64,
    pub on_expected_chain: bool,
    pub head: u64,
    pub contract: String,
    pub event_window: u64,
    pub writes_enabled: bool,
}
