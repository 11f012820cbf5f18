use std::env;
use std::time::Duration;

use alloy_primitives::Address;
use chrono::TimeDelta;
use reqwest::Url;
use thiserror::Error;

use crate::contract::DEFAULT_EVENT_WINDOW;

pub const DEFAULT_RPC_URL: &str = "https://api.avax-test.network/ext/bc/C/rpc";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xCC33006367bB9d606d7afe5BfC3Ec3Ba6f0df960";
/// Avalanche Fuji C-Chain (`0xa869`).
pub const DEFAULT_CHAIN_ID: u64 = 43_113;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: invalid value {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-wide settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rpc_url: Url,
    pub contract_address: Address,
    pub chain_id: u64,
    pub rpc_timeout: Duration,
    pub event_window: u64,
    /// Account used for writes; writes are disabled without one.
    pub signer_address: Option<Address>,
    pub confirmation_timeout: Duration,
    pub notification_ttl: TimeDelta,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", get("PORT"), 3000u16, |v| v.parse().map_err(err))?;
        let rpc_url = parse_or(
            "RPC_URL",
            get("RPC_URL"),
            Url::parse(DEFAULT_RPC_URL).map_err(|e| invalid("RPC_URL", DEFAULT_RPC_URL, e))?,
            |v| Url::parse(v).map_err(err),
        )?;
        let contract_address = parse_or(
            "CONTRACT_ADDRESS",
            get("CONTRACT_ADDRESS"),
            DEFAULT_CONTRACT_ADDRESS
                .parse()
                .map_err(|e| invalid("CONTRACT_ADDRESS", DEFAULT_CONTRACT_ADDRESS, e))?,
            |v| v.parse::<Address>().map_err(err),
        )?;
        let chain_id = parse_or("CHAIN_ID", get("CHAIN_ID"), DEFAULT_CHAIN_ID, parse_chain_id)?;
        let rpc_timeout_ms = parse_or("RPC_TIMEOUT_MS", get("RPC_TIMEOUT_MS"), 10_000u64, |v| {
            v.parse().map_err(err)
        })?;
        let event_window = parse_or(
            "EVENT_WINDOW",
            get("EVENT_WINDOW"),
            DEFAULT_EVENT_WINDOW,
            |v| v.parse().map_err(err),
        )?;
        let signer_address = match get("SIGNER_ADDRESS") {
            Some(v) => Some(
                v.parse::<Address>()
                    .map_err(|e| invalid("SIGNER_ADDRESS", &v, e))?,
            ),
            None => None,
        };
        let confirmation_secs = parse_or(
            "CONFIRMATION_TIMEOUT_SECS",
            get("CONFIRMATION_TIMEOUT_SECS"),
            60u64,
            |v| v.parse().map_err(err),
        )?;
        let notification_ttl = parse_or(
            "NOTIFICATION_TTL_SECS",
            get("NOTIFICATION_TTL_SECS"),
            TimeDelta::seconds(5),
            |v| {
                let secs: i64 = v.parse().map_err(err)?;
                TimeDelta::try_seconds(secs).ok_or_else(|| "out of range".to_string())
            },
        )?;

        Ok(Self {
            host,
            port,
            rpc_url,
            contract_address,
            chain_id,
            rpc_timeout: Duration::from_millis(rpc_timeout_ms),
            event_window,
            signer_address,
            confirmation_timeout: Duration::from_secs(confirmation_secs),
            notification_ttl,
        })
    }
}

fn err(e: impl std::fmt::Display) -> String {
    e.to_string()
}

fn invalid(name: &'static str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_or<T>(
    name: &'static str,
    raw: Option<String>,
    default: T,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => parse(v.trim()).map_err(|reason| invalid(name, &v, reason)),
        None => Ok(default),
    }
}

/// Chain ids are written either as decimal (`43113`) or hex (`0xa869`).
pub fn parse_chain_id(raw: &str) -> Result<u64, String> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).map_err(err),
        None => raw.parse().map_err(err),
    }
}
