pub mod classifier;

pub use classifier::{Classification, ErrorCategory, MAX_DETAIL_CHARS, classify};

use alloy_primitives::B256;
use thiserror::Error;

use crate::contract::RangeError;

/// Failures of the JSON-RPC transport or of the node answering it.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("RPC request timed out")]
    Timeout,

    #[error("RPC endpoint unreachable: {0}")]
    Network(String),

    /// Error object returned by the node.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed RPC response: {0}")]
    Malformed(String),
}

/// Failures on the signing side of a write.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("user rejected the request")]
    Rejected,

    #[error("insufficient funds for transaction")]
    InsufficientFunds,

    #[error("wrong network: expected chain {expected:#x}, signer is on {actual:#x}")]
    WrongNetwork { expected: u64, actual: u64 },

    /// The wallet itself reported a chain mismatch.
    #[error("chain mismatch: {0}")]
    ChainMismatch(String),

    #[error("wallet error: {0}")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("execution reverted: {0}")]
    Reverted(String),

    #[error("transaction {0} reverted")]
    TransactionFailed(B256),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Range(#[from] RangeError),
}

impl Error {
    /// Promote a node-reported RPC error to the layer it actually belongs to.
    /// Errors that do not classify stay transport errors.
    pub fn from_rpc(err: TransportError) -> Self {
        let TransportError::Rpc { code, message } = err else {
            return Error::Transport(err);
        };
        match classify(&message, Some(code)).category {
            ErrorCategory::Rejected => WalletError::Rejected.into(),
            ErrorCategory::WrongNetwork => WalletError::ChainMismatch(message).into(),
            ErrorCategory::Reverted => ContractError::Reverted(message).into(),
            ErrorCategory::InsufficientFunds => WalletError::InsufficientFunds.into(),
            ErrorCategory::Timeout => TransportError::Timeout.into(),
            ErrorCategory::NetworkUnreachable => TransportError::Network(message).into(),
            ErrorCategory::Unknown => TransportError::Rpc { code, message }.into(),
        }
    }

    pub fn classification(&self) -> Classification {
        let category = match self {
            Error::Transport(TransportError::Timeout) => ErrorCategory::Timeout,
            Error::Transport(TransportError::Network(_)) => ErrorCategory::NetworkUnreachable,
            Error::Transport(TransportError::Rpc { code, message }) => {
                return classify(message, Some(*code));
            }
            Error::Wallet(WalletError::Rejected) => ErrorCategory::Rejected,
            Error::Wallet(WalletError::InsufficientFunds) => ErrorCategory::InsufficientFunds,
            Error::Wallet(WalletError::WrongNetwork { .. } | WalletError::ChainMismatch(_)) => {
                ErrorCategory::WrongNetwork
            }
            Error::Contract(_) => ErrorCategory::Reverted,
            Error::Wallet(WalletError::Unknown(message)) => return classify(message, None),
            Error::Transport(TransportError::Malformed(_)) | Error::Range(_) => {
                return Classification {
                    category: ErrorCategory::Unknown,
                    detail: Some(self.to_string().chars().take(MAX_DETAIL_CHARS).collect()),
                };
            }
        };
        Classification {
            category,
            detail: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.classification().category
    }
}
