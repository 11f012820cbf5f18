use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::rt::time::sleep;
use alloy_primitives::{B256, U256};
use alloy_sol_types::SolCall;
use log::{debug, info, warn};

use super::Signer;
use crate::contract::{ContractClient, TransactionReceipt, setValueCall};
use crate::error::{ContractError, Error, TransportError, WalletError};

/// Interval between receipt polls while waiting for confirmation.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Handle of a broadcast, not yet confirmed, transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransaction {
    hash: B256,
}

impl PendingTransaction {
    pub fn hash(&self) -> B256 {
        self.hash
    }
}

/// Sends `setValue` writes through a connected signer.
pub struct WriteSubmitter {
    contract: ContractClient,
    signer: Arc<dyn Signer>,
    expected_chain_id: u64,
    confirmation_timeout: Duration,
    poll_interval: Duration,
}

impl WriteSubmitter {
    pub fn new(
        contract: ContractClient,
        signer: Arc<dyn Signer>,
        expected_chain_id: u64,
        confirmation_timeout: Duration,
    ) -> Self {
        Self {
            contract,
            signer,
            expected_chain_id,
            confirmation_timeout,
            poll_interval: RECEIPT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Broadcast `setValue(value)`. Nothing is sent when the signer is on a
    /// different chain than the one the contract lives on.
    pub async fn submit_set_value(&self, value: U256) -> Result<PendingTransaction, Error> {
        let actual = self.signer.chain_id().await.map_err(wallet_failure)?;
        if actual != self.expected_chain_id {
            warn!(
                "setValue({value}) refused: signer {} on chain {actual:#x}, expected {:#x}",
                self.signer.address(),
                self.expected_chain_id
            );
            return Err(WalletError::WrongNetwork {
                expected: self.expected_chain_id,
                actual,
            }
            .into());
        }

        let data = setValueCall { newValue: value }.abi_encode();
        let hash = self
            .signer
            .send_transaction(self.contract.address(), data)
            .await
            .map_err(wallet_failure)?;
        info!(
            "setValue({value}) broadcast by {} as {hash}",
            self.signer.address()
        );
        Ok(PendingTransaction { hash })
    }

    /// Wait once, up to the confirmation timeout, for the transaction to be mined.
    pub async fn wait_for_confirmation(
        &self,
        pending: &PendingTransaction,
    ) -> Result<TransactionReceipt, Error> {
        let started = Instant::now();
        loop {
            if let Some(receipt) = self.contract.transaction_receipt(pending.hash).await? {
                if !receipt.success {
                    return Err(ContractError::TransactionFailed(pending.hash).into());
                }
                debug!(
                    "{} confirmed in block {} after {} ms",
                    receipt.transaction_hash,
                    receipt.block_number,
                    started.elapsed().as_millis()
                );
                return Ok(receipt);
            }
            let remaining = self.confirmation_timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                warn!("{} not mined within {:?}", pending.hash, self.confirmation_timeout);
                return Err(TransportError::Timeout.into());
            }
            sleep(self.poll_interval.min(remaining)).await;
        }
    }
}

/// Node errors that classify as nothing more specific are the wallet's.
fn wallet_failure(err: Error) -> Error {
    match err {
        Error::Transport(TransportError::Rpc { code, message }) => {
            let classified = crate::error::classify(&message, Some(code));
            WalletError::Unknown(classified.user_message()).into()
        }
        other => other,
    }
}
