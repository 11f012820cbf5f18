pub mod signer;
pub mod submit;

pub use signer::{RpcSigner, Signer};
pub use submit::WriteSubmitter;

use alloy_primitives::{Address, U256};

/// Decimals of the chain's native currency (AVAX, ETH).
pub const NATIVE_DECIMALS: u32 = 18;

/// Display precision for balances.
const BALANCE_PLACES: u32 = 4;

/// `0x1234...abcd` form of an address.
pub fn shorten_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Format a wei amount in whole units, rounded to four decimal places.
pub fn format_native_balance(wei: U256) -> String {
    let step = U256::from(10u64).pow(U256::from(NATIVE_DECIMALS - BALANCE_PLACES));
    let half = step / U256::from(2u64);
    let scaled = wei.saturating_add(half) / step;
    let unit = U256::from(10u64.pow(BALANCE_PLACES));
    let whole = scaled / unit;
    let frac = (scaled % unit).to::<u64>();
    format!("{whole}.{frac:0width$}", width = BALANCE_PLACES as usize)
}
