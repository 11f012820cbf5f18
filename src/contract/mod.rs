pub mod client;
pub mod model;
pub mod window;

pub use client::ContractClient;
pub use model::{TransactionReceipt, UpdateEvent};
pub use window::{DEFAULT_EVENT_WINDOW, RangeError};

use alloy_sol_types::sol;

sol! {
    /// Reads the stored integer.
    function getValue() external view returns (uint256);

    /// Overwrites the stored integer and emits `ValueUpdated`.
    function setValue(uint256 newValue) external;

    event ValueUpdated(uint256 newValue);
}
