use serde_json::Value;
use thiserror::Error;

use crate::rpc::quantity;

/// Trailing block count used when the caller gives no lower bound.
pub const DEFAULT_EVENT_WINDOW: u64 = 10_000;

/// Upper bound of an event query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Latest,
    Number(u64),
}

impl BlockTag {
    pub fn to_rpc(self) -> Value {
        match self {
            BlockTag::Latest => Value::from("latest"),
            BlockTag::Number(n) => Value::from(quantity(n)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("fromBlock ({from}) is greater than toBlock ({to})")]
    Inverted { from: u64, to: u64 },
}

/// Inclusive block range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub from: u64,
    pub to: BlockTag,
}

impl BlockRange {
    pub fn new(from: u64, to: BlockTag) -> Result<Self, RangeError> {
        if let BlockTag::Number(to) = to {
            if from > to {
                return Err(RangeError::Inverted { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// Default range when no explicit bounds are given: `[head - window, latest]`.
    pub fn trailing(head: u64, window: u64) -> Self {
        Self {
            from: head.saturating_sub(window),
            to: BlockTag::Latest,
        }
    }
}
