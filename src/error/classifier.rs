use serde::Serialize;

/// Closed set of user-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Rejected,
    WrongNetwork,
    Reverted,
    InsufficientFunds,
    Timeout,
    NetworkUnreachable,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Rejected => "rejected",
            ErrorCategory::WrongNetwork => "wrong_network",
            ErrorCategory::Reverted => "reverted",
            ErrorCategory::InsufficientFunds => "insufficient_funds",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::NetworkUnreachable => "network_unreachable",
            ErrorCategory::Unknown => "unknown",
        }
    }

    /// Timeouts and unreachable endpoints may succeed if the caller tries again later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Timeout | ErrorCategory::NetworkUnreachable
        )
    }
}

/// Longest slice of an unrecognized message kept for diagnostics.
pub const MAX_DETAIL_CHARS: usize = 100;

const UNKNOWN_FALLBACK: &str = "error tidak diketahui";

struct Rule {
    category: ErrorCategory,
    /// Lowercase substrings matched against the lowercased failure message.
    signatures: &'static [&'static str],
    /// JSON-RPC / EIP-1193 error codes.
    codes: &'static [i64],
}

/// Evaluated top to bottom, first hit wins.
const RULES: &[Rule] = &[
    Rule {
        category: ErrorCategory::Rejected,
        signatures: &[
            "user rejected",
            "user denied",
            "action_rejected",
            "rejected the request",
        ],
        codes: &[4001],
    },
    Rule {
        category: ErrorCategory::WrongNetwork,
        signatures: &[
            "chainmismatch",
            "chain mismatch",
            "chain id mismatch",
            "wrong network",
            "does not match the target chain",
            "unrecognized chain",
        ],
        codes: &[4901, 4902],
    },
    Rule {
        category: ErrorCategory::Reverted,
        signatures: &["revert", "call_exception"],
        codes: &[3],
    },
    Rule {
        category: ErrorCategory::InsufficientFunds,
        signatures: &["insufficient funds", "insufficient_funds"],
        codes: &[],
    },
    Rule {
        category: ErrorCategory::Timeout,
        signatures: &["timeout", "timed out"],
        codes: &[],
    },
    Rule {
        category: ErrorCategory::NetworkUnreachable,
        signatures: &[
            "network",
            "fetch",
            "failed",
            "connection",
            "unreachable",
            "error sending request",
            "dns",
        ],
        codes: &[],
    },
];

/// Outcome of classifying one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: ErrorCategory,
    /// Truncated original message, only kept for `Unknown`.
    pub detail: Option<String>,
}

impl Classification {
    /// Short message shown to whoever initiated the failing action.
    pub fn user_message(&self) -> String {
        match self.category {
            ErrorCategory::Rejected => "Transaksi dibatalkan user".to_string(),
            ErrorCategory::WrongNetwork => "Please switch to Avalanche Fuji Testnet".to_string(),
            ErrorCategory::Reverted => "Transaction reverted by smart contract".to_string(),
            ErrorCategory::InsufficientFunds => {
                "saldo tidak cukup untuk melakukan transaksi".to_string()
            }
            ErrorCategory::Timeout => "RPC timeout. Silakan coba beberapa saat lagi.".to_string(),
            ErrorCategory::NetworkUnreachable => {
                "Tidak dapat terhubung ke blockchain RPC.".to_string()
            }
            ErrorCategory::Unknown => match self.detail.as_deref() {
                Some(detail) if !detail.trim().is_empty() => detail.to_string(),
                _ => UNKNOWN_FALLBACK.to_string(),
            },
        }
    }
}

/// Map a raw failure message (and its error code, when the source reported one)
/// to exactly one category.
pub fn classify(message: &str, code: Option<i64>) -> Classification {
    let lowered = message.to_lowercase();
    for rule in RULES {
        let code_hit = code.is_some_and(|c| rule.codes.contains(&c));
        if code_hit || rule.signatures.iter().any(|sig| lowered.contains(sig)) {
            return Classification {
                category: rule.category,
                detail: None,
            };
        }
    }
    Classification {
        category: ErrorCategory::Unknown,
        detail: Some(message.chars().take(MAX_DETAIL_CHARS).collect()),
    }
}
