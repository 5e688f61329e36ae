use std::fmt;
use thiserror::Error;

/// Which counterpart event a swap record could not be built without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartKind {
    /// Wallet-originated `Transfer`
    OutboundTransfer,
    /// `Transfer` into the wallet
    InboundTransfer,
    /// Inbound `Transfer` or, failing that, a `Withdrawal`
    InboundTransferOrWithdrawal,
}

impl fmt::Display for CounterpartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CounterpartKind::OutboundTransfer => "outbound Transfer",
            CounterpartKind::InboundTransfer => "inbound Transfer",
            CounterpartKind::InboundTransferOrWithdrawal => "inbound Transfer or Withdrawal",
        };
        f.write_str(name)
    }
}

/// Per-transaction extraction failures. None of these are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Unknown token {address} in tx {tx_hash}: not in balance catalogue")]
    UnknownToken { tx_hash: String, address: String },

    #[error("Inconsistent transfer token in tx {tx_hash}: expected {expected}, found {found}")]
    InconsistentTransferToken {
        tx_hash: String,
        expected: String,
        found: String,
    },

    #[error("Missing {expected} event in tx {tx_hash}")]
    MissingCounterpartEvent {
        tx_hash: String,
        expected: CounterpartKind,
    },

    #[error("Invalid amount '{value}' in tx {tx_hash}")]
    InvalidAmount { tx_hash: String, value: String },
}

impl SwapError {
    /// Hash of the transaction that failed
    pub fn tx_hash(&self) -> &str {
        match self {
            SwapError::UnknownToken { tx_hash, .. }
            | SwapError::InconsistentTransferToken { tx_hash, .. }
            | SwapError::MissingCounterpartEvent { tx_hash, .. }
            | SwapError::InvalidAmount { tx_hash, .. } => tx_hash,
        }
    }
}

pub type Result<T> = std::result::Result<T, SwapError>;
