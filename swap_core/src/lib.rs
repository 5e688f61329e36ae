//! Swap detection over a wallet's decoded transaction history.
//!
//! Input is a list of transactions whose logs the indexer has already decoded,
//! plus the wallet's balance catalogue. Output is one [`SwapRecord`] per
//! transaction that represents a swap made by the wallet.

pub mod aggregator;
pub mod builder;
pub mod classifier;
pub mod error;
pub mod events;
pub mod extractor;
pub mod model;
pub mod token_index;

pub use aggregator::{aggregate_outbound, SentAmount};
pub use builder::SwapRecordBuilder;
pub use classifier::{classify, Classification, ExclusionReason, SwapOrigin};
pub use error::{CounterpartKind, Result, SwapError};
pub use events::{decode_transaction, DecodedEvent, TransactionEvents, TransferEvent, WithdrawalEvent};
pub use extractor::{extract_swaps, ExtractionReport, FailurePolicy, SwapExtractor};
pub use model::*;
pub use token_index::TokenMetadataIndex;
