pub mod client;
pub mod converter;
pub mod error;
pub mod retry;
pub mod types;

pub use client::GoldRushClient;
pub use converter::{to_raw_transactions, to_token_metadata};
pub use error::GoldRushError;
pub use retry::{retry_with_backoff, RetryConfig};
pub use types::*;
