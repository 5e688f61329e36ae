use crate::{
    builder::SwapRecordBuilder,
    classifier::{classify, Classification},
    error::{Result, SwapError},
    events::decode_transaction,
    model::{RawTransaction, SwapRecord, TokenMetadata},
    token_index::TokenMetadataIndex,
};
use std::{fmt, str::FromStr};
use tracing::{debug, info, warn};

/// What to do when a single eligible transaction cannot be turned into a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep going; failures are reported next to the records
    #[default]
    Skip,
    /// Stop at the first failing transaction
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(FailurePolicy::Skip),
            "abort" => Ok(FailurePolicy::Abort),
            _ => Err(format!("Unknown failure policy: '{}'", s)),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Skip => f.write_str("skip"),
            FailurePolicy::Abort => f.write_str("abort"),
        }
    }
}

/// Outcome of running the extractor over a batch
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Swap records in input order
    pub records: Vec<SwapRecord>,
    /// Eligible transactions that could not be built
    pub failures: Vec<SwapError>,
    pub excluded: usize,
    pub scanned: usize,
}

/// Runs decode → classify → build over a wallet's transactions
#[derive(Debug, Clone)]
pub struct SwapExtractor {
    wallet: String,
    native_symbol: String,
    tokens: TokenMetadataIndex,
}

impl SwapExtractor {
    pub fn new(wallet: &str, native_symbol: impl Into<String>, tokens: TokenMetadataIndex) -> Self {
        Self {
            wallet: wallet.to_lowercase(),
            native_symbol: native_symbol.into(),
            tokens,
        }
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn tokens(&self) -> &TokenMetadataIndex {
        &self.tokens
    }

    /// `Ok(None)` when the transaction is not a swap by this wallet
    pub fn extract_transaction(&self, tx: &RawTransaction) -> Result<Option<SwapRecord>> {
        let events = decode_transaction(tx);

        let origin = match classify(&tx.native_value, &events, &self.wallet) {
            Classification::Eligible(origin) => origin,
            Classification::Excluded(reason) => {
                debug!("tx {} excluded: {}", tx.tx_hash, reason);
                return Ok(None);
            }
        };

        let builder = SwapRecordBuilder::new(&self.tokens, &self.wallet, &self.native_symbol);
        let record = builder.build(tx, origin, &events)?;
        debug!("tx {} is a {} swap", tx.tx_hash, record.shape());

        Ok(Some(record))
    }

    /// One result per eligible transaction, in input order
    pub fn extract_all(&self, transactions: &[RawTransaction]) -> Vec<Result<SwapRecord>> {
        transactions
            .iter()
            .filter_map(|tx| self.extract_transaction(tx).transpose())
            .collect()
    }

    /// Extract under a failure policy and summarize the batch
    pub fn run(
        &self,
        transactions: &[RawTransaction],
        policy: FailurePolicy,
    ) -> Result<ExtractionReport> {
        let mut report = ExtractionReport {
            scanned: transactions.len(),
            ..ExtractionReport::default()
        };

        for tx in transactions {
            match self.extract_transaction(tx) {
                Ok(Some(record)) => report.records.push(record),
                Ok(None) => report.excluded += 1,
                Err(e) => match policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {
                        warn!("Skipping transaction: {}", e);
                        report.failures.push(e);
                    }
                },
            }
        }

        info!(
            "🔄 Scanned {} transactions for {}: {} swaps, {} excluded, {} failed",
            report.scanned,
            self.wallet,
            report.records.len(),
            report.excluded,
            report.failures.len()
        );

        Ok(report)
    }
}

/// Extract swap records for `wallet` from already-fetched data.
///
/// The token index is built fresh for the call. Each element of the result
/// corresponds to one eligible transaction, in input order.
pub fn extract_swaps<I>(
    wallet: &str,
    native_symbol: &str,
    balances: I,
    transactions: &[RawTransaction],
) -> Vec<Result<SwapRecord>>
where
    I: IntoIterator<Item = TokenMetadata>,
{
    let tokens = TokenMetadataIndex::from_balances(balances);
    SwapExtractor::new(wallet, native_symbol, tokens).extract_all(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_policy_parsing() {
        assert_eq!("skip".parse::<FailurePolicy>().unwrap(), FailurePolicy::Skip);
        assert_eq!(" ABORT ".parse::<FailurePolicy>().unwrap(), FailurePolicy::Abort);
        assert!("retry".parse::<FailurePolicy>().is_err());
        assert_eq!(FailurePolicy::default().to_string(), "skip");
    }

    #[test]
    fn test_extractor_normalizes_wallet() {
        let extractor = SwapExtractor::new("0xABCdef", "ETH", TokenMetadataIndex::default());
        assert_eq!(extractor.wallet(), "0xabcdef");
        assert!(extractor.tokens().is_empty());
    }
}
