use crate::{
    error::{Result, SwapError},
    model::TokenMetadata,
};
use std::collections::HashMap;
use tracing::debug;

/// Read-only lookup from contract address to token metadata.
///
/// Keys are lower-cased so lookups are case-insensitive. Built once from the
/// wallet's balance catalogue and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct TokenMetadataIndex {
    tokens: HashMap<String, TokenMetadata>,
}

impl TokenMetadataIndex {
    /// Build the index; a repeated address keeps the last entry seen
    pub fn from_balances<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = TokenMetadata>,
    {
        let mut tokens = HashMap::new();

        for balance in balances {
            let key = balance.contract_address.to_lowercase();
            let metadata = TokenMetadata {
                contract_address: key.clone(),
                ..balance
            };
            if let Some(previous) = tokens.insert(key, metadata) {
                debug!(
                    "Duplicate balance entry for {}, replacing {}",
                    previous.contract_address, previous.symbol
                );
            }
        }

        debug!("Indexed {} tokens from balance catalogue", tokens.len());
        Self { tokens }
    }

    pub fn get(&self, address: &str) -> Option<&TokenMetadata> {
        self.tokens.get(&address.to_lowercase())
    }

    /// Look up a token a transaction refers to; absence is a data-integrity fault
    pub fn resolve(&self, address: &str, tx_hash: &str) -> Result<&TokenMetadata> {
        self.get(address).ok_or_else(|| SwapError::UnknownToken {
            tx_hash: tx_hash.to_string(),
            address: address.to_lowercase(),
        })
    }

    pub fn contains(&self, address: &str) -> bool {
        self.get(address).is_some()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<TokenMetadata> for TokenMetadataIndex {
    fn from_iter<I: IntoIterator<Item = TokenMetadata>>(iter: I) -> Self {
        Self::from_balances(iter)
    }
}
