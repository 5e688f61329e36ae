use crate::{
    aggregator::{aggregate_outbound, parse_amount},
    classifier::SwapOrigin,
    error::{CounterpartKind, Result, SwapError},
    events::{TransactionEvents, TransferEvent},
    model::{RawTransaction, SwapRecord, TokenId, NATIVE_DECIMALS},
    token_index::TokenMetadataIndex,
};

/// One side of a swap before it is placed into a record
#[derive(Debug, Clone, PartialEq, Eq)]
struct Leg {
    token: TokenId,
    symbol: String,
    amount: String,
    decimals: u32,
}

/// Assembles swap records for transactions the classifier accepted.
///
/// Amounts stay in undivided native units; dividing by `10^decimals` is left
/// to whoever presents the record.
#[derive(Debug, Clone, Copy)]
pub struct SwapRecordBuilder<'a> {
    tokens: &'a TokenMetadataIndex,
    wallet: &'a str,
    native_symbol: &'a str,
}

impl<'a> SwapRecordBuilder<'a> {
    /// `wallet` must already be lower-cased
    pub fn new(tokens: &'a TokenMetadataIndex, wallet: &'a str, native_symbol: &'a str) -> Self {
        Self {
            tokens,
            wallet,
            native_symbol,
        }
    }

    pub fn build(
        &self,
        tx: &RawTransaction,
        origin: SwapOrigin,
        events: &TransactionEvents,
    ) -> Result<SwapRecord> {
        let (from, to) = match origin {
            SwapOrigin::Token => {
                let from = self.sent_leg(tx, events)?;
                // An ERC-20 leg wins over a Withdrawal when both exist
                let to = match (events.first_inbound_to(self.wallet), &events.withdrawal) {
                    (Some(inbound), _) => self.token_leg(tx, inbound)?,
                    (None, Some(withdrawal)) => self.native_leg(tx, &withdrawal.amount)?,
                    (None, None) => {
                        return Err(SwapError::MissingCounterpartEvent {
                            tx_hash: tx.tx_hash.clone(),
                            expected: CounterpartKind::InboundTransferOrWithdrawal,
                        })
                    }
                };
                (from, to)
            }
            SwapOrigin::Native => {
                let inbound = events.first_inbound_to(self.wallet).ok_or_else(|| {
                    SwapError::MissingCounterpartEvent {
                        tx_hash: tx.tx_hash.clone(),
                        expected: CounterpartKind::InboundTransfer,
                    }
                })?;
                let from = self.native_leg(tx, &tx.native_value)?;
                let to = self.token_leg(tx, inbound)?;
                (from, to)
            }
        };

        Ok(SwapRecord {
            tx_hash: tx.tx_hash.clone(),
            timestamp: tx.timestamp,
            from_token: from.token,
            from_symbol: from.symbol,
            from_amount: from.amount,
            from_decimals: from.decimals,
            to_token: to.token,
            to_symbol: to.symbol,
            to_amount: to.amount,
            to_decimals: to.decimals,
            gas_quote: tx.gas_quote,
        })
    }

    fn sent_leg(&self, tx: &RawTransaction, events: &TransactionEvents) -> Result<Leg> {
        let sent = aggregate_outbound(&tx.tx_hash, self.wallet, &events.transfers)?;
        let metadata = self.tokens.resolve(&sent.token, &tx.tx_hash)?;

        Ok(Leg {
            token: TokenId::Contract(metadata.contract_address.clone()),
            symbol: metadata.symbol.clone(),
            amount: sent.amount.to_string(),
            decimals: metadata.decimals,
        })
    }

    fn token_leg(&self, tx: &RawTransaction, transfer: &TransferEvent) -> Result<Leg> {
        let metadata = self.tokens.resolve(&transfer.token, &tx.tx_hash)?;
        let amount = parse_amount(&transfer.amount, &tx.tx_hash)?;

        Ok(Leg {
            token: TokenId::Contract(metadata.contract_address.clone()),
            symbol: metadata.symbol.clone(),
            amount: amount.to_string(),
            decimals: metadata.decimals,
        })
    }

    fn native_leg(&self, tx: &RawTransaction, amount: &str) -> Result<Leg> {
        let amount = parse_amount(amount, &tx.tx_hash)?;

        Ok(Leg {
            token: TokenId::Native,
            symbol: self.native_symbol.to_string(),
            amount: amount.to_string(),
            decimals: NATIVE_DECIMALS,
        })
    }
}
