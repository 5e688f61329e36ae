use crate::model::{RawDecodedEvent, RawLogEntry, RawTransaction};
use serde_json::Value;
use tracing::{debug, warn};

/// ERC-20 `Transfer(from, to, value)` emitted by `token`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEvent {
    pub token: String,
    pub from: String,
    pub to: String,
    pub amount: String,
}

/// Wrapped-native `Withdrawal(account, amount)`, amount in wei
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalEvent {
    pub contract: String,
    pub account: String,
    pub amount: String,
}

/// A log entry decoded into the event kinds swap detection cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    Transfer(TransferEvent),
    Withdrawal(WithdrawalEvent),
    Swap,
    Mint,
    Other(String),
}

/// Decoded events of one transaction, partitioned by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionEvents {
    /// All `Transfer` events in log order
    pub transfers: Vec<TransferEvent>,
    /// First `Withdrawal` event only
    pub withdrawal: Option<WithdrawalEvent>,
    pub has_swap: bool,
    pub has_mint: bool,
}

impl TransactionEvents {
    /// Transfers whose sender is `wallet` (already lower-cased)
    pub fn outbound_from<'a>(&'a self, wallet: &'a str) -> impl Iterator<Item = &'a TransferEvent> {
        self.transfers.iter().filter(move |t| t.from == wallet)
    }

    /// First transfer whose recipient is `wallet` (already lower-cased)
    pub fn first_inbound_to(&self, wallet: &str) -> Option<&TransferEvent> {
        self.transfers.iter().find(|t| t.to == wallet)
    }

    pub fn has_outbound_from(&self, wallet: &str) -> bool {
        self.outbound_from(wallet).next().is_some()
    }

    pub fn has_inbound_to(&self, wallet: &str) -> bool {
        self.first_inbound_to(wallet).is_some()
    }
}

/// Decode every log entry of a transaction and partition the results
pub fn decode_transaction(tx: &RawTransaction) -> TransactionEvents {
    let mut events = TransactionEvents::default();

    for entry in &tx.log_entries {
        let Some(event) = decode_entry(entry, &tx.tx_hash) else {
            continue;
        };

        match event {
            DecodedEvent::Transfer(transfer) => events.transfers.push(transfer),
            DecodedEvent::Withdrawal(withdrawal) => {
                if events.withdrawal.is_none() {
                    events.withdrawal = Some(withdrawal);
                }
            }
            DecodedEvent::Swap => events.has_swap = true,
            DecodedEvent::Mint => events.has_mint = true,
            DecodedEvent::Other(_) => {}
        }
    }

    debug!(
        "tx {}: {} transfers, withdrawal={}, swap={}, mint={}",
        tx.tx_hash,
        events.transfers.len(),
        events.withdrawal.is_some(),
        events.has_swap,
        events.has_mint
    );

    events
}

/// Decode one log entry. Undecoded entries and malformed known events yield `None`.
pub fn decode_entry(entry: &RawLogEntry, tx_hash: &str) -> Option<DecodedEvent> {
    let decoded = entry.decoded.as_ref()?;
    let contract = entry.sender_address.to_lowercase();

    match decoded.name.as_str() {
        "Transfer" => {
            let event = decode_transfer(decoded, contract);
            if event.is_none() {
                warn!("Dropping malformed Transfer event in tx {}", tx_hash);
            }
            event.map(DecodedEvent::Transfer)
        }
        "Withdrawal" => {
            let event = decode_withdrawal(decoded, contract);
            if event.is_none() {
                warn!("Dropping malformed Withdrawal event in tx {}", tx_hash);
            }
            event.map(DecodedEvent::Withdrawal)
        }
        "Swap" => Some(DecodedEvent::Swap),
        "Mint" => Some(DecodedEvent::Mint),
        other => Some(DecodedEvent::Other(other.to_string())),
    }
}

fn decode_transfer(decoded: &RawDecodedEvent, token: String) -> Option<TransferEvent> {
    let [from, to, amount, ..] = decoded.params.as_slice() else {
        return None;
    };

    Some(TransferEvent {
        token,
        from: address_param(from)?,
        to: address_param(to)?,
        amount: amount_param(amount),
    })
}

fn decode_withdrawal(decoded: &RawDecodedEvent, contract: String) -> Option<WithdrawalEvent> {
    let [account, amount, ..] = decoded.params.as_slice() else {
        return None;
    };

    Some(WithdrawalEvent {
        contract,
        account: address_param(account)?,
        amount: amount_param(amount),
    })
}

fn address_param(value: &Value) -> Option<String> {
    match value {
        Value::String(address) => Some(address.to_lowercase()),
        _ => None,
    }
}

// uint256 values normally arrive as strings, small ones occasionally as numbers.
// Anything else is kept as JSON text so amount parsing rejects the transaction.
fn amount_param(value: &Value) -> String {
    match value {
        Value::String(amount) => amount.trim().to_string(),
        other => other.to_string(),
    }
}
