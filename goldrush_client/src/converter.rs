use crate::types::{GoldRushTransaction, LogEvent, TokenBalance};
use swap_core::{RawDecodedEvent, RawLogEntry, RawTransaction, TokenMetadata};
use tracing::{info, warn};

/// Upper bound on `contract_decimals`; ERC-20 stores decimals in a uint8
pub const MAX_TOKEN_DECIMALS: u32 = 255;

impl From<GoldRushTransaction> for RawTransaction {
    fn from(tx: GoldRushTransaction) -> Self {
        RawTransaction {
            tx_hash: tx.tx_hash,
            timestamp: tx.block_signed_at,
            native_value: tx.value.trim().to_string(),
            gas_quote: tx.gas_quote,
            log_entries: tx
                .log_events
                .unwrap_or_default()
                .into_iter()
                .map(RawLogEntry::from)
                .collect(),
        }
    }
}

impl From<LogEvent> for RawLogEntry {
    fn from(log: LogEvent) -> Self {
        RawLogEntry {
            sender_address: log.sender_address,
            decoded: log.decoded.map(|decoded| RawDecodedEvent {
                name: decoded.name,
                params: decoded
                    .params
                    .unwrap_or_default()
                    .into_iter()
                    .map(|param| param.value)
                    .collect(),
            }),
        }
    }
}

/// Convert fetched transactions into the swap detector's input, keeping order
pub fn to_raw_transactions(transactions: Vec<GoldRushTransaction>) -> Vec<RawTransaction> {
    transactions.into_iter().map(RawTransaction::from).collect()
}

/// Build the token catalogue from balances.
///
/// Balances without a ticker symbol or decimals, or with decimals above
/// `MAX_TOKEN_DECIMALS`, are left out rather than defaulted, so any swap
/// through them fails loudly as an unknown token.
pub fn to_token_metadata(balances: Vec<TokenBalance>) -> Vec<TokenMetadata> {
    let total = balances.len();
    let catalogue: Vec<TokenMetadata> = balances
        .into_iter()
        .filter_map(|balance| {
            match (balance.contract_ticker_symbol, balance.contract_decimals) {
                (Some(_), Some(decimals)) if decimals > MAX_TOKEN_DECIMALS => {
                    warn!(
                        "Skipping balance {} with implausible decimals {}",
                        balance.contract_address, decimals
                    );
                    None
                }
                (Some(symbol), Some(decimals)) => Some(TokenMetadata {
                    contract_address: balance.contract_address,
                    symbol,
                    decimals,
                }),
                _ => {
                    warn!(
                        "Skipping balance {} without symbol or decimals",
                        balance.contract_address
                    );
                    None
                }
            }
        })
        .collect();

    info!("📒 Token catalogue: {} of {} balances usable", catalogue.len(), total);
    catalogue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DecodedLogEvent, DecodedParam};
    use chrono::Utc;
    use serde_json::json;

    fn param(value: serde_json::Value) -> DecodedParam {
        DecodedParam {
            name: None,
            r#type: None,
            indexed: None,
            decoded: Some(true),
            value,
        }
    }

    #[test]
    fn test_transaction_conversion() {
        let tx = GoldRushTransaction {
            block_signed_at: Utc::now(),
            block_height: Some(13_000_000),
            tx_hash: "0xabc".to_string(),
            successful: Some(true),
            from_address: "0xwallet".to_string(),
            to_address: Some("0xrouter".to_string()),
            value: " 0\n".to_string(),
            value_quote: None,
            gas_spent: Some(120_000),
            gas_quote: None,
            log_events: Some(vec![
                LogEvent {
                    log_offset: Some(0),
                    sender_address: "0xToken".to_string(),
                    sender_contract_ticker_symbol: None,
                    sender_contract_decimals: None,
                    decoded: Some(DecodedLogEvent {
                        name: "Transfer".to_string(),
                        signature: None,
                        params: Some(vec![
                            param(json!("0xwallet")),
                            param(json!("0xpool")),
                            param(json!("10")),
                        ]),
                    }),
                },
                LogEvent {
                    log_offset: Some(1),
                    sender_address: "0xpool".to_string(),
                    sender_contract_ticker_symbol: None,
                    sender_contract_decimals: None,
                    decoded: None,
                },
            ]),
        };

        let raw = RawTransaction::from(tx);
        assert_eq!(raw.tx_hash, "0xabc");
        assert_eq!(raw.native_value, "0");
        assert_eq!(raw.log_entries.len(), 2);

        let decoded = raw.log_entries[0].decoded.as_ref().unwrap();
        assert_eq!(decoded.name, "Transfer");
        assert_eq!(decoded.params[2], json!("10"));
        assert!(raw.log_entries[1].decoded.is_none());
    }

    #[test]
    fn test_incomplete_balances_dropped() {
        let balances = vec![
            TokenBalance {
                contract_decimals: Some(18),
                contract_name: Some("Dai".to_string()),
                contract_ticker_symbol: Some("DAI".to_string()),
                contract_address: "0x6b17".to_string(),
                native_token: Some(false),
                r#type: None,
                balance: Some("0".to_string()),
            },
            TokenBalance {
                contract_decimals: None,
                contract_name: None,
                contract_ticker_symbol: Some("???".to_string()),
                contract_address: "0xspam".to_string(),
                native_token: None,
                r#type: None,
                balance: None,
            },
            TokenBalance {
                contract_decimals: Some(u32::MAX),
                contract_name: None,
                contract_ticker_symbol: Some("HUGE".to_string()),
                contract_address: "0xhuge".to_string(),
                native_token: None,
                r#type: None,
                balance: None,
            },
        ];

        let catalogue = to_token_metadata(balances);
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue[0].symbol, "DAI");
        assert_eq!(catalogue[0].decimals, 18);
    }
}
