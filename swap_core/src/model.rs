use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sentinel identifier used for the chain's native currency in swap records
pub const NATIVE_TOKEN_ID: &str = "native";

/// Native currency amounts are always 18-decimal fixed point
pub const NATIVE_DECIMALS: u32 = 18;

/// Token symbol/decimals for one contract the wallet has held
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub contract_address: String,
    pub symbol: String,
    pub decimals: u32,
}

/// A transaction as delivered by the indexing service, logs already decoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransaction {
    pub tx_hash: String,
    pub timestamp: DateTime<Utc>,
    /// Native currency moved by the transaction itself (wei, base-10 string)
    pub native_value: String,
    /// Gas cost in quote currency, when the indexer priced it
    #[serde(default)]
    pub gas_quote: Option<Decimal>,
    #[serde(default)]
    pub log_entries: Vec<RawLogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLogEntry {
    /// Contract that emitted the log
    pub sender_address: String,
    /// Absent when the indexer could not decode the log
    #[serde(default)]
    pub decoded: Option<RawDecodedEvent>,
}

/// Decoded log as the indexer shapes it: a name and positional parameter values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDecodedEvent {
    pub name: String,
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

/// Identity of one side of a swap
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenId {
    Native,
    Contract(String),
}

impl TokenId {
    pub fn is_native(&self) -> bool {
        matches!(self, TokenId::Native)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TokenId::Native => NATIVE_TOKEN_ID,
            TokenId::Contract(address) => address,
        }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value == NATIVE_TOKEN_ID {
            Ok(TokenId::Native)
        } else {
            Ok(TokenId::Contract(value.to_lowercase()))
        }
    }
}

/// Normalized description of one swap: what left the wallet and what came back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    pub tx_hash: String,
    pub timestamp: DateTime<Utc>,
    pub from_token: TokenId,
    pub from_symbol: String,
    /// Undivided integer amount in the token's native unit
    pub from_amount: String,
    pub from_decimals: u32,
    pub to_token: TokenId,
    pub to_symbol: String,
    pub to_amount: String,
    pub to_decimals: u32,
    #[serde(default)]
    pub gas_quote: Option<Decimal>,
}

impl SwapRecord {
    pub fn shape(&self) -> SwapShape {
        match (self.from_token.is_native(), self.to_token.is_native()) {
            (true, _) => SwapShape::NativeToToken,
            (false, true) => SwapShape::TokenToNative,
            (false, false) => SwapShape::TokenToToken,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapShape {
    TokenToToken,
    TokenToNative,
    NativeToToken,
}

impl fmt::Display for SwapShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwapShape::TokenToToken => "token->token",
            SwapShape::TokenToNative => "token->native",
            SwapShape::NativeToToken => "native->token",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_serialization() {
        let native = serde_json::to_string(&TokenId::Native).unwrap();
        assert_eq!(native, "\"native\"");

        let contract: TokenId = serde_json::from_str("\"0xABCD\"").unwrap();
        assert_eq!(contract, TokenId::Contract("0xabcd".to_string()));
    }

    #[test]
    fn test_raw_transaction_defaults() {
        let json = r#"{
            "tx_hash": "0x01",
            "timestamp": "2021-06-01T12:00:00Z",
            "native_value": "0"
        }"#;
        let tx: RawTransaction = serde_json::from_str(json).unwrap();
        assert!(tx.log_entries.is_empty());
        assert!(tx.gas_quote.is_none());
    }
}
