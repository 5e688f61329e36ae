use crate::retry::RetryConfig;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for GoldRush API client
#[derive(Debug, Clone)]
pub struct GoldRushConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub retry: RetryConfig,
}

impl Default for GoldRushConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.covalenthq.com/v1".to_string(),
            timeout_seconds: 120, // Large pages with logs can take a while
            retry: RetryConfig::default(),
        }
    }
}

/// Chains the tool knows a native currency symbol for.
///
/// Anything else is passed through to the API unchanged as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GoldRushChain {
    #[default]
    Ethereum,
    Bsc,
    Polygon,
    Avalanche,
    Fantom,
    Base,
    Other(String),
}

impl GoldRushChain {
    /// Path segment used in API URLs
    pub fn as_str(&self) -> &str {
        match self {
            GoldRushChain::Ethereum => "eth-mainnet",
            GoldRushChain::Bsc => "bsc-mainnet",
            GoldRushChain::Polygon => "matic-mainnet",
            GoldRushChain::Avalanche => "avalanche-mainnet",
            GoldRushChain::Fantom => "fantom-mainnet",
            GoldRushChain::Base => "base-mainnet",
            GoldRushChain::Other(chain) => chain,
        }
    }

    /// Symbol of the chain's gas token
    pub fn native_symbol(&self) -> &'static str {
        match self {
            GoldRushChain::Ethereum | GoldRushChain::Base => "ETH",
            GoldRushChain::Bsc => "BNB",
            GoldRushChain::Polygon => "MATIC",
            GoldRushChain::Avalanche => "AVAX",
            GoldRushChain::Fantom => "FTM",
            GoldRushChain::Other(_) => "NATIVE",
        }
    }

    /// Accepts numeric chain ids as well as GoldRush chain names
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "1" | "eth-mainnet" | "ethereum" | "eth" => GoldRushChain::Ethereum,
            "56" | "bsc-mainnet" | "bsc" | "binance" | "bnb" => GoldRushChain::Bsc,
            "137" | "matic-mainnet" | "polygon-mainnet" | "polygon" | "matic" => {
                GoldRushChain::Polygon
            }
            "43114" | "avalanche-mainnet" | "avalanche" | "avax" => GoldRushChain::Avalanche,
            "250" | "fantom-mainnet" | "fantom" | "ftm" => GoldRushChain::Fantom,
            "8453" | "base-mainnet" | "base" => GoldRushChain::Base,
            other => GoldRushChain::Other(other.to_string()),
        }
    }
}

impl fmt::Display for GoldRushChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GoldRush API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldRushResponse<T> {
    pub data: Option<T>,
    pub error: bool,
    pub error_message: Option<String>,
    pub error_code: Option<u32>,
}

/// Response from transactions_v2
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub address: String,
    pub chain_id: Option<u64>,
    pub chain_name: Option<String>,
    pub items: Vec<GoldRushTransaction>,
    pub pagination: Option<PaginationInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub has_more: bool,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: Option<u32>,
}

/// Transaction with decoded logs as GoldRush returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldRushTransaction {
    pub block_signed_at: DateTime<Utc>,
    pub block_height: Option<u64>,
    pub tx_hash: String,
    pub successful: Option<bool>,
    pub from_address: String,
    pub to_address: Option<String>,
    pub value: String, // Wei amount
    pub value_quote: Option<Decimal>,
    pub gas_spent: Option<u64>,
    pub gas_quote: Option<Decimal>,
    pub log_events: Option<Vec<LogEvent>>, // Simple transfers carry no logs
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub log_offset: Option<u32>,
    pub sender_address: String,
    pub sender_contract_ticker_symbol: Option<String>,
    pub sender_contract_decimals: Option<u32>,
    pub decoded: Option<DecodedLogEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedLogEvent {
    pub name: String,
    pub signature: Option<String>,
    pub params: Option<Vec<DecodedParam>>,
}

/// Parameter in decoded log event; meaning comes from its position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedParam {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub indexed: Option<bool>,
    pub decoded: Option<bool>,
    pub value: serde_json::Value,
}

/// Response from balances_v2
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancesResponse {
    pub address: String,
    pub chain_id: Option<u64>,
    pub chain_name: Option<String>,
    pub items: Vec<TokenBalance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBalance {
    pub contract_decimals: Option<u32>,
    pub contract_name: Option<String>,
    pub contract_ticker_symbol: Option<String>,
    pub contract_address: String,
    pub native_token: Option<bool>,
    pub r#type: Option<String>,
    pub balance: Option<String>,
}
