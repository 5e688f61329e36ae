use crate::{
    error::{GoldRushError, Result},
    retry::retry_with_backoff,
    types::{
        BalancesResponse, GoldRushChain, GoldRushConfig, GoldRushResponse, GoldRushTransaction,
        TokenBalance, TransactionsResponse,
    },
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

/// GoldRush API client for wallet balances and decoded transaction history
#[derive(Debug, Clone)]
pub struct GoldRushClient {
    client: Client,
    config: GoldRushConfig,
}

impl GoldRushClient {
    pub fn with_config(config: GoldRushConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GoldRushError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self { client, config })
    }

    /// Every token the wallet holds or has held, used as the symbol/decimals catalogue
    pub async fn get_wallet_balances(
        &self,
        wallet_address: &str,
        chain: &GoldRushChain,
    ) -> Result<Vec<TokenBalance>> {
        let url = format!(
            "{}/{}/address/{}/balances_v2/",
            self.config.base_url,
            chain.as_str(),
            wallet_address
        );

        info!("📡 Fetching balances for {} on {}", wallet_address, chain);
        let query = [("no-nft-fetch", "true".to_string())];
        let data: BalancesResponse = self.get_with_retry(&url, &query).await?;

        info!("✅ Received {} token balances", data.items.len());
        Ok(data.items)
    }

    /// Transaction history, newest first, with decoded logs.
    ///
    /// Follows pagination until the API reports no more pages or `max_pages`
    /// pages have been read.
    pub async fn get_wallet_transactions(
        &self,
        wallet_address: &str,
        chain: &GoldRushChain,
        page_size: u32,
        max_pages: u32,
    ) -> Result<Vec<GoldRushTransaction>> {
        let url = format!(
            "{}/{}/address/{}/transactions_v2/",
            self.config.base_url,
            chain.as_str(),
            wallet_address
        );

        let mut transactions = Vec::new();

        for page_number in 0..max_pages {
            let query = [
                ("page-size", page_size.to_string()),
                ("page-number", page_number.to_string()),
                ("block-signed-at-asc", "false".to_string()),
                ("no-logs", "false".to_string()),
            ];

            info!(
                "📡 Fetching transactions page {} (size {}) for {} on {}",
                page_number, page_size, wallet_address, chain
            );
            let data: TransactionsResponse = self.get_with_retry(&url, &query).await?;
            let count = data.items.len();
            transactions.extend(data.items);

            let has_more = data.pagination.map(|p| p.has_more).unwrap_or(false);
            debug!("Page {} returned {} transactions, has_more={}", page_number, count, has_more);
            if !has_more || count == 0 {
                break;
            }
        }

        info!(
            "✅ Fetched {} transactions for wallet {}",
            transactions.len(),
            wallet_address
        );
        Ok(transactions)
    }

    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        retry_with_backoff(move || self.get_once(url, query), &self.config.retry).await
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let start_time = std::time::Instant::now();
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        debug!(
            "📨 {} -> {} in {:.2}s",
            url,
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("❌ GoldRush API error - Status: {}, Body: {}", status, text);

            return Err(match status.as_u16() {
                401 => GoldRushError::AuthError,
                429 => GoldRushError::RateLimit,
                code if status.is_server_error() => GoldRushError::ServerError {
                    status: code,
                    message: text,
                },
                _ => GoldRushError::ApiError {
                    message: format!("HTTP {}: {}", status, text),
                },
            });
        }

        let response_text = response.text().await?;
        debug!("📊 Response size: {} bytes", response_text.len());

        parse_response(&response_text)
    }

    /// Basic EVM address check: `0x` followed by 40 hex characters
    pub fn validate_wallet_address(address: &str) -> Result<()> {
        let valid = address.len() == 42
            && address.starts_with("0x")
            && address[2..].chars().all(|c| c.is_ascii_hexdigit());

        if valid {
            Ok(())
        } else {
            Err(GoldRushError::InvalidAddress {
                address: address.to_string(),
            })
        }
    }
}

/// Unwrap the `{ data, error, error_message }` envelope
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: GoldRushResponse<T> =
        serde_json::from_str(body).map_err(|e| GoldRushError::ParseError {
            message: format!("{} (response size: {} bytes)", e, body.len()),
        })?;

    if envelope.error {
        let message = envelope
            .error_message
            .unwrap_or_else(|| "Unknown API error".to_string());
        return Err(GoldRushError::ApiError { message });
    }

    envelope.data.ok_or_else(|| GoldRushError::ApiError {
        message: "Response carried no data".to_string(),
    })
}
