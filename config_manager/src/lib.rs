use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] ConfigError),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Output formats the CLI can render swap records in
pub const OUTPUT_FORMATS: &[&str] = &["json", "csv", "text"];

/// Failure policies accepted for per-transaction extraction errors
pub const FAILURE_POLICIES: &[&str] = &["skip", "abort"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// GoldRush (Covalent) API access
    pub goldrush: GoldRushSettings,

    /// What to analyze and how strictly
    pub analysis: AnalysisSettings,

    /// Where and how results are written
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldRushSettings {
    /// API key, normally supplied as SWAP__GOLDRUSH__API_KEY
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Transactions per page
    pub page_size: u32,

    /// Upper bound on pages fetched per run
    pub max_pages: u32,

    /// Retries after the first attempt for 429/5xx responses
    pub max_retries: u32,

    /// Backoff schedule after HTTP 429 (milliseconds)
    pub rate_limit_delays_ms: Vec<u64>,

    /// Backoff schedule after 5xx responses (milliseconds)
    pub server_error_delays_ms: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Chain id or GoldRush chain name, e.g. "1" or "eth-mainnet"
    pub chain: String,

    /// Wallet to analyze when none is given on the command line
    pub wallet_address: Option<String>,

    /// "skip" keeps going past a failing transaction, "abort" stops the run
    pub failure_policy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// One of json, csv, text
    pub format: String,

    /// Output file; stdout when unset
    pub path: Option<String>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            goldrush: GoldRushSettings {
                api_key: "".to_string(), // Must be set in config file or environment
                base_url: "https://api.covalenthq.com/v1".to_string(),
                timeout_seconds: 120,
                page_size: 300,
                max_pages: 1, // Most recent page only
                max_retries: 3,
                rate_limit_delays_ms: vec![500, 1000, 2000],
                server_error_delays_ms: vec![300, 600, 1200],
            },
            analysis: AnalysisSettings {
                chain: "eth-mainnet".to_string(),
                wallet_address: None,
                failure_policy: "skip".to_string(),
            },
            output: OutputSettings {
                format: "json".to_string(),
                path: None,
            },
        }
    }
}

impl GoldRushSettings {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.page_size == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Page size must be greater than 0".to_string(),
            ));
        }

        if self.max_pages == 0 {
            return Err(ConfigurationError::InvalidValue(
                "max_pages must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Only needed when data is fetched over the network
    pub fn require_api_key(&self) -> Result<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "GoldRush API key is required (set SWAP__GOLDRUSH__API_KEY)".to_string(),
            ));
        }
        Ok(key)
    }
}

impl SystemConfig {
    /// Defaults, then the file if it exists, then SWAP__* environment variables
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config_builder =
            Config::builder().add_source(Config::try_from(&SystemConfig::default())?);

        if config_path.as_ref().exists() {
            info!(
                "Loading configuration from: {}",
                config_path.as_ref().display()
            );
            config_builder = config_builder.add_source(File::from(config_path.as_ref()));
        } else {
            debug!("Config file not found, using defaults and environment variables");
        }

        config_builder = config_builder.add_source(
            Environment::with_prefix("SWAP")
                .try_parsing(true)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("goldrush.rate_limit_delays_ms")
                .with_list_parse_key("goldrush.server_error_delays_ms"),
        );

        let mut system_config: SystemConfig = config_builder.build()?.try_deserialize()?;

        system_config.output.format = system_config.output.format.trim().to_lowercase();
        system_config.analysis.failure_policy =
            system_config.analysis.failure_policy.trim().to_lowercase();

        system_config.validate()?;

        Ok(system_config)
    }

    pub fn validate(&self) -> Result<()> {
        self.goldrush.validate()?;

        if !OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            return Err(ConfigurationError::InvalidValue(format!(
                "Unknown output format '{}', expected one of {:?}",
                self.output.format, OUTPUT_FORMATS
            )));
        }

        if !FAILURE_POLICIES.contains(&self.analysis.failure_policy.as_str()) {
            return Err(ConfigurationError::InvalidValue(format!(
                "Unknown failure policy '{}', expected one of {:?}",
                self.analysis.failure_policy, FAILURE_POLICIES
            )));
        }

        if self.analysis.chain.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "Chain cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
