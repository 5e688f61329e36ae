//! Swap history for one wallet on one EVM chain
//!
//! Usage:
//!   swap_tracker --wallet 0x632a...3692 --chain eth-mainnet
//!   swap_tracker --wallet 0x632a...3692 --chain 56 --format csv --output swaps.csv
//!   swap_tracker --wallet 0x632a...3692 --balances-file b.json --transactions-file t.json

mod output;

use anyhow::{anyhow, Result};
use clap::Parser;
use config_manager::SystemConfig;
use goldrush_client::{
    client::parse_response, to_raw_transactions, to_token_metadata, BalancesResponse,
    GoldRushChain, GoldRushClient, GoldRushConfig, GoldRushTransaction, RetryConfig,
    TokenBalance, TransactionsResponse,
};
use output::{write_records, OutputFormat};
use std::fs::File;
use std::io::{self, BufWriter};
use swap_core::{FailurePolicy, SwapExtractor, TokenMetadataIndex};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "swap_tracker")]
#[command(about = "Reconstruct DEX swaps for a wallet from GoldRush decoded logs")]
#[command(version)]
struct Args {
    /// Wallet address (0x + 40 hex); falls back to analysis.wallet_address
    #[arg(short, long)]
    wallet: Option<String>,

    /// Chain id or GoldRush chain name, e.g. 1, 56, eth-mainnet
    #[arg(short, long)]
    chain: Option<String>,

    /// Path to configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Saved balances_v2 response; skips the network
    #[arg(long, requires = "transactions_file")]
    balances_file: Option<String>,

    /// Saved transactions_v2 response; skips the network
    #[arg(long, requires = "balances_file")]
    transactions_file: Option<String>,

    /// Output format (json, csv, text)
    #[arg(short, long)]
    format: Option<String>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Stop at the first transaction that cannot be turned into a swap
    #[arg(long)]
    abort_on_error: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting swap tracker");

    let mut config = SystemConfig::load_from_path(&args.config).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    let wallet = config
        .analysis
        .wallet_address
        .clone()
        .ok_or_else(|| anyhow!("No wallet address given (use --wallet or analysis.wallet_address)"))?;
    GoldRushClient::validate_wallet_address(&wallet)?;

    let chain = GoldRushChain::parse(&config.analysis.chain);
    info!("Analyzing {} on {} (native {})", wallet, chain, chain.native_symbol());

    let (balances, transactions) = match (&args.balances_file, &args.transactions_file) {
        (Some(balances_path), Some(transactions_path)) => {
            info!("Offline mode: {} + {}", balances_path, transactions_path);
            load_saved(balances_path, transactions_path)?
        }
        _ => fetch(&config, &wallet, &chain).await?,
    };

    let tokens = TokenMetadataIndex::from_balances(to_token_metadata(balances));
    let raw = to_raw_transactions(transactions);

    let policy: FailurePolicy = config
        .analysis
        .failure_policy
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let extractor = SwapExtractor::new(&wallet, chain.native_symbol(), tokens);
    let report = extractor.run(&raw, policy).map_err(|e| {
        error!("Aborting: {}", e);
        e
    })?;

    let format: OutputFormat = config.output.format.parse()?;
    match &config.output.path {
        Some(path) => {
            let file = File::create(path)?;
            write_records(&report.records, format, BufWriter::new(file))?;
            info!("Wrote {} swaps to {}", report.records.len(), path);
        }
        None => write_records(&report.records, format, io::stdout().lock())?,
    }

    if !report.failures.is_empty() {
        warn!(
            "{} transactions could not be converted and were skipped",
            report.failures.len()
        );
        for failure in &report.failures {
            warn!("  {}", failure);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut SystemConfig, args: &Args) {
    if let Some(wallet) = &args.wallet {
        config.analysis.wallet_address = Some(wallet.trim().to_string());
    }
    if let Some(chain) = &args.chain {
        config.analysis.chain = chain.clone();
    }
    if let Some(format) = &args.format {
        config.output.format = format.trim().to_lowercase();
    }
    if let Some(path) = &args.output {
        config.output.path = Some(path.clone());
    }
    if args.abort_on_error {
        config.analysis.failure_policy = FailurePolicy::Abort.to_string();
    }
}

fn load_saved(
    balances_path: &str,
    transactions_path: &str,
) -> Result<(Vec<TokenBalance>, Vec<GoldRushTransaction>)> {
    let balances: BalancesResponse = parse_response(&std::fs::read_to_string(balances_path)?)?;
    let transactions: TransactionsResponse =
        parse_response(&std::fs::read_to_string(transactions_path)?)?;
    Ok((balances.items, transactions.items))
}

async fn fetch(
    config: &SystemConfig,
    wallet: &str,
    chain: &GoldRushChain,
) -> Result<(Vec<TokenBalance>, Vec<GoldRushTransaction>)> {
    let settings = &config.goldrush;
    let client = GoldRushClient::with_config(GoldRushConfig {
        api_key: settings.require_api_key()?.to_string(),
        base_url: settings.base_url.clone(),
        timeout_seconds: settings.timeout_seconds,
        retry: RetryConfig {
            max_retries: settings.max_retries,
            rate_limit_delays_ms: settings.rate_limit_delays_ms.clone(),
            server_error_delays_ms: settings.server_error_delays_ms.clone(),
        },
    })?;

    let balances = client.get_wallet_balances(wallet, chain).await?;
    let transactions = client
        .get_wallet_transactions(wallet, chain, settings.page_size, settings.max_pages)
        .await?;

    Ok((balances, transactions))
}

fn init_logging(args: &Args) {
    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}
