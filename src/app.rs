// src/app.rs
use std::sync::Arc;

use anyhow::Result;
use ethers::types::Address;
use tracing::{info, warn};

use crate::application::{CommandExecutor, SwapSession};
use crate::config::Config;
use crate::domain::controller::SwapController;
use crate::domain::dex::DexContract;
use crate::domain::execution::SwapSubmitter;
use crate::domain::quote::QuoteClient;
use crate::infrastructure::evm::{connect_provider, load_wallet, EvmDex};
use crate::shared::errors::ProviderError;
use crate::shared::types::{Direction, SwapPair, TokenInfo};

// CrossFi testnet defaults; any of them can be overridden by config or CLI.
pub const DEFAULT_RPC_URL: &str = "https://rpc.testnet.ms";
pub const DEFAULT_CHAIN_ID: u64 = 4157;
pub const DEFAULT_CONTRACT: &str = "0xeC56bC8Fa6AEd2CD45395cAbaF45Cc3162B65bD2";

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub rpc_url: String,
    pub chain_id: u64,
    pub contract_address: String,
    pub key_path: Option<String>,
    pub pair: SwapPair,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            contract_address: DEFAULT_CONTRACT.to_string(),
            key_path: None,
            pair: SwapPair {
                native: TokenInfo { symbol: "XFI".to_string(), decimals: 18 },
                token: TokenInfo { symbol: "DXFI".to_string(), decimals: 18 },
            },
        }
    }
}

impl AppCfg {
    pub fn from_config(cfg: Config) -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: cfg.rpc.url,
            chain_id: cfg.network.chain_id,
            contract_address: cfg.contract.address,
            key_path: cfg.wallet.map(|w| w.key_path),
            pair: cfg
                .tokens
                .map(|t| SwapPair {
                    native: TokenInfo { symbol: t.native.symbol, decimals: t.native.decimals },
                    token: TokenInfo { symbol: t.token.symbol, decimals: t.token.decimals },
                })
                .unwrap_or(defaults.pair),
        }
    }
}

/// Run the interactive swap form.
pub async fn run_session(app_cfg: AppCfg) -> Result<()> {
    println!(
        "In order to interact with the DEX you need to be on CrossFi Testnet (chain id {})",
        app_cfg.chain_id
    );

    let (quotes, submitter, pair) = wire(&app_cfg).await?;
    let (controller, notifications) = SwapController::new(quotes, submitter, pair);
    SwapSession::new(Arc::new(controller), notifications).run().await
}

/// Fetch a single quote and exit.
pub async fn run_quote(app_cfg: AppCfg, direction: Direction, amount: &str) -> Result<()> {
    let (quotes, _, pair) = wire(&app_cfg).await?;
    CommandExecutor::quote(&quotes, &pair, direction, amount).await?;
    Ok(())
}

/// Submit a single swap, wait for confirmation, and exit.
pub async fn run_swap(app_cfg: AppCfg, direction: Direction, amount: &str) -> Result<()> {
    let (_, submitter, pair) = wire(&app_cfg).await?;
    CommandExecutor::swap(&submitter, &pair, direction, amount).await?;
    Ok(())
}

/// Connect the provider, check the network, and build the two clients over
/// a shared contract handle.
async fn wire(cfg: &AppCfg) -> Result<(QuoteClient, SwapSubmitter, SwapPair)> {
    info!("Connecting to {} (expecting chain id {})", cfg.rpc_url, cfg.chain_id);
    let provider = connect_provider(&cfg.rpc_url, cfg.chain_id).await?;

    let wallet = match &cfg.key_path {
        Some(path) => Some(load_wallet(path, cfg.chain_id)?),
        None => {
            warn!("No wallet configured; quotes work but swaps will be refused");
            None
        }
    };

    let address: Address = cfg
        .contract_address
        .parse()
        .map_err(|_| ProviderError::InvalidAddress(cfg.contract_address.clone()))?;

    let dex: Arc<dyn DexContract> = Arc::new(EvmDex::new(provider, address, wallet));
    Ok((QuoteClient::new(dex.clone()), SwapSubmitter::new(dex), cfg.pair.clone()))
}
