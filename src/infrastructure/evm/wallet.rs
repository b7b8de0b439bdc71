//! Provider connection and wallet key loading

use std::fs;

use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use tracing::info;

use crate::shared::errors::ProviderError;

/// Connect to the RPC endpoint and verify its chain id. Fails closed on a
/// network mismatch, so nothing downstream can run against the wrong chain.
pub async fn connect_provider(
    url: &str,
    expected_chain_id: u64,
) -> Result<Provider<Http>, ProviderError> {
    let provider = Provider::<Http>::try_from(url).map_err(|e| ProviderError::Connect {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ProviderError::Connect { url: url.to_string(), reason: e.to_string() })?
        .as_u64();

    if chain_id != expected_chain_id {
        return Err(ProviderError::WrongNetwork { expected: expected_chain_id, actual: chain_id });
    }

    info!("Connected to chain id {} via {}", chain_id, url);
    Ok(provider)
}

/// Load a hex-encoded private key from disk and bind it to the chain.
pub fn load_wallet(path: &str, chain_id: u64) -> Result<LocalWallet, ProviderError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ProviderError::InvalidKey(format!("{}: {}", path, e)))?;
    let wallet: LocalWallet = raw
        .trim()
        .trim_start_matches("0x")
        .parse()
        .map_err(|e: ethers::signers::WalletError| ProviderError::InvalidKey(e.to_string()))?;
    Ok(wallet.with_chain_id(chain_id))
}
