//! Exchange contract bindings
//!
//! The deployed contract's ABI is fixed; only the four methods below are
//! relevant to this client.

use std::sync::Arc;

use async_trait::async_trait;
use ethers::contract::abigen;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::LocalWallet;
use ethers::types::{Address, TransactionReceipt, U256};
use tracing::info;

use crate::domain::dex::DexContract;
use crate::shared::errors::{QuoteError, SubmitError};
use crate::shared::types::SwapReceipt;

abigen!(
    DexExchange,
    r#"[
        function calculateEthToToken(uint256 ethAmount) external view returns (uint256)
        function calculateTokenToEth(uint256 tokenAmount) external view returns (uint256)
        function swapEthToToken() external payable
        function swapTokenToEth(uint256 tokenAmount) external
    ]"#
);

type ReadClient = Provider<Http>;
type WriteClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// The deployed exchange contract: read-only for quotes and, when a wallet
/// is configured, read-write for swaps.
pub struct EvmDex {
    read: DexExchange<ReadClient>,
    write: Option<DexExchange<WriteClient>>,
}

impl EvmDex {
    pub fn new(provider: Provider<Http>, address: Address, wallet: Option<LocalWallet>) -> Self {
        let read = DexExchange::new(address, Arc::new(provider.clone()));
        let write = wallet.map(|wallet| {
            let client = SignerMiddleware::new(provider, wallet);
            DexExchange::new(address, Arc::new(client))
        });
        Self { read, write }
    }

    fn write_contract(&self) -> Result<&DexExchange<WriteClient>, SubmitError> {
        self.write.as_ref().ok_or(SubmitError::NoWallet)
    }
}

#[async_trait]
impl DexContract for EvmDex {
    async fn quote_native_to_token(&self, amount_in: U256) -> Result<U256, QuoteError> {
        self.read
            .calculate_eth_to_token(amount_in)
            .call()
            .await
            .map_err(|e| QuoteError::ContractCall(e.to_string()))
    }

    async fn quote_token_to_native(&self, amount_in: U256) -> Result<U256, QuoteError> {
        self.read
            .calculate_token_to_eth(amount_in)
            .call()
            .await
            .map_err(|e| QuoteError::ContractCall(e.to_string()))
    }

    async fn swap_native_to_token(&self, value: U256) -> Result<SwapReceipt, SubmitError> {
        let contract = self.write_contract()?;
        let call = contract.swap_eth_to_token().value(value);
        let pending = call
            .send()
            .await
            .map_err(|e| SubmitError::Rejected(e.to_string()))?;
        info!("Swap submitted: {:?}", *pending);
        let receipt = pending.await.map_err(|e| SubmitError::Network(e.to_string()))?;
        receipt_to_result(receipt)
    }

    async fn swap_token_to_native(&self, amount_in: U256) -> Result<SwapReceipt, SubmitError> {
        let contract = self.write_contract()?;
        let call = contract.swap_token_to_eth(amount_in);
        let pending = call
            .send()
            .await
            .map_err(|e| SubmitError::Rejected(e.to_string()))?;
        info!("Swap submitted: {:?}", *pending);
        let receipt = pending.await.map_err(|e| SubmitError::Network(e.to_string()))?;
        receipt_to_result(receipt)
    }
}

/// Mined-receipt mapping: a missing receipt means the transaction was
/// dropped from the mempool; status 0 means it reverted on-chain.
fn receipt_to_result(receipt: Option<TransactionReceipt>) -> Result<SwapReceipt, SubmitError> {
    let receipt = receipt.ok_or(SubmitError::Dropped)?;
    let tx_hash = format!("{:?}", receipt.transaction_hash);
    if receipt.status.map(|s| s.as_u64()) != Some(1) {
        return Err(SubmitError::Reverted(tx_hash));
    }
    Ok(SwapReceipt { tx_hash, block_number: receipt.block_number.map(|b| b.as_u64()) })
}
