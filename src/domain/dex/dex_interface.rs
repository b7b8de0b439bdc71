//! Exchange contract interface trait

use async_trait::async_trait;
use ethers::types::U256;

use crate::shared::errors::{QuoteError, SubmitError};
use crate::shared::types::SwapReceipt;

/// The four contract methods this client relies on. Production code wraps
/// the deployed exchange contract; tests substitute doubles.
#[async_trait]
pub trait DexContract: Send + Sync {
    /// calculateEthToToken: native amount in, token amount out.
    async fn quote_native_to_token(&self, amount_in: U256) -> Result<U256, QuoteError>;

    /// calculateTokenToEth: token amount in, native amount out.
    async fn quote_token_to_native(&self, amount_in: U256) -> Result<U256, QuoteError>;

    /// swapEthToToken: the native amount rides along as transaction value.
    /// Resolves once the transaction is mined.
    async fn swap_native_to_token(&self, value: U256) -> Result<SwapReceipt, SubmitError>;

    /// swapTokenToEth: the token amount is the call argument.
    /// Resolves once the transaction is mined.
    async fn swap_token_to_native(&self, amount_in: U256) -> Result<SwapReceipt, SubmitError>;
}
