//! Swap submission over the contract boundary

use std::sync::Arc;

use tracing::info;

use crate::domain::dex::DexContract;
use crate::math;
use crate::shared::errors::SubmitError;
use crate::shared::types::{Direction, SwapReceipt};

/// Submits swap transactions and blocks until they are mined.
/// One call, one transaction: no retries, no queueing, no cancellation.
pub struct SwapSubmitter {
    contract: Arc<dyn DexContract>,
}

impl SwapSubmitter {
    pub fn new(contract: Arc<dyn DexContract>) -> Self {
        Self { contract }
    }

    /// Submit a swap. For the native-in direction the amount is attached as
    /// the transaction value; for token-in it is the call argument (prior
    /// token approval is assumed granted).
    pub async fn submit(
        &self,
        direction: Direction,
        amount: &str,
    ) -> Result<SwapReceipt, SubmitError> {
        let amount_in =
            math::parse_amount(amount).map_err(|e| SubmitError::InvalidAmount(e.to_string()))?;

        info!("Submitting {} swap for {}", direction.as_str(), amount);

        let receipt = match direction {
            Direction::NativeToToken => self.contract.swap_native_to_token(amount_in).await?,
            Direction::TokenToNative => self.contract.swap_token_to_native(amount_in).await?,
        };

        info!("Swap confirmed: {}", receipt.tx_hash);
        Ok(receipt)
    }
}
