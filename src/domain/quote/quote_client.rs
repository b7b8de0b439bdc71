//! Read-only quote client over the contract boundary

use std::sync::Arc;

use tracing::debug;

use crate::domain::dex::DexContract;
use crate::math;
use crate::shared::errors::QuoteError;
use crate::shared::types::Direction;

/// Computes an estimated output amount for a given input and direction.
/// Pure request/response: no caching, no retries.
pub struct QuoteClient {
    contract: Arc<dyn DexContract>,
}

impl QuoteClient {
    pub fn new(contract: Arc<dyn DexContract>) -> Self {
        Self { contract }
    }

    /// Fetch a quote. The direction selects which read-only contract method
    /// is called; amounts are converted at the 10^18 boundary on both sides.
    pub async fn fetch(&self, direction: Direction, amount: &str) -> Result<String, QuoteError> {
        let amount_in =
            math::parse_amount(amount).map_err(|e| QuoteError::InvalidAmount(e.to_string()))?;

        let amount_out = match direction {
            Direction::NativeToToken => self.contract.quote_native_to_token(amount_in).await?,
            Direction::TokenToNative => self.contract.quote_token_to_native(amount_in).await?,
        };

        debug!("Quote {}: {} -> {}", direction.as_str(), amount_in, amount_out);
        Ok(math::format_amount(amount_out))
    }
}
