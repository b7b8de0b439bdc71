//! One-shot CLI commands

use tracing::info;

use crate::domain::execution::SwapSubmitter;
use crate::domain::quote::QuoteClient;
use crate::shared::errors::AppError;
use crate::shared::types::{Direction, SwapPair};

pub struct CommandExecutor;

impl CommandExecutor {
    /// Fetch and print a single quote
    pub async fn quote(
        quotes: &QuoteClient,
        pair: &SwapPair,
        direction: Direction,
        amount: &str,
    ) -> Result<(), AppError> {
        info!(
            "Requesting quote: {} {} -> {}",
            amount,
            pair.from_symbol(direction),
            pair.to_symbol(direction)
        );

        let amount_out = quotes.fetch(direction, amount).await?;
        println!(
            "{} {} ≈ {} {}",
            amount,
            pair.from_symbol(direction),
            amount_out,
            pair.to_symbol(direction)
        );
        Ok(())
    }

    /// Submit a single swap and wait for it to be mined
    pub async fn swap(
        submitter: &SwapSubmitter,
        pair: &SwapPair,
        direction: Direction,
        amount: &str,
    ) -> Result<(), AppError> {
        println!(
            "🚀 Swapping {} {} for {}...",
            amount,
            pair.from_symbol(direction),
            pair.to_symbol(direction)
        );

        match submitter.submit(direction, amount).await {
            Ok(receipt) => {
                println!("✅ Swap successful! Transaction: {}", receipt.tx_hash);
                if let Some(block) = receipt.block_number {
                    println!("   Mined in block {}", block);
                }
                Ok(())
            }
            Err(e) => {
                println!("❌ Swap failed: {}", e);
                Err(e.into())
            }
        }
    }
}
