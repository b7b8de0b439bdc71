//! Interactive swap session - the terminal rendition of the swap form
//!
//! Reads one event per line: a decimal amount refreshes the quote, `flip`
//! reverses the pair, `swap` submits. Quote fetches and submits run as
//! spawned tasks so the loop stays responsive while a call is in flight;
//! the controller's guards decide what may overlap.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::domain::controller::{Notification, SwapController};
use crate::shared::errors::SubmitError;

pub struct SwapSession {
    controller: Arc<SwapController>,
    notifications: mpsc::UnboundedReceiver<Notification>,
}

impl SwapSession {
    pub fn new(
        controller: Arc<SwapController>,
        notifications: mpsc::UnboundedReceiver<Notification>,
    ) -> Self {
        Self { controller, notifications }
    }

    pub async fn run(mut self) -> Result<()> {
        self.print_header();

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            tokio::select! {
                notification = self.notifications.recv() => {
                    match notification {
                        Some(n) => self.render(n),
                        None => break,
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.dispatch(line.trim()) {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Route one input line. Returns false to end the session.
    fn dispatch(&self, line: &str) -> bool {
        match line {
            "" => true,
            "quit" | "exit" => false,
            "flip" => {
                self.controller.flip_direction();
                true
            }
            "swap" => {
                println!("  ⏳ Submitting swap, waiting for confirmation...");
                let controller = Arc::clone(&self.controller);
                tokio::spawn(async move {
                    if let Err(SubmitError::AlreadyPending) = controller.submit().await {
                        println!("  ⏳ A swap is already pending, please wait");
                    }
                });
                true
            }
            amount => {
                let controller = Arc::clone(&self.controller);
                let text = amount.to_string();
                tokio::spawn(async move { controller.handle_input(&text).await });
                true
            }
        }
    }

    fn render(&self, notification: Notification) {
        let pair = self.controller.pair();
        match notification {
            Notification::QuoteUpdated { amount_out } => {
                let snap = self.controller.snapshot();
                println!(
                    "  {} {} -> {} {}",
                    snap.input,
                    pair.from_symbol(snap.direction),
                    amount_out,
                    pair.to_symbol(snap.direction)
                );
            }
            Notification::QuoteUnavailable { reason } => {
                println!("  ⚠️  Quote unavailable: {}", reason);
            }
            Notification::QuoteCleared => {}
            Notification::DirectionFlipped { direction } => {
                println!(
                    "  ⇅ Now swapping {} for {}",
                    pair.from_symbol(direction),
                    pair.to_symbol(direction)
                );
            }
            Notification::SwapConfirmed { tx_hash } => {
                println!("  ✅ Swap successful! Transaction: {}", tx_hash);
            }
            Notification::SwapFailed { reason } => {
                println!("  ❌ Swap failed: {}", reason);
            }
        }
    }

    fn print_header(&self) {
        let pair = self.controller.pair();
        let snap = self.controller.snapshot();
        println!("=== {} / {} swap ===", pair.native.symbol, pair.token.symbol);
        println!(
            "Type an amount of {} to get a {} quote.",
            pair.from_symbol(snap.direction),
            pair.to_symbol(snap.direction)
        );
        println!("Commands: flip, swap, quit");
    }
}
