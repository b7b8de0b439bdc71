//! Swap form controller
//!
//! Holds the transient form state (pair order, raw input, last quote,
//! in-flight flag) and wires user events to the quote client and the swap
//! submitter. Terminal outcomes are values on a notification channel, so
//! the controller stays independent of any particular front-end.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::execution::SwapSubmitter;
use crate::domain::quote::QuoteClient;
use crate::shared::errors::SubmitError;
use crate::shared::types::{Direction, SwapPair};

/// Form phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Editing,
    Submitting,
}

/// Non-blocking notifications rendered by the view layer
#[derive(Debug, Clone)]
pub enum Notification {
    QuoteUpdated { amount_out: String },
    QuoteUnavailable { reason: String },
    QuoteCleared,
    DirectionFlipped { direction: Direction },
    SwapConfirmed { tx_hash: String },
    SwapFailed { reason: String },
}

#[derive(Debug, Clone)]
struct FormState {
    direction: Direction,
    input: String,
    quote: Option<String>,
    phase: Phase,
    // Stamp of the most recently issued quote request; responses carrying
    // any other stamp are discarded.
    latest_quote_seq: u64,
}

/// Point-in-time copy of the form, for rendering and tests
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub direction: Direction,
    pub input: String,
    pub quote: Option<String>,
    pub phase: Phase,
}

pub struct SwapController {
    quotes: QuoteClient,
    submitter: SwapSubmitter,
    pair: SwapPair,
    state: Mutex<FormState>,
    quote_seq: AtomicU64,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl SwapController {
    pub fn new(
        quotes: QuoteClient,
        submitter: SwapSubmitter,
        pair: SwapPair,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            quotes,
            submitter,
            pair,
            state: Mutex::new(FormState {
                direction: Direction::NativeToToken,
                input: String::new(),
                quote: None,
                phase: Phase::Idle,
                latest_quote_seq: 0,
            }),
            quote_seq: AtomicU64::new(0),
            notifications: tx,
        };
        (controller, rx)
    }

    pub fn pair(&self) -> &SwapPair {
        &self.pair
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let state = self.state.lock().unwrap();
        FormSnapshot {
            direction: state.direction,
            input: state.input.clone(),
            quote: state.quote.clone(),
            phase: state.phase,
        }
    }

    /// Input changed: record it and fetch a fresh quote for the current
    /// direction. Concurrent calls may overlap; only the response matching
    /// the latest issued stamp updates the displayed quote.
    pub async fn handle_input(&self, text: &str) {
        let seq = self.next_seq();
        let direction = {
            let mut state = self.state.lock().unwrap();
            state.input = text.to_string();
            state.latest_quote_seq = seq;
            if state.phase == Phase::Idle {
                state.phase = Phase::Editing;
            }
            state.direction
        };

        if text.trim().is_empty() {
            let mut state = self.state.lock().unwrap();
            if state.latest_quote_seq == seq {
                state.quote = None;
                drop(state);
                self.notify(Notification::QuoteCleared);
            }
            return;
        }

        let result = self.quotes.fetch(direction, text).await;

        let mut state = self.state.lock().unwrap();
        if state.latest_quote_seq != seq {
            debug!("Discarding stale quote response (seq {}, latest {})", seq, state.latest_quote_seq);
            return;
        }
        match result {
            Ok(amount_out) => {
                state.quote = Some(amount_out.clone());
                drop(state);
                self.notify(Notification::QuoteUpdated { amount_out });
            }
            Err(e) => {
                state.quote = None;
                drop(state);
                warn!("Quote failed: {}", e);
                self.notify(Notification::QuoteUnavailable { reason: e.to_string() });
            }
        }
    }

    /// Flip the pair order. Clears both the input and the displayed quote,
    /// and invalidates any quote still in flight for the old direction.
    pub fn flip_direction(&self) -> Direction {
        let direction = {
            let mut state = self.state.lock().unwrap();
            state.direction = state.direction.flipped();
            state.input.clear();
            state.quote = None;
            state.latest_quote_seq = self.next_seq();
            state.direction
        };
        self.notify(Notification::DirectionFlipped { direction });
        direction
    }

    /// Submit the current form and block until the transaction resolves.
    /// Refused outright while a previous submit is still pending, so at
    /// most one transaction is ever outstanding.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let (direction, amount) = {
            let mut state = self.state.lock().unwrap();
            if state.phase == Phase::Submitting {
                return Err(SubmitError::AlreadyPending);
            }
            state.phase = Phase::Submitting;
            (state.direction, state.input.clone())
        };

        let result = self.submitter.submit(direction, &amount).await;

        // The pending flag is cleared on every path before the outcome is
        // reported.
        self.state.lock().unwrap().phase = Phase::Idle;

        match result {
            Ok(receipt) => {
                self.notify(Notification::SwapConfirmed { tx_hash: receipt.tx_hash });
                Ok(())
            }
            Err(e) => {
                warn!("Swap failed: {}", e);
                self.notify(Notification::SwapFailed { reason: e.to_string() });
                Err(e)
            }
        }
    }

    fn next_seq(&self) -> u64 {
        self.quote_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn notify(&self, notification: Notification) {
        // The receiver may already be gone during shutdown; dropping the
        // notification is fine then.
        let _ = self.notifications.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ethers::types::U256;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    use crate::domain::dex::DexContract;
    use crate::math;
    use crate::shared::errors::QuoteError;
    use crate::shared::types::{SwapReceipt, TokenInfo};

    const TX_HASH: &str = "0x3c7a1f27d3b8e0a6f2cc1f0f3a2b90d2ce57f6cf9a9b2f0d64d4c7b5ee301b11";

    /// Contract double with per-amount quote tables and optional gates that
    /// hold a call open until the test releases it.
    #[derive(Default)]
    struct ScriptedDex {
        quotes: Mutex<HashMap<U256, U256>>,
        quote_gates: Mutex<HashMap<U256, Arc<Notify>>>,
        swap_gate: Option<Arc<Notify>>,
        reject_swaps: bool,
        swap_calls: AtomicUsize,
        swap_args: Mutex<Vec<U256>>,
    }

    impl ScriptedDex {
        fn with_quote(self, amount_in: &str, amount_out: &str) -> Self {
            self.quotes
                .lock()
                .unwrap()
                .insert(amt(amount_in), amt(amount_out));
            self
        }

        fn with_quote_gate(self, amount_in: &str, gate: Arc<Notify>) -> Self {
            self.quote_gates.lock().unwrap().insert(amt(amount_in), gate);
            self
        }

        fn with_swap_gate(mut self, gate: Arc<Notify>) -> Self {
            self.swap_gate = Some(gate);
            self
        }

        fn rejecting_swaps(mut self) -> Self {
            self.reject_swaps = true;
            self
        }

        async fn quote(&self, amount_in: U256) -> Result<U256, QuoteError> {
            let gate = self.quote_gates.lock().unwrap().get(&amount_in).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.quotes
                .lock()
                .unwrap()
                .get(&amount_in)
                .copied()
                .ok_or_else(|| QuoteError::ContractCall("execution reverted".to_string()))
        }

        async fn swap(&self, amount_in: U256) -> Result<SwapReceipt, SubmitError> {
            self.swap_calls.fetch_add(1, Ordering::SeqCst);
            self.swap_args.lock().unwrap().push(amount_in);
            if let Some(gate) = &self.swap_gate {
                gate.notified().await;
            }
            if self.reject_swaps {
                Err(SubmitError::Rejected("user denied the request".to_string()))
            } else {
                Ok(SwapReceipt { tx_hash: TX_HASH.to_string(), block_number: Some(7) })
            }
        }
    }

    #[async_trait]
    impl DexContract for ScriptedDex {
        async fn quote_native_to_token(&self, amount_in: U256) -> Result<U256, QuoteError> {
            self.quote(amount_in).await
        }

        async fn quote_token_to_native(&self, amount_in: U256) -> Result<U256, QuoteError> {
            self.quote(amount_in).await
        }

        async fn swap_native_to_token(&self, value: U256) -> Result<SwapReceipt, SubmitError> {
            self.swap(value).await
        }

        async fn swap_token_to_native(&self, amount_in: U256) -> Result<SwapReceipt, SubmitError> {
            self.swap(amount_in).await
        }
    }

    fn amt(text: &str) -> U256 {
        math::parse_amount(text).unwrap()
    }

    fn controller(
        dex: Arc<ScriptedDex>,
    ) -> (Arc<SwapController>, mpsc::UnboundedReceiver<Notification>) {
        let handle = dex as Arc<dyn DexContract>;
        let pair = SwapPair {
            native: TokenInfo { symbol: "XFI".to_string(), decimals: 18 },
            token: TokenInfo { symbol: "DXFI".to_string(), decimals: 18 },
        };
        let (controller, rx) = SwapController::new(
            QuoteClient::new(handle.clone()),
            SwapSubmitter::new(handle),
            pair,
        );
        (Arc::new(controller), rx)
    }

    #[tokio::test]
    async fn input_change_updates_the_quote() {
        let dex = Arc::new(ScriptedDex::default().with_quote("0.1", "50"));
        let (ctrl, mut rx) = controller(dex);

        ctrl.handle_input("0.1").await;

        let snap = ctrl.snapshot();
        assert_eq!(snap.phase, Phase::Editing);
        assert_eq!(snap.input, "0.1");
        assert_eq!(snap.quote.as_deref(), Some("50.0"));
        assert!(matches!(
            rx.try_recv().unwrap(),
            Notification::QuoteUpdated { amount_out } if amount_out == "50.0"
        ));
    }

    #[tokio::test]
    async fn quote_failure_is_surfaced() {
        let dex = Arc::new(ScriptedDex::default());
        let (ctrl, mut rx) = controller(dex);

        ctrl.handle_input("3").await;

        assert_eq!(ctrl.snapshot().quote, None);
        assert!(matches!(rx.try_recv().unwrap(), Notification::QuoteUnavailable { .. }));
    }

    #[tokio::test]
    async fn double_flip_restores_direction_and_clears_quote() {
        let dex = Arc::new(ScriptedDex::default().with_quote("0.1", "50"));
        let (ctrl, _rx) = controller(dex);

        ctrl.handle_input("0.1").await;
        assert_eq!(ctrl.snapshot().quote.as_deref(), Some("50.0"));

        assert_eq!(ctrl.flip_direction(), Direction::TokenToNative);
        let snap = ctrl.snapshot();
        assert_eq!(snap.input, "");
        assert_eq!(snap.quote, None);

        assert_eq!(ctrl.flip_direction(), Direction::NativeToToken);
        assert_eq!(ctrl.snapshot().quote, None);
    }

    #[tokio::test]
    async fn late_stale_quote_is_discarded() {
        let gate = Arc::new(Notify::new());
        let dex = Arc::new(
            ScriptedDex::default()
                .with_quote("1", "100")
                .with_quote("2", "200")
                .with_quote_gate("1", gate.clone()),
        );
        let (ctrl, _rx) = controller(dex);

        // First request parks inside the gated contract call.
        let first = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.handle_input("1").await }
        });
        tokio::task::yield_now().await;

        // Second request resolves while the first is still in flight.
        ctrl.handle_input("2").await;
        assert_eq!(ctrl.snapshot().quote.as_deref(), Some("200.0"));

        // Releasing the first response late must not overwrite the newer quote.
        gate.notify_one();
        first.await.unwrap();
        assert_eq!(ctrl.snapshot().quote.as_deref(), Some("200.0"));
    }

    #[tokio::test]
    async fn flip_invalidates_in_flight_quote() {
        let gate = Arc::new(Notify::new());
        let dex = Arc::new(
            ScriptedDex::default()
                .with_quote("1", "100")
                .with_quote_gate("1", gate.clone()),
        );
        let (ctrl, _rx) = controller(dex);

        let pending = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.handle_input("1").await }
        });
        tokio::task::yield_now().await;

        ctrl.flip_direction();
        gate.notify_one();
        pending.await.unwrap();

        // The response belonged to the old direction and must stay dropped.
        assert_eq!(ctrl.snapshot().quote, None);
    }

    #[tokio::test]
    async fn second_submit_while_pending_is_refused() {
        let gate = Arc::new(Notify::new());
        let dex = Arc::new(
            ScriptedDex::default()
                .with_quote("1", "500")
                .with_swap_gate(gate.clone()),
        );
        let (ctrl, mut rx) = controller(dex.clone());

        ctrl.handle_input("1").await;
        let first = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.submit().await }
        });
        tokio::task::yield_now().await;
        assert_eq!(ctrl.snapshot().phase, Phase::Submitting);

        // The duplicate submit must not reach the contract.
        let err = ctrl.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::AlreadyPending));
        assert_eq!(dex.swap_calls.load(Ordering::SeqCst), 1);

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(ctrl.snapshot().phase, Phase::Idle);
        assert_eq!(dex.swap_calls.load(Ordering::SeqCst), 1);

        // Drain the quote notification, then expect exactly one confirmation.
        assert!(matches!(rx.try_recv().unwrap(), Notification::QuoteUpdated { .. }));
        assert!(matches!(
            rx.try_recv().unwrap(),
            Notification::SwapConfirmed { tx_hash } if tx_hash == TX_HASH
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn token_in_submit_reports_the_receipt_hash() {
        let dex = Arc::new(ScriptedDex::default().with_quote("10", "0.02"));
        let (ctrl, mut rx) = controller(dex.clone());

        ctrl.flip_direction();
        ctrl.handle_input("10").await;
        ctrl.submit().await.unwrap();

        assert_eq!(
            dex.swap_args.lock().unwrap().as_slice(),
            &[U256::from_dec_str("10000000000000000000").unwrap()]
        );
        assert_eq!(ctrl.snapshot().phase, Phase::Idle);

        let confirmed = std::iter::from_fn(|| rx.try_recv().ok())
            .any(|n| matches!(n, Notification::SwapConfirmed { tx_hash } if tx_hash == TX_HASH));
        assert!(confirmed);
    }

    #[tokio::test]
    async fn failed_submit_returns_to_idle() {
        let dex = Arc::new(ScriptedDex::default().with_quote("10", "0.02").rejecting_swaps());
        let (ctrl, mut rx) = controller(dex);

        ctrl.flip_direction();
        ctrl.handle_input("10").await;
        let err = ctrl.submit().await.unwrap_err();

        assert!(matches!(err, SubmitError::Rejected(_)));
        assert_eq!(ctrl.snapshot().phase, Phase::Idle);

        let failed = std::iter::from_fn(|| rx.try_recv().ok())
            .any(|n| matches!(n, Notification::SwapFailed { .. }));
        assert!(failed);
    }
}
