//! Xfiswap - XFI/DXFI swap client for the CrossFi testnet DEX
//! All pricing and liquidity accounting lives in the deployed exchange
//! contract; this crate quotes it, submits swaps to it, and renders a form.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod math;
pub mod shared;

// Re-export main types for convenience
pub use domain::controller::{Notification, SwapController};
pub use domain::dex::DexContract;
pub use domain::execution::SwapSubmitter;
pub use domain::quote::QuoteClient;
