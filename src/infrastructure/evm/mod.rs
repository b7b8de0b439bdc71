//! EVM infrastructure - ethers-backed provider, wallet, and contract bindings

mod dex_contract;
mod wallet;

pub use dex_contract::{DexExchange, EvmDex};
pub use wallet::{connect_provider, load_wallet};
