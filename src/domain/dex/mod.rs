//! DEX domain - the fixed exchange contract boundary

mod dex_interface;

pub use dex_interface::DexContract;
