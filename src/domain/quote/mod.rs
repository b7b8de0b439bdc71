//! Quote domain - read-only price estimation

mod quote_client;

pub use quote_client::QuoteClient;
