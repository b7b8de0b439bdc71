//! Error handling for the application

use thiserror::Error;

/// Quote-related errors
#[derive(Error, Debug, Clone)]
pub enum QuoteError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Quote call failed: {0}")]
    ContractCall(String),

    #[error("Provider unavailable: {0}")]
    Provider(String),
}

/// Submission-related errors
#[derive(Error, Debug, Clone)]
pub enum SubmitError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("No wallet configured; set [wallet] key_path in Config.toml")]
    NoWallet,

    #[error("A swap is already pending")]
    AlreadyPending,

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Transaction {0} reverted on-chain")]
    Reverted(String),

    #[error("Transaction dropped before confirmation")]
    Dropped,

    #[error("Network error: {0}")]
    Network(String),
}

/// Provider and connection errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Wrong network: expected chain id {expected}, provider reports {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("Invalid wallet key: {0}")]
    InvalidKey(String),

    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Quote error: {0}")]
    Quote(String),

    #[error("Submission error: {0}")]
    Submit(String),
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        AppError::Quote(err.to_string())
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        AppError::Submit(err.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider(err.to_string())
    }
}
