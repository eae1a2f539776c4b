//! # Core Error Types
//!
//! Centralized error definitions shared by the helper crates.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Unified error type for core-logic operations.
///
/// Wraps the specific error families so callers that touch several helpers
/// can carry a single error type.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Wallet(WalletError),

    #[error(transparent)]
    Network(NetworkError),

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

impl From<ConfigError> for CoreError {
    fn from(e: ConfigError) -> Self {
        CoreError::Config(e)
    }
}

impl From<WalletError> for CoreError {
    fn from(e: WalletError) -> Self {
        CoreError::Wallet(e)
    }
}

impl From<NetworkError> for CoreError {
    fn from(e: NetworkError) -> Self {
        CoreError::Network(e)
    }
}

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to load configuration from {path}: {reason}")]
    LoadFailed { path: String, reason: String },
}

/// Wallet, key and signing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Private key is empty")]
    EmptyKey,

    #[error("Invalid private key length: expected 66 chars including 0x prefix, got {length}")]
    InvalidKeyLength { length: usize },

    #[error("Invalid private key format: expected hex string")]
    InvalidKeyFormat,

    #[error("Invalid address format: {address}")]
    InvalidAddress { address: String },

    #[error("Failed to create wallet: {reason}")]
    Creation { reason: String },

    #[error("Failed to get balance: {reason}")]
    Balance { reason: String },

    #[error("Failed to sign message: {reason}")]
    Signing { reason: String },
}

/// HTTP client errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Failed to create HTTP client: {reason}")]
    ClientBuild { reason: String },
}
