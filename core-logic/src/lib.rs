//! # Core Logic - Shared Helpers for Wallet Automation
//!
//! Chain-agnostic helpers used by the chain crates.
//!
//! ## Modules
//!
//! - [`config`] - Proxy descriptor types and fixed HTTP settings
//! - [`error`] - Typed error handling with thiserror
//! - `utils` - Proxy parsing, HTTP client factory, retry, data helpers, logger

pub mod config;
pub mod error;
pub(crate) mod utils;

pub use config::{ProxyAgent, ProxyDescriptor, ProxyProtocol, REQUEST_TIMEOUT_MS, USER_AGENT};
pub use error::{ConfigError, CoreError, NetworkError, WalletError};

pub use utils::{
    create_client, format_error, get_random_amount, get_random_number, is_proxy_error,
    mask_sensitive_data, parse_proxy, setup_logger, sleep_ms, with_retry, ErrorSummary,
    HttpClientFactory, MaskKind, ProxyInfo, ProxyManager, RequestFailure, RequestStart,
    RetryPolicy, PROXY_ERROR_INDICATORS,
};
