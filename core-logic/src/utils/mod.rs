//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod data;
pub(crate) mod http_client;
pub(crate) mod logger;
pub(crate) mod proxy_manager;
pub(crate) mod retry;

// Selective exports - only public utilities
pub use data::{
    format_error, get_random_amount, get_random_number, mask_sensitive_data, sleep_ms, MaskKind,
};
pub use http_client::{
    create_client, ErrorSummary, HttpClientFactory, ProxyInfo, RequestFailure, RequestStart,
};
pub use logger::setup_logger;
pub use proxy_manager::{is_proxy_error, parse_proxy, ProxyManager, PROXY_ERROR_INDICATORS};
pub use retry::{with_retry, RetryPolicy};
