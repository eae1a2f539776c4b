//! # Pharos Project
//!
//! Pharos testnet wallet helpers built on `core-logic`.
//!
//! - [`config`] - `api.zenith.rpc_url` resolution into a [`NetworkConfig`]
//! - [`wallet`] - key / address validation, wallet construction, balance, signing

pub mod config;
pub mod wallet;

pub use crate::config::{NetworkConfig, PharosConfig, CHAIN_ID, DEFAULT_RPC_URL, NETWORK_NAME};
pub use crate::wallet::{
    create_wallet, get_balance, is_valid_address, is_valid_private_key, sign_message,
    to_checksum_address, validate_private_key, PharosWallet,
};
