//! # Pharos Wallet Helpers
//!
//! Key and address validation plus the few wallet operations the automation
//! needs: construction, balance lookup and message signing.
//!
//! Keys are validated before they ever reach the signer so that callers get a
//! specific diagnostic (empty, wrong length, not hex) instead of a generic
//! parse failure.

use crate::config::NetworkConfig;
use core_logic::WalletError;
use ethers::prelude::*;
use ethers::utils::{format_ether, to_checksum};
use std::fmt;
use tracing::debug;

/// Signer bound to the Pharos chain id, with an optional JSON-RPC provider.
#[derive(Clone)]
pub struct PharosWallet {
    signer: LocalWallet,
    provider: Option<Provider<Http>>,
}

impl PharosWallet {
    /// Signer without a provider. Can sign, cannot query the chain.
    pub fn offline(private_key: &str, network: &NetworkConfig) -> Result<Self, WalletError> {
        Ok(Self {
            signer: build_signer(private_key, network.chain_id)?,
            provider: None,
        })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn address_checksummed(&self) -> String {
        to_checksum(&self.signer.address(), None)
    }

    pub fn chain_id(&self) -> u64 {
        self.signer.chain_id()
    }

    pub fn provider(&self) -> Option<&Provider<Http>> {
        self.provider.as_ref()
    }
}

impl fmt::Debug for PharosWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PharosWallet")
            .field("address", &self.address_checksummed())
            .field("chain_id", &self.chain_id())
            .field("private_key", &"***REDACTED***")
            .finish()
    }
}

/// EIP-55 form of `address`.
///
/// Accepts 40 hex digits with or without `0x`. Mixed-case input must already
/// carry a valid checksum.
pub fn to_checksum_address(address: &str) -> Result<String, WalletError> {
    let invalid = || WalletError::InvalidAddress {
        address: address.to_string(),
    };

    let body = address.strip_prefix("0x").unwrap_or(address);
    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let bytes = hex::decode(body).map_err(|_| invalid())?;
    let checksummed = to_checksum(&Address::from_slice(&bytes), None);

    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower && checksummed[2..] != *body {
        return Err(invalid());
    }

    Ok(checksummed)
}

pub fn is_valid_address(address: &str) -> bool {
    to_checksum_address(address).is_ok()
}

/// Normalizes a private key to `0x` + 64 hex digits.
pub fn validate_private_key(private_key: &str) -> Result<String, WalletError> {
    let trimmed = private_key.trim();
    if trimmed.is_empty() {
        return Err(WalletError::EmptyKey);
    }

    let normalized = if trimmed.starts_with("0x") {
        trimmed.to_string()
    } else {
        format!("0x{}", trimmed)
    };

    if normalized.len() != 66 {
        return Err(WalletError::InvalidKeyLength {
            length: normalized.len(),
        });
    }

    if !normalized[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WalletError::InvalidKeyFormat);
    }

    Ok(normalized)
}

pub fn is_valid_private_key(private_key: &str) -> bool {
    validate_private_key(private_key).is_ok()
}

fn build_signer(private_key: &str, chain_id: u64) -> Result<LocalWallet, WalletError> {
    let creation = |reason: String| WalletError::Creation { reason };

    let key = validate_private_key(private_key).map_err(|e| creation(e.to_string()))?;
    let signer: LocalWallet = key.parse().map_err(|e| creation(format!("{}", e)))?;

    Ok(signer.with_chain_id(chain_id))
}

/// Wallet connected to the network's RPC endpoint.
pub fn create_wallet(private_key: &str, network: &NetworkConfig) -> Result<PharosWallet, WalletError> {
    let signer = build_signer(private_key, network.chain_id)?;
    let provider =
        Provider::<Http>::try_from(network.rpc_url.as_str()).map_err(|e| WalletError::Creation {
            reason: format!("invalid RPC URL '{}': {}", network.rpc_url, e),
        })?;

    debug!(
        "Created wallet {} on {} ({})",
        to_checksum(&signer.address(), None),
        network.name,
        network.chain_id
    );

    Ok(PharosWallet {
        signer,
        provider: Some(provider),
    })
}

/// Native balance in ether units, as a decimal string.
pub async fn get_balance(wallet: &PharosWallet) -> Result<String, WalletError> {
    let provider = wallet.provider().ok_or_else(|| WalletError::Balance {
        reason: "wallet has no network client".to_string(),
    })?;

    let balance = provider
        .get_balance(wallet.address(), None)
        .await
        .map_err(|e| WalletError::Balance {
            reason: e.to_string(),
        })?;

    Ok(format_ether(balance))
}

/// EIP-191 personal signature, `0x`-prefixed hex.
pub async fn sign_message(wallet: &PharosWallet, message: &str) -> Result<String, WalletError> {
    if message.is_empty() {
        return Err(WalletError::Signing {
            reason: "message is empty".to_string(),
        });
    }

    let signature = wallet
        .signer
        .sign_message(message)
        .await
        .map_err(|e| WalletError::Signing {
            reason: e.to_string(),
        })?;

    Ok(format!("0x{}", hex::encode(signature.to_vec())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_logic::{with_retry, RetryPolicy};

    // Well-known development key (first Hardhat / Anvil account).
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_validate_private_key_prefixes() {
        let key = "f".repeat(64);
        assert_eq!(validate_private_key(&key).unwrap(), format!("0x{}", key));

        let prefixed = format!("0x{}", "f".repeat(64));
        assert_eq!(validate_private_key(&prefixed).unwrap(), prefixed);
        assert_eq!(validate_private_key(&format!("  {}\n", prefixed)).unwrap(), prefixed);
    }

    #[test]
    fn test_validate_private_key_diagnostics() {
        assert_eq!(validate_private_key("   "), Err(WalletError::EmptyKey));
        assert_eq!(
            validate_private_key("abc"),
            Err(WalletError::InvalidKeyLength { length: 5 })
        );
        assert_eq!(
            validate_private_key(&format!("0x{}", "g".repeat(64))),
            Err(WalletError::InvalidKeyFormat)
        );
        assert!(!is_valid_private_key("abc"));
        assert!(is_valid_private_key(DEV_KEY));
    }

    #[test]
    fn test_checksum_address() {
        let lower = DEV_ADDRESS.to_lowercase();
        assert_eq!(to_checksum_address(&lower).unwrap(), DEV_ADDRESS);
        assert_eq!(to_checksum_address(&lower[2..]).unwrap(), DEV_ADDRESS);
        assert_eq!(to_checksum_address(DEV_ADDRESS).unwrap(), DEV_ADDRESS);
    }

    #[test]
    fn test_is_valid_address() {
        assert!(is_valid_address(DEV_ADDRESS));
        assert!(is_valid_address(&DEV_ADDRESS.to_uppercase().replace("0X", "0x")));
        assert!(!is_valid_address(&DEV_ADDRESS[..41]));
        assert!(!is_valid_address("0xzz9Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
        // Mixed case with a broken checksum.
        assert!(!is_valid_address("0xF39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_create_wallet_derives_address() {
        let wallet = create_wallet(DEV_KEY, &NetworkConfig::default()).unwrap();

        assert_eq!(wallet.address_checksummed(), DEV_ADDRESS);
        assert_eq!(wallet.chain_id(), 688688);
        assert!(wallet.provider().is_some());
        assert!(!format!("{:?}", wallet).contains(DEV_KEY));
    }

    #[test]
    fn test_create_wallet_errors() {
        let network = NetworkConfig::default();

        let err = create_wallet("abc", &network).unwrap_err();
        assert!(matches!(err, WalletError::Creation { .. }));

        // Zero is not a valid secp256k1 scalar.
        let err = create_wallet(&"0".repeat(64), &network).unwrap_err();
        assert!(matches!(err, WalletError::Creation { .. }));

        let bad_rpc = NetworkConfig::default().with_rpc_url("not a url");
        let err = create_wallet(DEV_KEY, &bad_rpc).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create wallet"));
    }

    #[tokio::test]
    async fn test_sign_message_recovers_signer() {
        let wallet = PharosWallet::offline(DEV_KEY, &NetworkConfig::default()).unwrap();

        let signature = sign_message(&wallet, "hello pharos").await.unwrap();
        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 2 + 65 * 2);

        let parsed: Signature = signature.parse().unwrap();
        assert_eq!(parsed.recover("hello pharos").unwrap(), wallet.address());
    }

    #[tokio::test]
    async fn test_sign_empty_message_rejected() {
        let wallet = PharosWallet::offline(DEV_KEY, &NetworkConfig::default()).unwrap();
        let err = sign_message(&wallet, "").await.unwrap_err();
        assert!(matches!(err, WalletError::Signing { .. }));
    }

    #[tokio::test]
    async fn test_balance_requires_provider() {
        let wallet = PharosWallet::offline(DEV_KEY, &NetworkConfig::default()).unwrap();
        let err = get_balance(&wallet).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to get balance: wallet has no network client"
        );
    }

    #[tokio::test]
    async fn test_balance_unreachable_rpc_after_retries() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let network = NetworkConfig::default().with_rpc_url(&format!("http://{}", addr));
        let wallet = create_wallet(DEV_KEY, &network).unwrap();

        let result = with_retry(RetryPolicy::new(2, 10).without_jitter(), "wallet-0", || {
            get_balance(&wallet)
        })
        .await;

        assert!(matches!(result, Err(WalletError::Balance { .. })));
    }
}
