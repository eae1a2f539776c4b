use config::{Config, File};
use core_logic::ConfigError;
use serde::Deserialize;
use std::path::Path;

pub const CHAIN_ID: u64 = 688688;
pub const NETWORK_NAME: &str = "pharos-testnet";
pub const DEFAULT_RPC_URL: &str = "https://testnet.dplabs-internal.com";

/// Host application config. Only `api.zenith.rpc_url` is read here.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PharosConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub zenith: Option<ZenithConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ZenithConfig {
    #[serde(default)]
    pub rpc_url: Option<String>,
}

impl PharosConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string(),
            });
        }

        let settings = Config::builder()
            .add_source(File::with_name(path))
            .build()
            .map_err(|e| ConfigError::LoadFailed {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::LoadFailed {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Configured RPC URL, if any non-blank one is set.
    pub fn rpc_url(&self) -> Option<&str> {
        self.api
            .zenith
            .as_ref()
            .and_then(|z| z.rpc_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Resolved network settings, loaded once by the host and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub name: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: CHAIN_ID,
            name: NETWORK_NAME.to_string(),
        }
    }
}

impl NetworkConfig {
    pub fn from_config(config: &PharosConfig) -> Self {
        match config.rpc_url() {
            Some(url) => Self::default().with_rpc_url(url),
            None => Self::default(),
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: &str) -> Self {
        self.rpc_url = rpc_url.to_string();
        self
    }
}
