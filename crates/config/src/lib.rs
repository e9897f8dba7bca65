//! # fundme-config
//!
//! Project configuration for the FundMe deployment harness.
//!
//! The configuration is read from a `fundme.toml` file in the project root and can be overridden
//! with `FUNDME_` prefixed environment variables, using `__` to address nested keys:
//!
//! ```toml
//! default_network = "development"
//!
//! [networks.sepolia]
//! rpc_url = "${SEPOLIA_RPC_URL}"
//! eth_usd_price_feed = "0x694AA1769357215DE4FAC081bf1f309aDC325306"
//! verify = true
//!
//! [wallets]
//! from_key = "${PRIVATE_KEY}"
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::Address;
use figment::{
    Figment, Provider,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub mod error;
pub use error::{ConfigError, ExtractConfigError};

mod network;
pub use network::{FORKED_NETWORKS, LOCAL_NETWORKS, LOCAL_PERSISTENT_NETWORKS, NetworkEnvironment};

mod resolve;
pub use resolve::{RE_PLACEHOLDER, UnresolvedEnvVarError, interpolate};

pub use figment;

/// Default RPC endpoint of a locally running node.
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// Default mnemonic of the local development accounts, shared by anvil and hardhat.
pub const DEFAULT_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// The project configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The project root, where `fundme.toml` lives.
    #[serde(skip)]
    pub root: PathBuf,
    /// The network used when none is selected explicitly.
    pub default_network: String,
    /// Directory holding the compiled contract artifacts.
    pub artifacts: PathBuf,
    /// Directory holding deployment records of persistent local chains.
    pub deployments: PathBuf,
    /// The local development accounts.
    pub local: LocalAccountsConfig,
    /// Per network settings, keyed by network name.
    pub networks: BTreeMap<String, NetworkConfig>,
    /// Wallet secrets.
    pub wallets: WalletsConfig,
}

/// Settings of a single network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// The RPC endpoint, may contain `${VAR}` placeholders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    /// Address of the ETH/USD price feed on this network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth_usd_price_feed: Option<Address>,
    /// Whether deployed contracts should be submitted for source verification.
    pub verify: bool,
}

/// Wallet secrets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletsConfig {
    /// Private key used on networks without pre-funded development accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_key: Option<String>,
}

/// Derivation settings of the local development accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalAccountsConfig {
    pub mnemonic: String,
    /// How many accounts to derive.
    pub accounts: u32,
}

impl Default for LocalAccountsConfig {
    fn default() -> Self {
        Self { mnemonic: DEFAULT_MNEMONIC.to_string(), accounts: 10 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            default_network: "development".to_string(),
            artifacts: PathBuf::from("out"),
            deployments: PathBuf::from("deployments"),
            local: LocalAccountsConfig::default(),
            networks: BTreeMap::new(),
            wallets: WalletsConfig::default(),
        }
    }
}

impl Config {
    /// The default name of the config file
    pub const FILE_NAME: &'static str = "fundme.toml";

    /// The name of the wallet key used for non-local networks
    pub const WALLET_KEY_NAME: &'static str = "from_key";

    /// Environment variables read for configuration overrides start with this prefix.
    pub const ENV_PREFIX: &'static str = "FUNDME_";

    /// Loads the config of the project in the current directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::load_with_root(".")
    }

    /// Loads the config of the project at `root`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        let root = root.as_ref();
        let mut config = Self::try_from(Self::figment_with_root(root))?;
        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Attempts to extract a `Config` from `provider`.
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        trace!("load config with provider: {:?}", figment.metadata().collect::<Vec<_>>());
        figment.extract::<Self>().map_err(ExtractConfigError::new)
    }

    /// Returns the [Figment] of the project in the current directory.
    pub fn figment() -> Figment {
        Self::figment_with_root(".")
    }

    /// Returns the [Figment] of the project at `root`.
    ///
    /// Merges, by increasing priority: the defaults, the `fundme.toml` file (or the file named by
    /// `FUNDME_CONFIG`) and `FUNDME_` prefixed environment variables.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let root = root.as_ref();
        let file = std::env::var("FUNDME_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| root.join(Self::FILE_NAME));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG", "NETWORK"]).split("__"))
    }

    /// Returns the settings of `network`, or the defaults if it has none.
    pub fn network(&self, network: &str) -> NetworkConfig {
        self.networks.get(network).cloned().unwrap_or_default()
    }

    /// Whether contracts deployed to `network` should be verified; `false` when unset.
    pub fn verify(&self, network: &str) -> bool {
        self.networks.get(network).is_some_and(|n| n.verify)
    }

    /// Returns the configured price feed of `network`.
    pub fn price_feed(&self, network: &str) -> Result<Address, ConfigError> {
        self.networks
            .get(network)
            .and_then(|n| n.eth_usd_price_feed)
            .ok_or_else(|| ConfigError::MissingPriceFeed { network: network.to_string() })
    }

    /// Returns the resolved wallet key used on non-local networks.
    pub fn wallet_key(&self) -> Result<String, ConfigError> {
        let key = self
            .wallets
            .from_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingWalletKey { key: Self::WALLET_KEY_NAME })?;
        Ok(interpolate(key)?)
    }

    /// Returns the resolved RPC endpoint of `network`.
    ///
    /// Simulated networks fall back to [LOCAL_RPC_URL].
    pub fn rpc_url(&self, network: &str) -> Result<String, ConfigError> {
        match self.networks.get(network).and_then(|n| n.rpc_url.as_deref()) {
            Some(url) => Ok(interpolate(url)?),
            None if NetworkEnvironment::classify(network).is_simulated() => {
                Ok(LOCAL_RPC_URL.to_string())
            }
            None => Err(ConfigError::MissingRpcUrl { network: network.to_string() }),
        }
    }

    /// Returns the artifacts directory, relative to the project root.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.join(&self.artifacts)
    }

    /// Returns the file recording mock deployments on persistent local chains.
    pub fn deployments_map(&self) -> PathBuf {
        self.root.join(&self.deployments).join("map.json")
    }
}
