//! Configuration errors

use crate::UnresolvedEnvVarError;
use figment::providers::{Format, Toml};
use std::{collections::HashSet, error::Error, fmt};

/// The message shown when the config could not be extracted from the figment
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract fundme config:";

/// Represents a failed attempt to extract `Config` from a `Figment`
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    /// error thrown when extracting the `Config`
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    /// Wraps the figment error
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut unique_errors = Vec::with_capacity(self.error.count());
        let mut unique = HashSet::with_capacity(self.error.count());
        for err in self.error.clone() {
            let is_toml = err
                .metadata
                .as_ref()
                .map(|meta| meta.name.contains(Toml::NAME))
                .unwrap_or_default();
            let mut msg = if is_toml { "fundme.toml error: " } else { "fundme config error: " }
                .to_string();
            msg.push_str(&err.to_string());
            if !err.path.is_empty() {
                // the path holds the setting, like `["networks", "sepolia", "verify"]`
                msg.push_str(&format!(" for setting `{}`", err.path.join(".")));
            }
            if unique.insert(msg.clone()) {
                unique_errors.push(msg);
            }
        }
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in unique_errors {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// A required configuration value is missing or can't be used.
///
/// None of these are ever defaulted: a missing price feed or wallet key always aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Extract(#[from] ExtractConfigError),
    #[error("no `eth_usd_price_feed` configured for network `{network}`")]
    MissingPriceFeed { network: String },
    #[error("no wallet key configured, set `wallets.{key}` in fundme.toml")]
    MissingWalletKey { key: &'static str },
    #[error("no `rpc_url` configured for network `{network}`")]
    MissingRpcUrl { network: String },
    #[error(transparent)]
    UnresolvedEnvVar(#[from] UnresolvedEnvVarError),
}
