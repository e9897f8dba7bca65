//! Classification of the active network.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Networks backed by an ephemeral simulated chain, like `anvil` started for a single run.
pub const LOCAL_NETWORKS: &[&str] = &["development", "anvil", "hardhat"];

/// Simulated chains that keep their state between runs, like the Ganache UI.
pub const LOCAL_PERSISTENT_NETWORKS: &[&str] = &["ganache-local", "ganache"];

/// Simulated chains seeded from the state of a real chain.
pub const FORKED_NETWORKS: &[&str] = &["mainnet-fork", "mainnet-fork-dev"];

/// The kind of chain a network name refers to.
///
/// Computed once per run from the network name via [`NetworkEnvironment::classify`]. Every name
/// maps to exactly one variant, unknown names are [`NetworkEnvironment::Live`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkEnvironment {
    /// Ephemeral simulated chain, nothing is persisted.
    Local,
    /// Simulated chain with on-disk deployment records.
    LocalPersistent,
    /// Simulated chain forked from a real chain.
    Forked,
    /// A real, persistent chain.
    Live,
}

impl NetworkEnvironment {
    /// All variants, in declaration order.
    pub const ALL: [Self; 4] = [Self::Local, Self::LocalPersistent, Self::Forked, Self::Live];

    /// Classifies the given network name.
    pub fn classify(network: &str) -> Self {
        let network = network.trim();
        if LOCAL_NETWORKS.contains(&network) {
            Self::Local
        } else if LOCAL_PERSISTENT_NETWORKS.contains(&network) {
            Self::LocalPersistent
        } else if FORKED_NETWORKS.contains(&network) {
            Self::Forked
        } else {
            Self::Live
        }
    }

    /// Whether transactions are sent from the node's pre-funded development accounts.
    pub const fn uses_local_pool(self) -> bool {
        matches!(self, Self::Local | Self::Forked)
    }

    /// Whether the price feed is a mock deployed on the chain itself.
    pub const fn uses_mock_oracle(self) -> bool {
        matches!(self, Self::Local | Self::LocalPersistent)
    }

    /// Whether the chain outlives the current process.
    pub const fn is_persistent(self) -> bool {
        matches!(self, Self::LocalPersistent | Self::Live)
    }

    /// Whether the chain is run locally.
    pub const fn is_simulated(self) -> bool {
        !matches!(self, Self::Live)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::LocalPersistent => "local-persistent",
            Self::Forked => "forked",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for NetworkEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| format!("unknown network environment: {s}"))
    }
}
