//! Records of mock price feeds deployed on simulated chains.

use crate::ChainKey;
use alloy_primitives::{Address, B256};
use fundme_config::{Config, NetworkEnvironment};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// An error raised while reading or writing the on-disk records.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to access deployment records at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse deployment records at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One entry of the on-disk record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MockRecord {
    chain_id: u64,
    genesis_hash: B256,
    mock_oracle: Address,
}

/// Which mock price feed, if any, has been deployed on each chain.
///
/// Entries are keyed by [ChainKey], so a restarted local node never sees the mock of its
/// predecessor. A registry opened from a file writes every change back to it.
#[derive(Debug, Default)]
pub struct MockOracleRegistry {
    entries: BTreeMap<ChainKey, Address>,
    path: Option<PathBuf>,
}

impl MockOracleRegistry {
    /// Creates an empty registry living only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the registry stored at `path`, a missing file is an empty registry.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => {
                let records: Vec<MockRecord> = serde_json::from_str(&content)
                    .map_err(|source| RegistryError::Json { path: path.clone(), source })?;
                records
                    .into_iter()
                    .map(|r| (ChainKey::new(r.chain_id, r.genesis_hash), r.mock_oracle))
                    .collect()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(RegistryError::Io { path, source }),
        };
        trace!(path = %path.display(), entries = entries.len(), "opened mock registry");
        Ok(Self { entries, path: Some(path) })
    }

    /// Returns the registry suited to `env`.
    ///
    /// Only persistent local chains keep their records on disk, under
    /// [Config::deployments_map]. The other environments get an in-memory registry, so on a
    /// `Local` network each run deploys its own mock, even when several runs share one
    /// long-running node. Live and forked networks never deploy mocks.
    pub fn for_environment(
        env: NetworkEnvironment,
        config: &Config,
    ) -> Result<Self, RegistryError> {
        if env == NetworkEnvironment::LocalPersistent {
            Self::open(config.deployments_map())
        } else {
            Ok(Self::in_memory())
        }
    }

    /// Returns the mock recorded for `chain`.
    pub fn get(&self, chain: &ChainKey) -> Option<Address> {
        self.entries.get(chain).copied()
    }

    /// Records `address` as the mock of `chain`.
    pub fn record(&mut self, chain: ChainKey, address: Address) -> Result<(), RegistryError> {
        self.entries.insert(chain, address);
        self.save()
    }

    /// Drops the record of `chain`, returning the address it held.
    pub fn forget(&mut self, chain: &ChainKey) -> Result<Option<Address>, RegistryError> {
        let removed = self.entries.remove(chain);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    /// Number of chains with a recorded mock.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether changes are written to disk.
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn save(&self) -> Result<(), RegistryError> {
        let Some(path) = &self.path else { return Ok(()) };
        let io_err = |source| RegistryError::Io { path: path.clone(), source };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let records = self
            .entries
            .iter()
            .map(|(key, &mock_oracle)| MockRecord {
                chain_id: key.chain_id,
                genesis_hash: key.genesis_hash,
                mock_oracle,
            })
            .collect::<Vec<_>>();
        let content = serde_json::to_string_pretty(&records)
            .map_err(|source| RegistryError::Json { path: path.clone(), source })?;
        fs::write(path, content).map_err(io_err)?;
        trace!(path = %path.display(), "saved mock registry");
        Ok(())
    }
}
