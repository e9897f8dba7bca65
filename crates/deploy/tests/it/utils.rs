//! Helpers for tests against a local anvil node.
//!
//! The contracts are not built by this crate: `FUNDME_ARTIFACTS` must point at a directory holding
//! `FundMe` and `MockV3Aggregator` artifacts.

use alloy_node_bindings::{Anvil, AnvilInstance};
use fundme_config::{Config, NetworkConfig};
use fundme_deploy::{AlloyBackend, ArtifactStore, DeploymentResolver};
use std::path::PathBuf;

pub const ARTIFACTS_ENV: &str = "FUNDME_ARTIFACTS";

/// Returns the artifacts directory, or `None` if it is not configured.
pub fn artifacts() -> Option<PathBuf> {
    let dir = std::env::var_os(ARTIFACTS_ENV).map(PathBuf::from);
    if dir.is_none() {
        eprintln!("{ARTIFACTS_ENV} is not set, skipping");
    }
    dir
}

/// A config deploying to `network` on the given node.
pub fn config(network: &str, anvil: &AnvilInstance, artifacts: PathBuf) -> Config {
    let mut config = Config { artifacts, ..Default::default() };
    config.networks.insert(
        network.to_string(),
        NetworkConfig { rpc_url: Some(anvil.endpoint()), ..Default::default() },
    );
    config
}

/// Spawns anvil and a resolver connected to it.
pub async fn spawn(
    network: &str,
    artifacts: PathBuf,
) -> (AnvilInstance, DeploymentResolver<AlloyBackend>) {
    let anvil = Anvil::new().spawn();
    let config = config(network, &anvil, artifacts);
    let rpc_url = config.rpc_url(network).unwrap();
    let backend =
        AlloyBackend::connect(&rpc_url, ArtifactStore::new(config.artifacts_dir())).await.unwrap();
    let resolver = DeploymentResolver::new(config, backend).unwrap();
    (anvil, resolver)
}
