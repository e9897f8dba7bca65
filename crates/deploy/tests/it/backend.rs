//! [AlloyBackend](fundme_deploy::AlloyBackend) against a local anvil node, with stub bytecode in
//! place of the compiled contracts.

use crate::{init_tracing, utils};
use alloy_primitives::{Address, B256};
use alloy_provider::Provider;
use fundme_config::NetworkEnvironment;
use fundme_deploy::{ChainBackend, DeployError, MockOracleRegistry};
use std::{fs, path::Path};

/// Creation code of a contract whose runtime code is a single `STOP`.
const STUB_INIT_CODE: &str = "0x600060005360016000f3";
/// Creation code reverting right away.
const REVERTING_INIT_CODE: &str = "0x60006000fd";

fn write_stub_artifacts(dir: &Path) {
    fs::write(
        dir.join("MockV3Aggregator.json"),
        format!(r#"{{"bytecode":{{"object":"{STUB_INIT_CODE}"}}}}"#),
    )
    .unwrap();
    fs::write(dir.join("FundMe.json"), format!(r#"{{"bytecode":"{REVERTING_INIT_CODE}"}}"#))
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn identifies_the_chain() {
    init_tracing();
    let artifacts = tempfile::tempdir().unwrap();
    let (anvil, resolver) = utils::spawn("anvil", artifacts.path().to_path_buf()).await;

    let key = resolver.backend().chain_key().await.unwrap();
    assert_eq!(key.chain_id, anvil.chain_id());
    assert_ne!(key.genesis_hash, B256::ZERO);
    assert!(!resolver.backend().has_code(Address::repeat_byte(0x42)).await.unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn deploys_and_reuses_mock_code() {
    init_tracing();
    let artifacts = tempfile::tempdir().unwrap();
    write_stub_artifacts(artifacts.path());
    let (_anvil, mut resolver) = utils::spawn("anvil", artifacts.path().to_path_buf()).await;
    let mut registry = MockOracleRegistry::in_memory();
    let env = NetworkEnvironment::Local;
    let deployer = resolver.identity(env).unwrap();

    let key = resolver.backend().chain_key().await.unwrap();

    let oracle = resolver.resolve_oracle(env, "anvil", &mut registry).await.unwrap();
    assert!(oracle.is_mock());
    assert!(resolver.backend().has_code(oracle.address()).await.unwrap());
    // new blocks do not change the identity of the chain
    assert_eq!(resolver.backend().chain_key().await.unwrap(), key);
    assert_eq!(registry.get(&key), Some(oracle.address()));
    let provider = resolver.backend().provider().clone();
    assert_eq!(provider.get_transaction_count(deployer.address()).await.unwrap(), 1);

    let again = resolver.resolve_oracle(env, "anvil", &mut registry).await.unwrap();
    assert_eq!(again, oracle);
    assert_eq!(provider.get_transaction_count(deployer.address()).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn reverted_deployment_is_a_revert() {
    init_tracing();
    let artifacts = tempfile::tempdir().unwrap();
    write_stub_artifacts(artifacts.path());
    let (_anvil, mut resolver) = utils::spawn("development", artifacts.path().to_path_buf()).await;

    let err = resolver
        .deploy_fund_me("development", &mut MockOracleRegistry::in_memory())
        .await
        .unwrap_err();
    let DeployError::Deployment { contract, source } = &err else { panic!("{err}") };
    assert_eq!(*contract, "FundMe");
    assert!(source.is_revert(), "{source}");
}
