use crate::{init_tracing, utils};
use alloy_primitives::U256;
use alloy_provider::Provider;
use fundme_config::NetworkEnvironment;
use fundme_deploy::{ChainBackend, FundMeClient, MockOracleRegistry, STARTING_PRICE};
use fundme_wallets::{IdentitySource, SigningIdentity};

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn can_fund_and_withdraw() {
    init_tracing();
    let Some(artifacts) = utils::artifacts() else { return };
    let (_anvil, mut resolver) = utils::spawn("development", artifacts).await;
    let mut registry = MockOracleRegistry::in_memory();

    let deployment = resolver.deploy_fund_me("development", &mut registry).await.unwrap();
    let account = resolver.identity(NetworkEnvironment::Local).unwrap();
    let fund_me = FundMeClient::new(resolver.backend(), deployment.address);

    let fee = fund_me.entrance_fee().await.unwrap();
    let funding = fund_me.fund(&account, Some(fee)).await.unwrap();
    assert_eq!(fund_me.amount_funded(account.address()).await.unwrap(), funding.value);

    fund_me.withdraw(&account).await.unwrap();
    assert_eq!(fund_me.amount_funded(account.address()).await.unwrap(), U256::ZERO);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn only_owner_can_withdraw() {
    init_tracing();
    let Some(artifacts) = utils::artifacts() else { return };
    let (_anvil, mut resolver) = utils::spawn("development", artifacts).await;
    let mut registry = MockOracleRegistry::in_memory();

    let deployment = resolver.deploy_fund_me("development", &mut registry).await.unwrap();
    let bad_actor = SigningIdentity::new(
        resolver.identities().local(1).unwrap().clone(),
        IdentitySource::LocalPool { index: 1 },
    );
    let fund_me = FundMeClient::new(resolver.backend(), deployment.address);
    assert_eq!(fund_me.owner().await.unwrap(), deployment.deployer);

    let funding = fund_me.fund(&bad_actor, None).await.unwrap();
    let err = fund_me.withdraw(&bad_actor).await.unwrap_err();
    assert!(err.is_revert(), "{err}");
    assert_eq!(fund_me.amount_funded(bad_actor.address()).await.unwrap(), funding.value);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn reuses_mock_on_the_same_chain() {
    init_tracing();
    let Some(artifacts) = utils::artifacts() else { return };
    let (_anvil, mut resolver) = utils::spawn("anvil", artifacts).await;
    let mut registry = MockOracleRegistry::in_memory();
    let env = NetworkEnvironment::Local;
    let deployer = resolver.identity(env).unwrap().address();

    let first = resolver.resolve_oracle(env, "anvil", &mut registry).await.unwrap();
    let provider = resolver.backend().provider().clone();
    let nonce = provider.get_transaction_count(deployer).await.unwrap();

    let second = resolver.resolve_oracle(env, "anvil", &mut registry).await.unwrap();
    assert!(first.is_mock());
    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
    assert_eq!(provider.get_transaction_count(deployer).await.unwrap(), nonce);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn mock_starts_at_two_thousand_usd() {
    init_tracing();
    let Some(artifacts) = utils::artifacts() else { return };
    let (_anvil, mut resolver) = utils::spawn("development", artifacts).await;
    let mut registry = MockOracleRegistry::in_memory();

    let deployment = resolver.deploy_fund_me("development", &mut registry).await.unwrap();
    let backend = resolver.backend();
    assert_eq!(backend.oracle_decimals(deployment.oracle.address()).await.unwrap(), 8);
    assert_eq!(backend.oracle_answer(deployment.oracle.address()).await.unwrap(), STARTING_PRICE);
    assert_eq!(deployment.formatted_price(), "2000.00000000");
}
