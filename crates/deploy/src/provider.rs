//! [ChainBackend] talking to a node over JSON-RPC.

use crate::{
    ChainBackend, ChainError, ChainKey,
    abi::{FundMe, MockV3Aggregator},
    artifacts::ArtifactStore,
};
use alloy_network::{Ethereum, EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes, I256, TxHash, U256};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy_rpc_types::{BlockNumberOrTag, TransactionReceipt, TransactionRequest};
use alloy_sol_types::SolConstructor;
use async_trait::async_trait;
use fundme_wallets::SigningIdentity;

/// Artifact name of the price feed mock.
pub const MOCK_ORACLE_ARTIFACT: &str = "MockV3Aggregator";
/// Artifact name of the FundMe contract.
pub const FUND_ME_ARTIFACT: &str = "FundMe";

/// A [ChainBackend] backed by an alloy provider.
#[derive(Clone)]
pub struct AlloyBackend {
    provider: DynProvider,
    artifacts: ArtifactStore,
}

impl AlloyBackend {
    /// Connects to the node at `rpc_url`.
    pub async fn connect(rpc_url: &str, artifacts: ArtifactStore) -> Result<Self, ChainError> {
        let provider = ProviderBuilder::new().connect(rpc_url).await?.erased();
        debug!(%rpc_url, "connected");
        Ok(Self::new(provider, artifacts))
    }

    /// Wraps an existing provider.
    pub fn new(provider: DynProvider, artifacts: ArtifactStore) -> Self {
        Self { provider, artifacts }
    }

    /// Returns the provider used for reads.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Returns a provider filling and signing transactions of `identity`.
    fn signer(&self, identity: &SigningIdentity) -> DynProvider {
        ProviderBuilder::new()
            .wallet(EthereumWallet::from(identity.signer().clone()))
            .connect_provider(self.provider.clone())
            .erased()
    }

    async fn deploy(
        &self,
        from: &SigningIdentity,
        artifact: &str,
        constructor_args: Vec<u8>,
    ) -> Result<Address, ChainError> {
        let mut code = self.artifacts.bytecode(artifact)?.to_vec();
        code.extend(constructor_args);
        let tx = TransactionRequest::default()
            .with_from(from.address())
            .with_deploy_code(Bytes::from(code));

        let pending = self.signer(from).send_transaction(tx).await?;
        let receipt = confirmed(pending).await?;
        let address = receipt
            .contract_address
            .ok_or(ChainError::MissingContractAddress(receipt.transaction_hash))?;
        debug!(artifact, %address, tx = %receipt.transaction_hash, "deployed");
        Ok(address)
    }
}

/// Waits for the receipt of `pending` and checks it succeeded.
async fn confirmed(
    pending: PendingTransactionBuilder<Ethereum>,
) -> Result<TransactionReceipt, ChainError> {
    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        return Err(ChainError::Reverted(receipt.transaction_hash));
    }
    Ok(receipt)
}

#[async_trait]
impl ChainBackend for AlloyBackend {
    async fn chain_key(&self) -> Result<ChainKey, ChainError> {
        let chain_id = self.provider.get_chain_id().await?;
        let genesis = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Earliest)
            .await?
            .ok_or(ChainError::MissingGenesis)?;
        Ok(ChainKey::new(chain_id, genesis.header.hash))
    }

    async fn has_code(&self, address: Address) -> Result<bool, ChainError> {
        Ok(!self.provider.get_code_at(address).await?.is_empty())
    }

    async fn deploy_mock_oracle(
        &self,
        from: &SigningIdentity,
        decimals: u8,
        initial_answer: I256,
    ) -> Result<Address, ChainError> {
        let args = MockV3Aggregator::constructorCall {
            _decimals: decimals,
            _initialAnswer: initial_answer,
        }
        .abi_encode();
        self.deploy(from, MOCK_ORACLE_ARTIFACT, args).await
    }

    async fn deploy_fund_me(
        &self,
        from: &SigningIdentity,
        price_feed: Address,
    ) -> Result<Address, ChainError> {
        let args = FundMe::constructorCall { _priceFeed: price_feed }.abi_encode();
        self.deploy(from, FUND_ME_ARTIFACT, args).await
    }

    async fn oracle_decimals(&self, oracle: Address) -> Result<u8, ChainError> {
        let oracle = MockV3Aggregator::new(oracle, self.provider.clone());
        Ok(oracle.decimals().call().await?)
    }

    async fn oracle_answer(&self, oracle: Address) -> Result<I256, ChainError> {
        let oracle = MockV3Aggregator::new(oracle, self.provider.clone());
        Ok(oracle.latestAnswer().call().await?)
    }

    async fn price(&self, fund_me: Address) -> Result<I256, ChainError> {
        let fund_me = FundMe::new(fund_me, self.provider.clone());
        Ok(fund_me.getPrice().call().await?)
    }

    async fn entrance_fee(&self, fund_me: Address) -> Result<U256, ChainError> {
        let fund_me = FundMe::new(fund_me, self.provider.clone());
        Ok(fund_me.getEntranceFee().call().await?)
    }

    async fn fund(
        &self,
        fund_me: Address,
        from: &SigningIdentity,
        value: U256,
    ) -> Result<TxHash, ChainError> {
        let fund_me = FundMe::new(fund_me, self.signer(from));
        let pending = fund_me.fund().from(from.address()).value(value).send().await?;
        Ok(confirmed(pending).await?.transaction_hash)
    }

    async fn withdraw(
        &self,
        fund_me: Address,
        from: &SigningIdentity,
    ) -> Result<TxHash, ChainError> {
        let fund_me = FundMe::new(fund_me, self.signer(from));
        let pending = fund_me.withdraw().from(from.address()).send().await?;
        Ok(confirmed(pending).await?.transaction_hash)
    }

    async fn amount_funded(&self, fund_me: Address, funder: Address) -> Result<U256, ChainError> {
        let fund_me = FundMe::new(fund_me, self.provider.clone());
        Ok(fund_me.addressToAmountFunded(funder).call().await?)
    }

    async fn owner(&self, fund_me: Address) -> Result<Address, ChainError> {
        let fund_me = FundMe::new(fund_me, self.provider.clone());
        Ok(fund_me.owner().call().await?)
    }
}
