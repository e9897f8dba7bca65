//! Access to the chain the contracts live on.

use crate::ChainError;
use alloy_primitives::{Address, B256, I256, TxHash, U256};
use async_trait::async_trait;
use fundme_wallets::SigningIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one chain instance.
///
/// Two local nodes started with the same chain id are still different chains, the genesis hash
/// tells them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainKey {
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Hash of block 0.
    pub genesis_hash: B256,
}

impl ChainKey {
    pub const fn new(chain_id: u64, genesis_hash: B256) -> Self {
        Self { chain_id, genesis_hash }
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.chain_id, self.genesis_hash)
    }
}

/// The chain operations the harness performs.
///
/// Every method resolves once the node answered, or the transaction is mined. Transactions are
/// sent from the given identity.
#[async_trait]
pub trait ChainBackend: Send + Sync {
    /// Returns the identity of the connected chain.
    async fn chain_key(&self) -> Result<ChainKey, ChainError>;

    /// Whether there is contract code at `address`.
    async fn has_code(&self, address: Address) -> Result<bool, ChainError>;

    /// Deploys a `MockV3Aggregator` reporting `initial_answer` with `decimals` decimals.
    async fn deploy_mock_oracle(
        &self,
        from: &SigningIdentity,
        decimals: u8,
        initial_answer: I256,
    ) -> Result<Address, ChainError>;

    /// Deploys `FundMe` reading prices from `price_feed`.
    async fn deploy_fund_me(
        &self,
        from: &SigningIdentity,
        price_feed: Address,
    ) -> Result<Address, ChainError>;

    /// `MockV3Aggregator.decimals()`
    async fn oracle_decimals(&self, oracle: Address) -> Result<u8, ChainError>;

    /// `MockV3Aggregator.latestAnswer()`
    async fn oracle_answer(&self, oracle: Address) -> Result<I256, ChainError>;

    /// `FundMe.getPrice()`
    async fn price(&self, fund_me: Address) -> Result<I256, ChainError>;

    /// `FundMe.getEntranceFee()`
    async fn entrance_fee(&self, fund_me: Address) -> Result<U256, ChainError>;

    /// `FundMe.fund()` sending `value` wei.
    async fn fund(
        &self,
        fund_me: Address,
        from: &SigningIdentity,
        value: U256,
    ) -> Result<TxHash, ChainError>;

    /// `FundMe.withdraw()`
    async fn withdraw(&self, fund_me: Address, from: &SigningIdentity)
    -> Result<TxHash, ChainError>;

    /// `FundMe.addressToAmountFunded(funder)`
    async fn amount_funded(&self, fund_me: Address, funder: Address) -> Result<U256, ChainError>;

    /// `FundMe.owner()`
    async fn owner(&self, fund_me: Address) -> Result<Address, ChainError>;
}
