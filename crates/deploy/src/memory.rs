//! In-memory [ChainBackend] used by unit tests.

use crate::{ChainBackend, ChainError, ChainKey};
use alloy_primitives::{Address, B256, I256, TxHash, U256};
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use fundme_wallets::SigningIdentity;
use std::{collections::BTreeMap, sync::Mutex};

type FundMeState<'a> = (Address, Address, &'a mut BTreeMap<Address, U256>);

enum Contract {
    Oracle { decimals: u8, answer: I256 },
    FundMe { owner: Address, price_feed: Address, funded: BTreeMap<Address, U256> },
}

#[derive(Default)]
struct State {
    genesis: u64,
    txs: u64,
    deployments: Vec<Address>,
    nonces: BTreeMap<Address, u64>,
    contracts: BTreeMap<Address, Contract>,
}

impl State {
    fn next_tx(&mut self) -> TxHash {
        self.txs += 1;
        B256::left_padding_from(&self.txs.to_be_bytes())
    }

    fn deploy(&mut self, from: Address, contract: Contract) -> Address {
        let nonce = self.nonces.entry(from).or_default();
        let address = from.create(*nonce);
        *nonce += 1;
        self.next_tx();
        self.deployments.push(address);
        self.contracts.insert(address, contract);
        address
    }

    fn oracle(&self, address: Address) -> Result<(u8, I256), ChainError> {
        match self.contracts.get(&address) {
            Some(Contract::Oracle { decimals, answer }) => Ok((*decimals, *answer)),
            _ => Err(no_contract(address)),
        }
    }

    fn fund_me(&mut self, address: Address) -> Result<FundMeState<'_>, ChainError> {
        match self.contracts.get_mut(&address) {
            Some(Contract::FundMe { owner, price_feed, funded }) => {
                Ok((*owner, *price_feed, funded))
            }
            _ => Err(no_contract(address)),
        }
    }

    /// `50 USD` in wei at the current oracle answer, as the contract computes it.
    fn entrance_fee(&mut self, fund_me: Address) -> Result<U256, ChainError> {
        let (_, price_feed, _) = self.fund_me(fund_me)?;
        let (_, answer) = self.oracle(price_feed)?;
        let precision = U256::from(1_000_000_000_000_000_000u64);
        let minimum_usd = U256::from(50) * precision;
        let price = answer.into_raw() * U256::from(10_000_000_000u64);
        Ok(minimum_usd * precision / price)
    }
}

fn no_contract(address: Address) -> ChainError {
    TransportErrorKind::custom_str(&format!("no contract at {address}")).into()
}

/// A chain living in memory.
///
/// Mirrors the observable behavior of the deployed contracts: `withdraw` reverts for anyone
/// but the owner and `fund` reverts below the entrance fee.
#[derive(Default)]
pub(crate) struct MemoryBackend {
    state: Mutex<State>,
    fail_deployments: bool,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A backend rejecting every deployment.
    pub(crate) fn failing() -> Self {
        Self { fail_deployments: true, ..Default::default() }
    }

    /// Number of contracts deployed.
    pub(crate) fn deployments(&self) -> usize {
        self.state.lock().unwrap().deployments.len()
    }

    /// Number of transactions sent.
    pub(crate) fn transactions(&self) -> u64 {
        self.state.lock().unwrap().txs
    }

    /// A backend whose chain has a different genesis than [MemoryBackend::new].
    pub(crate) fn with_genesis(genesis: u64) -> Self {
        let backend = Self::new();
        backend.state.lock().unwrap().genesis = genesis;
        backend
    }

    /// Wipes the chain state, keeping the genesis.
    ///
    /// Like restarting a dev node with the same settings.
    pub(crate) fn restart(&self) {
        let mut state = self.state.lock().unwrap();
        state.contracts.clear();
        state.nonces.clear();
    }

    /// Sets the answer of the oracle at `oracle`.
    pub(crate) fn update_answer(&self, oracle: Address, answer: I256) {
        let mut state = self.state.lock().unwrap();
        if let Some(Contract::Oracle { answer: current, .. }) = state.contracts.get_mut(&oracle) {
            *current = answer;
        }
    }

    fn deploy(&self, from: &SigningIdentity, contract: Contract) -> Result<Address, ChainError> {
        let mut state = self.state.lock().unwrap();
        if self.fail_deployments {
            return Err(ChainError::Reverted(state.next_tx()));
        }
        Ok(state.deploy(from.address(), contract))
    }
}

#[async_trait]
impl ChainBackend for MemoryBackend {
    async fn chain_key(&self) -> Result<ChainKey, ChainError> {
        let genesis = self.state.lock().unwrap().genesis;
        Ok(ChainKey::new(31337, B256::left_padding_from(&genesis.to_be_bytes())))
    }

    async fn has_code(&self, address: Address) -> Result<bool, ChainError> {
        Ok(self.state.lock().unwrap().contracts.contains_key(&address))
    }

    async fn deploy_mock_oracle(
        &self,
        from: &SigningIdentity,
        decimals: u8,
        initial_answer: I256,
    ) -> Result<Address, ChainError> {
        self.deploy(from, Contract::Oracle { decimals, answer: initial_answer })
    }

    async fn deploy_fund_me(
        &self,
        from: &SigningIdentity,
        price_feed: Address,
    ) -> Result<Address, ChainError> {
        let owner = from.address();
        self.deploy(from, Contract::FundMe { owner, price_feed, funded: BTreeMap::new() })
    }

    async fn oracle_decimals(&self, oracle: Address) -> Result<u8, ChainError> {
        Ok(self.state.lock().unwrap().oracle(oracle)?.0)
    }

    async fn oracle_answer(&self, oracle: Address) -> Result<I256, ChainError> {
        Ok(self.state.lock().unwrap().oracle(oracle)?.1)
    }

    async fn price(&self, fund_me: Address) -> Result<I256, ChainError> {
        let mut state = self.state.lock().unwrap();
        let (_, price_feed, _) = state.fund_me(fund_me)?;
        Ok(state.oracle(price_feed)?.1)
    }

    async fn entrance_fee(&self, fund_me: Address) -> Result<U256, ChainError> {
        self.state.lock().unwrap().entrance_fee(fund_me)
    }

    async fn fund(
        &self,
        fund_me: Address,
        from: &SigningIdentity,
        value: U256,
    ) -> Result<TxHash, ChainError> {
        let mut state = self.state.lock().unwrap();
        let fee = state.entrance_fee(fund_me)?;
        let tx = state.next_tx();
        if value < fee {
            return Err(ChainError::Reverted(tx));
        }
        let (_, _, funded) = state.fund_me(fund_me)?;
        *funded.entry(from.address()).or_default() += value;
        Ok(tx)
    }

    async fn withdraw(
        &self,
        fund_me: Address,
        from: &SigningIdentity,
    ) -> Result<TxHash, ChainError> {
        let mut state = self.state.lock().unwrap();
        let tx = state.next_tx();
        let (owner, _, funded) = state.fund_me(fund_me)?;
        if from.address() != owner {
            return Err(ChainError::Reverted(tx));
        }
        funded.values_mut().for_each(|amount| *amount = U256::ZERO);
        Ok(tx)
    }

    async fn amount_funded(&self, fund_me: Address, funder: Address) -> Result<U256, ChainError> {
        let mut state = self.state.lock().unwrap();
        let (_, _, funded) = state.fund_me(fund_me)?;
        Ok(funded.get(&funder).copied().unwrap_or_default())
    }

    async fn owner(&self, fund_me: Address) -> Result<Address, ChainError> {
        let mut state = self.state.lock().unwrap();
        let (owner, _, _) = state.fund_me(fund_me)?;
        Ok(owner)
    }
}
