use crate::{ChainBackend, ChainError};
use alloy_primitives::{Address, I256, TxHash, U256};
use fundme_wallets::SigningIdentity;

/// A successful `fund()` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Funding {
    /// Hash of the funding transaction.
    pub tx: TxHash,
    /// Wei sent with the call.
    pub value: U256,
}

/// A deployed FundMe contract.
///
/// Errors raised by the contract, such as a withdrawal by someone other than the owner, are
/// returned as they come from the backend.
#[derive(Debug)]
pub struct FundMeClient<'a, B: ?Sized> {
    backend: &'a B,
    address: Address,
}

impl<'a, B: ChainBackend + ?Sized> FundMeClient<'a, B> {
    /// Targets the FundMe deployed at `address`.
    pub fn new(backend: &'a B, address: Address) -> Self {
        Self { backend, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Minimum amount accepted by `fund()`, in wei.
    pub async fn entrance_fee(&self) -> Result<U256, ChainError> {
        self.backend.entrance_fee(self.address).await
    }

    /// ETH/USD price the contract reads from its feed.
    pub async fn price(&self) -> Result<I256, ChainError> {
        self.backend.price(self.address).await
    }

    /// Funds the contract from `from`, sending the entrance fee if `value` is not given.
    pub async fn fund(
        &self,
        from: &SigningIdentity,
        value: Option<U256>,
    ) -> Result<Funding, ChainError> {
        let value = match value {
            Some(value) => value,
            None => self.entrance_fee().await?,
        };
        let tx = self.backend.fund(self.address, from, value).await?;
        debug!(fund_me = %self.address, %from, %value, %tx, "funded");
        Ok(Funding { tx, value })
    }

    /// Withdraws every funded amount to the owner. Reverts for any other caller.
    pub async fn withdraw(&self, from: &SigningIdentity) -> Result<TxHash, ChainError> {
        let tx = self.backend.withdraw(self.address, from).await?;
        debug!(fund_me = %self.address, %from, %tx, "withdrew");
        Ok(tx)
    }

    /// Wei funded by `funder` since the last withdrawal.
    pub async fn amount_funded(&self, funder: Address) -> Result<U256, ChainError> {
        self.backend.amount_funded(self.address, funder).await
    }

    /// The deployer of the contract.
    pub async fn owner(&self) -> Result<Address, ChainError> {
        self.backend.owner(self.address).await
    }
}
