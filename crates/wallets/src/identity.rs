use crate::{WalletError, utils::AccountGenerator};
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use fundme_config::LocalAccountsConfig;
use std::fmt;

/// Where a [SigningIdentity] comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentitySource {
    /// A pre-funded development account of the local chain.
    LocalPool { index: usize },
    /// The private key configured under `wallets.from_key`.
    Configured,
}

/// An account able to sign transactions.
#[derive(Clone, Debug)]
pub struct SigningIdentity {
    signer: PrivateKeySigner,
    source: IdentitySource,
}

impl SigningIdentity {
    /// Pairs `signer` with where it came from.
    pub fn new(signer: PrivateKeySigner, source: IdentitySource) -> Self {
        Self { signer, source }
    }

    /// Address of the account.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The key signing transactions of this account.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    pub fn source(&self) -> IdentitySource {
        self.source
    }

    pub fn into_signer(self) -> PrivateKeySigner {
        self.signer
    }
}

impl fmt::Display for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.address().fmt(f)
    }
}

/// The accounts known to the process.
///
/// Starts with the local development pool, keys added later are appended. Every address is
/// present at most once.
#[derive(Clone, Debug, Default)]
pub struct IdentitySet {
    signers: Vec<PrivateKeySigner>,
    local: usize,
}

impl IdentitySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding the given development accounts.
    pub fn with_local_pool(pool: impl IntoIterator<Item = PrivateKeySigner>) -> Self {
        let mut set = Self::new();
        for signer in pool {
            set.add(signer);
        }
        set.local = set.signers.len();
        set
    }

    /// Derives the development accounts from the configured mnemonic.
    pub fn from_config(config: &LocalAccountsConfig) -> Result<Self, WalletError> {
        let pool = AccountGenerator::new(&config.mnemonic, config.accounts as usize).generate()?;
        Ok(Self::with_local_pool(pool))
    }

    /// Returns the development account at `index`.
    pub fn local(&self, index: usize) -> Result<&PrivateKeySigner, WalletError> {
        self.signers[..self.local]
            .get(index)
            .ok_or(WalletError::NoLocalAccount { index, len: self.local })
    }

    /// Number of development accounts.
    pub fn local_len(&self) -> usize {
        self.local
    }

    /// Adds `signer` to the set, returning the stored signer.
    ///
    /// Adding an address that is already present is a no-op.
    pub fn add(&mut self, signer: PrivateKeySigner) -> &PrivateKeySigner {
        let address = signer.address();
        let idx = match self.position(address) {
            Some(idx) => idx,
            None => {
                debug!(%address, "adding account");
                self.signers.push(signer);
                self.signers.len() - 1
            }
        };
        &self.signers[idx]
    }

    /// Returns the signer of `address`, if known.
    pub fn get(&self, address: Address) -> Option<&PrivateKeySigner> {
        self.position(address).map(|idx| &self.signers[idx])
    }

    pub fn contains(&self, address: Address) -> bool {
        self.position(address).is_some()
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrivateKeySigner> {
        self.signers.iter()
    }

    /// Addresses in insertion order.
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        self.signers.iter().map(|signer| signer.address())
    }

    fn position(&self, address: Address) -> Option<usize> {
        self.signers.iter().position(|signer| signer.address() == address)
    }
}
