use crate::error::{PrivateKeyError, WalletError};
use alloy_primitives::{B256, hex::FromHex};
use alloy_signer_local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English};

/// The derivation path of the local development accounts, the account index is appended.
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0/";

fn ensure_pk_not_env(pk: &str) -> Result<(), PrivateKeyError> {
    if !pk.starts_with("0x") && std::env::var(pk).is_ok() {
        return Err(PrivateKeyError::ExistsAsEnvVar(pk.to_string()));
    }
    Ok(())
}

/// Validates and sanitizes the given private key, returning a local signer.
pub fn create_private_key_signer(private_key_str: &str) -> Result<PrivateKeySigner, WalletError> {
    let private_key_str = private_key_str.trim();
    let private_key = match B256::from_hex(private_key_str) {
        Ok(private_key) => private_key,
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            return Err(PrivateKeyError::InvalidHex(err).into());
        }
    };
    match PrivateKeySigner::from_bytes(&private_key) {
        Ok(signer) => Ok(signer),
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            Err(err.into())
        }
    }
}

/// Generates the accounts of a mnemonic, like a development node does for its genesis.
#[derive(Clone, Debug)]
pub struct AccountGenerator {
    phrase: String,
    amount: usize,
    derivation_path: Option<String>,
}

impl AccountGenerator {
    /// Derives `amount` accounts from `phrase`.
    pub fn new(phrase: impl Into<String>, amount: usize) -> Self {
        Self { phrase: phrase.into(), amount, derivation_path: None }
    }

    /// Overrides the derivation path prefix.
    #[must_use]
    pub fn derivation_path(mut self, derivation_path: impl Into<String>) -> Self {
        let mut derivation_path = derivation_path.into();
        if !derivation_path.ends_with('/') {
            derivation_path.push('/');
        }
        self.derivation_path = Some(derivation_path);
        self
    }

    fn get_derivation_path(&self) -> &str {
        self.derivation_path.as_deref().unwrap_or(DEFAULT_DERIVATION_PATH)
    }

    /// Derives the signers, in derivation index order.
    pub fn generate(&self) -> Result<Vec<PrivateKeySigner>, WalletError> {
        let phrase = self.phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        let builder = MnemonicBuilder::<English>::default().phrase(phrase);
        let derivation_path = self.get_derivation_path();

        let mut signers = Vec::with_capacity(self.amount);
        for idx in 0..self.amount {
            let signer =
                builder.clone().derivation_path(format!("{derivation_path}{idx}"))?.build()?;
            signers.push(signer);
        }
        Ok(signers)
    }
}
