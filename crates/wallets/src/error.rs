use alloy_primitives::hex::FromHexError;
use alloy_signer::k256::ecdsa;
use alloy_signer_local::LocalSignerError;
use fundme_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error("Failed to create wallet from private key. Private key is invalid hex: {0}")]
    InvalidHex(#[from] FromHexError),
    #[error(
        "Failed to create wallet from private key. Invalid private key. But env var {0} exists. Is the `${{}}` placeholder missing?"
    )]
    ExistsAsEnvVar(String),
}

/// An error raised while resolving a signing identity.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    PrivateKey(#[from] PrivateKeyError),
    #[error(transparent)]
    Local(#[from] LocalSignerError),
    #[error(transparent)]
    Ecdsa(#[from] ecdsa::Error),
    #[error("no local account at index {index}, only {len} accounts are derived")]
    NoLocalAccount { index: usize, len: usize },
}
