use crate::{artifacts::ArtifactError, registry::RegistryError};
use alloy_json_rpc::ErrorPayload;
use alloy_primitives::TxHash;
use alloy_provider::PendingTransactionError;
use alloy_transport::TransportError;
use fundme_config::ConfigError;
use fundme_wallets::WalletError;

/// An error raised while talking to the chain.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("receipt of transaction {0} has no contract address")]
    MissingContractAddress(TxHash),
    #[error("the node returned no genesis block")]
    MissingGenesis,
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// JSON-RPC error code of a call whose execution failed.
const EXECUTION_ERROR_CODE: i64 = 3;

impl ChainError {
    /// Whether the transaction reverted, as opposed to being rejected for another reason or
    /// failing to be delivered.
    ///
    /// This is how a contract refusing an unauthorized caller surfaces, either as a failed
    /// receipt or as the node's answer to gas estimation.
    pub fn is_revert(&self) -> bool {
        match self {
            Self::Reverted(_) => true,
            Self::Transport(err) | Self::Contract(alloy_contract::Error::TransportError(err)) => {
                err.as_error_resp().is_some_and(is_execution_revert)
            }
            _ => false,
        }
    }
}

fn is_execution_revert(error: &ErrorPayload) -> bool {
    let ErrorPayload { code, message, .. } = error;
    *code == EXECUTION_ERROR_CODE || message.contains("revert")
}

/// An error raised while resolving a price feed or deploying FundMe.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("failed to deploy {contract}: {source}")]
    Deployment {
        contract: &'static str,
        #[source]
        source: ChainError,
    },
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl DeployError {
    pub(crate) fn deployment(contract: &'static str) -> impl FnOnce(ChainError) -> Self {
        move |source| Self::Deployment { contract, source }
    }

    /// Whether the run failed on missing or unusable configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Wallet(WalletError::Config(_)))
    }
}
