//! # fundme-deploy
//!
//! Resolves the price feed of a network, deploying a mock on simulated chains, and deploys
//! FundMe against it.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod abi;

pub mod artifacts;
pub use artifacts::{ArtifactError, ArtifactStore};

mod backend;
pub use backend::{ChainBackend, ChainKey};

mod error;
pub use error::{ChainError, DeployError};

mod fund_me;
pub use fund_me::{FundMeClient, Funding};

pub mod provider;
pub use provider::AlloyBackend;

mod registry;
pub use registry::{MockOracleRegistry, RegistryError};

mod resolver;
pub use resolver::{
    DECIMALS, Deployment, DeploymentResolver, OracleReference, STARTING_PRICE,
    VerificationRequest,
};

#[cfg(test)]
mod memory;
