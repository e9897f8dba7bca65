//! # fundme-wallets
//!
//! Signing identities: the local development accounts, the configured deployer key and the
//! resolver choosing between them.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod error;
pub use error::{PrivateKeyError, WalletError};

pub mod utils;
pub use utils::{AccountGenerator, create_private_key_signer};

mod identity;
pub use identity::{IdentitySet, IdentitySource, SigningIdentity};

mod resolver;
pub use resolver::AccountResolver;

pub use alloy_signer_local::PrivateKeySigner;
