//! Subcommands of `fundme`.

use fundme_wallets::{IdentitySource, SigningIdentity};

pub mod deploy;
pub mod fund;
pub mod withdraw;

/// Formats `account` along with where its key comes from.
pub(crate) fn account_label(account: &SigningIdentity) -> String {
    match account.source() {
        IdentitySource::LocalPool { index } => format!("{account} (dev account #{index})"),
        IdentitySource::Configured => format!("{account} (configured key)"),
    }
}
