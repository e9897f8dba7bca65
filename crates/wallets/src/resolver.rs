use crate::{IdentitySet, IdentitySource, SigningIdentity, WalletError, create_private_key_signer};
use fundme_config::{Config, NetworkEnvironment};

/// Picks the account that sends transactions on a network.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccountResolver;

impl AccountResolver {
    /// Index of the development account used on local and forked chains.
    pub const LOCAL_INDEX: usize = 0;

    /// Resolves the signing identity for `env`.
    ///
    /// Local and forked chains use the first pre-funded development account. Every other network
    /// uses the key configured under `wallets.from_key`, which is added to `identities`.
    pub fn resolve(
        env: NetworkEnvironment,
        config: &Config,
        identities: &mut IdentitySet,
    ) -> Result<SigningIdentity, WalletError> {
        if env.uses_local_pool() {
            let signer = identities.local(Self::LOCAL_INDEX)?.clone();
            return Ok(SigningIdentity::new(
                signer,
                IdentitySource::LocalPool { index: Self::LOCAL_INDEX },
            ));
        }

        let key = config.wallet_key()?;
        let signer = identities.add(create_private_key_signer(&key)?).clone();
        trace!(address = %signer.address(), %env, "resolved configured account");
        Ok(SigningIdentity::new(signer, IdentitySource::Configured))
    }
}
