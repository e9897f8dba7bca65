use crate::{
    ChainBackend, DeployError, MockOracleRegistry,
    abi::FundMe,
    provider::{FUND_ME_ARTIFACT, MOCK_ORACLE_ARTIFACT},
};
use alloy_primitives::{Address, Bytes, I256, U256, utils::format_units};
use alloy_sol_types::SolConstructor;
use fundme_config::{Config, NetworkEnvironment};
use fundme_wallets::{AccountResolver, IdentitySet, SigningIdentity};
use std::fmt;

/// Decimals of the mock price feed.
pub const DECIMALS: u8 = 8;

/// Initial answer of the mock price feed, 2000 USD with [DECIMALS] decimals.
pub const STARTING_PRICE: I256 = I256::from_raw(U256::from_limbs([200_000_000_000, 0, 0, 0]));

/// The price feed handed to the FundMe constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleReference {
    /// A mock deployed on the simulated chain, either now or by an earlier run.
    Mock(Address),
    /// The feed configured for the network.
    Configured(Address),
}

impl OracleReference {
    /// Address of the feed, whatever its origin.
    pub fn address(&self) -> Address {
        match *self {
            Self::Mock(address) | Self::Configured(address) => address,
        }
    }

    /// Whether the feed is a mock on a simulated chain.
    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }
}

impl fmt::Display for OracleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock(address) => write!(f, "{address} (mock)"),
            Self::Configured(address) => address.fmt(f),
        }
    }
}

/// Source verification to perform for a deployed contract.
///
/// Publishing the sources is left to external tooling, the request carries what it needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Network the contract lives on.
    pub network: String,
    /// Address of the contract to verify.
    pub address: Address,
    /// ABI encoded constructor arguments.
    pub constructor_args: Bytes,
}

/// The outcome of a FundMe deployment.
#[derive(Clone, Debug)]
pub struct Deployment {
    /// Name of the network deployed to.
    pub network: String,
    /// How the network was classified.
    pub environment: NetworkEnvironment,
    /// Address of the deployed FundMe.
    pub address: Address,
    /// The account that sent the deployment, and owns the contract.
    pub deployer: Address,
    /// The price feed the contract reads.
    pub oracle: OracleReference,
    /// `getPrice()` right after deployment.
    pub price: I256,
    /// Set when the network asks for source verification.
    pub verification: Option<VerificationRequest>,
}

impl Deployment {
    /// The price reading in USD, e.g. `2000.00000000`.
    pub fn formatted_price(&self) -> String {
        format_units(self.price, DECIMALS).unwrap_or_else(|_| self.price.to_string())
    }
}

/// Resolves the price feed of a network and deploys FundMe against it.
pub struct DeploymentResolver<B> {
    config: Config,
    backend: B,
    identities: IdentitySet,
}

impl<B: ChainBackend> DeploymentResolver<B> {
    /// Creates a resolver, deriving the local development accounts from `config`.
    pub fn new(config: Config, backend: B) -> Result<Self, DeployError> {
        let identities = IdentitySet::from_config(&config.local)?;
        Ok(Self::with_identities(config, backend, identities))
    }

    /// Creates a resolver picking accounts from `identities`.
    pub fn with_identities(config: Config, backend: B, identities: IdentitySet) -> Self {
        Self { config, backend, identities }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The chain deployments go to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn identities(&self) -> &IdentitySet {
        &self.identities
    }

    /// Returns the account sending transactions in `env`.
    pub fn identity(&mut self, env: NetworkEnvironment) -> Result<SigningIdentity, DeployError> {
        Ok(AccountResolver::resolve(env, &self.config, &mut self.identities)?)
    }

    /// Resolves the price feed to use on `network`.
    ///
    /// Local chains get a mock, deployed once per chain and reused through `registry`
    /// afterwards. Forked and live networks use the configured feed and send no transaction.
    pub async fn resolve_oracle(
        &mut self,
        env: NetworkEnvironment,
        network: &str,
        registry: &mut MockOracleRegistry,
    ) -> Result<OracleReference, DeployError> {
        if !env.uses_mock_oracle() {
            let address = self.config.price_feed(network)?;
            debug!(network, %address, "using configured price feed");
            return Ok(OracleReference::Configured(address));
        }

        let chain = self.backend.chain_key().await?;
        if let Some(existing) = registry.get(&chain) {
            if self.backend.has_code(existing).await? {
                info!(%existing, %chain, "existing mock price feed found, reusing it");
                return Ok(OracleReference::Mock(existing));
            }
            warn!(%existing, %chain, "recorded mock price feed has no code, deploying a new one");
            registry.forget(&chain)?;
        }

        let from = self.identity(env)?;
        info!(network, %env, "deploying mock price feed");
        let address = self
            .backend
            .deploy_mock_oracle(&from, DECIMALS, STARTING_PRICE)
            .await
            .map_err(DeployError::deployment(MOCK_ORACLE_ARTIFACT))?;
        registry.record(chain, address)?;
        info!(%address, "deployed mock price feed");
        Ok(OracleReference::Mock(address))
    }

    /// Deploys FundMe on `network`.
    pub async fn deploy_fund_me(
        &mut self,
        network: &str,
        registry: &mut MockOracleRegistry,
    ) -> Result<Deployment, DeployError> {
        let env = NetworkEnvironment::classify(network);
        let deployer = self.identity(env)?;
        info!(network, %env, %deployer, "deploying FundMe");

        let oracle = self.resolve_oracle(env, network, registry).await?;
        let address = self
            .backend
            .deploy_fund_me(&deployer, oracle.address())
            .await
            .map_err(DeployError::deployment(FUND_ME_ARTIFACT))?;

        let verification = self.config.verify(network).then(|| VerificationRequest {
            network: network.to_string(),
            address,
            constructor_args: FundMe::constructorCall { _priceFeed: oracle.address() }
                .abi_encode()
                .into(),
        });

        let price = self.backend.price(address).await?;
        let deployment = Deployment {
            network: network.to_string(),
            environment: env,
            address,
            deployer: deployer.address(),
            oracle,
            price,
            verification,
        };
        info!(%address, price = %deployment.formatted_price(), "deployed FundMe");
        Ok(deployment)
    }
}
