use clap::{Parser, ValueHint};
use eyre::Result;
use fundme_config::{Config, NetworkEnvironment};
use fundme_deploy::{AlloyBackend, ArtifactStore, DeploymentResolver};
use std::path::{Path, PathBuf};

/// Project and network selection shared by all commands.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Project options")]
pub struct ProjectOpts {
    /// The network to use.
    ///
    /// Defaults to `default_network` of the config.
    #[arg(long, short, env = "FUNDME_NETWORK", value_name = "NAME")]
    pub network: Option<String>,

    /// The project's root path, where `fundme.toml` lives.
    ///
    /// By default the current working directory.
    #[arg(long, value_hint = ValueHint::DirPath, value_name = "PATH")]
    pub root: Option<PathBuf>,
}

impl ProjectOpts {
    pub fn root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("."))
    }

    /// Loads the config of the selected project.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load_with_root(self.root())?)
    }

    /// Returns the selected network name.
    pub fn network(&self, config: &Config) -> String {
        self.network.clone().unwrap_or_else(|| config.default_network.clone())
    }

    /// Loads the config and connects to the selected network.
    pub async fn connect(&self) -> Result<Session> {
        let config = self.load_config()?;
        let network = self.network(&config);
        let env = NetworkEnvironment::classify(&network);
        let rpc_url = config.rpc_url(&network)?;
        trace!(%network, %env, %rpc_url, "connecting");

        let backend = AlloyBackend::connect(&rpc_url, ArtifactStore::new(config.artifacts_dir()))
            .await?;
        let resolver = DeploymentResolver::new(config, backend)?;
        Ok(Session { network, env, resolver })
    }
}

/// A connection to the selected network.
pub struct Session {
    pub network: String,
    pub env: NetworkEnvironment,
    pub resolver: DeploymentResolver<AlloyBackend>,
}
