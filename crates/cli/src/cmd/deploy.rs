use crate::opts::{ProjectOpts, Session};
use clap::Parser;
use eyre::Result;
use fundme_deploy::MockOracleRegistry;
use yansi::Paint;

/// CLI arguments for `fundme deploy`.
#[derive(Clone, Debug, Parser)]
pub struct DeployArgs {
    #[command(flatten)]
    pub project: ProjectOpts,
}

impl DeployArgs {
    pub async fn run(self) -> Result<()> {
        let Session { network, env, mut resolver } = self.project.connect().await?;
        let mut registry = MockOracleRegistry::for_environment(env, resolver.config())?;

        println!("Deploying FundMe on {} ({env})", network.bold());
        let deployment = resolver.deploy_fund_me(&network, &mut registry).await?;

        println!("Deployer: {}", deployment.deployer);
        println!("Price feed: {}", deployment.oracle);
        println!("{} {}", "Deployed to:".green(), deployment.address);
        println!("Current ETH/USD price: {}", deployment.formatted_price());

        if let Some(request) = &deployment.verification {
            println!(
                "{} run your verifier for {} on {} with constructor args {}",
                "Verification requested:".yellow(),
                request.address,
                request.network,
                request.constructor_args,
            );
        }
        if let Some(path) = registry.path() {
            println!("Mock deployments recorded in {}", path.display());
        }
        Ok(())
    }
}
