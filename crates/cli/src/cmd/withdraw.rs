use crate::{
    cmd::account_label,
    opts::{ProjectOpts, Session},
};
use alloy_primitives::Address;
use clap::Parser;
use eyre::Result;
use fundme_deploy::FundMeClient;
use yansi::Paint;

/// CLI arguments for `fundme withdraw`.
#[derive(Clone, Debug, Parser)]
pub struct WithdrawArgs {
    /// Address of the deployed FundMe.
    #[arg(long, value_name = "ADDRESS")]
    pub address: Address,

    #[command(flatten)]
    pub project: ProjectOpts,
}

impl WithdrawArgs {
    pub async fn run(self) -> Result<()> {
        let Session { env, mut resolver, .. } = self.project.connect().await?;
        let account = resolver.identity(env)?;
        let fund_me = FundMeClient::new(resolver.backend(), self.address);

        let owner = fund_me.owner().await?;
        if owner != account.address() {
            warn!(%owner, %account, "withdrawing from an account that does not own the contract");
        }

        let tx = fund_me.withdraw(&account).await?;
        println!("{} all funds to {} (tx {tx})", "Withdrew".green(), account_label(&account));
        Ok(())
    }
}
