use crate::{
    cmd::account_label,
    opts::{ProjectOpts, Session},
};
use alloy_primitives::{Address, U256};
use clap::Parser;
use eyre::Result;
use fundme_deploy::FundMeClient;
use yansi::Paint;

/// CLI arguments for `fundme fund`.
#[derive(Clone, Debug, Parser)]
pub struct FundArgs {
    /// Address of the deployed FundMe.
    #[arg(long, value_name = "ADDRESS")]
    pub address: Address,

    /// Amount to send, in wei.
    ///
    /// Defaults to the current entrance fee.
    #[arg(long, value_name = "WEI")]
    pub value: Option<U256>,

    #[command(flatten)]
    pub project: ProjectOpts,
}

impl FundArgs {
    pub async fn run(self) -> Result<()> {
        let Session { env, mut resolver, .. } = self.project.connect().await?;
        let account = resolver.identity(env)?;
        let label = account_label(&account);
        let fund_me = FundMeClient::new(resolver.backend(), self.address);

        let fee = fund_me.entrance_fee().await?;
        println!("The current entrance fee is {fee} wei");

        let funding = fund_me.fund(&account, Some(self.value.unwrap_or(fee))).await?;
        println!("{} {} wei from {label} (tx {})", "Funded".green(), funding.value, funding.tx);
        let total = fund_me.amount_funded(account.address()).await?;
        println!("Total funded by {label}: {total} wei");
        Ok(())
    }
}
