mod project;
pub use project::{ProjectOpts, Session};

use crate::cmd::{deploy::DeployArgs, fund::FundArgs, withdraw::WithdrawArgs};
use clap::{Parser, Subcommand};

/// Deploy the FundMe contract and interact with it.
#[derive(Parser)]
#[command(name = "fundme", version, next_display_order = None)]
pub struct Fundme {
    #[command(subcommand)]
    pub cmd: FundmeSubcommand,
}

#[derive(Subcommand)]
pub enum FundmeSubcommand {
    /// Deploy FundMe, deploying a mock price feed first on local networks.
    #[command(visible_alias = "d")]
    Deploy(DeployArgs),

    /// Send funds to a deployed FundMe.
    #[command(visible_alias = "f")]
    Fund(FundArgs),

    /// Withdraw all funds of a deployed FundMe. Only the owner may do this.
    #[command(visible_alias = "w")]
    Withdraw(WithdrawArgs),
}

impl FundmeSubcommand {
    pub fn project(&self) -> &ProjectOpts {
        match self {
            Self::Deploy(args) => &args.project,
            Self::Fund(args) => &args.project,
            Self::Withdraw(args) => &args.project,
        }
    }
}
