use clap::Parser;
use eyre::Result;
use fundme_cli::{
    handler,
    opts::{Fundme, FundmeSubcommand},
    utils,
};
use std::path::Path;

fn main() -> Result<()> {
    handler::install();
    utils::load_dotenv(Path::new("."));
    let args = Fundme::parse();
    if let Some(root) = &args.cmd.project().root {
        utils::load_dotenv(root);
    }
    utils::subscriber();
    utils::enable_paint();
    utils::block_on(run(args))?
}

async fn run(args: Fundme) -> Result<()> {
    match args.cmd {
        FundmeSubcommand::Deploy(cmd) => cmd.run().await,
        FundmeSubcommand::Fund(cmd) => cmd.run().await,
        FundmeSubcommand::Withdraw(cmd) => cmd.run().await,
    }
}
