use anyhow::Result;
use clap::Parser;
use stock_insights::{
    cli::{self, commands::Cli},
    logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    cli::run(cli).await?;
    Ok(())
}
