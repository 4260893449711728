use anyhow::Result;
use clap::Parser;

use questionset::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    cli::run(cli).await
}
