use anyhow::Result;
use clap::Parser;
use tracing::debug;

use bank_cli::settings::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = bank_cli::cli::Cli::parse();
    let log_file = init_logger(cli.debug)?;
    debug!("Writing logs to {}", log_file.display());
    bank_cli::run(cli).await?;
    Ok(())
}
