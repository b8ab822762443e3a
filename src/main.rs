use clap::Parser;

use fitlog::cli::{self, Cli, CliError};
use fitlog::config::load_config;
use fitlog::utils::logger::init_logging;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = Cli::parse();
    let config = load_config()?;
    init_logging(&config.logging).map_err(CliError::Logging)?;
    cli::run(args, config).await
}
