use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use medium_to_instapaper::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    medium_to_instapaper::run(Cli::parse())
}
