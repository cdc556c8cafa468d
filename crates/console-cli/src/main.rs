mod bootstrap;
mod cli_args;

use anyhow::{Context, Result};
use clap::Parser;
use console_shell::ProxyClientFactory;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::bootstrap::run_bootstrap;
use crate::cli_args::Cli;

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let output = run_bootstrap(&cli, ProxyClientFactory)
        .await
        .context("console shell bootstrap failed")?;
    println!("{}", output.render());
    Ok(())
}
