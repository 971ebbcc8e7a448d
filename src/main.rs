// Author: Dustin Pilgrim
// License: MIT

mod api;
mod app;
mod cli;
mod config;
mod core;
mod services;
mod sync;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("tempo=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tempo=warn"))
    };

    // Logs go to stderr; stdout belongs to the live display and tables.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::load(&args)?;

    match args.command {
        Some(cmd) => app::command::run(cmd, cfg).await,
        None => app::watch_mode::run(cfg).await,
    }
}
