//! Tryst daemon entry point.
//!
//! Parses the CLI, resolves configuration, initializes tracing, and runs the
//! rendezvous server until shutdown.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tryst_server::{ServerConfig, SignalServer};

/// One-shot rendezvous (signaling) server for peer connection setup.
#[derive(Debug, Parser)]
#[command(name = "trystd")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the configuration file
    #[arg(short, long)]
    bind: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    SignalServer::new(config).start().await
}
