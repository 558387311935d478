//! kippo API server
//!
//! Thin wrapper over the library: loads environment configuration,
//! initializes tracing, and serves the axum router with the live Google
//! Maps lookup.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kippo::places::GoogleMaps;
use kippo::{server, Config};

/// Nine-star ki lucky-direction shrine and temple finder API
#[derive(Parser, Debug)]
#[command(name = "kippo")]
#[command(version = kippo::VERSION)]
#[command(about = "Serve the kippo fortune/recommendation API")]
struct Cli {
    /// Bind host (overrides HOST)
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kippo=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let lookup = Arc::new(GoogleMaps::new(config.api_key.clone()));
    server::serve(&config, lookup)
        .await
        .context("running server")?;

    Ok(())
}
