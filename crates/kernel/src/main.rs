//! Atrium host
//!
//! Composes plugin navigation and drives the media backend from the
//! command line.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use atrium_kernel::cli::{self, Cli};
use atrium_kernel::{AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(server = %config.server_url, policy = %config.menu_injection, "Configuration loaded");

    let state = AppState::new(&config).context("failed to initialize application state")?;

    let mut stdout = std::io::stdout().lock();
    cli::run(&state, cli, &mut stdout).await
}

/// Initialize tracing with environment filter.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper_util=warn,reqwest=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
