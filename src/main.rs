//! kitforge - build & release pipeline for component-library workspaces
//!
//! Post-processes bundled component output (wiring stylesheet side-effects
//! into each emitted chunk) and orchestrates version bumps and publishes
//! across the workspace's packages.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod bundle;
mod cli;
mod config;
mod release;
mod stylelink;

pub use cli::Cli;
pub use config::Config;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kitforge=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kitforge=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute()
}
