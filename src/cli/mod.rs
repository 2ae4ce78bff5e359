//! Command-line interface for kitforge
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `release`: Bump and publish workspace packages
//! - `link`: Wire stylesheet side-effects into bundled output

mod link;
mod release;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use link::LinkCommand;
pub use release::ReleaseCommand;

/// kitforge - build & release pipeline for component-library workspaces
#[derive(Parser, Debug)]
#[command(name = "kitforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to kitforge.toml config file
    #[arg(short, long, global = true, default_value = "kitforge.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bump package versions and publish them
    Release(ReleaseCommand),

    /// Prepend stylesheet imports to bundled component chunks
    Link(LinkCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Commands::Release(cmd) => cmd.execute(&self.config),
            Commands::Link(cmd) => cmd.execute(&self.config),
        }
    }
}

/// Print the kitforge banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "⚒".cyan(),
        "kitforge".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
