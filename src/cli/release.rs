//! Release command implementation

use std::time::Instant;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::release::{self, ReleaseError, ReleaseKind, ReleaseTarget};

/// Bump package versions and publish them
#[derive(Args, Debug)]
pub struct ReleaseCommand {
    /// Package to release, or "all" for every workspace package
    pub package: String,

    /// Version component to increment (major, minor or patch)
    #[arg(default_value = "patch")]
    pub release_type: String,
}

impl ReleaseCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        let start = Instant::now();

        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;

        let kind: ReleaseKind = self.release_type.parse().map_err(usage_error)?;
        let target = ReleaseTarget::parse(&self.package);

        let packages = config.package_locations();
        let paths = release::resolve(&target, &packages).map_err(usage_error)?;

        eprintln!(
            "{} Releasing {} package(s) ({} bump)...",
            "→".blue(),
            paths.len(),
            kind
        );

        let records = release::bump_all(&paths, kind)?;
        for record in &records {
            eprintln!(
                "  {} {} {} {} {}",
                "✓".green(),
                record.name.cyan(),
                record.previous.to_string().dimmed(),
                "→".dimmed(),
                record.next
            );
        }

        release::publish_all(&paths, &config.release.publish_command).map_err(|err| {
            if let ReleaseError::PublishFailed { package } | ReleaseError::PublishSpawn { package, .. } = &err {
                eprintln!("\n{} Publish failed for {}", "✗".red().bold(), package.cyan());
            }
            err
        })?;

        eprintln!(
            "\n{} Released {} package(s) in {:.2}s\n",
            "✓".green().bold(),
            records.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(())
    }
}

/// Invalid-argument errors get usage help before the error propagates
fn usage_error(err: ReleaseError) -> anyhow::Error {
    eprintln!("Usage: kitforge release <package|all> [release-type]");
    eprintln!("Example:");
    eprintln!("  kitforge release components major");
    eprintln!("  kitforge release all patch");
    err.into()
}
