//! Link command implementation

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::{info, warn};

use crate::bundle::{Bundle, BundlePlugin, OutputFormat};
use crate::config::Config;
use crate::stylelink::StyleLink;

/// Prepend stylesheet imports to bundled component chunks
#[derive(Args, Debug)]
pub struct LinkCommand {
    /// Only process one output format (esm or cjs)
    #[arg(short, long)]
    pub format: Option<String>,
}

impl LinkCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        let start = Instant::now();

        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;
        let link = StyleLink::from_config(&config.stylelink);

        let only: Option<OutputFormat> = self.format.as_deref().map(str::parse).transpose()?;

        let mut total = 0;
        for (format, dir) in [
            (OutputFormat::Esm, config.esm_dir()),
            (OutputFormat::Cjs, config.cjs_dir()),
        ] {
            if only.is_some_and(|f| f != format) {
                continue;
            }
            total += link_dir(&link, format, &dir)?;
        }

        eprintln!(
            "\n{} Linked {} chunk(s) in {:.2}s\n",
            "✓".green().bold(),
            total,
            start.elapsed().as_secs_f64()
        );

        Ok(())
    }
}

/// Run the style-link pass over one on-disk output tree
fn link_dir(link: &StyleLink, format: OutputFormat, dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        warn!("Output directory {} not found, skipping", dir.display());
        return Ok(0);
    }

    eprintln!("{} Linking styles in {} ({})...", "→".blue(), dir.display(), format.as_str());

    let before = Bundle::load_dir(dir)?;
    let after = link.generate_bundle(format, before.clone())?;
    let written = after.write_changed_chunks(&before, dir)?;

    for file_name in &written {
        eprintln!("  {} {}", "•".dimmed(), file_name.cyan());
    }

    Ok(written.len())
}
