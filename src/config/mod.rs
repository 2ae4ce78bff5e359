//! Configuration handling for kitforge
//!
//! Parses and manages kitforge.toml configuration files.

mod schema;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use schema::*;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Workspace package map
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Style-link transform settings
    #[serde(default)]
    pub stylelink: StyleLinkConfig,

    /// Release settings
    #[serde(default)]
    pub release: ReleaseConfig,

    /// Root directory (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

impl Config {
    /// Load configuration from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let content = fs::read_to_string(&canonical_path)
            .with_context(|| format!("Failed to read config file: {}", canonical_path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse kitforge.toml")?;

        // Set root directory to the directory containing the config file
        config.root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for package in &self.workspace.packages {
            if package.name.is_empty() {
                anyhow::bail!("Workspace package with empty name in kitforge.toml");
            }
            if package.name == "all" {
                anyhow::bail!("'all' is reserved and cannot name a workspace package");
            }
            if !seen.insert(package.name.as_str()) {
                anyhow::bail!("Duplicate workspace package name: '{}'", package.name);
            }
        }

        if self.stylelink.style_marker.is_empty() {
            anyhow::bail!("stylelink.style_marker must not be empty");
        }

        Ok(())
    }

    /// Workspace packages as (name, absolute manifest path), in release order
    pub fn package_locations(&self) -> Vec<(String, PathBuf)> {
        self.workspace
            .packages
            .iter()
            .map(|p| (p.name.clone(), self.root.join(&p.manifest)))
            .collect()
    }

    /// Absolute ESM output directory
    pub fn esm_dir(&self) -> PathBuf {
        self.root.join(&self.stylelink.esm_dir)
    }

    /// Absolute CommonJS output directory
    pub fn cjs_dir(&self) -> PathBuf {
        self.root.join(&self.stylelink.cjs_dir)
    }
}
