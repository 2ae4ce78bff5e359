//! Configuration schema definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Workspace package map
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkspaceConfig {
    /// Packages in release order; an array keeps declaration order, which a
    /// TOML table would not guarantee.
    #[serde(default)]
    pub packages: Vec<PackageLocation>,
}

/// One workspace package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageLocation {
    /// Key accepted by `kitforge release <package>`
    pub name: String,

    /// Manifest path relative to the workspace root
    pub manifest: PathBuf,
}

/// Style-link transform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleLinkConfig {
    /// Suffix identifying a stylesheet entry
    #[serde(default = "default_style_marker")]
    pub style_marker: String,

    /// Sibling chunk file name in ESM output
    #[serde(default = "default_esm_chunk")]
    pub esm_chunk: String,

    /// Sibling chunk file name in CommonJS output
    #[serde(default = "default_cjs_chunk")]
    pub cjs_chunk: String,

    /// ESM output directory
    #[serde(default = "default_esm_dir")]
    pub esm_dir: String,

    /// CommonJS output directory
    #[serde(default = "default_cjs_dir")]
    pub cjs_dir: String,
}

impl Default for StyleLinkConfig {
    fn default() -> Self {
        Self {
            style_marker: default_style_marker(),
            esm_chunk: default_esm_chunk(),
            cjs_chunk: default_cjs_chunk(),
            esm_dir: default_esm_dir(),
            cjs_dir: default_cjs_dir(),
        }
    }
}

fn default_style_marker() -> String {
    "style/index.css".to_string()
}

fn default_esm_chunk() -> String {
    "index.mjs".to_string()
}

fn default_cjs_chunk() -> String {
    "index.js".to_string()
}

fn default_esm_dir() -> String {
    "dist/es".to_string()
}

fn default_cjs_dir() -> String {
    "dist/lib".to_string()
}

/// Release configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Publish command argv, run in each package directory
    #[serde(default = "default_publish_command")]
    pub publish_command: Vec<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            publish_command: default_publish_command(),
        }
    }
}

fn default_publish_command() -> Vec<String> {
    ["pnpm", "publish", "--access", "public", "--no-git-checks"]
        .map(String::from)
        .to_vec()
}
