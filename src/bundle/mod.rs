//! Bundle snapshot data model
//!
//! A `Bundle` is the complete set of artifacts one bundling pass emitted for a
//! single module format. It is taken as a snapshot after generation; transforms
//! consume a snapshot and return a new one, never revisiting entries.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Module format of one bundling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// ES modules (`import`)
    Esm,
    /// CommonJS (`require`)
    Cjs,
}

impl OutputFormat {
    /// Side-effect statement loading a stylesheet, in this format's syntax
    pub fn style_statement(&self, specifier: &str) -> String {
        match self {
            OutputFormat::Esm => format!("import \"{}\";", specifier),
            OutputFormat::Cjs => format!("require(\"{}\");", specifier),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Esm => "esm",
            OutputFormat::Cjs => "cjs",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "esm" | "es" | "module" => Ok(OutputFormat::Esm),
            "cjs" | "commonjs" => Ok(OutputFormat::Cjs),
            other => anyhow::bail!("unknown output format '{}' (expected esm or cjs)", other),
        }
    }
}

/// Payload of a bundle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Script chunk with textual code
    Chunk { code: String },
    /// Non-script artifact (stylesheet, declaration file, ...)
    Asset,
}

/// One emitted artifact in a bundling pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    /// Path relative to the output root, `/`-separated
    pub file_name: String,

    /// Chunk or asset payload
    pub kind: EntryKind,
}

impl BundleEntry {
    /// Create a script chunk entry
    pub fn chunk(file_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: EntryKind::Chunk { code: code.into() },
        }
    }

    /// Create an asset entry
    pub fn asset(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: EntryKind::Asset,
        }
    }

    /// Chunk code, if this entry is a chunk
    pub fn code(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Chunk { code } => Some(code),
            EntryKind::Asset => None,
        }
    }

    /// Whether this entry is a stylesheet under the given marker convention
    ///
    /// The marker is the fixed relative suffix a component's stylesheet is
    /// emitted at, e.g. `style/index.css`.
    pub fn is_stylesheet(&self, marker: &str) -> bool {
        self.file_name.ends_with(marker)
    }

    /// Whether a path names a script chunk rather than an asset
    pub fn is_chunk_path(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("js") | Some("mjs") | Some("cjs")
        )
    }
}

/// Snapshot of one format's output, keyed by file name
///
/// A BTreeMap keeps iteration order deterministic across runs, which the
/// style-link transform and test snapshots rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    entries: BTreeMap<String, BundleEntry>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry at the same path
    pub fn insert(&mut self, entry: BundleEntry) {
        self.entries.insert(entry.file_name.clone(), entry);
    }

    pub fn get(&self, file_name: &str) -> Option<&BundleEntry> {
        self.entries.get(file_name)
    }

    pub fn get_mut(&mut self, file_name: &str) -> Option<&mut BundleEntry> {
        self.entries.get_mut(file_name)
    }

    /// All file names in deterministic order
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &BundleEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load an on-disk output tree (preserveModules-style layout) into a snapshot
    ///
    /// Script files become chunks with their code in memory; everything else is
    /// recorded as an asset.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut bundle = Bundle::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to walk output directory: {}", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(dir)
                .with_context(|| format!("Path escapes output root: {}", entry.path().display()))?;
            let file_name = relative.to_string_lossy().replace('\\', "/");

            if BundleEntry::is_chunk_path(entry.path()) {
                let code = fs::read_to_string(entry.path())
                    .with_context(|| format!("Failed to read chunk: {}", entry.path().display()))?;
                bundle.insert(BundleEntry::chunk(file_name, code));
            } else {
                bundle.insert(BundleEntry::asset(file_name));
            }
        }

        Ok(bundle)
    }

    /// Write every chunk whose code differs from `before` back under `dir`
    ///
    /// Returns the file names written, in deterministic order.
    pub fn write_changed_chunks(&self, before: &Bundle, dir: &Path) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for entry in self.entries() {
            let Some(code) = entry.code() else { continue };
            if before.get(&entry.file_name).and_then(BundleEntry::code) == Some(code) {
                continue;
            }

            let path = dir.join(&entry.file_name);
            fs::write(&path, code)
                .with_context(|| format!("Failed to write chunk: {}", path.display()))?;
            written.push(entry.file_name.clone());
        }

        Ok(written)
    }
}

/// Post-processing hook over a completed bundling pass
///
/// Mirrors a rollup-style `generateBundle` hook, except the bundle is handed
/// over by value: a plugin maps one snapshot to the next instead of mutating
/// shared state, which keeps single-application provable.
pub trait BundlePlugin {
    /// Plugin name for logging and debugging
    fn name(&self) -> &str;

    /// Map one snapshot of the bundle to the next
    fn generate_bundle(&self, format: OutputFormat, bundle: Bundle) -> Result<Bundle>;
}
