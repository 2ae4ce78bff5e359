//! Package manifest access
//!
//! A manifest is read as an ordered JSON object so a version bump rewrites the
//! file with every other field byte-for-byte intact, the way the package
//! manager left it.

use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use serde_json::{Map, Value};

use super::ReleaseError;

/// One `package.json` held in memory
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, ReleaseError> {
        let content = fs::read_to_string(path).map_err(|source| ReleaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fields = serde_json::from_str(&content).map_err(|source| ReleaseError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            fields,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the package lives in (where the publish command runs)
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Package name, used only for log messages
    pub fn name(&self) -> &str {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
    }

    /// Current version, parsed
    pub fn version(&self) -> Result<Version, ReleaseError> {
        let raw = self
            .fields
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| ReleaseError::MissingVersion {
                path: self.path.clone(),
            })?;
        Version::parse(raw).map_err(|source| ReleaseError::InvalidVersion {
            version: raw.to_string(),
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the `version` field, leaving every other field untouched
    pub fn set_version(&mut self, version: &Version) {
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Write the manifest back with 2-space indentation and one trailing newline
    pub fn save(&self) -> Result<(), ReleaseError> {
        let json =
            serde_json::to_string_pretty(&self.fields).map_err(|source| ReleaseError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, format!("{}\n", json)).map_err(|source| ReleaseError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_manifest(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("package.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_bump_preserves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{
  "name": "@kit/components",
  "version": "1.2.3",
  "main": "dist/lib/index.js",
  "module": "dist/es/index.mjs",
  "files": [
    "dist"
  ]
}
"#,
        );

        let mut manifest = Manifest::load(&path).unwrap();
        let next = crate::release::ReleaseKind::Patch.bump(&manifest.version().unwrap());
        manifest.set_version(&next);
        manifest.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            r#"{
  "name": "@kit/components",
  "version": "1.2.4",
  "main": "dist/lib/index.js",
  "module": "dist/es/index.mjs",
  "files": [
    "dist"
  ]
}
"#
        );
    }

    #[test]
    fn test_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), "{\n  \"name\": \"a\",\n  \"version\": \"0.1.0\"\n}");

        let manifest = Manifest::load(&path).unwrap();
        manifest.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(!written.ends_with("}\n\n"));
    }

    #[test]
    fn test_invalid_version_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"{"name": "a", "version": "not-a-version"}"#);

        let manifest = Manifest::load(&path).unwrap();
        assert!(matches!(
            manifest.version(),
            Err(ReleaseError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_missing_version_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"{"name": "a"}"#);

        let manifest = Manifest::load(&path).unwrap();
        assert!(matches!(
            manifest.version(),
            Err(ReleaseError::MissingVersion { .. })
        ));
    }

    #[test]
    fn test_name_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"{"version": "0.1.0"}"#);

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.name(), "<unnamed>");
    }
}
