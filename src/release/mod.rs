//! Version bump and publish pipeline
//!
//! A release runs three stages over a target: resolve the target to an ordered
//! list of manifests, bump each manifest's version on disk, then run the
//! publish command in each package directory. Each stage returns a result; the
//! CLI driver alone decides process termination and exit status.
//!
//! The pipeline is deliberately non-transactional: a failure mid-bump or
//! mid-publish leaves earlier writes and publishes in place. Nothing is rolled
//! back and nothing is retried.

mod manifest;
mod version;

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use colored::Colorize;
use thiserror::Error;
use tracing::{debug, info};

pub use manifest::Manifest;
pub use version::ReleaseKind;

/// Release pipeline failures
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("unknown package '{0}' (expected a configured package or 'all')")]
    UnknownPackage(String),

    #[error("unknown release type '{0}' (expected major, minor or patch)")]
    UnknownKind(String),

    #[error("no workspace packages configured in kitforge.toml")]
    NoPackages,

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid version '{version}' in {}", path.display())]
    InvalidVersion {
        version: String,
        path: PathBuf,
        #[source]
        source: semver::Error,
    },

    #[error("version field missing in {}", path.display())]
    MissingVersion { path: PathBuf },

    #[error("failed to run publish command for {package}")]
    PublishSpawn {
        package: String,
        #[source]
        source: io::Error,
    },

    #[error("publish failed for {package}")]
    PublishFailed { package: String },

    #[error("publish command is empty")]
    EmptyPublishCommand,
}

/// What to release: one configured package or all of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTarget {
    All,
    Package(String),
}

impl ReleaseTarget {
    /// Interpret a CLI argument: the `all` sentinel or a package name
    ///
    /// Whether the name actually exists is checked by [`resolve`].
    pub fn parse(s: &str) -> Self {
        match s {
            "all" => ReleaseTarget::All,
            name => ReleaseTarget::Package(name.to_string()),
        }
    }
}

/// Expand a target into an ordered list of manifest paths
///
/// `packages` is the configured workspace map in declaration order; `all`
/// resolves to every entry, a name to its single entry. An empty map or an
/// unrecognized name fails before any file is touched.
pub fn resolve(
    target: &ReleaseTarget,
    packages: &[(String, PathBuf)],
) -> Result<Vec<PathBuf>, ReleaseError> {
    if packages.is_empty() {
        return Err(ReleaseError::NoPackages);
    }

    match target {
        ReleaseTarget::All => Ok(packages.iter().map(|(_, path)| path.clone()).collect()),
        ReleaseTarget::Package(name) => packages
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, path)| vec![path.clone()])
            .ok_or_else(|| ReleaseError::UnknownPackage(name.clone())),
    }
}

/// Record of one persisted version bump
#[derive(Debug, Clone)]
pub struct BumpRecord {
    pub name: String,
    pub path: PathBuf,
    pub previous: semver::Version,
    pub next: semver::Version,
}

/// Bump every manifest in order, persisting each as it goes
///
/// Fails on the first unreadable or unparseable manifest; bumps already
/// written by that point stay written.
pub fn bump_all(paths: &[PathBuf], kind: ReleaseKind) -> Result<Vec<BumpRecord>, ReleaseError> {
    let mut records = Vec::with_capacity(paths.len());

    for path in paths {
        let mut manifest = Manifest::load(path)?;
        let previous = manifest.version()?;
        let next = kind.bump(&previous);

        manifest.set_version(&next);
        manifest.save()?;
        info!("Updated {} to v{}", manifest.name(), next);

        records.push(BumpRecord {
            name: manifest.name().to_string(),
            path: path.clone(),
            previous,
            next,
        });
    }

    Ok(records)
}

/// Run the publish command in each bumped package's directory, sequentially
///
/// Each manifest is re-read so the published version is the persisted one. The
/// subprocess inherits stdio and runs to completion before the next package
/// starts. The first failure aborts the remaining publishes; completed
/// publishes stand.
pub fn publish_all(paths: &[PathBuf], command: &[String]) -> Result<(), ReleaseError> {
    let (program, args) = command.split_first().ok_or(ReleaseError::EmptyPublishCommand)?;

    for path in paths {
        let manifest = Manifest::load(path)?;
        let version = manifest.version()?;

        eprintln!(
            "\n{} Publishing {} v{}...",
            "→".blue(),
            manifest.name().cyan(),
            version
        );
        debug!("Running {:?} in {}", command, manifest.dir().display());

        let status = run_publish(program, args, manifest.dir()).map_err(|source| {
            ReleaseError::PublishSpawn {
                package: manifest.name().to_string(),
                source,
            }
        })?;

        if !status.success() {
            return Err(ReleaseError::PublishFailed {
                package: manifest.name().to_string(),
            });
        }
    }

    Ok(())
}

fn run_publish(program: &str, args: &[String], dir: &Path) -> io::Result<std::process::ExitStatus> {
    Command::new(program).args(args).current_dir(dir).status()
}
