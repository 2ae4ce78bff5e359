//! Semantic version increments

use std::fmt;
use std::str::FromStr;

use semver::Version;

use super::ReleaseError;

/// Which version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseKind {
    Major,
    Minor,
    #[default]
    Patch,
}

impl ReleaseKind {
    /// Next version after `current`
    ///
    /// Lower components reset to zero and any pre-release/build metadata is
    /// dropped, so the result is always strictly greater than `current`.
    pub fn bump(&self, current: &Version) -> Version {
        match self {
            ReleaseKind::Major => Version::new(current.major + 1, 0, 0),
            ReleaseKind::Minor => Version::new(current.major, current.minor + 1, 0),
            ReleaseKind::Patch => Version::new(current.major, current.minor, current.patch + 1),
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseKind::Major => "major",
            ReleaseKind::Minor => "minor",
            ReleaseKind::Patch => "patch",
        };
        f.write_str(s)
    }
}

impl FromStr for ReleaseKind {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(ReleaseKind::Major),
            "minor" => Ok(ReleaseKind::Minor),
            "patch" => Ok(ReleaseKind::Patch),
            other => Err(ReleaseError::UnknownKind(other.to_string())),
        }
    }
}
