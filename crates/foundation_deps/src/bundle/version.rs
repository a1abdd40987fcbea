use std::fmt;
use std::str::FromStr;

use foundation_base::BundleError;
use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};

/// A parsed `MAJOR.MINOR.PATCH[-pre][+build]` version.
///
/// Only constructible from a valid version string, so every instance prints back as
/// one. Ordering follows semantic-versioning precedence.
///
/// # Examples
///
/// ```
/// use foundation_deps::bundle::SemanticVersion;
///
/// let version = SemanticVersion::parse("2.1.0-beta.1").unwrap();
/// assert_eq!((version.major(), version.minor(), version.patch()), (2, 1, 0));
/// assert_eq!(version.pre(), "beta.1");
/// assert!(version < SemanticVersion::parse("2.1.0").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemanticVersion(Version);

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parse `raw`, failing with [`BundleError::InvalidVersionFormat`] carrying the input.
    pub fn parse(raw: &str) -> Result<Self, BundleError> {
        Version::parse(raw)
            .map(Self)
            .map_err(|_| BundleError::InvalidVersionFormat(raw.to_string()))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Pre-release identifiers, empty for a release.
    pub fn pre(&self) -> &str {
        self.0.pre.as_str()
    }

    /// Build metadata, empty when absent.
    pub fn build(&self) -> &str {
        self.0.build.as_str()
    }

    pub fn is_prerelease(&self) -> bool {
        self.0.pre != Prerelease::EMPTY
    }

    /// The same version without pre-release or build parts.
    pub fn release(&self) -> Self {
        let mut version = self.0.clone();
        version.pre = Prerelease::EMPTY;
        version.build = BuildMetadata::EMPTY;
        Self(version)
    }

    pub fn as_semver(&self) -> &Version {
        &self.0
    }
}

impl FromStr for SemanticVersion {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Version> for SemanticVersion {
    fn from(version: Version) -> Self {
        Self(version)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release() {
        let version = SemanticVersion::parse("2.1.0").unwrap();
        assert_eq!(version.major(), 2);
        assert_eq!(version.minor(), 1);
        assert_eq!(version.patch(), 0);
        assert!(!version.is_prerelease());
        assert_eq!(version.to_string(), "2.1.0");
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        let error = SemanticVersion::parse("not-a-version").unwrap_err();
        assert_eq!(
            error,
            BundleError::InvalidVersionFormat("not-a-version".to_string())
        );
        assert_eq!(
            error.to_string(),
            "The version string 'not-a-version' is not in a valid format."
        );
    }

    #[test]
    fn test_parse_rejects_partial_versions() {
        for raw in ["", "1", "1.2", "1.2.3.4", "v1.2.3", "1.02.3"] {
            assert!(SemanticVersion::parse(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_extended_version() {
        let version: SemanticVersion = "3.0.0-rc.2+build.77".parse().unwrap();
        assert_eq!(version.pre(), "rc.2");
        assert_eq!(version.build(), "build.77");
        assert_eq!(version.release(), SemanticVersion::new(3, 0, 0));
    }

    #[test]
    fn test_serializes_as_string() {
        let version = SemanticVersion::new(1, 4, 2);
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"1.4.2\"");
        let back: SemanticVersion = serde_json::from_str("\"1.4.2\"").unwrap();
        assert_eq!(back, version);
    }
}
