use std::collections::BTreeMap;

use foundation_base::BundleError;
use serde::{Deserialize, Serialize};

use super::version::SemanticVersion;

/// Metadata fields of an application bundle, keyed like an `Info.plist`.
///
/// Each field is looked up on demand and may be missing independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InfoDictionary(BTreeMap<String, String>);

impl InfoDictionary {
    pub const IDENTIFIER: &'static str = "CFBundleIdentifier";
    pub const NAME: &'static str = "CFBundleName";
    pub const SHORT_VERSION: &'static str = "CFBundleShortVersionString";
    pub const BUILD_NUMBER: &'static str = "CFBundleVersion";

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary for a Cargo package.
    ///
    /// `name` and `version` come from `CARGO_PKG_NAME` and `CARGO_PKG_VERSION`; the
    /// identifier and build number are only set when given.
    pub fn from_package(
        name: &str,
        version: &str,
        identifier: Option<&str>,
        build_number: Option<&str>,
    ) -> Self {
        let mut info = Self::new()
            .with(Self::NAME, name)
            .with(Self::SHORT_VERSION, version);
        if let Some(identifier) = identifier {
            info.insert(Self::IDENTIFIER, identifier);
        }
        if let Some(build_number) = build_number {
            info.insert(Self::BUILD_NUMBER, build_number);
        }
        info
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`InfoDictionary::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn identifier(&self) -> Result<String, BundleError> {
        self.get(Self::IDENTIFIER)
            .map(str::to_string)
            .ok_or(BundleError::IdentifierMissing)
    }

    pub fn name(&self) -> Result<String, BundleError> {
        self.get(Self::NAME)
            .map(str::to_string)
            .ok_or(BundleError::NameMissing)
    }

    /// The short version string, parsed.
    pub fn short_version(&self) -> Result<SemanticVersion, BundleError> {
        let raw = self
            .get(Self::SHORT_VERSION)
            .ok_or(BundleError::VersionStringMissing)?;
        SemanticVersion::parse(raw)
    }

    /// The build number as a real number; missing and non-numeric values both fail.
    pub fn build_number(&self) -> Result<f64, BundleError> {
        self.get(Self::BUILD_NUMBER)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|number| number.is_finite())
            .ok_or(BundleError::BuildNumberMissing)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InfoDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_number_parses_as_real_number() {
        let info: InfoDictionary = [("CFBundleVersion", "42")].into_iter().collect();
        assert_eq!(info.build_number(), Ok(42.0));

        let info = InfoDictionary::new().with(InfoDictionary::BUILD_NUMBER, "1.5");
        assert_eq!(info.build_number(), Ok(1.5));
    }

    #[test]
    fn test_build_number_missing_or_not_numeric() {
        assert_eq!(
            InfoDictionary::new().build_number(),
            Err(BundleError::BuildNumberMissing)
        );
        for raw in ["", "forty-two", "NaN", "inf"] {
            let info = InfoDictionary::new().with(InfoDictionary::BUILD_NUMBER, raw);
            assert_eq!(
                info.build_number(),
                Err(BundleError::BuildNumberMissing),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_short_version_missing_vs_malformed() {
        assert_eq!(
            InfoDictionary::new().short_version(),
            Err(BundleError::VersionStringMissing)
        );
        let info = InfoDictionary::new().with(InfoDictionary::SHORT_VERSION, "1.0 beta");
        assert_eq!(
            info.short_version(),
            Err(BundleError::InvalidVersionFormat("1.0 beta".to_string()))
        );
    }

    #[test]
    fn test_identifier_and_name() {
        let info = InfoDictionary::new()
            .with(InfoDictionary::IDENTIFIER, "com.example.notes")
            .with(InfoDictionary::NAME, "Notes");
        assert_eq!(info.identifier().as_deref(), Ok("com.example.notes"));
        assert_eq!(info.name().as_deref(), Ok("Notes"));
        assert_eq!(
            InfoDictionary::new().identifier(),
            Err(BundleError::IdentifierMissing)
        );
        assert_eq!(InfoDictionary::new().name(), Err(BundleError::NameMissing));
    }

    #[test]
    fn test_from_package_omits_absent_fields() {
        let info = InfoDictionary::from_package("notes", "0.3.1", None, Some("17"));
        assert_eq!(info.name().as_deref(), Ok("notes"));
        assert_eq!(info.short_version(), Ok(SemanticVersion::new(0, 3, 1)));
        assert_eq!(info.build_number(), Ok(17.0));
        assert_eq!(info.identifier(), Err(BundleError::IdentifierMissing));
    }

    #[test]
    fn test_deserialize_from_json() {
        let info: InfoDictionary =
            serde_json::from_str(r#"{"CFBundleIdentifier": "com.example.app"}"#).unwrap();
        assert_eq!(info.get(InfoDictionary::IDENTIFIER), Some("com.example.app"));
    }
}
