use foundation_base::BundleError;

use super::traits::BundleResourceProvider;
use super::version::SemanticVersion;
use crate::file_system::Location;

/// Test bundle with no resources and no metadata.
///
/// Every call fails with the matching not-found error, so code under test exercises
/// its fallback paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubBundle;

impl StubBundle {
    pub fn new() -> Self {
        Self
    }
}

impl BundleResourceProvider for StubBundle {
    fn url_for_resource(&self, name: &str, extension: &str) -> Result<Location, BundleError> {
        Err(BundleError::ResourceNotFound {
            name: name.to_string(),
            extension: extension.to_string(),
        })
    }

    fn extract_identifier(&self) -> Result<String, BundleError> {
        Err(BundleError::IdentifierMissing)
    }

    fn extract_name(&self) -> Result<String, BundleError> {
        Err(BundleError::NameMissing)
    }

    fn extract_short_version_string(&self) -> Result<SemanticVersion, BundleError> {
        Err(BundleError::VersionStringMissing)
    }

    fn extract_build_number(&self) -> Result<f64, BundleError> {
        Err(BundleError::BuildNumberMissing)
    }
}
