use std::sync::Arc;

use foundation_base::BundleError;

use super::version::SemanticVersion;
use crate::file_system::Location;

/// Resource lookup and metadata of an application bundle.
///
/// Every accessor is independently fallible; callers that can live without a value
/// fall back to their own default.
pub trait BundleResourceProvider: std::fmt::Debug + Send + Sync + 'static {
    /// Location of the resource `name.extension`. An empty extension matches `name` as is.
    fn url_for_resource(&self, name: &str, extension: &str) -> Result<Location, BundleError>;

    /// The bundle identifier, e.g. `com.example.notes`.
    fn extract_identifier(&self) -> Result<String, BundleError>;

    /// The display name.
    fn extract_name(&self) -> Result<String, BundleError>;

    /// The short version string, parsed as a semantic version.
    fn extract_short_version_string(&self) -> Result<SemanticVersion, BundleError>;

    /// The build number as a real number.
    fn extract_build_number(&self) -> Result<f64, BundleError>;
}

/// Handle to a BundleResourceProvider implementation, enabling shared ownership.
#[derive(Debug, Clone)]
pub struct BundleHandle(Arc<dyn BundleResourceProvider>);

impl BundleHandle {
    pub fn new(bundle: impl BundleResourceProvider) -> Self {
        Self(Arc::new(bundle))
    }
}

impl std::ops::Deref for BundleHandle {
    type Target = dyn BundleResourceProvider;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
