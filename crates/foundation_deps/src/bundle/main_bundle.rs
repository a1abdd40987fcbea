use std::path::{Path, PathBuf};

use foundation_base::{BundleError, FoundationError, FoundationResult};
use tracing::{debug, instrument};

use super::info::InfoDictionary;
use super::traits::BundleResourceProvider;
use super::version::SemanticVersion;
use crate::file_system::Location;

/* 📖 # Where does a bundle's metadata come from?

Outside an Apple toolchain there is no Info.plist to read, so the live Bundle is
given its InfoDictionary up front. `main_bundle!()` fills it from the calling crate's
Cargo metadata at compile time:
- `CARGO_PKG_NAME` becomes `CFBundleName`
- `CARGO_PKG_VERSION` becomes `CFBundleShortVersionString`
- `BUNDLE_IDENTIFIER` and `BUNDLE_BUILD_NUMBER`, if set in the build environment,
  become `CFBundleIdentifier` and `CFBundleVersion`

Resources are looked up in one directory next to the executable.
*/

/// The live application bundle: a resource directory plus its info dictionary.
#[derive(Debug, Clone)]
pub struct Bundle {
    resource_dir: PathBuf,
    info: InfoDictionary,
}

impl Bundle {
    pub fn new(resource_dir: impl Into<PathBuf>, info: InfoDictionary) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            info,
        }
    }

    /// The bundle of the running executable.
    ///
    /// Inside a macOS `.app` the resource directory is `Contents/Resources`; everywhere
    /// else it is the directory holding the executable.
    pub fn main(info: InfoDictionary) -> FoundationResult<Self> {
        let executable = std::env::current_exe().map_err(|e| {
            Box::new(
                FoundationError::file("<current executable>", e)
                    .context("Failed to locate the main bundle"),
            )
        })?;
        let resource_dir = resource_dir_for_executable(&executable);
        debug!(executable = %executable.display(), resource_dir = %resource_dir.display(), "main bundle located");
        Ok(Self::new(resource_dir, info))
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    pub fn info(&self) -> &InfoDictionary {
        &self.info
    }
}

fn resource_dir_for_executable(executable: &Path) -> PathBuf {
    let Some(exe_dir) = executable.parent() else {
        return PathBuf::from(".");
    };
    let contents = exe_dir
        .file_name()
        .filter(|name| *name == "MacOS")
        .and_then(|_| exe_dir.parent())
        .filter(|contents| contents.file_name().is_some_and(|name| name == "Contents"))
        .filter(|contents| {
            contents
                .parent()
                .and_then(Path::extension)
                .is_some_and(|extension| extension == "app")
        });
    match contents {
        Some(contents) => contents.join("Resources"),
        None => exe_dir.to_path_buf(),
    }
}

impl BundleResourceProvider for Bundle {
    #[instrument(skip(self))]
    fn url_for_resource(&self, name: &str, extension: &str) -> Result<Location, BundleError> {
        let not_found = || BundleError::ResourceNotFound {
            name: name.to_string(),
            extension: extension.to_string(),
        };
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(not_found());
        }
        let file_name = if extension.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", name, extension)
        };
        let path = self.resource_dir.join(file_name);
        if !path.is_file() {
            return Err(not_found());
        }
        debug!(path = %path.display(), "resource found");
        Ok(Location::from(path))
    }

    fn extract_identifier(&self) -> Result<String, BundleError> {
        self.info.identifier()
    }

    fn extract_name(&self) -> Result<String, BundleError> {
        self.info.name()
    }

    fn extract_short_version_string(&self) -> Result<SemanticVersion, BundleError> {
        self.info.short_version()
    }

    fn extract_build_number(&self) -> Result<f64, BundleError> {
        self.info.build_number()
    }
}

/// Builds the live [`Bundle`] for the calling crate from its Cargo metadata.
///
/// Expands to a `FoundationResult<Bundle>`.
#[macro_export]
macro_rules! main_bundle {
    () => {
        $crate::bundle::Bundle::main($crate::bundle::InfoDictionary::from_package(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            option_env!("BUNDLE_IDENTIFIER"),
            option_env!("BUNDLE_BUILD_NUMBER"),
        ))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resource_dir_inside_app_bundle() {
        let executable = Path::new("/Applications/Notes.app/Contents/MacOS/notes");
        assert_eq!(
            resource_dir_for_executable(executable),
            PathBuf::from("/Applications/Notes.app/Contents/Resources")
        );
    }

    #[test]
    fn test_resource_dir_next_to_plain_executable() {
        let executable = Path::new("/opt/notes/bin/notes");
        assert_eq!(
            resource_dir_for_executable(executable),
            PathBuf::from("/opt/notes/bin")
        );
        let not_an_app = Path::new("/opt/Notes/Contents/MacOS/notes");
        assert_eq!(
            resource_dir_for_executable(not_an_app),
            PathBuf::from("/opt/Notes/Contents/MacOS")
        );
    }

    #[test]
    fn test_url_for_resource() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(temp_dir.path().join("seed.json"), b"{}").unwrap();
        std::fs::write(temp_dir.path().join("LICENSE"), b"").unwrap();
        let bundle = Bundle::new(temp_dir.path(), InfoDictionary::new());

        assert_eq!(
            bundle.url_for_resource("seed", "json").unwrap(),
            Location::from(temp_dir.path().join("seed.json"))
        );
        assert_eq!(
            bundle.url_for_resource("LICENSE", "").unwrap(),
            Location::from(temp_dir.path().join("LICENSE"))
        );
        assert_eq!(
            bundle.url_for_resource("seed", "toml"),
            Err(BundleError::ResourceNotFound {
                name: "seed".to_string(),
                extension: "toml".to_string(),
            })
        );
        assert!(bundle.url_for_resource("../seed", "json").is_err());
    }

    #[test]
    fn test_metadata_comes_from_info_dictionary() {
        let info = InfoDictionary::new()
            .with(InfoDictionary::IDENTIFIER, "com.example.notes")
            .with(InfoDictionary::SHORT_VERSION, "1.2.3")
            .with(InfoDictionary::BUILD_NUMBER, "99");
        let bundle = Bundle::new("/unused", info);

        assert_eq!(bundle.extract_identifier().as_deref(), Ok("com.example.notes"));
        assert_eq!(bundle.extract_name(), Err(BundleError::NameMissing));
        assert_eq!(
            bundle.extract_short_version_string(),
            Ok(SemanticVersion::new(1, 2, 3))
        );
        assert_eq!(bundle.extract_build_number(), Ok(99.0));
    }

    #[test]
    fn test_main_bundle_macro_uses_package_metadata() {
        let bundle = crate::main_bundle!().unwrap();
        assert_eq!(bundle.extract_name().as_deref(), Ok("foundation_deps"));
        assert_eq!(
            bundle.extract_short_version_string().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }
}
