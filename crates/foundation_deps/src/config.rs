use std::path::PathBuf;

use foundation_base::{ErrorKind, FoundationError, FoundationResult, ResultExt};
use serde::Deserialize;

use crate::file_system::{FileSystemHandle, Location};

/// Settings for building the live [`crate::Dependencies`].
///
/// ```toml
/// suite_name = "group.example.notes"
/// preferences_dir = "/var/lib/notes/preferences"   # optional
/// directory_root = "/var/lib/notes/files"          # optional
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependenciesConfig {
    /// Preference partition opened by the live defaults store.
    pub suite_name: String,
    /// Directory holding preference partitions. Defaults to the platform location.
    #[serde(default)]
    pub preferences_dir: Option<PathBuf>,
    /// Resolve every logical directory beneath this root instead of the platform folders.
    #[serde(default)]
    pub directory_root: Option<PathBuf>,
}

impl DependenciesConfig {
    pub fn new(suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            preferences_dir: None,
            directory_root: None,
        }
    }

    pub fn from_toml_str(content: &str) -> FoundationResult<Self> {
        toml::from_str(content).map_err(|e| {
            Box::new(FoundationError::new(ErrorKind::Config {
                source: Box::new(e),
            }))
        })
    }
}

/// Read and parse a TOML config file through `file_system`.
pub fn load_config(
    file_system: &FileSystemHandle,
    location: &Location,
) -> FoundationResult<DependenciesConfig> {
    let content = file_system
        .read_to_string(location)
        .with_context(|| format!("Failed to read config from {}", location))?;
    DependenciesConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config from {}", location))
}
