use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Symbolic role of a well-known directory, resolved to a concrete
/// [`super::Location`] by [`super::FileSystem::url_for_directory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSystemDirectory {
    Documents,
    Caches,
    ApplicationSupport,
    Temporary,
    Downloads,
    Home,
}

impl FileSystemDirectory {
    pub const ALL: [FileSystemDirectory; 6] = [
        FileSystemDirectory::Documents,
        FileSystemDirectory::Caches,
        FileSystemDirectory::ApplicationSupport,
        FileSystemDirectory::Temporary,
        FileSystemDirectory::Downloads,
        FileSystemDirectory::Home,
    ];

    /// Stable lowercase name, also used as the folder name under a directory root.
    pub fn name(&self) -> &'static str {
        match self {
            FileSystemDirectory::Documents => "documents",
            FileSystemDirectory::Caches => "caches",
            FileSystemDirectory::ApplicationSupport => "application_support",
            FileSystemDirectory::Temporary => "temporary",
            FileSystemDirectory::Downloads => "downloads",
            FileSystemDirectory::Home => "home",
        }
    }

    /// Where the platform keeps this directory, if it has one.
    pub(crate) fn platform_path(&self) -> Option<PathBuf> {
        match self {
            FileSystemDirectory::Documents => dirs::document_dir(),
            FileSystemDirectory::Caches => dirs::cache_dir(),
            FileSystemDirectory::ApplicationSupport => dirs::data_dir(),
            FileSystemDirectory::Temporary => Some(std::env::temp_dir()),
            FileSystemDirectory::Downloads => dirs::download_dir(),
            FileSystemDirectory::Home => dirs::home_dir(),
        }
    }
}

impl fmt::Display for FileSystemDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
