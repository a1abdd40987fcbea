use std::sync::Arc;

use foundation_base::{FoundationError, FoundationResult};

use super::directory::FileSystemDirectory;
use super::location::Location;

/// How [`FileSystem::write`] replaces the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write to a temporary sibling, then rename it over the target.
    pub atomic: bool,
    /// Fail if the target already exists.
    pub without_overwriting: bool,
}

impl WriteOptions {
    pub const ATOMIC: WriteOptions = WriteOptions {
        atomic: true,
        without_overwriting: false,
    };

    pub const WITHOUT_OVERWRITING: WriteOptions = WriteOptions {
        atomic: false,
        without_overwriting: true,
    };
}

/* 📖 # Why does delete_location fail for a missing location?

A missing target usually means the caller's idea of the disk is out of date, which is
worth surfacing. Both implementations return a FileError whose source has
io::ErrorKind::NotFound; callers that want "delete if present" check
`error.io_kind()` and ignore NotFound.
*/

/// Trait-based abstraction over file and folder operations.
///
/// Two implementations are provided:
/// - `RealFileSystem`: the host filesystem via `std::fs`
/// - `MockFileSystem`: in-memory implementation for testing
///
/// No operation retries internally.
pub trait FileSystem: std::fmt::Debug + Send + Sync + 'static {
    /// True if a regular file exists at `location`.
    fn file_exists(&self, location: &Location) -> bool;

    /// True if a directory exists at `location`.
    fn folder_exists(&self, location: &Location) -> bool;

    /// Create a directory and any missing parents.
    ///
    /// Succeeds if the directory already exists; fails with
    /// `ErrorKind::DirectoryCreation` if a file is in the way.
    fn create_directory(&self, location: &Location) -> FoundationResult<()>;

    /// Delete the file or directory (recursively) at `location`.
    fn delete_location(&self, location: &Location) -> FoundationResult<()>;

    /// Move a file or directory. Fails if `to` already exists.
    fn move_resource(&self, from: &Location, to: &Location) -> FoundationResult<()>;

    /// Copy a file or directory (recursively). Fails if `to` already exists.
    fn copy_resource(&self, from: &Location, to: &Location) -> FoundationResult<()>;

    /// Write `data` to the file at `location`. The parent directory must exist.
    fn write(&self, data: &[u8], location: &Location, options: WriteOptions) -> FoundationResult<()>;

    /// Read the entire file at `location`.
    fn read(&self, location: &Location) -> FoundationResult<Vec<u8>>;

    /// Resolve a logical directory to a location, creating it if needed.
    fn url_for_directory(&self, directory: FileSystemDirectory) -> FoundationResult<Location>;

    /// Read entire file contents as a UTF-8 string.
    fn read_to_string(&self, location: &Location) -> FoundationResult<String> {
        let bytes = self.read(location)?;
        String::from_utf8(bytes).map_err(|e| {
            Box::new(FoundationError::file(
                location.as_path(),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            ))
        })
    }
}

/// Handle to a FileSystem implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn FileSystem>` for cheap cloning and thread-safe sharing.
#[derive(Debug, Clone)]
pub struct FileSystemHandle(Arc<dyn FileSystem>);

impl FileSystemHandle {
    /// Create a new FileSystemHandle from a FileSystem implementation.
    pub fn new(file_system: impl FileSystem) -> Self {
        Self(Arc::new(file_system))
    }
}

impl std::ops::Deref for FileSystemHandle {
    type Target = dyn FileSystem;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
