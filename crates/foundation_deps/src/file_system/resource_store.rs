use foundation_base::{ErrorKind, FoundationError, FoundationResult, ResultExt};
use relative_path::{Component, RelativePath};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::directory::FileSystemDirectory;
use super::location::Location;
use super::traits::{FileSystemHandle, WriteOptions};

/// Typed JSON resources and raw data files kept in one folder.
///
/// The folder is a resolved [`FileSystemDirectory`], optionally narrowed to a
/// subfolder. Resource names are relative paths and may contain `/`, but must stay
/// inside the folder.
///
/// # Examples
///
/// ```
/// use foundation_deps::file_system::{
///     FileSystemDirectory, FileSystemHandle, MockFileSystem, ResourceStore,
/// };
///
/// let fs = FileSystemHandle::new(MockFileSystem::new());
/// let store = ResourceStore::open(fs, FileSystemDirectory::Caches, Some("feeds")).unwrap();
/// store.save_resource(&vec![1, 2, 3], "ids.json").unwrap();
/// let ids: Vec<i32> = store.load_resource("ids.json").unwrap();
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceStore {
    file_system: FileSystemHandle,
    folder: Location,
}

impl ResourceStore {
    /// Resolve `directory`, then create `subfolder` beneath it if given.
    #[instrument(skip(file_system))]
    pub fn open(
        file_system: FileSystemHandle,
        directory: FileSystemDirectory,
        subfolder: Option<&str>,
    ) -> FoundationResult<Self> {
        let mut folder = file_system
            .url_for_directory(directory)
            .with_context(|| format!("Failed to open resource store in {}", directory))?;
        if let Some(subfolder) = subfolder {
            folder = folder.join(validate_name(subfolder)?);
            file_system.create_directory(&folder)?;
        }
        debug!(folder = %folder, "resource store ready");
        Ok(Self {
            file_system,
            folder,
        })
    }

    pub fn folder(&self) -> &Location {
        &self.folder
    }

    /// Location of the resource `name`, without touching the file system.
    pub fn location_for(&self, name: &str) -> FoundationResult<Location> {
        Ok(self.folder.join(validate_name(name)?))
    }

    /// Encode `value` as JSON and write it to `name`.
    #[instrument(skip(self, value))]
    pub fn save_resource<T: Serialize>(&self, value: &T, name: &str) -> FoundationResult<()> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| {
            Box::new(FoundationError::new(ErrorKind::Encoding {
                name: name.to_string(),
                source: Box::new(e),
            }))
        })?;
        self.save_data(&bytes, name)
    }

    /// Read `name` and decode it from JSON.
    #[instrument(skip(self))]
    pub fn load_resource<T: DeserializeOwned>(&self, name: &str) -> FoundationResult<T> {
        let location = self.location_for(name)?;
        let bytes = self.file_system.read(&location)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Box::new(FoundationError::new(ErrorKind::Decoding {
                path: location.into_path_buf(),
                source: Box::new(e),
            }))
        })
    }

    #[instrument(skip(self))]
    pub fn delete_resource(&self, name: &str) -> FoundationResult<()> {
        let location = self.location_for(name)?;
        self.file_system.delete_location(&location)
    }

    /// Load `name`, apply `update`, and save the result.
    ///
    /// Not atomic: a concurrent writer between the load and the save is overwritten.
    pub fn update_resource<T, F>(&self, name: &str, update: F) -> FoundationResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let mut value = self
            .load_resource(name)
            .with_context(|| format!("Failed to update resource '{}'", name))?;
        update(&mut value);
        self.save_resource(&value, name)?;
        Ok(value)
    }

    /// Atomically write raw bytes to `name`, creating intermediate folders.
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub fn save_data(&self, data: &[u8], name: &str) -> FoundationResult<()> {
        let location = self.location_for(name)?;
        if let Some(parent) = location.parent() {
            if parent != self.folder {
                self.file_system.create_directory(&parent)?;
            }
        }
        self.file_system.write(data, &location, WriteOptions::ATOMIC)
    }

    pub fn load_data(&self, name: &str) -> FoundationResult<Vec<u8>> {
        let location = self.location_for(name)?;
        self.file_system.read(&location)
    }
}

/// Normalizes `name`, rejecting names that are empty or leave the folder.
fn validate_name(name: &str) -> FoundationResult<String> {
    let invalid = || {
        Box::new(FoundationError::new(ErrorKind::InvalidResourceName {
            name: name.to_string(),
        }))
    };
    if name.starts_with('/') || name.contains('\\') {
        return Err(invalid());
    }
    let normalized = RelativePath::new(name).normalize();
    match normalized.components().next() {
        None | Some(Component::ParentDir) => Err(invalid()),
        Some(_) => Ok(normalized.into_string()),
    }
}
