use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use foundation_base::{ErrorKind, FoundationError, FoundationResult};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use super::directory::FileSystemDirectory;
use super::location::Location;
use super::traits::{FileSystem, WriteOptions};

/// Distinguishes staging files written concurrently from one process.
static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// FileSystem implementation backed by the host filesystem via `std::fs`.
///
/// Logical directories resolve to the platform's well-known folders, or to
/// `<root>/<name>` when constructed with [`RealFileSystem::with_directory_root`].
#[derive(Debug, Default)]
pub struct RealFileSystem {
    directory_root: Option<PathBuf>,
}

impl RealFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every logical directory beneath `root` instead of the platform folders.
    pub fn with_directory_root(root: impl Into<PathBuf>) -> Self {
        Self {
            directory_root: Some(root.into()),
        }
    }

    fn file_error(path: &Path, source: io::Error) -> Box<FoundationError> {
        Box::new(FoundationError::file(path, source))
    }

    fn transfer_error(from: &Location, to: &Location, source: io::Error) -> Box<FoundationError> {
        Box::new(FoundationError::new(ErrorKind::TransferError {
            from: from.as_path().to_path_buf(),
            to: to.as_path().to_path_buf(),
            source,
        }))
    }

    /// Refuse to replace an existing destination.
    fn ensure_vacant(from: &Location, to: &Location) -> FoundationResult<()> {
        if fs::symlink_metadata(to.as_path()).is_ok() {
            return Err(Self::transfer_error(
                from,
                to,
                io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
            ));
        }
        Ok(())
    }

    /// Refuse to move or copy a folder into its own subtree. `to` does not exist yet,
    /// so only its parent is canonicalized.
    fn ensure_outside_source(from: &Location, to: &Location) -> FoundationResult<()> {
        let resolved = fs::canonicalize(from.as_path()).ok().zip(
            to.parent()
                .and_then(|parent| fs::canonicalize(parent.as_path()).ok())
                .zip(to.file_name())
                .map(|(parent, name)| parent.join(name)),
        );
        let nested = to.starts_with(from)
            || resolved.is_some_and(|(source, target)| target.starts_with(source));
        if nested {
            return Err(Self::transfer_error(
                from,
                to,
                io::Error::new(io::ErrorKind::InvalidInput, "destination is inside the source"),
            ));
        }
        Ok(())
    }

    fn copy_tree(from: &Path, to: &Path) -> io::Result<()> {
        for entry in WalkDir::new(from) {
            let entry = entry.map_err(io::Error::other)?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(io::Error::other)?;
            let target = to.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn write_atomically(path: &Path, data: &[u8]) -> io::Result<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no file name"))?;
        let staging = path.with_file_name(format!(
            ".{}.{}-{}.tmp",
            file_name.to_string_lossy(),
            std::process::id(),
            STAGING_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&staging, data)?;
        fs::rename(&staging, path).inspect_err(|_| {
            let _ = fs::remove_file(&staging);
        })
    }
}

impl FileSystem for RealFileSystem {
    fn file_exists(&self, location: &Location) -> bool {
        location.as_path().is_file()
    }

    fn folder_exists(&self, location: &Location) -> bool {
        location.as_path().is_dir()
    }

    #[instrument(skip(self), fields(location = %location))]
    fn create_directory(&self, location: &Location) -> FoundationResult<()> {
        fs::create_dir_all(location.as_path()).map_err(|e| {
            Box::new(FoundationError::new(ErrorKind::DirectoryCreation {
                path: location.as_path().to_path_buf(),
                source: e,
            }))
        })?;
        debug!("directory ready");
        Ok(())
    }

    #[instrument(skip(self), fields(location = %location))]
    fn delete_location(&self, location: &Location) -> FoundationResult<()> {
        let path = location.as_path();
        let metadata = fs::symlink_metadata(path).map_err(|e| Self::file_error(path, e))?;
        if metadata.is_dir() {
            fs::remove_dir_all(path).map_err(|e| Self::file_error(path, e))?;
        } else {
            fs::remove_file(path).map_err(|e| Self::file_error(path, e))?;
        }
        debug!(directory = metadata.is_dir(), "location deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(from = %from, to = %to))]
    fn move_resource(&self, from: &Location, to: &Location) -> FoundationResult<()> {
        fs::symlink_metadata(from.as_path()).map_err(|e| Self::transfer_error(from, to, e))?;
        Self::ensure_vacant(from, to)?;
        Self::ensure_outside_source(from, to)?;
        fs::rename(from.as_path(), to.as_path())
            .map_err(|e| Self::transfer_error(from, to, e))?;
        debug!("resource moved");
        Ok(())
    }

    #[instrument(skip(self), fields(from = %from, to = %to))]
    fn copy_resource(&self, from: &Location, to: &Location) -> FoundationResult<()> {
        let metadata =
            fs::metadata(from.as_path()).map_err(|e| Self::transfer_error(from, to, e))?;
        Self::ensure_vacant(from, to)?;
        Self::ensure_outside_source(from, to)?;
        let result = if metadata.is_dir() {
            Self::copy_tree(from.as_path(), to.as_path())
        } else {
            fs::copy(from.as_path(), to.as_path()).map(|_| ())
        };
        result.map_err(|e| Self::transfer_error(from, to, e))?;
        debug!(directory = metadata.is_dir(), "resource copied");
        Ok(())
    }

    #[instrument(skip(self, data), fields(location = %location, len = data.len()))]
    fn write(&self, data: &[u8], location: &Location, options: WriteOptions) -> FoundationResult<()> {
        let path = location.as_path();
        if options.without_overwriting && fs::symlink_metadata(path).is_ok() {
            return Err(Self::file_error(
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "file already exists"),
            ));
        }
        let result = if options.atomic {
            Self::write_atomically(path, data)
        } else if options.without_overwriting {
            fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .and_then(|mut file| file.write_all(data))
        } else {
            fs::write(path, data)
        };
        result.map_err(|e| Self::file_error(path, e))?;
        debug!(atomic = options.atomic, "file written");
        Ok(())
    }

    #[instrument(skip(self), fields(location = %location))]
    fn read(&self, location: &Location) -> FoundationResult<Vec<u8>> {
        let path = location.as_path();
        let data = fs::read(path).map_err(|e| Self::file_error(path, e))?;
        debug!(len = data.len(), "file read");
        Ok(data)
    }

    #[instrument(skip(self))]
    fn url_for_directory(&self, directory: FileSystemDirectory) -> FoundationResult<Location> {
        let path = match &self.directory_root {
            Some(root) => Some(root.join(directory.name())),
            None => directory.platform_path(),
        }
        .ok_or_else(|| {
            Box::new(FoundationError::new(ErrorKind::DirectoryUnavailable {
                directory: directory.name().to_string(),
            }))
        })?;
        let location = Location::from(path);
        self.create_directory(&location)?;
        debug!(resolved = %location, "directory resolved");
        Ok(location)
    }
}
