use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Arc;

use foundation_base::{ErrorKind, FoundationError, FoundationResult};
use parking_lot::Mutex;

use super::directory::FileSystemDirectory;
use super::location::Location;
use super::traits::{FileSystem, WriteOptions};

/* 📖 # Why one mutex around files and directories?

Moves and copies re-key entries in both maps at once. Holding a single lock for the
whole State keeps the two maps consistent with each other, so a concurrent reader
never sees a file whose parent directory has not arrived yet.

Any location without a parent (the filesystem root) always counts as a directory.
*/

#[derive(Debug, Default)]
struct State {
    files: HashMap<Location, Vec<u8>>,
    directories: HashSet<Location>,
    unavailable: HashSet<FileSystemDirectory>,
}

impl State {
    fn is_dir(&self, location: &Location) -> bool {
        location.parent().is_none() || self.directories.contains(location)
    }

    fn exists(&self, location: &Location) -> bool {
        self.files.contains_key(location) || self.is_dir(location)
    }

    fn parent_is_dir(&self, location: &Location) -> bool {
        location.parent().is_some_and(|parent| self.is_dir(&parent))
    }

    fn insert_directory_chain(&mut self, location: &Location) {
        let mut current = Some(location.clone());
        while let Some(dir) = current {
            if dir.parent().is_none() {
                break;
            }
            current = dir.parent();
            self.directories.insert(dir);
        }
    }
}

/// Rewrites `key` from under `from` to the same relative spot under `to`.
fn rebase(key: &Location, from: &Location, to: &Location) -> Option<Location> {
    let relative = key.as_path().strip_prefix(from.as_path()).ok()?;
    if relative.as_os_str().is_empty() {
        Some(to.clone())
    } else {
        Some(to.join(relative))
    }
}

fn file_error(location: &Location, kind: io::ErrorKind, message: &str) -> Box<FoundationError> {
    Box::new(FoundationError::file(
        location.as_path(),
        io::Error::new(kind, message.to_string()),
    ))
}

fn transfer_error(
    from: &Location,
    to: &Location,
    kind: io::ErrorKind,
    message: &str,
) -> Box<FoundationError> {
    Box::new(FoundationError::new(ErrorKind::TransferError {
        from: from.as_path().to_path_buf(),
        to: to.as_path().to_path_buf(),
        source: io::Error::new(kind, message.to_string()),
    }))
}

/// In-memory FileSystem implementation for testing.
///
/// Stores file contents in a HashMap and tracks directories in a HashSet, without
/// touching the real filesystem. Logical directories resolve to `/mock/<name>`.
/// Clones share the same state.
///
/// # Examples
///
/// ```
/// use foundation_deps::file_system::{FileSystem, Location, MockFileSystem};
///
/// let mock = MockFileSystem::new();
/// mock.add_file(Location::from("/data/test.txt"), b"content".to_vec());
/// let content = mock.read_to_string(&Location::from("/data/test.txt")).unwrap();
/// assert_eq!(content, "content");
/// assert!(mock.folder_exists(&Location::from("/data")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<State>>,
}

impl MockFileSystem {
    /// Location under which logical directories are resolved.
    pub const ROOT: &'static str = "/mock";

    /// Create a new empty MockFileSystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating any missing parent directories.
    pub fn add_file(&self, location: Location, content: Vec<u8>) {
        let mut state = self.state.lock();
        if let Some(parent) = location.parent() {
            state.insert_directory_chain(&parent);
        }
        state.files.insert(location, content);
    }

    /// Add a directory and any missing parents.
    pub fn add_directory(&self, location: Location) {
        self.state.lock().insert_directory_chain(&location);
    }

    /// Make [`FileSystem::url_for_directory`] fail for `directory`.
    pub fn mark_unavailable(&self, directory: FileSystemDirectory) {
        self.state.lock().unavailable.insert(directory);
    }

    /// Number of files currently stored.
    pub fn file_count(&self) -> usize {
        self.state.lock().files.len()
    }
}

impl FileSystem for MockFileSystem {
    fn file_exists(&self, location: &Location) -> bool {
        self.state.lock().files.contains_key(location)
    }

    fn folder_exists(&self, location: &Location) -> bool {
        self.state.lock().is_dir(location)
    }

    fn create_directory(&self, location: &Location) -> FoundationResult<()> {
        let mut state = self.state.lock();
        for ancestor in location.as_path().ancestors() {
            let ancestor = Location::from(ancestor);
            if state.files.contains_key(&ancestor) {
                let kind = if &ancestor == location {
                    io::ErrorKind::AlreadyExists
                } else {
                    io::ErrorKind::NotADirectory
                };
                return Err(Box::new(FoundationError::new(
                    ErrorKind::DirectoryCreation {
                        path: location.as_path().to_path_buf(),
                        source: io::Error::new(kind, format!("{} is a file", ancestor)),
                    },
                )));
            }
        }
        state.insert_directory_chain(location);
        Ok(())
    }

    fn delete_location(&self, location: &Location) -> FoundationResult<()> {
        let mut state = self.state.lock();
        if state.files.remove(location).is_some() {
            return Ok(());
        }
        if !state.is_dir(location) {
            return Err(file_error(
                location,
                io::ErrorKind::NotFound,
                "no such file or directory",
            ));
        }
        state.files.retain(|key, _| !key.starts_with(location));
        state.directories.retain(|key| !key.starts_with(location));
        Ok(())
    }

    fn move_resource(&self, from: &Location, to: &Location) -> FoundationResult<()> {
        let mut state = self.state.lock();
        check_transfer(&state, from, to)?;

        if let Some(content) = state.files.remove(from) {
            state.files.insert(to.clone(), content);
            return Ok(());
        }

        let moved_files: Vec<Location> = state
            .files
            .keys()
            .filter(|key| key.starts_with(from))
            .cloned()
            .collect();
        for key in moved_files {
            if let (Some(content), Some(target)) = (state.files.remove(&key), rebase(&key, from, to))
            {
                state.files.insert(target, content);
            }
        }
        let moved_dirs: Vec<Location> = state
            .directories
            .iter()
            .filter(|key| key.starts_with(from))
            .cloned()
            .collect();
        for key in moved_dirs {
            state.directories.remove(&key);
            if let Some(target) = rebase(&key, from, to) {
                state.directories.insert(target);
            }
        }
        Ok(())
    }

    fn copy_resource(&self, from: &Location, to: &Location) -> FoundationResult<()> {
        let mut state = self.state.lock();
        check_transfer(&state, from, to)?;

        let copied_files: Vec<(Location, Vec<u8>)> = state
            .files
            .iter()
            .filter_map(|(key, content)| {
                rebase(key, from, to).map(|target| (target, content.clone()))
            })
            .collect();
        let copied_dirs: Vec<Location> = state
            .directories
            .iter()
            .filter_map(|key| rebase(key, from, to))
            .collect();
        state.files.extend(copied_files);
        state.directories.extend(copied_dirs);
        Ok(())
    }

    fn write(&self, data: &[u8], location: &Location, options: WriteOptions) -> FoundationResult<()> {
        let mut state = self.state.lock();
        if state.is_dir(location) {
            return Err(file_error(
                location,
                io::ErrorKind::IsADirectory,
                "is a directory",
            ));
        }
        if !state.parent_is_dir(location) {
            return Err(file_error(
                location,
                io::ErrorKind::NotFound,
                "parent directory does not exist",
            ));
        }
        if options.without_overwriting && state.files.contains_key(location) {
            return Err(file_error(
                location,
                io::ErrorKind::AlreadyExists,
                "file already exists",
            ));
        }
        state.files.insert(location.clone(), data.to_vec());
        Ok(())
    }

    fn read(&self, location: &Location) -> FoundationResult<Vec<u8>> {
        let state = self.state.lock();
        match state.files.get(location) {
            Some(content) => Ok(content.clone()),
            None if state.is_dir(location) => Err(file_error(
                location,
                io::ErrorKind::IsADirectory,
                "is a directory",
            )),
            None => Err(file_error(
                location,
                io::ErrorKind::NotFound,
                "no such file",
            )),
        }
    }

    fn url_for_directory(&self, directory: FileSystemDirectory) -> FoundationResult<Location> {
        if self.state.lock().unavailable.contains(&directory) {
            return Err(Box::new(FoundationError::new(
                ErrorKind::DirectoryUnavailable {
                    directory: directory.name().to_string(),
                },
            )));
        }
        let location = Location::from(Self::ROOT).join(directory.name());
        self.create_directory(&location)?;
        Ok(location)
    }
}

/// Shared preconditions of move and copy.
fn check_transfer(state: &State, from: &Location, to: &Location) -> FoundationResult<()> {
    if !state.exists(from) {
        return Err(transfer_error(from, to, io::ErrorKind::NotFound, "source does not exist"));
    }
    if state.exists(to) {
        return Err(transfer_error(
            from,
            to,
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        ));
    }
    if to.starts_with(from) {
        return Err(transfer_error(
            from,
            to,
            io::ErrorKind::InvalidInput,
            "destination is inside the source",
        ));
    }
    if !state.parent_is_dir(to) {
        return Err(transfer_error(
            from,
            to,
            io::ErrorKind::NotFound,
            "destination parent does not exist",
        ));
    }
    Ok(())
}
