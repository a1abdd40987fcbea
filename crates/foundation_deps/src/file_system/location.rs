use std::path::{Path, PathBuf};

/// Path-like value naming a file or directory on the host.
///
/// Locations are produced by resolving a [`super::FileSystemDirectory`] and joining
/// names onto the result, so in practice they are absolute.
///
/// # Examples
///
/// ```
/// use foundation_deps::file_system::Location;
///
/// let folder = Location::from("/var/app/documents");
/// let file = folder.join("notes.json");
/// assert_eq!(file.to_string(), "/var/app/documents/notes.json");
/// assert_eq!(file.parent(), Some(folder));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(PathBuf);

impl Location {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Appends a relative segment.
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        Self(self.0.join(segment))
    }

    /// The enclosing location, or `None` at a filesystem root.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|parent| Self(parent.to_path_buf()))
    }

    /// Last path component as UTF-8, when it is valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|name| name.to_str())
    }

    /// True if `self` is `other` or lies inside it.
    pub fn starts_with(&self, other: &Location) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Self(PathBuf::from(s))
    }
}

impl From<String> for Location {
    fn from(s: String) -> Self {
        Self(PathBuf::from(s))
    }
}

impl From<PathBuf> for Location {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

impl From<&Path> for Location {
    fn from(p: &Path) -> Self {
        Self(p.to_path_buf())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for Location {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parent_chain() {
        let location = Location::from("/a/b/c.txt");
        assert_eq!(location.parent(), Some(Location::from("/a/b")));
        assert_eq!(Location::from("/").parent(), None);
    }

    #[test]
    fn test_location_file_name() {
        assert_eq!(Location::from("/a/b/c.txt").file_name(), Some("c.txt"));
        assert_eq!(Location::from("/").file_name(), None);
    }

    #[test]
    fn test_location_starts_with_is_component_wise() {
        let folder = Location::from("/data/cache");
        assert!(Location::from("/data/cache/item").starts_with(&folder));
        assert!(folder.starts_with(&folder));
        assert!(!Location::from("/data/cache2").starts_with(&folder));
    }

    #[test]
    fn test_location_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Location::from("/one"));
        assert!(set.contains(&Location::from("/one")));
        assert!(!set.contains(&Location::from("/two")));
    }
}
