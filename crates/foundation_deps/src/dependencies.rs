use foundation_base::FoundationResult;
use tracing::{debug, instrument};

use crate::bundle::{BundleHandle, StubBundle};
use crate::config::DependenciesConfig;
use crate::defaults::{DefaultsHandle, InMemoryDefaults, SuiteDefaults};
use crate::file_system::{
    FileSystemDirectory, FileSystemHandle, MockFileSystem, RealFileSystem, ResourceStore,
};
use crate::log::{LogClient, Logger};

/* 📖 # Why an explicit Dependencies value instead of a global registry?

Application code receives one Dependencies value and clones it into whatever needs
platform services. Tests build `Dependencies::test()` and override single clients
with the `with_*` methods, so two tests in one process never share a hidden
registry entry.

The log client is derived from the bundle, so replacing the bundle rebuilds it.
*/

/// One handle per platform client. Cloning is cheap and clones share the clients.
#[derive(Debug, Clone)]
pub struct Dependencies {
    defaults: DefaultsHandle,
    file_system: FileSystemHandle,
    bundle: BundleHandle,
    log: LogClient,
}

impl Dependencies {
    pub fn new(defaults: DefaultsHandle, file_system: FileSystemHandle, bundle: BundleHandle) -> Self {
        let log = LogClient::new(bundle.clone());
        Self {
            defaults,
            file_system,
            bundle,
            log,
        }
    }

    /// Platform-backed clients.
    ///
    /// Build `bundle` with `main_bundle!()` in the application crate so it carries
    /// that crate's metadata.
    #[instrument(skip(bundle))]
    pub fn live(config: &DependenciesConfig, bundle: BundleHandle) -> Self {
        let defaults = match &config.preferences_dir {
            Some(dir) => SuiteDefaults::in_directory(&config.suite_name, dir),
            None => SuiteDefaults::new(&config.suite_name),
        };
        let file_system = match &config.directory_root {
            Some(root) => RealFileSystem::with_directory_root(root),
            None => RealFileSystem::new(),
        };
        debug!(
            partition = ?defaults.partition_path(),
            "live dependencies ready"
        );
        Self::new(
            DefaultsHandle::new(defaults),
            FileSystemHandle::new(file_system),
            bundle,
        )
    }

    /// In-memory preferences, a mock file system and a stub bundle.
    pub fn test() -> Self {
        Self::new(
            DefaultsHandle::new(InMemoryDefaults::new()),
            FileSystemHandle::new(MockFileSystem::new()),
            BundleHandle::new(StubBundle::new()),
        )
    }

    pub fn with_defaults(mut self, defaults: DefaultsHandle) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_file_system(mut self, file_system: FileSystemHandle) -> Self {
        self.file_system = file_system;
        self
    }

    /// Replace the bundle, and with it the log client's subsystem.
    pub fn with_bundle(mut self, bundle: BundleHandle) -> Self {
        self.log = LogClient::new(bundle.clone());
        self.bundle = bundle;
        self
    }

    pub fn defaults(&self) -> &DefaultsHandle {
        &self.defaults
    }

    pub fn file_system(&self) -> &FileSystemHandle {
        &self.file_system
    }

    pub fn bundle(&self) -> &BundleHandle {
        &self.bundle
    }

    pub fn log(&self) -> &LogClient {
        &self.log
    }

    /// Shorthand for `self.log().logger(category)`.
    pub fn logger(&self, category: impl Into<String>) -> Logger {
        self.log.logger(category)
    }

    /// Open a [`ResourceStore`] over this context's file system.
    pub fn resource_store(
        &self,
        directory: FileSystemDirectory,
        subfolder: Option<&str>,
    ) -> FoundationResult<ResourceStore> {
        ResourceStore::open(self.file_system.clone(), directory, subfolder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{Bundle, InfoDictionary};
    use crate::defaults::{DefaultsStore, DefaultsValue};
    use crate::file_system::{FileSystem, Location};
    use crate::log::UNKNOWN_SUBSYSTEM;
    use tempfile::TempDir;

    fn identified_bundle(identifier: &str) -> BundleHandle {
        BundleHandle::new(Bundle::new(
            "/unused",
            InfoDictionary::new().with(InfoDictionary::IDENTIFIER, identifier),
        ))
    }

    #[test]
    fn test_test_dependencies_are_isolated() {
        let first = Dependencies::test();
        let second = Dependencies::test();
        first.defaults().set_bool("onboarded", true);

        assert!(first.defaults().bool("onboarded"));
        assert!(!second.defaults().bool("onboarded"));
    }

    #[test]
    fn test_clones_share_clients() {
        let deps = Dependencies::test();
        let clone = deps.clone();
        clone.defaults().set_int("launches", 3);
        assert_eq!(deps.defaults().int("launches"), 3);
    }

    #[test]
    fn test_test_logger_uses_placeholder_subsystem() {
        let logger = Dependencies::test().logger("tests");
        assert_eq!(logger.subsystem(), UNKNOWN_SUBSYSTEM);
    }

    #[test]
    fn test_with_bundle_rebuilds_log_client() {
        let deps = Dependencies::test().with_bundle(identified_bundle("com.example.notes"));
        assert_eq!(deps.logger("sync").subsystem(), "com.example.notes");
        assert_eq!(
            deps.bundle().extract_identifier().as_deref(),
            Ok("com.example.notes")
        );
    }

    #[test]
    fn test_with_defaults_overrides_only_defaults() {
        let seeded = InMemoryDefaults::with_values([("mode", DefaultsValue::from("dark"))]);
        let deps = Dependencies::test().with_defaults(DefaultsHandle::new(seeded));
        assert_eq!(deps.defaults().string("mode").as_deref(), Some("dark"));
        assert_eq!(deps.logger("any").subsystem(), UNKNOWN_SUBSYSTEM);
    }

    #[test]
    fn test_with_file_system_feeds_resource_store() {
        let mock = MockFileSystem::new();
        let deps = Dependencies::test().with_file_system(FileSystemHandle::new(mock.clone()));

        let store = deps
            .resource_store(FileSystemDirectory::ApplicationSupport, Some("cache"))
            .unwrap();
        store.save_data(b"bytes", "blob.bin").unwrap();
        assert!(mock.file_exists(&Location::from("/mock/application_support/cache/blob.bin")));
    }

    #[test]
    fn test_live_dependencies_under_configured_roots() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let config = DependenciesConfig {
            suite_name: "group.example.live".to_string(),
            preferences_dir: Some(temp_dir.path().join("prefs")),
            directory_root: Some(temp_dir.path().join("files")),
        };
        let deps = Dependencies::live(&config, identified_bundle("com.example.live"));

        deps.defaults().set_string("user", Some("robert"));
        assert!(temp_dir.path().join("prefs/group.example.live.json").is_file());

        let documents = deps
            .file_system()
            .url_for_directory(FileSystemDirectory::Documents)
            .unwrap();
        assert_eq!(documents, Location::from(temp_dir.path().join("files/documents")));
        assert_eq!(deps.logger("live").subsystem(), "com.example.live");

        let reopened = Dependencies::live(&config, BundleHandle::new(StubBundle::new()));
        assert_eq!(reopened.defaults().string("user").as_deref(), Some("robert"));
    }
}
