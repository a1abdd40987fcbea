/* 📖 # What does foundation_deps provide?

Narrow, injectable clients over platform services, each with a live implementation
and a test implementation:
- `defaults`: typed key-value preferences (SuiteDefaults / InMemoryDefaults)
- `file_system`: file and folder operations (RealFileSystem / MockFileSystem)
- `bundle`: application metadata and resources (Bundle / StubBundle)
- `log`: loggers scoped to the bundle identifier

`Dependencies` holds one handle per client and is what application code receives.
*/

pub mod bundle;
pub mod config;
pub mod defaults;
pub mod dependencies;
pub mod file_system;
mod file_system_tests;
pub mod log;

pub use config::{DependenciesConfig, load_config};
pub use dependencies::Dependencies;
pub use foundation_base::{BundleError, ErrorKind, FoundationError, FoundationResult, ResultExt};
