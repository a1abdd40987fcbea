/* 📖 # What is the file system client?

A trait-based abstraction over file and folder operations, so code that persists data
can be tested against an in-memory implementation:
- `RealFileSystem`: the host filesystem, logical directories mapped to platform folders
- `MockFileSystem`: HashMap-backed, logical directories live under `/mock`

`ResourceStore` sits on top of any FileSystemHandle and stores typed JSON resources
inside one resolved folder.
*/

mod directory;
mod location;
pub mod mock;
pub mod real_fs;
mod resource_store;
mod traits;

pub use directory::FileSystemDirectory;
pub use location::Location;
pub use mock::MockFileSystem;
pub use real_fs::RealFileSystem;
pub use resource_store::ResourceStore;
pub use traits::{FileSystem, FileSystemHandle, WriteOptions};
