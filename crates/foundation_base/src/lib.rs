/* 📖 # Why have foundation_base as a core library?
foundation_base provides the error type and tracing setup used by every client crate.
Keeping them apart from the clients lets the clients share one error taxonomy without
depending on each other.
*/

pub mod error;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{BundleError, ErrorKind, FoundationError, FoundationResult, ResultExt};
