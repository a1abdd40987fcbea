use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic
 */

/// Boxed error from a collaborator (serializers, config parsers).
pub type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Failures when reading metadata or resources from an application bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// No resource with this name and extension exists in the bundle.
    ResourceNotFound { name: String, extension: String },
    /// The `CFBundleIdentifier` field is absent.
    IdentifierMissing,
    /// The `CFBundleName` field is absent.
    NameMissing,
    /// The `CFBundleShortVersionString` field is absent.
    VersionStringMissing,
    /// The version field is present but is not a semantic version.
    InvalidVersionFormat(String),
    /// The `CFBundleVersion` field is absent or not a number.
    BuildNumberMissing,
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::ResourceNotFound { name, extension } if extension.is_empty() => {
                write!(f, "Resource {} not found in bundle.", name)
            }
            BundleError::ResourceNotFound { name, extension } => {
                write!(f, "Resource {}.{} not found in bundle.", name, extension)
            }
            BundleError::IdentifierMissing => write!(f, "Bundle identifier is missing."),
            BundleError::NameMissing => write!(f, "Bundle name is missing."),
            BundleError::VersionStringMissing => {
                write!(f, "CFBundleShortVersionString is missing from the bundle.")
            }
            BundleError::InvalidVersionFormat(raw) => {
                write!(f, "The version string '{}' is not in a valid format.", raw)
            }
            BundleError::BuildNumberMissing => {
                write!(f, "CFBundleVersion is missing from the bundle.")
            }
        }
    }
}

impl StdError for BundleError {}

/// Error variants that can occur in foundation client operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError { path: PathBuf, source: io::Error },

    /// A directory could not be created, e.g. because a file is in the way
    DirectoryCreation { path: PathBuf, source: io::Error },

    /// Moving or copying between two locations failed
    TransferError {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// A logical directory has no location on this platform
    DirectoryUnavailable { directory: String },

    /// A resource name is empty or escapes its store folder
    InvalidResourceName { name: String },

    /// A value could not be encoded before writing
    Encoding { name: String, source: BoxedSource },

    /// Bytes read from disk could not be decoded
    Decoding { path: PathBuf, source: BoxedSource },

    /// Configuration could not be parsed
    Config { source: BoxedSource },

    /// Bundle metadata or resource lookup failed
    Bundle(BundleError),

    /// Catch-all for other errors with a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::DirectoryCreation { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            ErrorKind::TransferError { from, to, source } => {
                write!(
                    f,
                    "Failed to transfer {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            ErrorKind::DirectoryUnavailable { directory } => {
                write!(f, "Directory '{}' is not available on this platform", directory)
            }
            ErrorKind::InvalidResourceName { name } => {
                write!(f, "Invalid resource name '{}'", name)
            }
            ErrorKind::Encoding { name, source } => {
                write!(f, "Failed to encode resource '{}': {}", name, source)
            }
            ErrorKind::Decoding { path, source } => {
                write!(f, "Failed to decode {}: {}", path.display(), source)
            }
            ErrorKind::Config { source } => write!(f, "Invalid configuration: {}", source),
            ErrorKind::Bundle(error) => write!(f, "{}", error),
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }
}

/* 📖 # Why separate ErrorKind and FoundationError?
This two-layer design provides a clear separation of concerns:
- ErrorKind: structural variants with specific contexts (paths, bundle fields, etc.)
- FoundationError: wraps ErrorKind with context strings, an optional cause and a span trace

Users can pattern match on ErrorKind for specific handling, while FoundationError
provides ergonomic context attachment for propagation.
*/

/// Error type wrapping an [`ErrorKind`] with context, an optional cause and the
/// span trace active when the error was created.
pub struct FoundationError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<FoundationError>>,
    span_trace: SpanTrace,
}

impl FoundationError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a [`ErrorKind::Message`] error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates a [`ErrorKind::FileError`] error.
    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::new(ErrorKind::FileError {
            path: path.into(),
            source,
        })
    }

    /// Attaches context to an error.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that led to this one.
    pub fn caused_by(mut self, cause: FoundationError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context strings, oldest first.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the error recorded with [`FoundationError::caused_by`].
    pub fn cause(&self) -> Option<&FoundationError> {
        self.cause.as_deref()
    }

    /// Returns the span trace captured at construction.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns the bundle error, if this is one.
    pub fn bundle_error(&self) -> Option<&BundleError> {
        match &self.kind {
            ErrorKind::Bundle(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the kind of the underlying I/O error, if there is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match &self.kind {
            ErrorKind::FileError { source, .. }
            | ErrorKind::DirectoryCreation { source, .. }
            | ErrorKind::TransferError { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        let entries = self.context.len() + usize::from(self.cause.is_some());
        for (i, ctx) in self.context.iter().enumerate() {
            let connector = if i + 1 == entries { "└─" } else { "├─" };
            writeln!(f, "{}{} {}", indent, connector, ctx)?;
        }
        if let Some(cause) = &self.cause {
            writeln!(f, "{}└─ cause: {}", indent, cause.kind)?;
            cause.fmt_tree(f, &format!("{}   ", indent))?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for FoundationError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<BundleError> for FoundationError {
    fn from(error: BundleError) -> Self {
        Self::new(ErrorKind::Bundle(error))
    }
}

impl StdError for FoundationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. }
            | ErrorKind::DirectoryCreation { source, .. }
            | ErrorKind::TransferError { source, .. } => Some(source),
            ErrorKind::Encoding { source, .. }
            | ErrorKind::Decoding { source, .. }
            | ErrorKind::Config { source } => Some(source.as_ref()),
            _ => self
                .cause
                .as_deref()
                .map(|cause| cause as &(dyn StdError + 'static)),
        }
    }
}

impl fmt::Display for FoundationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Debug for FoundationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        self.fmt_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/* 📖 # Why use Box<FoundationError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.

*/

/// Standard result type for foundation client operations.
pub type FoundationResult<T> = std::result::Result<T, Box<FoundationError>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    fn context(self, context: impl Into<String>) -> FoundationResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> FoundationResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for FoundationResult<T> {
    fn context(self, context: impl Into<String>) -> FoundationResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> FoundationResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Builds a boxed [`FoundationError`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        ::std::boxed::Box::new($crate::FoundationError::message(format!($($arg)*)))
    };
}

/// Returns early with a boxed [`FoundationError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}
