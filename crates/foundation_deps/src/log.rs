use std::fmt::Display;

use tracing::{Span, debug_span};

use crate::bundle::BundleHandle;

/// Subsystem used when the bundle has no identifier.
pub const UNKNOWN_SUBSYSTEM: &str = "Unknown Bundle Identifier";

/// Hands out loggers scoped to the application's bundle identifier.
#[derive(Debug, Clone)]
pub struct LogClient {
    bundle: BundleHandle,
}

impl LogClient {
    pub fn new(bundle: BundleHandle) -> Self {
        Self { bundle }
    }

    /// A logger for `category`, within the bundle identifier's subsystem.
    ///
    /// Never fails: the subsystem falls back to [`UNKNOWN_SUBSYSTEM`].
    pub fn logger(&self, category: impl Into<String>) -> Logger {
        let subsystem = self
            .bundle
            .extract_identifier()
            .unwrap_or_else(|_| UNKNOWN_SUBSYSTEM.to_string());
        Logger {
            subsystem,
            category: category.into(),
        }
    }
}

/// Emits `tracing` events tagged with `subsystem` and `category` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    subsystem: String,
    category: String,
}

impl Logger {
    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn trace(&self, message: impl Display) {
        tracing::trace!(subsystem = %self.subsystem, category = %self.category, "{}", message);
    }

    pub fn debug(&self, message: impl Display) {
        tracing::debug!(subsystem = %self.subsystem, category = %self.category, "{}", message);
    }

    pub fn info(&self, message: impl Display) {
        tracing::info!(subsystem = %self.subsystem, category = %self.category, "{}", message);
    }

    pub fn warn(&self, message: impl Display) {
        tracing::warn!(subsystem = %self.subsystem, category = %self.category, "{}", message);
    }

    pub fn error(&self, message: impl Display) {
        tracing::error!(subsystem = %self.subsystem, category = %self.category, "{}", message);
    }

    /// A span carrying this logger's fields; events inside it inherit the scope.
    pub fn span(&self) -> Span {
        debug_span!("logger", subsystem = %self.subsystem, category = %self.category)
    }
}
