//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create an acquisition error for the named resource
    #[must_use]
    pub fn acquisition(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Acquisition {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create an error for a slot whose resource is gone
    #[must_use]
    pub fn resource_released(slot: u64) -> Self {
        Error::ResourceReleased { slot }
    }

    /// Create an error for a slot read with the wrong type
    #[must_use]
    pub fn type_mismatch(slot: u64, expected: &'static str) -> Self {
        Error::TypeMismatch { slot, expected }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Whether this error means the scope body never ran
    #[must_use]
    pub fn is_acquisition(&self) -> bool {
        matches!(self, Error::Acquisition { .. })
    }
}
