//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Acquisition { resource, message } => {
                write!(f, "failed to acquire '{resource}': {message}")
            }
            Error::ResourceReleased { slot } => {
                write!(f, "resource in slot {slot} has already been released")
            }
            Error::TypeMismatch { slot, expected } => {
                write!(f, "resource in slot {slot} is not a {expected}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
        }
    }
}
