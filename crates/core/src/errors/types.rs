//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for raii operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for raii operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resource could not be acquired, so its scope was never entered
    Acquisition { resource: String, message: String },

    /// A slot was read after its resource had been released
    ResourceReleased { slot: u64 },

    /// A slot was read as a different type than it was acquired with.
    ///
    /// Slots are only minted for the entry's own type, so this never fires
    /// through `Frame`; it keeps the downcast failure out of a panic.
    TypeMismatch { slot: u64, expected: &'static str },

    /// Configuration errors
    Configuration { message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}
