//! Core errors and constants for the `raii` workspace.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing the failure modes of acquiring and reading scoped resources.
//! - **`constants`**: Shared static constants such as environment variable names.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{Error, Result},
};
