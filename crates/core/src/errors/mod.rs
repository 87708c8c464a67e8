//! Error types and conversions for raii operations

mod builders;
mod conversions;
mod display;
mod types;

pub use types::{Error, Result};
