//! Integer allocation used by the demo scenarios.
//!
//! The global allocator aborts the process when it runs out of memory, so
//! `alloc_int` never hands back a missing value. `try_alloc_int` stands in
//! for an allocator that can report failure.

use raii_core::{Error, Result};

/// Allocate a heap integer holding `value`
pub fn alloc_int(value: i32) -> Box<i32> {
    Box::new(value)
}

/// Allocate a heap integer, or fail when `available` is false
pub fn try_alloc_int(name: &str, value: i32, available: bool) -> Result<Box<i32>> {
    if !available {
        return Err(Error::acquisition(name, "allocator returned no memory"));
    }
    Ok(alloc_int(value))
}
