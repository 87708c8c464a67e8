//! Scoped resource registry
//!
//! Binds resources to lexical scopes and guarantees each one's cleanup runs
//! exactly once, innermost first, however the scope is left.
//!
//! Two renditions are provided:
//!
//! - **`frame`**: an explicit lifetime chain owned by a [`Frame`]. Scopes
//!   push onto it and restore it on exit; [`Frame::safe_return`] unwinds
//!   every open scope of the invocation at once.
//! - **`guard`**: plain RAII guards whose release runs from `Drop`.

pub mod chain;
pub mod entry;
pub mod frame;
pub mod guard;
pub mod logging;

pub use chain::{LifetimeChain, SlotId, Snapshot};
pub use entry::ResourceEntry;
pub use frame::{Frame, Slot};
pub use guard::{guard, with_guard, ScopeGuard};
