//! Resource entries: one live resource paired with the action that finalizes it.
//!
//! The registry stores entries type-erased so a single chain can hold
//! resources of unrelated types. Callers keep their strong typing through
//! [`ResourceEntry::new`] and the typed accessors.

use std::any::{type_name, Any};
use std::fmt;

/// Type-erased view of a resource and its release action.
trait Erased {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn finalize(self: Box<Self>);
}

struct Typed<T, F> {
    value: T,
    release: F,
}

impl<T, F> Erased for Typed<T, F>
where
    T: 'static,
    F: FnOnce(T) + 'static,
{
    fn as_any(&self) -> &dyn Any {
        &self.value
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.value
    }

    fn finalize(self: Box<Self>) {
        let Typed { value, release } = *self;
        release(value);
    }
}

/// A resource under management together with its cleanup.
///
/// Finalizing consumes the entry, so its cleanup can run at most once.
pub struct ResourceEntry {
    label: String,
    type_name: &'static str,
    inner: Box<dyn Erased>,
}

impl ResourceEntry {
    /// Pair `resource` with the `release` action that consumes it
    pub fn new<T, F>(label: impl Into<String>, resource: T, release: F) -> Self
    where
        T: 'static,
        F: FnOnce(T) + 'static,
    {
        Self {
            label: label.into(),
            type_name: type_name::<T>(),
            inner: Box::new(Typed {
                value: resource,
                release,
            }),
        }
    }

    /// Label used when logging this entry
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the resource's concrete type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the resource if it is a `T`
    pub fn resource<T: 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the resource if it is a `T`
    pub fn resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.inner.as_any_mut().downcast_mut::<T>()
    }

    /// Run the cleanup on the resource
    pub fn finalize(self) {
        tracing::trace!(label = %self.label, resource_type = self.type_name, "finalizing resource");
        self.inner.finalize();
    }
}

impl fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("label", &self.label)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
