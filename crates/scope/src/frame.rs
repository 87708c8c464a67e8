//! Frames: the per-invocation owner of a lifetime chain.
//!
//! A [`Frame`] stands for one function invocation. Scopes opened with
//! [`Frame::with`] push onto its chain and restore it on the way out,
//! whichever way the body leaves. [`Frame::safe_return`] unwinds every open
//! scope at once and produces `ControlFlow::Break`, which the enclosing
//! scopes propagate outwards with `?` or by returning it.
//!
//! Frames hold non-`Send` trait objects and so stay on the thread that
//! created them. Each thread or task builds its own.
//!
//! ```
//! use raii_scope::Frame;
//!
//! let res = Frame::run("foo", |frame| {
//!     frame.with(|| Box::new(40), drop, |frame, foo| {
//!         frame.with(|| Box::new(0), drop, |frame, bar| {
//!             *frame[bar] = *frame[foo] + 2;
//!             let res = *frame[bar];
//!             frame.safe_return(res)
//!         })
//!     })
//! });
//! assert_eq!(res, 42);
//! ```

use crate::chain::{LifetimeChain, SlotId, Snapshot};
use crate::entry::ResourceEntry;
use raii_core::{Error, Result, ANONYMOUS_RESOURCE};
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{ControlFlow, Index, IndexMut};
use tracing::{debug, debug_span, trace};

/// Typed handle to a resource bound by [`Frame::with`].
///
/// The registry owns the resource; the slot only names it. Copying a slot
/// or rebinding a variable never changes what gets cleaned up.
pub struct Slot<T> {
    id: SlotId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    fn new(id: SlotId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot<{}>({})", type_name::<T>(), self.id)
    }
}

/// One function invocation's view of its open resources.
pub struct Frame {
    name: &'static str,
    chain: LifetimeChain,
}

/// Puts the chain back to the scope's entry state when the scope ends,
/// including when its body panics.
struct ScopeExit<'a> {
    frame: &'a mut Frame,
    snapshot: Snapshot,
    slot: SlotId,
}

impl Drop for ScopeExit<'_> {
    fn drop(&mut self) {
        let finalized = self.frame.chain.restore(self.snapshot);
        trace!(
            frame = self.frame.name,
            slot = %self.slot,
            finalized,
            depth = self.frame.chain.depth(),
            "scope closed"
        );
    }
}

impl Frame {
    /// Create an empty frame
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            chain: LifetimeChain::new(),
        }
    }

    /// Run `body` in a fresh frame and return its value.
    ///
    /// `Break` carries a value produced by [`Frame::safe_return`];
    /// `Continue` is the value of a body that ran to its end.
    pub fn run<R>(
        name: &'static str,
        body: impl FnOnce(&mut Frame) -> ControlFlow<R, R>,
    ) -> R {
        let span = debug_span!("frame", name);
        let _entered = span.enter();

        let mut frame = Frame::new(name);
        match body(&mut frame) {
            ControlFlow::Break(value) => {
                trace!(frame = name, "frame left by early return");
                value
            }
            ControlFlow::Continue(value) => value,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of scopes currently open
    pub fn depth(&self) -> usize {
        self.chain.depth()
    }

    /// Labels of the open scopes, innermost first
    pub fn pending_labels(&self) -> Vec<&str> {
        self.chain.labels().collect()
    }

    /// The chain state at this point, for comparing against later states
    pub fn snapshot(&self) -> Snapshot {
        self.chain.snapshot()
    }

    /// Open a scope over the value produced by `acquire`.
    ///
    /// `release` runs exactly once, when the body finishes, returns early,
    /// panics, or when a [`Frame::safe_return`] inside it unwinds the chain.
    /// Returning `ControlFlow::Continue` early from the body closure leaves
    /// only this scope.
    pub fn with<T, B, R>(
        &mut self,
        acquire: impl FnOnce() -> T,
        release: impl FnOnce(T) + 'static,
        body: impl FnOnce(&mut Frame, Slot<T>) -> ControlFlow<B, R>,
    ) -> ControlFlow<B, R>
    where
        T: 'static,
    {
        self.with_labeled(ANONYMOUS_RESOURCE, acquire, release, body)
    }

    /// Like [`Frame::with`], naming the resource in logs and
    /// [`Frame::pending_labels`]
    pub fn with_labeled<T, B, R>(
        &mut self,
        label: impl Into<String>,
        acquire: impl FnOnce() -> T,
        release: impl FnOnce(T) + 'static,
        body: impl FnOnce(&mut Frame, Slot<T>) -> ControlFlow<B, R>,
    ) -> ControlFlow<B, R>
    where
        T: 'static,
    {
        let resource = acquire();
        self.enter(ResourceEntry::new(label, resource, release), body)
    }

    /// Open a scope whose acquisition can fail.
    ///
    /// On `Err` nothing is registered, the body never runs and no cleanup
    /// is owed; the error is handed back for the caller to skip the scope.
    pub fn try_with<T, E, B, R>(
        &mut self,
        label: impl Into<String>,
        acquire: impl FnOnce() -> std::result::Result<T, E>,
        release: impl FnOnce(T) + 'static,
        body: impl FnOnce(&mut Frame, Slot<T>) -> ControlFlow<B, R>,
    ) -> std::result::Result<ControlFlow<B, R>, E>
    where
        T: 'static,
    {
        let label = label.into();
        let resource = match acquire() {
            Ok(resource) => resource,
            Err(err) => {
                debug!(frame = self.name, label = %label, "acquisition failed, scope skipped");
                return Err(err);
            }
        };
        Ok(self.enter(ResourceEntry::new(label, resource, release), body))
    }

    fn enter<T, B, R>(
        &mut self,
        entry: ResourceEntry,
        body: impl FnOnce(&mut Frame, Slot<T>) -> ControlFlow<B, R>,
    ) -> ControlFlow<B, R> {
        let snapshot = self.chain.snapshot();
        let id = self.chain.push(entry);
        trace!(frame = self.name, slot = %id, depth = self.chain.depth(), "scope opened");

        let mut exit = ScopeExit {
            frame: self,
            snapshot,
            slot: id,
        };
        body(&mut *exit.frame, Slot::new(id))
    }

    /// Unwind every open scope in this frame, innermost first, and yield
    /// `value` as an early return.
    ///
    /// The result must be returned from the scope body (or propagated
    /// with `?`) so that the enclosing scopes and [`Frame::run`] see it.
    pub fn safe_return<B, R>(&mut self, value: B) -> ControlFlow<B, R> {
        let released = self.chain.drain();
        debug!(frame = self.name, released, "early return unwound open scopes");
        ControlFlow::Break(value)
    }

    /// Borrow a bound resource
    ///
    /// `TypeMismatch` cannot happen for a slot handed out by this frame.
    pub fn try_get<T: 'static>(&self, slot: Slot<T>) -> Result<&T> {
        let entry = self
            .chain
            .find(slot.id)
            .ok_or_else(|| Error::resource_released(slot.id.get()))?;
        entry
            .resource::<T>()
            .ok_or_else(|| Error::type_mismatch(slot.id.get(), type_name::<T>()))
    }

    /// Mutably borrow a bound resource
    pub fn try_get_mut<T: 'static>(&mut self, slot: Slot<T>) -> Result<&mut T> {
        let entry = self
            .chain
            .find_mut(slot.id)
            .ok_or_else(|| Error::resource_released(slot.id.get()))?;
        entry
            .resource_mut::<T>()
            .ok_or_else(|| Error::type_mismatch(slot.id.get(), type_name::<T>()))
    }

    pub fn get<T: 'static>(&self, slot: Slot<T>) -> Option<&T> {
        self.try_get(slot).ok()
    }

    pub fn get_mut<T: 'static>(&mut self, slot: Slot<T>) -> Option<&mut T> {
        self.try_get_mut(slot).ok()
    }
}

/// Panics if the slot's resource has already been released.
impl<T: 'static> Index<Slot<T>> for Frame {
    type Output = T;

    fn index(&self, slot: Slot<T>) -> &T {
        match self.try_get(slot) {
            Ok(resource) => resource,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: 'static> IndexMut<Slot<T>> for Frame {
    fn index_mut(&mut self, slot: Slot<T>) -> &mut T {
        match self.try_get_mut(slot) {
            Ok(resource) => resource,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("name", &self.name)
            .field("chain", &self.chain)
            .finish()
    }
}
