//! RAII guards that release a resource when they go out of scope.
//!
//! These lean on the language's own drop order instead of a chain: guards
//! declared later are dropped first, so nested guards release innermost
//! first on every exit path, `return`, `?` and panics included.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Scoped guard that owns a resource and releases it on drop
pub struct ScopeGuard<T, F: FnOnce(T)> {
    // `None` only once the guard has been consumed
    inner: Option<(T, F)>,
}

impl<T, F: FnOnce(T)> ScopeGuard<T, F> {
    /// Create a new scoped guard
    pub fn new(value: T, release: F) -> Self {
        Self {
            inner: Some((value, release)),
        }
    }

    /// Keep the resource, skipping the release
    pub fn into_inner(mut self) -> T {
        match self.inner.take() {
            Some((value, _)) => value,
            None => unreachable!("scope guard consumed twice"),
        }
    }

    /// Drop the resource without running the release
    pub fn dismiss(mut self) {
        self.inner = None;
    }
}

impl<T, F: FnOnce(T)> Deref for ScopeGuard<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.inner {
            Some((value, _)) => value,
            None => unreachable!("scope guard used after being consumed"),
        }
    }
}

impl<T, F: FnOnce(T)> DerefMut for ScopeGuard<T, F> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.inner {
            Some((value, _)) => value,
            None => unreachable!("scope guard used after being consumed"),
        }
    }
}

impl<T, F: FnOnce(T)> Drop for ScopeGuard<T, F> {
    fn drop(&mut self) {
        if let Some((value, release)) = self.inner.take() {
            release(value);
        }
    }
}

impl<T: fmt::Debug, F: FnOnce(T)> fmt::Debug for ScopeGuard<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("value", &self.inner.as_ref().map(|(value, _)| value))
            .finish()
    }
}

/// Create a guard owning `value` that runs `release` on drop
pub fn guard<T, F: FnOnce(T)>(value: T, release: F) -> ScopeGuard<T, F> {
    ScopeGuard::new(value, release)
}

/// Acquire a resource, run `body` with it, then release it.
///
/// The release also runs if `body` panics.
pub fn with_guard<T, R>(
    acquire: impl FnOnce() -> T,
    release: impl FnOnce(T),
    body: impl FnOnce(&mut T) -> R,
) -> R {
    let mut resource = guard(acquire(), release);
    body(&mut resource)
}

/// Run an expression when the enclosing scope ends.
///
/// ```
/// use std::cell::Cell;
/// let closed = Cell::new(false);
/// {
///     raii_scope::defer!(closed.set(true));
///     assert!(!closed.get());
/// }
/// assert!(closed.get());
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _deferred = $crate::guard::guard((), |()| { $($body)*; });
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_scope_guard_releases_on_drop() {
        let released = RefCell::new(Vec::new());

        {
            let mut handle = guard(10, |v| released.borrow_mut().push(v));
            *handle += 1;
            assert!(released.borrow().is_empty());
        }

        assert_eq!(*released.borrow(), vec![11]);
    }

    #[test]
    fn test_scope_guard_into_inner() {
        let released = RefCell::new(false);

        let value = {
            let handle = guard(String::from("kept"), |_| *released.borrow_mut() = true);
            handle.into_inner()
        };

        assert_eq!(value, "kept");
        assert!(!*released.borrow());
    }

    #[test]
    fn test_scope_guard_dismiss() {
        let released = RefCell::new(false);

        {
            let handle = guard((), |()| *released.borrow_mut() = true);
            handle.dismiss();
        }

        assert!(!*released.borrow());
    }

    #[test]
    fn test_nested_guards_release_in_reverse() {
        let order = RefCell::new(Vec::new());

        {
            let _outer = guard("outer", |name| order.borrow_mut().push(name));
            let _inner = guard("inner", |name| order.borrow_mut().push(name));
        }

        assert_eq!(*order.borrow(), vec!["inner", "outer"]);
    }

    #[test]
    fn test_early_return_releases_open_guards() {
        fn foo(order: &RefCell<Vec<&'static str>>) -> i32 {
            let foo = guard(Box::new(40), |_| order.borrow_mut().push("foo"));
            let bar = guard(Box::new(**foo + 2), |_| order.borrow_mut().push("bar"));
            if **bar == 42 {
                return **bar;
            }
            0
        }

        let order = RefCell::new(Vec::new());
        assert_eq!(foo(&order), 42);
        assert_eq!(*order.borrow(), vec!["bar", "foo"]);
    }

    #[test]
    fn test_with_guard_returns_body_value() {
        let released = RefCell::new(None);

        let doubled = with_guard(|| 21, |v| *released.borrow_mut() = Some(v), |v| *v * 2);

        assert_eq!(doubled, 42);
        assert_eq!(*released.borrow(), Some(21));
    }

    #[test]
    fn test_defer_runs_at_scope_end() {
        let hits = RefCell::new(0);
        {
            defer!(*hits.borrow_mut() += 1);
            assert_eq!(*hits.borrow(), 0);
        }
        assert_eq!(*hits.borrow(), 1);
    }
}
