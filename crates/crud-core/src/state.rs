//! State Cells
//!
//! Views keep their state in a cell owned by the mounted component. Async
//! drivers only touch it through `StateCell`, which reports when the owner
//! is gone so late responses are dropped instead of applied.

use std::cell::{Cell, RefCell};

pub trait StateCell<S> {
    /// Run `f` against the state; `None` once the owning view is disposed
    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R>;

    /// Read-only access
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.with_mut(|s| f(s))
    }
}

impl<S> StateCell<S> for RefCell<S> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Plain single-threaded cell that can be disposed like a mounted view
#[derive(Debug, Default)]
pub struct LocalState<S> {
    inner: RefCell<S>,
    disposed: Cell<bool>,
}

impl<S> LocalState<S> {
    pub fn new(state: S) -> Self {
        Self {
            inner: RefCell::new(state),
            disposed: Cell::new(false),
        }
    }

    /// Mark the owner as unmounted
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Snapshot regardless of disposal
    pub fn get(&self) -> S
    where
        S: Clone,
    {
        self.inner.borrow().clone()
    }
}

impl<S> StateCell<S> for LocalState<S> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        if self.disposed.get() {
            return None;
        }
        Some(f(&mut self.inner.borrow_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposed_cell_ignores_updates() {
        let cell = LocalState::new(1u32);
        assert_eq!(cell.with_mut(|v| { *v += 1; *v }), Some(2));

        cell.dispose();
        assert_eq!(cell.with_mut(|v| { *v += 1; *v }), None);
        assert_eq!(cell.get(), 2);
    }
}
