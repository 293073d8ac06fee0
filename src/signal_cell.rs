//! Signal-backed State Cells
//!
//! Lets the async list/form drivers update component state. Once the
//! owning component unmounts the signal is disposed and late updates are
//! dropped.

use crud_core::StateCell;
use leptos::prelude::*;

pub struct SignalCell<S: Send + Sync + 'static>(RwSignal<S>);

impl<S: Send + Sync + 'static> Clone for SignalCell<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Send + Sync + 'static> Copy for SignalCell<S> {}

impl<S: Send + Sync + 'static> SignalCell<S> {
    pub fn new(state: S) -> Self {
        Self(RwSignal::new(state))
    }

    /// Tracked read, for view closures
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.0.with(f)
    }

    /// Local mutation from an event handler
    pub fn update_state(&self, f: impl FnOnce(&mut S)) {
        self.0.update(f);
    }
}

impl<S: Send + Sync + 'static> StateCell<S> for SignalCell<S> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}
