//! Positional state: `use_state` and `use_reducer`.
//!
//! Both claim one slot holding an `Rc<RefCell<S>>`. The returned mutation
//! handle ([`Setter`] / [`Dispatch`]) owns that cell directly, an explicit
//! reference into the slot store rather than an index it would have to
//! re-resolve, plus a weak handle to the runtime for triggering the next
//! pass. Handles stay valid across passes and can be moved into event
//! callbacks freely.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::runtime::{RuntimeInner, SlotKind, with_current};

/// Mutation handle for a state slot.
///
/// `set` overwrites the slot and requests a render pass. There is no
/// equality short-circuit: setting a value equal to the current one still
/// re-renders.
pub struct Setter<T> {
    cell: Rc<RefCell<T>>,
    runtime: Weak<RuntimeInner>,
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Setter {
            cell: self.cell.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T: 'static> Setter<T> {
    pub fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
        self.rerender();
    }

    /// In-place mutation for state that is cheap to edit but expensive to
    /// rebuild. Re-renders unconditionally, like `set`.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.cell.borrow_mut());
        self.rerender();
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.cell.borrow().clone()
    }

    fn rerender(&self) {
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.request_render();
        }
    }
}

/// Positional state. First call at a call site allocates the slot with
/// `init()`; every call clones out the current value.
pub fn use_state<T: Clone + 'static>(init: impl FnOnce() -> T) -> (T, Setter<T>) {
    with_current("use_state", |rt| {
        let cell: Rc<RefCell<T>> =
            rt.claim(SlotKind::State, || Rc::new(RefCell::new(init())));
        let value = cell.borrow().clone();
        let setter = Setter {
            cell,
            runtime: Rc::downgrade(rt),
        };
        (value, setter)
    })
}

/// Mutation handle for a reducer slot: feeds actions through the reducer
/// and writes the result back to the slot.
pub struct Dispatch<S, A> {
    cell: Rc<RefCell<S>>,
    reducer: Rc<dyn Fn(&S, A) -> S>,
    runtime: Weak<RuntimeInner>,
}

impl<S, A> Clone for Dispatch<S, A> {
    fn clone(&self) -> Self {
        Dispatch {
            cell: self.cell.clone(),
            reducer: self.reducer.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<S: 'static, A> Dispatch<S, A> {
    /// Computes `reducer(&current, action)`, stores it, and requests a
    /// render pass. A panicking reducer propagates to the caller and leaves
    /// the slot unchanged.
    pub fn dispatch(&self, action: A) {
        let next = {
            let current = self.cell.borrow();
            (self.reducer)(&current, action)
        };
        *self.cell.borrow_mut() = next;
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.request_render();
        }
    }
}

/// Reducer-style state transitions over the same slot mechanics as
/// [`use_state`].
pub fn use_reducer<S, A, R>(reducer: R, init: impl FnOnce() -> S) -> (S, Dispatch<S, A>)
where
    S: Clone + 'static,
    A: 'static,
    R: Fn(&S, A) -> S + 'static,
{
    with_current("use_reducer", |rt| {
        let cell: Rc<RefCell<S>> =
            rt.claim(SlotKind::Reducer, || Rc::new(RefCell::new(init())));
        let state = cell.borrow().clone();
        let dispatch = Dispatch {
            cell,
            reducer: Rc::new(reducer),
            runtime: Rc::downgrade(rt),
        };
        (state, dispatch)
    })
}

/// Reducer slot without a reducer: dispatching an action stores the action
/// itself as the new state, which pins the action type to the state type,
/// so the handle is a plain [`Setter`].
pub fn use_reducer_raw<S: Clone + 'static>(init: impl FnOnce() -> S) -> (S, Setter<S>) {
    with_current("use_reducer", |rt| {
        let cell: Rc<RefCell<S>> =
            rt.claim(SlotKind::Reducer, || Rc::new(RefCell::new(init())));
        let state = cell.borrow().clone();
        let setter = Setter {
            cell,
            runtime: Rc::downgrade(rt),
        };
        (state, setter)
    })
}
