//! Shared context cells.
//!
//! A [`Context<T>`] is a cloneable handle to one live value cell. Unlike
//! every other hook, reading it claims no slot and does not advance the
//! cursor, and writing it never triggers a render by itself; readers simply
//! observe the most recent write whenever some state update causes them to
//! run again.
//!
//! ```
//! use crochet_core::prelude::*;
//!
//! let theme: Context<&'static str> = context();
//! assert_eq!(use_context(&theme), None);
//!
//! theme.set("dark");
//! assert_eq!(use_context(&theme), Some("dark"));
//!
//! let inner = theme.provide("light", || use_context(&theme));
//! assert_eq!(inner, Some("light"));
//! assert_eq!(use_context(&theme), Some("dark"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

pub struct Context<T> {
    cell: Rc<RefCell<Option<T>>>,
}

impl<T> Clone for Context<T> {
    fn clone(&self) -> Self {
        Context {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Clone + 'static> Context<T> {
    pub fn new() -> Self {
        Context {
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// Writes the live cell. All subsequent reads see this value.
    pub fn set(&self, value: T) {
        *self.cell.borrow_mut() = Some(value);
    }

    pub fn get(&self) -> Option<T> {
        self.cell.borrow().clone()
    }

    /// Scopes `value` over `f`, restoring the previous value on exit (also
    /// on unwind, so a panicking subtree cannot leak its override).
    pub fn provide<R>(&self, value: T, f: impl FnOnce() -> R) -> R {
        struct Restore<'a, T> {
            cell: &'a RefCell<Option<T>>,
            previous: Option<T>,
        }
        impl<T> Drop for Restore<'_, T> {
            fn drop(&mut self) {
                *self.cell.borrow_mut() = self.previous.take();
            }
        }

        let previous = self.cell.borrow_mut().replace(value);
        let _restore = Restore {
            cell: &self.cell,
            previous,
        };
        f()
    }
}

impl<T: Clone + 'static> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an empty context cell.
pub fn context<T: Clone + 'static>() -> Context<T> {
    Context::new()
}

/// Reads the context's current value; `None` if nothing was ever provided.
pub fn use_context<T: Clone + 'static>(context: &Context<T>) -> Option<T> {
    context.get()
}
