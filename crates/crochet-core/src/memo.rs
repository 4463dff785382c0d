//! Memoized values and callbacks.
//!
//! Both hooks share one slot mechanic: store `(value, deps)`, and while the
//! dependency list compares equal, hand back a clone of the stored `Rc`:
//! the same allocation every pass, observable with `Rc::ptr_eq`. That
//! referential stability is what lets a consumer skip work when it is given
//! the same value or callback as last time.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::deps::{Deps, same_deps};
use crate::error::HookError;
use crate::runtime::{SlotKind, with_current};

struct MemoEntry {
    value: Rc<dyn Any>,
    deps: Deps,
}

/// Returns the memoized result of `factory`, recomputing only when `deps`
/// changed since the previous pass. `factory` runs exactly once per distinct
/// dependency value.
pub fn use_memo<T: 'static>(deps: Deps, factory: impl FnOnce() -> T) -> Rc<T> {
    let (value, index) = memo_slot(SlotKind::Memo, deps, move || Rc::new(factory()));
    match value.downcast::<T>() {
        Ok(value) => value,
        Err(_) => panic!(
            "{}",
            HookError::SlotTypeMismatch {
                index,
                hook: "use_memo",
            }
        ),
    }
}

/// Returns the same `Rc<F>` across passes while `deps` compare equal; a
/// changed list replaces the stored callback with this pass's `f`.
pub fn use_callback<F: 'static>(deps: Deps, f: F) -> Rc<F> {
    let (value, index) = memo_slot(SlotKind::Callback, deps, move || Rc::new(f));
    match value.downcast::<F>() {
        Ok(value) => value,
        Err(_) => panic!(
            "{}",
            HookError::SlotTypeMismatch {
                index,
                hook: "use_callback",
            }
        ),
    }
}

fn memo_slot(
    kind: SlotKind,
    deps: Deps,
    compute: impl FnOnce() -> Rc<dyn Any>,
) -> (Rc<dyn Any>, usize) {
    with_current(kind.hook_name(), |rt| {
        let index = rt.cursor();
        let entry: Rc<RefCell<Option<MemoEntry>>> = rt.claim(kind, || Rc::new(RefCell::new(None)));
        let mut entry = entry.borrow_mut();
        let value = match entry.as_mut() {
            Some(stored) if same_deps(&stored.deps, &deps) => stored.value.clone(),
            Some(stored) => {
                stored.value = compute();
                stored.deps = deps;
                stored.value.clone()
            }
            None => {
                let value = compute();
                *entry = Some(MemoEntry {
                    value: value.clone(),
                    deps,
                });
                value
            }
        };
        (value, index)
    })
}
