//! Deferred side effects gated on dependency lists.
//!
//! `use_effect` and `use_layout_effect` never run their callback during the
//! pass: when the dependency list differs from the one stored in the slot
//! (or on the mounting pass), the callback is queued and handed to the host
//! [`Scheduler`](crate::scheduler::Scheduler) after the pass commits.
//! A callback may return a [`Dispose`] via [`on_cleanup`]; it runs before
//! the next execution of the same slot's effect, and on unmount.
//!
//! ```
//! use crochet_core::{deps, prelude::*};
//!
//! fn status(connected: bool) -> View {
//!     use_effect(deps![connected], move || {
//!         log::info!("connected: {connected}");
//!         on_cleanup(move || log::info!("tearing down ({connected})"))
//!     });
//!     View::text(if connected { "online" } else { "offline" })
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::deps::{Deps, same_deps};
use crate::runtime::{SlotKind, with_current};

/// A teardown that runs at most once, no matter how many handles call it.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }
}

/// Wraps a teardown for returning from an effect callback.
pub fn on_cleanup(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

/// What an effect callback may return: nothing, a [`Dispose`], or
/// `Option<Dispose>` when the teardown is conditional.
pub trait IntoCleanup {
    fn into_cleanup(self) -> Option<Dispose>;
}

impl IntoCleanup for () {
    fn into_cleanup(self) -> Option<Dispose> {
        None
    }
}

impl IntoCleanup for Dispose {
    fn into_cleanup(self) -> Option<Dispose> {
        Some(self)
    }
}

impl IntoCleanup for Option<Dispose> {
    fn into_cleanup(self) -> Option<Dispose> {
        self
    }
}

pub(crate) struct EffectState {
    pub(crate) deps: Option<Deps>,
    pub(crate) cleanup: Option<Dispose>,
}

pub(crate) enum EffectLane {
    Deferred,
    BeforePaint,
}

pub(crate) struct PendingEffect {
    pub(crate) state: Rc<RefCell<EffectState>>,
    pub(crate) lane: EffectLane,
    pub(crate) run: Box<dyn FnOnce() -> Option<Dispose>>,
}

/// Queues `f` for deferred execution when `deps` differ from the previous
/// pass (always, on the mounting pass). Equal deps skip the callback and
/// leave the slot untouched; the cursor still advances.
pub fn use_effect<C: IntoCleanup>(deps: Deps, f: impl FnOnce() -> C + 'static) {
    effect_slot(SlotKind::Effect, EffectLane::Deferred, deps, f);
}

/// Same protocol as [`use_effect`], but queued on the scheduler's urgent
/// lane, intended to run before the host paints the committed view.
pub fn use_layout_effect<C: IntoCleanup>(deps: Deps, f: impl FnOnce() -> C + 'static) {
    effect_slot(SlotKind::LayoutEffect, EffectLane::BeforePaint, deps, f);
}

fn effect_slot<C: IntoCleanup>(
    kind: SlotKind,
    lane: EffectLane,
    deps: Deps,
    f: impl FnOnce() -> C + 'static,
) {
    with_current(kind.hook_name(), |rt| {
        let state: Rc<RefCell<EffectState>> = rt.claim(kind, || {
            Rc::new(RefCell::new(EffectState {
                deps: None,
                cleanup: None,
            }))
        });

        let changed = {
            let mut state = state.borrow_mut();
            let changed = match &state.deps {
                Some(previous) => !same_deps(previous, &deps),
                None => true,
            };
            if changed {
                state.deps = Some(deps);
            }
            changed
        };

        if changed {
            rt.queue_effect(PendingEffect {
                state,
                lane,
                run: Box::new(move || f().into_cleanup()),
            });
        }
    });
}
