//! The slot store, cursor, and render driver.
//!
//! Each [`Runtime`] owns one component instance's hook state: an ordered
//! store of slots (one per hook call site, addressed purely by call order)
//! and the cursor that walks it. A render pass resets the cursor, installs
//! the runtime as the thread-local current one so the free-function hooks
//! can find it, runs the root component, commits the produced [`View`] to
//! the sink, and then hands any queued effects to the host scheduler.
//!
//! Setters never render directly. They mark the runtime dirty and a single
//! flush loop performs one pass at a time, so nested state updates (from a
//! sink callback or an effect) cannot grow the call stack; they just make
//! the loop go around again.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::effects::{EffectLane, EffectState, PendingEffect};
use crate::error::HookError;
use crate::scheduler::Scheduler;
use crate::view::{RenderSink, View};

thread_local! {
    static CURRENT: RefCell<Option<Weak<RuntimeInner>>> = const { RefCell::new(None) };
}

/// What kind of hook a slot belongs to. Checked on every claim so that a
/// call-order violation fails fast instead of silently handing one hook
/// another hook's state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum SlotKind {
    State,
    Reducer,
    Effect,
    LayoutEffect,
    Memo,
    Callback,
}

impl SlotKind {
    pub(crate) fn hook_name(self) -> &'static str {
        match self {
            SlotKind::State => "use_state",
            SlotKind::Reducer => "use_reducer",
            SlotKind::Effect => "use_effect",
            SlotKind::LayoutEffect => "use_layout_effect",
            SlotKind::Memo => "use_memo",
            SlotKind::Callback => "use_callback",
        }
    }
}

struct Slot {
    kind: SlotKind,
    payload: Box<dyn Any>,
}

pub(crate) struct RuntimeInner {
    slots: RefCell<Vec<Slot>>,
    cursor: Cell<usize>,
    /// Set after the first completed pass; from then on the slot count is
    /// frozen and any growth or shrink is a call-order violation.
    mounted: Cell<bool>,
    dirty: Cell<bool>,
    flushing: Cell<bool>,
    pending_effects: RefCell<Vec<PendingEffect>>,
    scheduler: Rc<dyn Scheduler>,
    root: RefCell<Option<Box<dyn FnMut() -> View>>>,
    sink: RefCell<Option<Box<dyn RenderSink>>>,
}

/// Render driver for one mounted component instance.
///
/// Cloning hands out another handle to the same instance; two `Runtime`s
/// created with [`Runtime::new`] never share slots.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Runtime {
            inner: Rc::new(RuntimeInner {
                slots: RefCell::new(Vec::new()),
                cursor: Cell::new(0),
                mounted: Cell::new(false),
                dirty: Cell::new(false),
                flushing: Cell::new(false),
                pending_effects: RefCell::new(Vec::new()),
                scheduler,
                root: RefCell::new(None),
                sink: RefCell::new(None),
            }),
        }
    }

    /// Installs the root component and render sink and performs the initial
    /// pass synchronously. Mounting over a live root unmounts it first.
    pub fn mount(&self, root: impl FnMut() -> View + 'static, sink: impl RenderSink + 'static) {
        if self.inner.root.borrow().is_some() {
            log::warn!("mount: runtime already has a root; unmounting it");
            self.unmount();
        }
        *self.inner.root.borrow_mut() = Some(Box::new(root));
        *self.inner.sink.borrow_mut() = Some(Box::new(sink));
        self.inner.request_render();
    }

    /// Requests a render pass. Outside a pass this flushes synchronously;
    /// from inside a pass or a flushed update it marks the running loop.
    pub fn request_render(&self) {
        self.inner.request_render();
    }

    /// Runs every stored effect cleanup (newest call site first), clears the
    /// slot store, and drops the root and sink.
    ///
    /// The root goes first: a teardown that pokes a setter must find an
    /// unmounted runtime, not re-enter the half-dismantled slot store.
    pub fn unmount(&self) {
        let inner = &self.inner;
        *inner.root.borrow_mut() = None;
        *inner.sink.borrow_mut() = None;
        inner.mounted.set(false);
        inner.dirty.set(false);
        inner.pending_effects.borrow_mut().clear();

        let slots = std::mem::take(&mut *inner.slots.borrow_mut());
        for slot in slots.into_iter().rev() {
            if let Some(state) = slot.payload.downcast_ref::<Rc<RefCell<EffectState>>>() {
                let cleanup = state.borrow_mut().cleanup.take();
                if let Some(cleanup) = cleanup {
                    cleanup.run();
                }
            }
        }
    }
}

/// Installs `inner` as the thread-local current runtime and resets its
/// cursor for the duration of one pass. Restores the previous runtime on
/// drop, including during unwinding.
struct PassGuard {
    prev: Option<Weak<RuntimeInner>>,
}

impl PassGuard {
    fn begin(inner: &Rc<RuntimeInner>) -> Self {
        inner.cursor.set(0);
        let prev = CURRENT.with(|current| current.borrow_mut().replace(Rc::downgrade(inner)));
        PassGuard { prev }
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        CURRENT.with(|current| *current.borrow_mut() = self.prev.take());
    }
}

struct FlushGuard(Rc<RuntimeInner>);

impl Drop for FlushGuard {
    fn drop(&mut self) {
        self.0.flushing.set(false);
    }
}

impl RuntimeInner {
    pub(crate) fn request_render(self: &Rc<Self>) {
        self.dirty.set(true);
        if self.flushing.get() {
            return;
        }
        self.flush();
    }

    fn flush(self: &Rc<Self>) {
        self.flushing.set(true);
        let _guard = FlushGuard(self.clone());
        while self.dirty.replace(false) {
            self.render_pass();
        }
    }

    fn render_pass(self: &Rc<Self>) {
        let view = {
            let mut root = self.root.borrow_mut();
            let Some(root) = root.as_mut() else {
                return;
            };
            let _pass = PassGuard::begin(self);
            root()
        };

        let used = self.cursor.get();
        let stored = self.slots.borrow().len();
        if self.mounted.get() && used != stored {
            panic!(
                "{}",
                HookError::HookCountChanged {
                    mounted: stored,
                    current: used,
                }
            );
        }
        self.mounted.set(true);
        log::trace!("render pass complete, {used} hook slots");

        if let Some(sink) = self.sink.borrow_mut().as_mut() {
            sink.commit(&view);
        }
        self.dispatch_effects();
    }

    /// Hands the pass's queued effects to the host scheduler. Each task runs
    /// the slot's previous cleanup (if any), then the effect, then stores the
    /// new cleanup back into the slot.
    fn dispatch_effects(&self) {
        let pending = std::mem::take(&mut *self.pending_effects.borrow_mut());
        for effect in pending {
            let state = effect.state;
            let run = effect.run;
            let task: Box<dyn FnOnce()> = Box::new(move || {
                let previous = state.borrow_mut().cleanup.take();
                if let Some(cleanup) = previous {
                    cleanup.run();
                }
                let next = run();
                state.borrow_mut().cleanup = next;
            });
            match effect.lane {
                EffectLane::BeforePaint => self.scheduler.schedule_urgent(task),
                EffectLane::Deferred => self.scheduler.schedule(task),
            }
        }
    }

    /// Claims the next slot for `kind`, allocating it with `init` on the
    /// mounting pass. This is the one place the cursor advances.
    pub(crate) fn claim<P: Clone + 'static>(
        &self,
        kind: SlotKind,
        init: impl FnOnce() -> P,
    ) -> P {
        let index = self.cursor.get();
        self.cursor.set(index + 1);

        let mut slots = self.slots.borrow_mut();
        if index == slots.len() {
            if self.mounted.get() {
                panic!(
                    "{}",
                    HookError::HookCountChanged {
                        mounted: slots.len(),
                        current: index + 1,
                    }
                );
            }
            let payload = init();
            slots.push(Slot {
                kind,
                payload: Box::new(payload.clone()),
            });
            return payload;
        }

        let slot = &slots[index];
        if slot.kind != kind {
            panic!(
                "{}",
                HookError::SlotKindMismatch {
                    index,
                    expected: slot.kind.hook_name(),
                    found: kind.hook_name(),
                }
            );
        }
        match slot.payload.downcast_ref::<P>() {
            Some(payload) => payload.clone(),
            None => panic!(
                "{}",
                HookError::SlotTypeMismatch {
                    index,
                    hook: kind.hook_name(),
                }
            ),
        }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor.get()
    }

    pub(crate) fn queue_effect(&self, effect: PendingEffect) {
        self.pending_effects.borrow_mut().push(effect);
    }
}

/// Resolves the thread-local current runtime for a hook call.
pub(crate) fn with_current<R>(hook: &'static str, f: impl FnOnce(&Rc<RuntimeInner>) -> R) -> R {
    let inner = CURRENT.with(|current| current.borrow().as_ref().and_then(Weak::upgrade));
    match inner {
        Some(inner) => f(&inner),
        None => panic!("{}", HookError::OutsideRenderPass { hook }),
    }
}
