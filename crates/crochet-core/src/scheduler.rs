//! The deferred-execution seam between the engine and its host.
//!
//! Effects never run during the render pass that queued them; the runtime
//! hands them to a [`Scheduler`] after the pass has committed. Hosts with a
//! real event loop implement this over their microtask/timer facilities; the
//! [`ManualScheduler`] here is for demos and tests, where the driver drains
//! the queues explicitly.

use std::cell::RefCell;
use std::collections::VecDeque;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Coarse deferral: run `task` once, after the current synchronous unit
    /// of work. Ordinary effects land here.
    fn schedule(&self, task: Task);

    /// Fine-grained deferral: run `task` once, before the host next paints.
    /// Layout effects land here. Relative ordering between the two lanes is
    /// this scheduler's business, not the engine's.
    fn schedule_urgent(&self, task: Task);
}

/// FIFO scheduler drained by hand. The urgent lane empties first, so layout
/// effects observably run before ordinary effects queued in the same pass;
/// that is a property of this scheduler, not a guarantee of the hooks.
#[derive(Default)]
pub struct ManualScheduler {
    deferred: RefCell<VecDeque<Task>>,
    urgent: RefCell<VecDeque<Task>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.deferred.borrow().len() + self.urgent.borrow().len()
    }

    /// Runs tasks until both lanes are empty. Tasks may schedule more tasks
    /// (an effect updating state queues the next pass's effects); those are
    /// picked up in the same drain.
    pub fn run_until_idle(&self) {
        loop {
            let task = { self.urgent.borrow_mut().pop_front() }
                .or_else(|| self.deferred.borrow_mut().pop_front());
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, task: Task) {
        self.deferred.borrow_mut().push_back(task);
    }

    fn schedule_urgent(&self, task: Task) {
        self.urgent.borrow_mut().push_back(task);
    }
}
