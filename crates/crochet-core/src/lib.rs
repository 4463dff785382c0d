//! # Hook-slot state for plain render functions
//!
//! Crochet lets a stateless, repeatedly-invoked render function behave as if
//! it had persistent local state at each call site, keyed purely by call
//! order. There are three pieces:
//!
//! - a [`Runtime`] owning an ordered slot store and a cursor,
//! - free-function hooks (`use_state`, `use_effect`, `use_memo`, ...) that
//!   each claim the next slot when the render function runs,
//! - seams to the host: a [`RenderSink`] that receives each committed
//!   [`View`] and a [`Scheduler`] that runs deferred effects.
//!
//! ## A counter
//!
//! ```
//! use crochet_core::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! fn app() -> View {
//!     let (count, set_count) = use_state(|| 0);
//!     View::column(vec![
//!         View::text(format!("count: {count}")),
//!         View::button("+", move || set_count.set(count + 1)),
//!     ])
//! }
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let runtime = Runtime::new(scheduler.clone());
//!
//! let last = Rc::new(RefCell::new(None));
//! let sink = {
//!     let last = last.clone();
//!     move |view: &View| *last.borrow_mut() = Some(view.clone())
//! };
//! runtime.mount(app, sink);
//!
//! let click = last.borrow().as_ref().unwrap().find_button("+").unwrap();
//! click(); // synchronous re-render
//! assert_eq!(
//!     last.borrow().as_ref().unwrap().text_content(),
//!     "count: 1\n[+]"
//! );
//! scheduler.run_until_idle();
//! ```
//!
//! ## The one rule
//!
//! Hooks must run unconditionally, in the same order, on every pass: the
//! n-th hook call of every pass reads the slot the n-th call of the first
//! pass allocated. The engine tags each slot with its hook kind and value
//! type and panics with a [`HookError`] message when a pass breaks the rule,
//! rather than silently handing one call site another's state.
//!
//! ## Effects are deferred
//!
//! `use_effect` and `use_layout_effect` compare a [`deps!`] list against the
//! one stored in their slot and queue their callback only when it changed.
//! Queued callbacks go to the host [`Scheduler`] after the pass commits,
//! never during it, and may return a cleanup via
//! [`on_cleanup`](effects::on_cleanup) that runs before the effect's next
//! execution and on unmount.
//!
//! ## What this crate is not
//!
//! There is no diffing renderer, no event loop, and no concurrency: the sink
//! gets the whole view each pass, the host delivers events by invoking the
//! callbacks embedded in it, and everything runs on one thread.

pub mod context;
pub mod deps;
pub mod effects;
pub mod error;
pub mod memo;
pub mod prelude;
pub mod runtime;
pub mod scheduler;
pub mod state;
pub mod tests;
pub mod view;

pub use context::*;
pub use deps::*;
pub use effects::*;
pub use error::*;
pub use memo::*;
pub use prelude::*;
pub use runtime::*;
pub use scheduler::*;
pub use state::*;
pub use view::*;
