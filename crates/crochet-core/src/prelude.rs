pub use crate::context::{Context, context, use_context};
pub use crate::deps::{Dep, Deps, same_deps};
pub use crate::effects::{Dispose, IntoCleanup, on_cleanup, use_effect, use_layout_effect};
pub use crate::error::HookError;
pub use crate::memo::{use_callback, use_memo};
pub use crate::runtime::Runtime;
pub use crate::scheduler::{ManualScheduler, Scheduler, Task};
pub use crate::state::{Dispatch, Setter, use_reducer, use_reducer_raw, use_state};
pub use crate::view::{Callback, RenderSink, TextCallback, View, ViewKind};
