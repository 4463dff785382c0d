use thiserror::Error;

/// Contract violations in the hook protocol.
///
/// All of these are programmer bugs (hooks called conditionally, outside a
/// render pass, or with a shape that changed between passes). The engine has
/// no way to recover from a misaligned slot store, so hooks panic with the
/// display message of the matching variant instead of limping on with
/// another call site's state.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{hook} called outside of a render pass")]
    OutsideRenderPass { hook: &'static str },

    #[error(
        "slot {index} was claimed by {expected} on the mounting pass but {found} claimed it now; \
         hooks must run unconditionally, in the same order, on every pass"
    )]
    SlotKindMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{hook}: the value type stored at slot {index} changed between passes")]
    SlotTypeMismatch { index: usize, hook: &'static str },

    #[error(
        "render pass used {current} hook slots but the mounting pass used {mounted}; \
         hooks must not be called conditionally or in variable-length loops"
    )]
    HookCountChanged { mounted: usize, current: usize },

    #[error("dependency list length changed between passes ({prev} -> {next})")]
    DepsLengthMismatch { prev: usize, next: usize },
}
