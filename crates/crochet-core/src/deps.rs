//! Dependency lists for effect, memo, and callback hooks.
//!
//! A dependency list is an ordered, fixed-arity sequence of comparison keys.
//! Two lists are "the same" when every key compares equal to the key at the
//! same index in the other list. The keys can be of mixed types; each [`Dep`]
//! erases its value behind `dyn Any` and carries the comparison for its
//! concrete type with it.
//!
//! Lists are built with the [`deps!`](crate::deps!) macro:
//!
//! ```
//! use crochet_core::deps;
//! use crochet_core::deps::same_deps;
//!
//! let a = deps![1, "left"];
//! let b = deps![1, "left"];
//! let c = deps![2, "left"];
//! assert!(same_deps(&a, &b));
//! assert!(!same_deps(&a, &c));
//! ```

use std::any::Any;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::HookError;

/// One comparison key in a dependency list.
#[derive(Clone)]
pub struct Dep {
    value: Rc<dyn Any>,
    compare: fn(&dyn Any, &dyn Any) -> bool,
}

impl Dep {
    pub fn new<T: PartialEq + 'static>(value: T) -> Self {
        fn compare_as<T: PartialEq + 'static>(a: &dyn Any, b: &dyn Any) -> bool {
            match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        Dep {
            value: Rc::new(value),
            compare: compare_as::<T>,
        }
    }

    fn same(&self, other: &Dep) -> bool {
        (self.compare)(self.value.as_ref(), other.value.as_ref())
    }
}

/// An ordered dependency list. Small lists stay inline.
pub type Deps = SmallVec<[Dep; 4]>;

/// Index-wise equality over two dependency lists.
///
/// A correct caller passes the same number of dependencies on every pass;
/// a length change means the call site's shape changed, which would silently
/// corrupt memoization, so it fails fast instead.
pub fn same_deps(prev: &Deps, next: &Deps) -> bool {
    if prev.len() != next.len() {
        panic!(
            "{}",
            HookError::DepsLengthMismatch {
                prev: prev.len(),
                next: next.len(),
            }
        );
    }
    prev.iter().zip(next.iter()).all(|(p, n)| p.same(n))
}

/// Builds a [`Deps`] list from a comma-separated list of `PartialEq` values.
#[macro_export]
macro_rules! deps {
    () => {
        $crate::deps::Deps::new()
    };
    ($($dep:expr),+ $(,)?) => {{
        let mut list = $crate::deps::Deps::new();
        $(list.push($crate::deps::Dep::new($dep));)+
        list
    }};
}
