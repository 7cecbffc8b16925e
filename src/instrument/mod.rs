//! Instrument Module
//!
//! Call counting, call history recording and history replay for any operation
//! implementing [`Invocable`].
//!
//! Wrappers implement [`Invocable`] themselves and are composed by nesting:
//!
//! ```ignore
//! let op = StoreOperation::new(store.clone())
//!     .recorded(store.clone())
//!     .counted(store.clone());
//! ```
//!
//! The outermost wrapper commits its side effect first, so the chain above
//! increments the counter, then appends the input, then runs the operation,
//! then appends the output.

mod counter;
mod history;
mod replay;

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::store::KeyValueStore;

pub use counter::{call_count, CountCalls};
pub use history::{call_history, CallHistory};
pub use replay::{print_replay, replay, write_replay, CallRecord, Transcript};

// == Qualified Name ==
/// Stable identity of an instrumented operation, rendered `Type.method`.
///
/// Supplied explicitly when the operation is registered; all store keys the
/// instrumentation layer touches derive from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(type_name: &str, method: &str) -> Self {
        Self(format!("{}.{}", type_name, method))
    }

    /// Wraps an already rendered name such as `Cache.store`.
    pub fn parse(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Counter key. The bare name, with no suffix.
    pub fn count_key(&self) -> &str {
        &self.0
    }

    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.0)
    }

    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.0)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Render Args ==
/// Renders an operation's positional arguments as tuple-like text, e.g. `(1,)`.
pub trait RenderArgs {
    fn render_args(&self) -> String;
}

impl RenderArgs for () {
    fn render_args(&self) -> String {
        "()".to_string()
    }
}

impl RenderArgs for i64 {
    fn render_args(&self) -> String {
        format!("({},)", self)
    }
}

impl RenderArgs for String {
    fn render_args(&self) -> String {
        format!("({:?},)", self)
    }
}

// == Invocable ==
/// The callable contract shared by operations and the wrappers around them.
pub trait Invocable {
    type Input: RenderArgs;
    type Output: fmt::Display;

    fn qualified_name(&self) -> &QualifiedName;

    fn invoke(&self, input: Self::Input) -> Result<Self::Output>;
}

// == Invocable Ext ==
/// Chaining helpers for wrapping an operation.
pub trait InvocableExt: Invocable + Sized {
    /// Wraps `self` in an invocation counter.
    fn counted(self, store: Arc<dyn KeyValueStore>) -> CountCalls<Self> {
        CountCalls::new(self, store)
    }

    /// Wraps `self` in a call history recorder.
    fn recorded(self, store: Arc<dyn KeyValueStore>) -> CallHistory<Self> {
        CallHistory::new(self, store)
    }
}

impl<T: Invocable> InvocableExt for T {}
