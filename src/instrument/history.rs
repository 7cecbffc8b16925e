//! Call History Recorder
//!
//! Records each call's rendered arguments and its output into two parallel
//! store lists, `{name}:inputs` and `{name}:outputs`.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::instrument::{Invocable, QualifiedName, RenderArgs};
use crate::store::KeyValueStore;

// == Call History ==
/// Appends the input before delegating and the output after.
///
/// A failing inner call leaves its input recorded with no matching output, so
/// the two lists can drift apart in length. Replay pairs them up to the
/// shorter one.
pub struct CallHistory<I> {
    inner: I,
    store: Arc<dyn KeyValueStore>,
}

impl<I: Invocable> CallHistory<I> {
    pub fn new(inner: I, store: Arc<dyn KeyValueStore>) -> Self {
        Self { inner, store }
    }
}

impl<I: Invocable> Invocable for CallHistory<I> {
    type Input = I::Input;
    type Output = I::Output;

    fn qualified_name(&self) -> &QualifiedName {
        self.inner.qualified_name()
    }

    fn invoke(&self, input: Self::Input) -> Result<Self::Output> {
        let name = self.qualified_name();
        let args = input.render_args();
        self.store.rpush(&name.inputs_key(), args.as_bytes())?;

        let output = self.inner.invoke(input)?;

        let rendered = output.to_string();
        let len = self.store.rpush(&name.outputs_key(), rendered.as_bytes())?;
        debug!("{}{} -> {} (entry {})", name, args, rendered, len);
        Ok(output)
    }
}

// == Read History ==
/// Reads both logs for `name` in append order: `(inputs, outputs)`.
pub fn call_history(
    store: &dyn KeyValueStore,
    name: &QualifiedName,
) -> Result<(Vec<String>, Vec<String>)> {
    let decode = |items: Vec<Vec<u8>>| {
        items
            .into_iter()
            .map(|item| String::from_utf8_lossy(&item).into_owned())
            .collect::<Vec<_>>()
    };

    let inputs = store.lrange(&name.inputs_key(), 0, -1)?;
    let outputs = store.lrange(&name.outputs_key(), 0, -1)?;
    Ok((decode(inputs), decode(outputs)))
}
