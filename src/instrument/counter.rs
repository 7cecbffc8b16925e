//! Invocation Counter
//!
//! Counts calls to a wrapped operation in the backing store.

use std::sync::Arc;

use tracing::debug;

use crate::error::{CacheError, Result};
use crate::instrument::{Invocable, QualifiedName};
use crate::store::KeyValueStore;

// == Count Calls ==
/// Increments `qualified_name` in the store on every call, then delegates.
///
/// The increment is committed before the inner operation runs and is kept
/// even when the inner operation fails.
pub struct CountCalls<I> {
    inner: I,
    store: Arc<dyn KeyValueStore>,
}

impl<I: Invocable> CountCalls<I> {
    pub fn new(inner: I, store: Arc<dyn KeyValueStore>) -> Self {
        Self { inner, store }
    }
}

impl<I: Invocable> Invocable for CountCalls<I> {
    type Input = I::Input;
    type Output = I::Output;

    fn qualified_name(&self) -> &QualifiedName {
        self.inner.qualified_name()
    }

    fn invoke(&self, input: Self::Input) -> Result<Self::Output> {
        let name = self.qualified_name();
        let calls = self.store.incr(name.count_key())?;
        debug!("{} call #{}", name, calls);
        self.inner.invoke(input)
    }
}

// == Call Count ==
/// Reads the call counter for `name`; 0 when the operation was never called.
pub fn call_count(store: &dyn KeyValueStore, name: &QualifiedName) -> Result<u64> {
    match store.get(name.count_key())? {
        Some(raw) => {
            let text = String::from_utf8(raw)?;
            text.parse::<u64>().map_err(CacheError::from)
        }
        None => Ok(0),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    struct Echo {
        name: QualifiedName,
    }

    impl Invocable for Echo {
        type Input = i64;
        type Output = i64;

        fn qualified_name(&self) -> &QualifiedName {
            &self.name
        }

        fn invoke(&self, input: i64) -> Result<i64> {
            if input < 0 {
                return Err(CacheError::InvalidRequest("negative".to_string()));
            }
            Ok(input)
        }
    }

    fn counted_echo(store: &Arc<MemoryStore>) -> CountCalls<Echo> {
        let echo = Echo {
            name: QualifiedName::new("Echo", "call"),
        };
        CountCalls::new(echo, store.clone())
    }

    #[test]
    fn test_counts_every_call() {
        let store = Arc::new(MemoryStore::new());
        let op = counted_echo(&store);

        for i in 0..5 {
            assert_eq!(op.invoke(i).unwrap(), i);
        }

        assert_eq!(call_count(&*store, op.qualified_name()).unwrap(), 5);
    }

    #[test]
    fn test_uncalled_count_is_zero() {
        let store = MemoryStore::new();
        let name = QualifiedName::new("Echo", "never");

        assert_eq!(call_count(&store, &name).unwrap(), 0);
    }

    #[test]
    fn test_failed_call_still_counted() {
        let store = Arc::new(MemoryStore::new());
        let op = counted_echo(&store);

        assert!(op.invoke(-1).is_err());
        assert!(op.invoke(1).is_ok());

        assert_eq!(call_count(&*store, op.qualified_name()).unwrap(), 2);
    }

    #[test]
    fn test_counter_key_collision_fails_before_call() {
        let store = Arc::new(MemoryStore::new());
        store.rpush("Echo.call", b"not a counter").unwrap();
        let op = counted_echo(&store);

        assert!(matches!(op.invoke(1), Err(CacheError::Store(_))));
    }
}
