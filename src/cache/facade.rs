//! Cache Facade Module
//!
//! Stores values under freshly generated keys and reads them back, with the
//! store operation counted and recorded by the instrumentation layer.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::cache::StoredValue;
use crate::error::Result;
use crate::instrument::{
    self, CallHistory, CountCalls, Invocable, InvocableExt, QualifiedName, Transcript,
};
use crate::store::KeyValueStore;

// == Store Operation ==
/// SET under a new UUID v4 key, returning the key.
pub struct StoreOperation {
    name: QualifiedName,
    store: Arc<dyn KeyValueStore>,
}

impl StoreOperation {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            name: QualifiedName::new("Cache", "store"),
            store,
        }
    }
}

impl Invocable for StoreOperation {
    type Input = StoredValue;
    type Output = String;

    fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    fn invoke(&self, value: StoredValue) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &value.to_bytes())?;
        Ok(key)
    }
}

// == Cache ==
/// Key-value facade over a [`KeyValueStore`] handle.
pub struct Cache {
    redis: Arc<dyn KeyValueStore>,
    store_op: CountCalls<CallHistory<StoreOperation>>,
}

impl Cache {
    // == Constructor ==
    /// Takes ownership of a store handle and flushes it.
    ///
    /// The flush clears the whole namespace, not just keys this cache wrote.
    pub fn new(redis: Arc<dyn KeyValueStore>) -> Result<Self> {
        redis.flushdb()?;
        info!("Cache initialized on a flushed store");

        let store_op = StoreOperation::new(redis.clone())
            .recorded(redis.clone())
            .counted(redis.clone());

        Ok(Self { redis, store_op })
    }

    // == Store ==
    /// Stores `data` under a new random key and returns the key.
    pub fn store(&self, data: impl Into<StoredValue>) -> Result<String> {
        self.store_op.invoke(data.into())
    }

    // == Get ==
    /// Raw bytes under `key`, `None` when absent.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.redis.get(key)?)
    }

    /// Like [`get`](Self::get), with `transform` applied to present values.
    pub fn get_with<T, F>(&self, key: &str, transform: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.get(key)?.map(transform).transpose()
    }

    /// Value under `key` decoded as UTF-8.
    pub fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?))
    }

    /// Value under `key` parsed as a base-10 integer.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?.parse::<i64>()?))
    }

    // == Instrumentation ==
    /// Identity of the instrumented `store` operation.
    pub fn store_operation(&self) -> &QualifiedName {
        self.store_op.qualified_name()
    }

    pub fn call_count(&self, name: &QualifiedName) -> Result<u64> {
        instrument::call_count(self.redis.as_ref(), name)
    }

    pub fn replay(&self, name: &QualifiedName) -> Option<Transcript> {
        instrument::replay(self.redis.as_ref(), name)
    }

    pub fn print_replay(&self, name: &QualifiedName) {
        instrument::print_replay(self.redis.as_ref(), name);
    }
}
