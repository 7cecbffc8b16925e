//! Store Module
//!
//! The key-value store contract the cache and the instrumentation layer talk to,
//! plus an in-memory Redis-like backend.

mod entry;
mod memory;
mod stats;

use thiserror::Error;

pub use entry::Entry;
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Store Error ==
/// Failures reported by a store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Command used against a key holding the wrong kind of value
    #[error("WRONGTYPE operation against key '{0}' holding the wrong kind of value")]
    WrongType(String),

    /// INCR on a value that is not a base-10 integer, or one that would overflow
    #[error("value at '{0}' is not an integer or out of range")]
    NotAnInteger(String),

    /// Backend could not serve the command
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store commands.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Key Value Store ==
/// Commands the cache needs from its backing store.
///
/// Every method is a single atomic command. Implementations must never expose
/// a partially applied INCR or RPUSH to a concurrent reader.
pub trait KeyValueStore: Send + Sync {
    /// SET: stores `value` under `key`, replacing whatever was there.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// GET: raw bytes under `key`, `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// INCR: increments the integer under `key`, creating it at 0 first.
    fn incr(&self, key: &str) -> StoreResult<i64>;

    /// RPUSH: appends `value` to the list under `key`, returning the new length.
    fn rpush(&self, key: &str, value: &[u8]) -> StoreResult<usize>;

    /// LRANGE: elements `start..=stop`, negative indices count from the tail.
    fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<Vec<u8>>>;

    /// EXISTS
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// FLUSHDB: clears the whole namespace.
    fn flushdb(&self) -> StoreResult<()>;
}
