//! Call Ledger - A key-value cache with call instrumentation
//!
//! Stores values under generated keys in a Redis-like store, counts and
//! records calls to its operations, and replays the recorded history.

pub mod api;
pub mod cache;
pub mod config;
pub mod documents;
pub mod error;
pub mod instrument;
pub mod models;
pub mod store;

pub use api::AppState;
pub use cache::{Cache, StoredValue};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::{Invocable, InvocableExt, QualifiedName, Transcript};
pub use store::{KeyValueStore, MemoryStore};
