//! Memory Store Module
//!
//! In-memory Redis-like keyspace. Commands run one at a time behind a single
//! lock, which makes every INCR and RPUSH atomic with respect to other callers.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use tracing::info;

use crate::store::{Entry, KeyValueStore, StoreError, StoreResult, StoreStats};

// == Keyspace ==
#[derive(Debug, Default)]
struct Keyspace {
    entries: HashMap<String, Entry>,
    stats: StoreStats,
}

impl Keyspace {
    fn sync_key_count(&mut self) {
        let count = self.entries.len();
        self.stats.set_total_keys(count);
    }
}

// == Memory Store ==
/// Thread-safe in-memory store implementing [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    keyspace: Mutex<Keyspace>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current keyspace statistics.
    pub fn stats(&self) -> StoreStats {
        let keyspace = self.keyspace.lock();
        let mut stats = keyspace.stats.clone();
        stats.set_total_keys(keyspace.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of keys currently held.
    pub fn len(&self) -> usize {
        self.keyspace.lock().entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.keyspace.lock().entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut keyspace = self.keyspace.lock();
        keyspace.stats.record_command();
        keyspace
            .entries
            .insert(key.to_string(), Entry::Bytes(value.to_vec()));
        keyspace.sync_key_count();
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut keyspace = self.keyspace.lock();
        keyspace.stats.record_command();

        let value = match keyspace.entries.get(key) {
            Some(Entry::Bytes(bytes)) => Some(bytes.clone()),
            Some(Entry::List(_)) => return Err(StoreError::WrongType(key.to_string())),
            None => None,
        };

        if value.is_some() {
            keyspace.stats.record_hit();
        } else {
            keyspace.stats.record_miss();
        }
        Ok(value)
    }

    fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut keyspace = self.keyspace.lock();
        keyspace.stats.record_command();

        let current = match keyspace.entries.get(key) {
            Some(Entry::Bytes(bytes)) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| StoreError::NotAnInteger(key.to_string()))?,
            Some(Entry::List(_)) => return Err(StoreError::WrongType(key.to_string())),
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::NotAnInteger(key.to_string()))?;
        keyspace
            .entries
            .insert(key.to_string(), Entry::Bytes(next.to_string().into_bytes()));
        keyspace.sync_key_count();
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> StoreResult<usize> {
        let mut keyspace = self.keyspace.lock();
        keyspace.stats.record_command();

        let entry = keyspace
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(VecDeque::new()));
        let len = match entry {
            Entry::List(items) => {
                items.push_back(value.to_vec());
                items.len()
            }
            Entry::Bytes(_) => return Err(StoreError::WrongType(key.to_string())),
        };

        keyspace.sync_key_count();
        Ok(len)
    }

    fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<Vec<u8>>> {
        let mut keyspace = self.keyspace.lock();
        keyspace.stats.record_command();

        match keyspace.entries.get(key) {
            Some(Entry::List(items)) => Ok(Entry::range(items, start, stop)),
            Some(Entry::Bytes(_)) => Err(StoreError::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut keyspace = self.keyspace.lock();
        keyspace.stats.record_command();
        Ok(keyspace.entries.contains_key(key))
    }

    fn flushdb(&self) -> StoreResult<()> {
        let mut keyspace = self.keyspace.lock();
        keyspace.stats.record_command();
        let removed = keyspace.entries.len();
        keyspace.entries.clear();
        keyspace.sync_key_count();
        info!("FLUSHDB: removed {} keys", removed);
        Ok(())
    }
}
