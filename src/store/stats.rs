//! Store Statistics Module
//!
//! Tracks keyspace metrics: read hits and misses, commands served, key count.

use serde::Serialize;

// == Store Stats ==
/// Keyspace metrics for a [`MemoryStore`](super::MemoryStore).
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// GET calls that found a value
    pub hits: u64,
    /// GET calls on an absent key
    pub misses: u64,
    /// Every command served, reads and writes alike
    pub commands: u64,
    /// Current number of keys
    pub total_keys: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_command(&mut self) {
        self.commands += 1;
    }

    pub fn set_total_keys(&mut self, count: usize) {
        self.total_keys = count;
    }
}
