//! History Replayer
//!
//! Read-only rendering of a method's call count and call history.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::instrument::{call_count, call_history, QualifiedName};
use crate::store::KeyValueStore;

// == Call Record ==
/// One replayed call: rendered arguments and rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

// == Transcript ==
/// A method's call count plus its paired input/output history.
///
/// `history` holds `min(inputs, outputs)` entries; the count may exceed it
/// when calls failed mid-way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub method: String,
    pub calls: u64,
    pub history: Vec<CallRecord>,
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.method, self.calls)?;
        for record in &self.history {
            writeln!(f, "{}(*{}) -> {}", self.method, record.input, record.output)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Builds the transcript for `name`, or `None` if the store cannot serve it.
///
/// Never writes to the store.
pub fn replay(store: &dyn KeyValueStore, name: &QualifiedName) -> Option<Transcript> {
    match try_replay(store, name) {
        Ok(transcript) => Some(transcript),
        Err(err) => {
            debug!("replay of {} skipped: {}", name, err);
            None
        }
    }
}

fn try_replay(store: &dyn KeyValueStore, name: &QualifiedName) -> Result<Transcript> {
    let calls = call_count(store, name)?;
    let (inputs, outputs) = call_history(store, name)?;

    let history = inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| CallRecord { input, output })
        .collect();

    Ok(Transcript {
        method: name.to_string(),
        calls,
        history,
    })
}

// == Write Replay ==
/// Writes the transcript for `name` to `out`. Best effort: nothing is written
/// when replay fails, and write errors are dropped.
pub fn write_replay<W: Write>(store: &dyn KeyValueStore, name: &QualifiedName, out: &mut W) {
    if let Some(transcript) = replay(store, name) {
        if let Err(err) = write!(out, "{}", transcript) {
            debug!("replay of {} not written: {}", name, err);
        }
    }
}

/// [`write_replay`] to stdout.
pub fn print_replay(store: &dyn KeyValueStore, name: &QualifiedName) {
    write_replay(store, name, &mut io::stdout().lock());
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn name() -> QualifiedName {
        QualifiedName::new("Cache", "store")
    }

    #[test]
    fn test_replay_without_calls() {
        let store = MemoryStore::new();

        let transcript = replay(&store, &name()).unwrap();

        assert_eq!(transcript.calls, 0);
        assert!(transcript.history.is_empty());
        assert_eq!(transcript.to_string(), "Cache.store was called 0 times:\n");
    }

    #[test]
    fn test_replay_formats_lines() {
        let store = MemoryStore::new();
        store.incr("Cache.store").unwrap();
        store.rpush("Cache.store:inputs", b"(\"foo\",)").unwrap();
        store.rpush("Cache.store:outputs", b"key-1").unwrap();

        let transcript = replay(&store, &name()).unwrap();

        assert_eq!(
            transcript.to_string(),
            "Cache.store was called 1 times:\nCache.store(*(\"foo\",)) -> key-1\n"
        );
    }

    #[test]
    fn test_replay_truncates_to_shorter_log() {
        let store = MemoryStore::new();
        store.incr("Cache.store").unwrap();
        store.incr("Cache.store").unwrap();
        store.rpush("Cache.store:inputs", b"(1,)").unwrap();
        store.rpush("Cache.store:inputs", b"(2,)").unwrap();
        store.rpush("Cache.store:outputs", b"k1").unwrap();

        let transcript = replay(&store, &name()).unwrap();

        assert_eq!(transcript.calls, 2);
        assert_eq!(
            transcript.history,
            vec![CallRecord {
                input: "(1,)".to_string(),
                output: "k1".to_string(),
            }]
        );
    }

    #[test]
    fn test_replay_does_not_mutate() {
        let store = MemoryStore::new();
        store.incr("Cache.store").unwrap();
        store.rpush("Cache.store:inputs", b"(1,)").unwrap();
        store.rpush("Cache.store:outputs", b"k1").unwrap();

        let first = replay(&store, &name()).unwrap();
        let second = replay(&store, &name()).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("Cache.store").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn test_replay_of_corrupt_counter_is_none() {
        let store = MemoryStore::new();
        store.set("Cache.store", b"not-a-number").unwrap();

        assert!(replay(&store, &name()).is_none());
    }

    #[test]
    fn test_write_replay_no_op_on_failure() {
        let store = MemoryStore::new();
        store.set("Cache.store:inputs", b"wrong type").unwrap();

        let mut out = Vec::new();
        write_replay(&store, &name(), &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn test_write_replay_writes_transcript() {
        let store = MemoryStore::new();

        let mut out = Vec::new();
        write_replay(&store, &name(), &mut out);

        assert_eq!(String::from_utf8(out).unwrap(), "Cache.store was called 0 times:\n");
    }
}
