//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the facade and the instrumentation chain around it.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::{Cache, StoredValue};
use crate::instrument::{call_history, RenderArgs};
use crate::store::{KeyValueStore, MemoryStore};

// == Strategies ==
/// Generates every accepted payload kind
fn stored_value_strategy() -> impl Strategy<Value = StoredValue> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,64}".prop_map(StoredValue::Text),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(StoredValue::Bytes),
        any::<i64>().prop_map(StoredValue::Integer),
        any::<f64>()
            .prop_filter("finite floats", |f| f.is_finite())
            .prop_map(StoredValue::Float),
    ]
}

fn new_cache() -> (Arc<MemoryStore>, Cache) {
    let store = Arc::new(MemoryStore::new());
    let cache = Cache::new(store.clone()).unwrap();
    (store, cache)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Round trip: get(store(v)) returns v's encoded bytes for every payload kind.
    #[test]
    fn prop_roundtrip_bytes(value in stored_value_strategy()) {
        let (_, cache) = new_cache();

        let key = cache.store(value.clone()).unwrap();

        prop_assert_eq!(cache.get(&key).unwrap(), Some(value.to_bytes()));
    }

    // Integers read back through get_int unchanged.
    #[test]
    fn prop_integer_roundtrip(n in any::<i64>()) {
        let (_, cache) = new_cache();

        let key = cache.store(n).unwrap();

        prop_assert_eq!(cache.get_int(&key).unwrap(), Some(n));
    }

    // Floats of any magnitude never read back as integers.
    #[test]
    fn prop_float_is_not_an_integer(
        f in any::<f64>().prop_filter("finite floats", |f| f.is_finite())
    ) {
        let (_, cache) = new_cache();

        let key = cache.store(f).unwrap();

        let text = cache.get_str(&key).unwrap().unwrap();
        prop_assert!(text.contains('.'), "float encoded without fraction: {}", text);
        prop_assert!(cache.get_int(&key).is_err());
        prop_assert_eq!(text.parse::<f64>().unwrap(), f);
    }

    // Keys never written read back as absent, never as an error.
    #[test]
    fn prop_unknown_key_is_absent(key in "[a-z0-9-]{1,40}") {
        let (_, cache) = new_cache();

        prop_assert_eq!(cache.get(&key).unwrap(), None);
    }

    // N calls leave a counter of N and two index-aligned logs of length N.
    #[test]
    fn prop_counter_and_logs_track_calls(
        values in prop::collection::vec(stored_value_strategy(), 0..20)
    ) {
        let (store, cache) = new_cache();

        let keys: Vec<String> = values
            .iter()
            .map(|v| cache.store(v.clone()).unwrap())
            .collect();

        let name = cache.store_operation();
        prop_assert_eq!(cache.call_count(name).unwrap(), values.len() as u64);

        let (inputs, outputs) = call_history(&*store, name).unwrap();
        let expected_inputs: Vec<String> = values.iter().map(|v| v.render_args()).collect();
        prop_assert_eq!(inputs, expected_inputs);
        prop_assert_eq!(outputs, keys);
    }

    // Replay reports the call count and one line per call, and writes nothing.
    #[test]
    fn prop_replay_is_read_only(
        values in prop::collection::vec(stored_value_strategy(), 0..10)
    ) {
        let (store, cache) = new_cache();
        for value in &values {
            cache.store(value.clone()).unwrap();
        }
        let keys_before = store.len();
        let count_before = store.get("Cache.store").unwrap();

        let transcript = cache.replay(cache.store_operation()).unwrap();

        prop_assert_eq!(transcript.calls, values.len() as u64);
        prop_assert_eq!(transcript.history.len(), values.len());
        prop_assert_eq!(transcript.to_string().lines().count(), values.len() + 1);
        prop_assert_eq!(store.len(), keys_before);
        prop_assert_eq!(store.get("Cache.store").unwrap(), count_before);
    }
}
