//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify the cache's structural guarantees across random
//! operation sequences.

use proptest::prelude::*;
use serde_json::json;

use crate::cache::ResponseCache;

// == Test Configuration ==
const TEST_TTL_MS: u64 = 300_000;
const TEST_NEGATIVE_TTL_MS: u64 = 30_000;

// == Strategies ==
/// Generates cache keys from a small pool so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f][0-9]{1,2}".prop_map(|s| format!("/api/{s}"))
}

/// A sequence of cache operations for model testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, payload: u64, negative: bool },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), any::<u64>(), any::<bool>())
            .prop_map(|(key, payload, negative)| CacheOp::Set { key, payload, negative }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The live size never exceeds capacity, after any sequence of mutations.
    #[test]
    fn prop_size_never_exceeds_capacity(
        max_entries in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
    ) {
        let mut cache = ResponseCache::new(max_entries, TEST_TTL_MS, TEST_NEGATIVE_TTL_MS);

        for op in ops {
            match op {
                CacheOp::Set { key, payload, negative } => {
                    cache.set(key, json!(payload), negative);
                }
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
                CacheOp::Delete { key } => cache.delete(&key),
            }
            prop_assert!(cache.len() <= max_entries, "size exceeded capacity");
        }
    }

    // The eviction victim is always the least recently used live key: a
    // reference model tracking access order must agree with the cache about
    // which keys survive.
    #[test]
    fn prop_eviction_matches_lru_model(
        max_entries in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
    ) {
        let mut cache = ResponseCache::new(max_entries, TEST_TTL_MS, TEST_NEGATIVE_TTL_MS);
        // Model: keys ordered least- to most-recently used
        let mut model: Vec<String> = Vec::new();

        for op in ops {
            match op {
                CacheOp::Set { key, payload, negative } => {
                    if !model.contains(&key) && model.len() >= max_entries {
                        model.remove(0);
                    }
                    model.retain(|k| k != &key);
                    model.push(key.clone());
                    cache.set(key, json!(payload), negative);
                }
                CacheOp::Get { key } => {
                    let hit = cache.get(&key).is_some();
                    prop_assert_eq!(hit, model.contains(&key), "hit/miss diverged from model");
                    if hit {
                        model.retain(|k| k != &key);
                        model.push(key);
                    }
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                    model.retain(|k| k != &key);
                }
            }

            prop_assert_eq!(cache.len(), model.len(), "size diverged from model");
        }
    }

    // Round-trip: set followed by get returns the stored payload exactly.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), payload in any::<u64>()) {
        let mut cache = ResponseCache::new(16, TEST_TTL_MS, TEST_NEGATIVE_TTL_MS);

        cache.set(key.clone(), json!({ "value": payload }), false);

        prop_assert_eq!(cache.get(&key), Some(json!({ "value": payload })));
    }

    // Overwriting an existing key never changes the cache size.
    #[test]
    fn prop_overwrite_keeps_size(
        key in key_strategy(),
        first in any::<u64>(),
        second in any::<u64>(),
    ) {
        let mut cache = ResponseCache::new(16, TEST_TTL_MS, TEST_NEGATIVE_TTL_MS);

        cache.set(key.clone(), json!(first), false);
        let size_before = cache.len();
        cache.set(key.clone(), json!(second), false);

        prop_assert_eq!(cache.len(), size_before);
        prop_assert_eq!(cache.get(&key), Some(json!(second)));
    }

    // Delete removes the entry: a subsequent get reports absence.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), payload in any::<u64>()) {
        let mut cache = ResponseCache::new(16, TEST_TTL_MS, TEST_NEGATIVE_TTL_MS);

        cache.set(key.clone(), json!(payload), false);
        prop_assert!(cache.get(&key).is_some());

        cache.delete(&key);
        prop_assert!(cache.get(&key).is_none());
    }
}
