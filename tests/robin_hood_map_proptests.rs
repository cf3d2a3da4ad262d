// RobinHoodMap property tests against the public API.
//
// Property 1: round-trip and update semantics.
//  - Model: last value written per key.
//  - Invariant: get(k) == model[k] for every key ever written;
//               len() == number of distinct keys.
//
// Property 2: layout stays consistent with the hash.
//  - For every occupied slot i holding key k:
//    probe_distance == (i - murmur3_32(k) % capacity) mod capacity,
//    and no slot between the ideal bucket and i is empty.
//  - Checked after a random mix of inserts and removes.
use murmur_robin_map::{murmur3_32, RobinHoodMap, Slot};
use proptest::prelude::*;
use std::collections::HashMap;

fn assert_layout<V>(m: &RobinHoodMap<V>) -> Result<(), TestCaseError> {
    let cap = m.capacity();
    for (i, slot) in m.slots().iter().enumerate() {
        if let Slot::Occupied(e) = slot {
            let ideal = murmur3_32(e.key().as_bytes(), 0) as usize % cap;
            prop_assert_eq!(e.probe_distance(), (i + cap - ideal) % cap);
            for back in 1..=e.probe_distance() {
                prop_assert!(!m.slots()[(i + cap - back) % cap].is_empty());
            }
        }
    }
    Ok(())
}

// Property 1: last write wins; distinct keys counted once.
proptest! {
    #[test]
    fn prop_round_trip(
        initial in 1usize..=32,
        writes in proptest::collection::vec(("[a-z0-9]{0,8}", any::<u32>()), 1..300),
    ) {
        let mut m = RobinHoodMap::with_capacity(initial).unwrap();
        let mut model: HashMap<String, u32> = HashMap::new();
        for (k, v) in writes {
            let prev = m.insert(&k, v).unwrap();
            prop_assert_eq!(prev, model.insert(k, v));
        }
        prop_assert_eq!(m.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(m.get(k), Some(v));
        }
        prop_assert!(!m.contains_key("not-a-generated-key"));
    }
}

// Property 2: layout invariants under inserts and removes.
proptest! {
    #[test]
    fn prop_layout_consistent(
        ops in proptest::collection::vec((any::<bool>(), 0u16..64), 1..400),
    ) {
        let mut m = RobinHoodMap::with_capacity(4).unwrap();
        let mut present = std::collections::HashSet::new();
        for (is_insert, n) in ops {
            let key = format!("k{n}");
            if is_insert {
                m.insert(&key, n).unwrap();
                present.insert(n);
            } else {
                prop_assert_eq!(m.remove(&key), present.remove(&n));
            }
            assert_layout(&m)?;
            prop_assert_eq!(m.len(), present.len());
        }
    }
}
