// MurmurHash3 integration tests: pinned outputs and use as a BuildHasher.
use hashbrown::HashMap;
use murmur_robin_map::{murmur3_32, Murmur3BuildHasher, Murmur3Hasher};
use std::hash::{BuildHasher, Hasher};

#[test]
fn pinned_reference_values() {
    let cases: [(&str, u32); 2] = [("Hello", 316307400), ("world", 4220927227)];
    for (input, expected) in cases {
        assert_eq!(murmur3_32(input.as_bytes(), 0), expected, "{input}");
    }
}

#[test]
fn deterministic_across_calls() {
    for input in ["", "a", "ab", "abc", "abcd", "abcde", "name87", "occupation4"] {
        assert_eq!(murmur3_32(input.as_bytes(), 9), murmur3_32(input.as_bytes(), 9));
    }
}

// Bytes above 0x7f are folded as unsigned.
#[test]
fn high_bytes_in_tail() {
    let a = murmur3_32(&[0xff], 0);
    let b = murmur3_32(&[0x7f], 0);
    assert_ne!(a, b);
    let mut h = Murmur3Hasher::default();
    h.write(&[0xff]);
    assert_eq!(h.finish_u32(), a);
}

#[test]
fn build_hasher_drives_hashbrown() {
    let s = Murmur3BuildHasher::with_seed(3);
    assert_eq!(s.seed(), 3);
    let mut m: HashMap<String, usize, Murmur3BuildHasher> = HashMap::with_hasher(s);
    for i in 0..500 {
        m.insert(format!("key{i}"), i);
    }
    for i in 0..500 {
        assert_eq!(m.get(&format!("key{i}")), Some(&i));
    }

    let mut h = s.build_hasher();
    h.write(b"Hello");
    assert_eq!(h.finish(), u64::from(murmur3_32(b"Hello", 3)));
}
