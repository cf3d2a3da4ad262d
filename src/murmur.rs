//! MurmurHash3, x86 32-bit variant.
//!
//! `murmur3_32` is the one-shot form used by `RobinHoodMap` to pick a
//! key's ideal bucket. `Murmur3Hasher` computes the same function
//! incrementally so it can sit behind `core::hash::Hasher` and drive
//! other maps (see `Murmur3BuildHasher`).
//!
//! Output is bit-for-bit the reference algorithm, with one deliberate
//! difference: an empty input always hashes to `0`, whatever the seed.

use core::hash::{BuildHasher, Hasher};

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

#[inline]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
fn mix_block(h: u32, k: u32) -> u32 {
    (h ^ scramble(k))
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe654_6b64)
}

#[inline]
fn finalize(mut h: u32, tail: &[u8], len: usize) -> u32 {
    debug_assert!(tail.len() < 4);
    let k = tail.iter().rev().fold(0u32, |k, &b| (k << 8) | u32::from(b));
    h ^= scramble(k);
    // The reference mixes in a 32-bit length; longer inputs wrap.
    h ^= len as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Hash `bytes` with MurmurHash3 (x86_32) under `seed`.
///
/// Pure and deterministic. Empty input returns `0`.
pub fn murmur3_32(bytes: &[u8], seed: u32) -> u32 {
    if bytes.is_empty() {
        return 0;
    }
    let mut blocks = bytes.chunks_exact(4);
    let mut h = seed;
    for b in &mut blocks {
        h = mix_block(h, u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
    }
    finalize(h, blocks.remainder(), bytes.len())
}

/// Streaming MurmurHash3 state.
///
/// Feeding bytes across several `write` calls yields the same result as
/// `murmur3_32` over their concatenation. `finish` widens it to `u64`.
/// Note that `Hash for str` appends a `0xff` terminator, so hashing a
/// `&str` through this hasher differs from `murmur3_32(s.as_bytes(), _)`.
#[derive(Clone, Debug)]
pub struct Murmur3Hasher {
    h: u32,
    tail: [u8; 4],
    tail_len: usize,
    len: usize,
}

impl Murmur3Hasher {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            h: seed,
            tail: [0; 4],
            tail_len: 0,
            len: 0,
        }
    }

    /// The 32-bit hash of everything written so far.
    pub fn finish_u32(&self) -> u32 {
        if self.len == 0 {
            return 0;
        }
        finalize(self.h, &self.tail[..self.tail_len], self.len)
    }
}

impl Default for Murmur3Hasher {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Hasher for Murmur3Hasher {
    fn write(&mut self, mut bytes: &[u8]) {
        self.len = self.len.wrapping_add(bytes.len());

        // Top up a partially filled block first.
        if self.tail_len > 0 {
            let take = (4 - self.tail_len).min(bytes.len());
            self.tail[self.tail_len..self.tail_len + take].copy_from_slice(&bytes[..take]);
            self.tail_len += take;
            bytes = &bytes[take..];
            if self.tail_len < 4 {
                return;
            }
            self.h = mix_block(self.h, u32::from_le_bytes(self.tail));
            self.tail_len = 0;
        }

        let mut blocks = bytes.chunks_exact(4);
        for b in &mut blocks {
            self.h = mix_block(self.h, u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
        }
        let rem = blocks.remainder();
        self.tail[..rem.len()].copy_from_slice(rem);
        self.tail_len = rem.len();
    }

    fn finish(&self) -> u64 {
        u64::from(self.finish_u32())
    }
}

/// `BuildHasher` producing seeded `Murmur3Hasher`s.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Murmur3BuildHasher {
    seed: u32,
}

impl Murmur3BuildHasher {
    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl BuildHasher for Murmur3BuildHasher {
    type Hasher = Murmur3Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Murmur3Hasher::with_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: Reference outputs for fixed inputs under seed 0.
    #[test]
    fn pinned_outputs() {
        assert_eq!(murmur3_32(b"Hello", 0), 316307400);
        assert_eq!(murmur3_32(b"world", 0), 4220927227);
    }

    /// Invariant: Empty input maps to the `0` sentinel for every seed.
    #[test]
    fn empty_input_is_zero() {
        assert_eq!(murmur3_32(b"", 0), 0);
        assert_eq!(murmur3_32(b"", 42), 0);
        assert_eq!(Murmur3Hasher::with_seed(7).finish(), 0);
    }

    /// Invariant: Every tail length (0..=3 trailing bytes) goes through
    /// the tail fold and produces the reference value.
    #[test]
    fn tail_lengths() {
        assert_eq!(murmur3_32(b"a", 0), 1009084850);
        assert_eq!(murmur3_32(b"abc", 0), 3017643002);
        assert_eq!(murmur3_32(b"abcd", 0), 1139631978);
        assert_eq!(murmur3_32(b"test11", 0), 3247954396);
    }

    /// Invariant: The seed changes the output.
    #[test]
    fn seed_is_mixed_in() {
        assert_eq!(murmur3_32(b"Hello", 42), 1466740371);
        assert_ne!(murmur3_32(b"Hello", 0), murmur3_32(b"Hello", 1));
    }

    /// Invariant: Streaming over arbitrary split points equals the one-shot hash.
    #[test]
    fn streaming_matches_one_shot() {
        let input = b"the quick brown fox jumps over the lazy dog";
        for seed in [0u32, 1, 0xdead_beef] {
            let expected = murmur3_32(input, seed);
            for split_a in 0..input.len() {
                for split_b in split_a..input.len() {
                    let mut h = Murmur3BuildHasher::with_seed(seed).build_hasher();
                    h.write(&input[..split_a]);
                    h.write(&input[split_a..split_b]);
                    h.write(&input[split_b..]);
                    assert_eq!(h.finish_u32(), expected);
                    assert_eq!(h.finish(), u64::from(expected));
                }
            }
        }
    }

    /// Invariant: `finish` does not consume state; more writes continue the hash.
    #[test]
    fn finish_is_non_destructive() {
        let mut h = Murmur3Hasher::default();
        h.write(b"Hel");
        let _ = h.finish();
        h.write(b"lo");
        assert_eq!(h.finish_u32(), 316307400);
    }
}
