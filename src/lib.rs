//! murmur-robin-map: a single-threaded, string-keyed hash map using
//! open addressing with robin-hood displacement and backward-shift
//! deletion, hashed by MurmurHash3 (x86_32).
//!
//! Internal Design:
//!
//! Summary
//! - Goal: amortized O(1) expected-time insert/lookup/remove for textual
//!   keys, with small probe-length variance and no tombstones.
//! - Layers:
//!   - `murmur`: the hash function. Pure, deterministic, bit-compatible
//!     with the reference MurmurHash3 x86_32 (except that empty input
//!     always hashes to 0).
//!   - `RobinHoodMap<V>`: the table. Owns a `Vec<Slot<V>>`; each slot is
//!     `Empty` or `Occupied(Entry)` carrying the owned key, the value and
//!     the entry's probe distance.
//!
//! Constraints
//! - Single-threaded: all mutation goes through `&mut self`; share it
//!   across threads by wrapping the whole map in a lock.
//! - Keys are copied into the map; values are stored as given. Store
//!   references (`&T`, `Option<&T>`) to keep the caller as owner.
//! - Capacity never shrinks and grows by `growth_factor` when the load
//!   factor reaches `critical_load_factor` (defaults 2 and 0.8).
//!
//! Probing rules
//! - Insert walks from the ideal bucket. An arrival that has probed
//!   further than a resident takes its slot; the resident keeps its own
//!   probe distance and is carried on.
//! - Remove empties the slot, then slides the following entries back
//!   one slot each until it meets an empty slot or an entry already at
//!   its ideal bucket.
//! - Every scan is bounded by the capacity, and the load-factor limit
//!   guarantees an empty slot for every insert.
//!
//! Failure model
//! - Lookups of missing keys return `None`/`false`, never an error.
//! - Slot-array and key allocations are fallible (`MapError`) and
//!   happen before any slot is touched, so a failed insert or growth
//!   leaves the map exactly as it was.
//!
//! Notes and non-goals
//! - No persistence, no concurrent access, no iteration order.
//! - `dump` and `slots` expose the layout for debugging; their output is
//!   not a stable format.

mod config;
mod error;
pub mod murmur;
pub mod robin_hood_map;
mod robin_hood_map_proptest;

// Public surface
pub use config::{
    MapConfig, DEFAULT_CRITICAL_LOAD_FACTOR, DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CAPACITY,
};
pub use error::{MapError, Result};
pub use murmur::{murmur3_32, Murmur3BuildHasher, Murmur3Hasher};
pub use robin_hood_map::{Entry, RobinHoodMap, Slot};
