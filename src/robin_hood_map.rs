//! RobinHoodMap: open-addressing string map with robin-hood displacement
//! and backward-shift deletion.
//!
//! Every slot is either `Empty` or holds an `Entry` with its owned key,
//! the caller's value and its probe distance (how far the entry sits
//! past its ideal bucket). Three properties hold between public calls:
//! - Each probe distance equals the entry's offset from
//!   `murmur3_32(key, seed) % capacity`, counted forward with wraparound.
//! - No empty slot lies between an entry and its ideal bucket.
//! - Along a run of occupied slots a distance grows by at most one per
//!   step, so a lookup may stop at the first resident that is closer to
//!   home than the probe is.

use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::murmur::murmur3_32;
use core::fmt;
use core::fmt::Write as _;
use core::mem;
use log::{debug, trace};

/// An occupied slot's contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<V> {
    key: Box<str>,
    value: V,
    probe_distance: usize,
}

impl<V> Entry<V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn probe_distance(&self) -> usize {
        self.probe_distance
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<V> {
    Empty,
    Occupied(Entry<V>),
}

impl<V> Slot<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn entry(&self) -> Option<&Entry<V>> {
        match self {
            Slot::Occupied(e) => Some(e),
            Slot::Empty => None,
        }
    }
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot::Empty
    }
}

/// Outcome of the read-only probe that precedes every insert.
enum InsertProbe {
    /// The key is already stored at this index.
    Found(usize),
    /// The key belongs at `index` with `distance`; whatever sits there
    /// now (if anything) must be carried further.
    Claim { index: usize, distance: usize },
}

pub struct RobinHoodMap<V> {
    config: MapConfig,
    slots: Vec<Slot<V>>,
    len: usize,
}

#[inline]
fn bucket_index(key: &str, seed: u32, capacity: usize) -> usize {
    murmur3_32(key.as_bytes(), seed) as usize % capacity
}

fn empty_slots<V>(capacity: usize) -> Result<Vec<Slot<V>>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| MapError::AllocationFailure {
            requested: capacity,
        })?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

fn copy_key(key: &str) -> Result<Box<str>> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|_| MapError::AllocationFailure {
            requested: key.len(),
        })?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}

/// Robin-hood placement of an entry whose key is not in `slots`.
/// `entry.probe_distance` must already be its distance at `index`.
/// Callers guarantee at least one empty slot.
fn carry<V>(slots: &mut [Slot<V>], mut index: usize, mut entry: Entry<V>) {
    let capacity = slots.len();
    for _ in 0..capacity {
        match slots[index] {
            Slot::Empty => {
                slots[index] = Slot::Occupied(entry);
                return;
            }
            Slot::Occupied(ref mut resident) => {
                if resident.probe_distance < entry.probe_distance {
                    trace!(
                        "displacing {:?} (probe {}) at slot {} for {:?} (probe {})",
                        resident.key,
                        resident.probe_distance,
                        index,
                        entry.key,
                        entry.probe_distance
                    );
                    mem::swap(resident, &mut entry);
                }
            }
        }
        entry.probe_distance += 1;
        index = (index + 1) % capacity;
    }
    unreachable!("robin-hood placement found no empty slot in {capacity} slots");
}

impl<V> RobinHoodMap<V> {
    /// Create a map with `capacity` slots and default growth settings.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(MapConfig::new(capacity))
    }

    pub fn with_config(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let slots = empty_slots(config.initial_capacity)?;
        debug!(
            "created robin-hood map: capacity={}, growth_factor={}, critical_load_factor={}",
            config.initial_capacity, config.growth_factor, config.critical_load_factor
        );
        Ok(Self {
            config,
            slots,
            len: 0,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// The bucket `key` hashes to under the current capacity.
    pub fn ideal_bucket(&self, key: &str) -> usize {
        bucket_index(key, self.config.seed, self.capacity())
    }

    fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    fn find_index(&self, key: &str) -> Option<usize> {
        let mut index = self.ideal_bucket(key);
        for distance in 0..self.capacity() {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(e) => {
                    if e.probe_distance < distance {
                        return None;
                    }
                    if &*e.key == key {
                        return Some(index);
                    }
                }
            }
            index = self.next_index(index);
        }
        None
    }

    fn probe_for_insert(&self, key: &str) -> Result<InsertProbe> {
        let mut index = self.ideal_bucket(key);
        for distance in 0..self.capacity() {
            match &self.slots[index] {
                Slot::Empty => return Ok(InsertProbe::Claim { index, distance }),
                Slot::Occupied(e) => {
                    if &*e.key == key {
                        return Ok(InsertProbe::Found(index));
                    }
                    if e.probe_distance < distance {
                        return Ok(InsertProbe::Claim { index, distance });
                    }
                }
            }
            index = self.next_index(index);
        }
        Err(MapError::TableFull {
            capacity: self.capacity(),
        })
    }

    fn needs_growth(&self) -> bool {
        self.load_factor() >= self.config.critical_load_factor
    }

    /// Rebuild into `capacity * growth_factor` slots and swap the new
    /// array in. Allocation happens before anything moves, so a failure
    /// leaves the map untouched.
    fn grow(&mut self) -> Result<()> {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(self.config.growth_factor)
            .ok_or(MapError::AllocationFailure {
                requested: usize::MAX,
            })?;
        let mut slots = empty_slots(new_capacity)?;

        let mut moved = 0;
        for slot in mem::take(&mut self.slots) {
            if let Slot::Occupied(mut entry) = slot {
                entry.probe_distance = 0;
                let index = bucket_index(&entry.key, self.config.seed, new_capacity);
                carry(&mut slots, index, entry);
                moved += 1;
            }
        }
        self.slots = slots;
        self.len = moved;
        debug!(
            "grew robin-hood map: capacity {} -> {}, {} entries moved",
            old_capacity, new_capacity, moved
        );
        Ok(())
    }

    /// Insert `value` under `key`, or replace the value already stored
    /// there. Returns the replaced value, if any.
    ///
    /// The map grows first when its load factor has reached the critical
    /// threshold, so an update may also grow it. On error the map is
    /// unchanged.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        if self.needs_growth() {
            self.grow()?;
        }

        match self.probe_for_insert(key)? {
            InsertProbe::Found(index) => match &mut self.slots[index] {
                Slot::Occupied(e) => Ok(Some(mem::replace(&mut e.value, value))),
                Slot::Empty => unreachable!("probe matched an empty slot"),
            },
            InsertProbe::Claim { index, distance } => {
                let entry = Entry {
                    key: copy_key(key)?,
                    value,
                    probe_distance: distance,
                };
                let next = self.next_index(index);
                if let Slot::Occupied(mut displaced) =
                    mem::replace(&mut self.slots[index], Slot::Occupied(entry))
                {
                    trace!(
                        "{:?} displaced {:?} at slot {}",
                        key,
                        displaced.key,
                        index
                    );
                    displaced.probe_distance += 1;
                    carry(&mut self.slots, next, displaced);
                }
                self.len += 1;
                Ok(None)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find_index(key)?;
        self.slots[index].entry().map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_index(key)?;
        match &mut self.slots[index] {
            Slot::Occupied(e) => Some(&mut e.value),
            Slot::Empty => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Where `key` sits relative to its ideal bucket, if present.
    pub fn probe_distance(&self, key: &str) -> Option<usize> {
        let index = self.find_index(key)?;
        self.slots[index].entry().map(|e| e.probe_distance)
    }

    /// Remove `key`. Returns `false` (and changes nothing) if absent.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Remove `key` and hand back its value.
    pub fn take(&mut self, key: &str) -> Option<V> {
        let index = self.find_index(key)?;
        let removed = mem::take(&mut self.slots[index]);
        self.len -= 1;
        self.backward_shift(index);
        match removed {
            Slot::Occupied(e) => Some(e.value),
            Slot::Empty => None,
        }
    }

    /// Close the hole at `hole` by sliding the following run one slot
    /// back, stopping at an empty slot or an entry already at home.
    fn backward_shift(&mut self, mut hole: usize) {
        for _ in 1..self.capacity() {
            let next = self.next_index(hole);
            match &self.slots[next] {
                Slot::Occupied(e) if e.probe_distance > 0 => {}
                _ => break,
            }
            self.slots.swap(hole, next);
            if let Slot::Occupied(e) = &mut self.slots[hole] {
                e.probe_distance -= 1;
                trace!("shifted {:?} back to slot {}", e.key, hole);
            }
            hole = next;
        }
    }

    /// Drop every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
    }

    /// Raw view of the slot array, for diagnostics.
    pub fn slots(&self) -> &[Slot<V>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot<V>> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            it: self.slots.iter_mut(),
        }
    }
}

impl<V: fmt::Debug> RobinHoodMap<V> {
    /// One line per slot: `"{i}: {key} -> {value:?} (probe {d})"`, and
    /// `"{i}: [EMPTY SLOT]"` for empty slots when `full` is set. Meant for
    /// debugging; the format is not stable.
    pub fn dump(&self, full: bool) -> String {
        let mut out = String::new();
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty if full => {
                    let _ = writeln!(out, "{i}: [EMPTY SLOT]");
                }
                Slot::Empty => {}
                Slot::Occupied(e) => {
                    let _ = writeln!(
                        out,
                        "{i}: {} -> {:?} (probe {})",
                        e.key, e.value, e.probe_distance
                    );
                }
            }
        }
        out
    }
}

impl<V: fmt::Debug> fmt::Debug for RobinHoodMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over entries in slot order.
pub struct Iter<'a, V> {
    it: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.by_ref().find_map(|slot| match slot {
            Slot::Occupied(e) => Some((&*e.key, &e.value)),
            Slot::Empty => None,
        })
    }
}

/// Iterator over entries in slot order with mutable values.
pub struct IterMut<'a, V> {
    it: core::slice::IterMut<'a, Slot<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.by_ref().find_map(|slot| match slot {
            Slot::Occupied(e) => Some((&*e.key, &mut e.value)),
            Slot::Empty => None,
        })
    }
}

impl<'a, V> IntoIterator for &'a RobinHoodMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<V> RobinHoodMap<V> {
    /// Panics unless every structural property from the module docs holds.
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.capacity();
        let mut occupied = 0;
        for (i, slot) in self.slots.iter().enumerate() {
            let Slot::Occupied(e) = slot else { continue };
            occupied += 1;
            let ideal = self.ideal_bucket(&e.key);
            assert_eq!(
                e.probe_distance,
                (i + capacity - ideal) % capacity,
                "stale probe distance for {:?} at slot {}",
                e.key,
                i
            );
            for back in 1..=e.probe_distance {
                let j = (i + capacity - back) % capacity;
                let before = self.slots[j]
                    .entry()
                    .unwrap_or_else(|| panic!("gap at slot {j} before {:?}", e.key));
                assert!(
                    before.probe_distance + back >= e.probe_distance,
                    "robin-hood order broken between slots {j} and {i}"
                );
            }
        }
        assert_eq!(occupied, self.len, "len disagrees with occupied slots");
    }
}
