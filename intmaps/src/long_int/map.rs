// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Open-addressing `i64 -> i32` hash map with linear probing.

use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::mem;

use crate::error::Error;
use crate::hash::hash_int;
use crate::hash::hash_long;
use crate::long_int::buffers::Buffers;
use crate::long_int::buffers::next_capacity;
use crate::long_int::buffers::resize_threshold;
use crate::long_int::buffers::round_capacity;
use crate::long_int::iter::Iter;
use crate::long_int::iter::Keys;
use crate::long_int::iter::KeysMut;
use crate::long_int::iter::Values;
use crate::long_int::slot::Slot;

/// Capacity used by [`LongIntHashMap::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor used when none is given.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// A hash map from `i64` keys to `i32` values.
///
/// Entries live directly in three parallel power-of-two sized arrays. Collisions are
/// resolved by linear probing, and removals shift later entries of the same probe run
/// backwards instead of leaving tombstones, so every slot is either live or empty.
///
/// The map grows by doubling, re-inserting every entry, as soon as the number of
/// entries reaches `capacity * load_factor` before an insert.
#[derive(Debug, Clone)]
pub struct LongIntHashMap {
    buffers: Buffers,
    assigned: usize,
    load_factor: f32,
    resize_threshold: usize,
    // Bumped on every change of the slot layout; validates `Slot` handles.
    epoch: u64,
}

/// Outcome of probing for a key.
enum Probe {
    Found(usize),
    Vacant(usize),
    /// Every slot was visited without finding the key or a hole.
    Full,
}

impl LongIntHashMap {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] and [`DEFAULT_LOAD_FACTOR`].
    pub fn new() -> Self {
        Self::with_buffers(Buffers::new(DEFAULT_CAPACITY), DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty map able to hold `capacity` slots before rounding, with the
    /// default load factor.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `capacity` is zero.
    ///
    /// [`ErrorKind::ConfigInvalid`]: crate::error::ErrorKind::ConfigInvalid
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty map with an explicit initial capacity and load factor.
    ///
    /// The capacity is rounded up to the next power of two, at least
    /// [`MIN_CAPACITY`], and saturates at [`MAX_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `capacity` is zero or `load_factor` is
    /// not in `(0, 1]`, and [`ErrorKind::CapacityExhausted`] if the buffers cannot be
    /// allocated.
    ///
    /// [`MIN_CAPACITY`]: crate::long_int::MIN_CAPACITY
    /// [`MAX_CAPACITY`]: crate::long_int::MAX_CAPACITY
    /// [`ErrorKind::ConfigInvalid`]: crate::error::ErrorKind::ConfigInvalid
    /// [`ErrorKind::CapacityExhausted`]: crate::error::ErrorKind::CapacityExhausted
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::config_invalid("initial capacity must be positive")
                .with_context("capacity", capacity));
        }
        // Written so that NaN is rejected too.
        if !(load_factor > 0.0 && load_factor <= 1.0) {
            return Err(Error::config_invalid("load factor must be in (0, 1]")
                .with_context("load_factor", load_factor));
        }
        let buffers = Buffers::allocate(round_capacity(capacity))?;
        Ok(Self::with_buffers(buffers, load_factor))
    }

    /// Builds a map from parallel key and value arrays. Later duplicates of a key
    /// overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if the arrays differ in length.
    ///
    /// [`ErrorKind::ConfigInvalid`]: crate::error::ErrorKind::ConfigInvalid
    pub fn from_arrays(keys: &[i64], values: &[i32]) -> Result<Self, Error> {
        if keys.len() != values.len() {
            return Err(Error::config_invalid(
                "arrays of keys and values must have an identical length",
            )
            .with_context("keys", keys.len())
            .with_context("values", values.len()));
        }
        let mut map = Self::new();
        for (&key, &value) in keys.iter().zip(values) {
            map.try_insert(key, value)?;
        }
        Ok(map)
    }

    fn with_buffers(buffers: Buffers, load_factor: f32) -> Self {
        let resize_threshold = resize_threshold(buffers.capacity(), load_factor);
        Self {
            buffers,
            assigned: 0,
            load_factor,
            resize_threshold,
            epoch: 0,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.assigned
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Returns the number of slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.buffers.capacity()
    }

    /// Returns the load factor the map was created with.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Returns the value mapped to `key`, if any.
    pub fn get(&self, key: i64) -> Option<i32> {
        match self.probe(key) {
            Probe::Found(slot) => Some(self.buffers.values[slot]),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns the value mapped to `key`, or `default` if the key is absent.
    pub fn get_or(&self, key: i64, default: i32) -> i32 {
        self.get(key).unwrap_or(default)
    }

    /// Returns a mutable reference to the value mapped to `key`, if any.
    pub fn get_mut(&mut self, key: i64) -> Option<&mut i32> {
        match self.probe(key) {
            Probe::Found(slot) => Some(&mut self.buffers.values[slot]),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns true if the map contains `key`.
    pub fn contains_key(&self, key: i64) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Looks up `key` and returns a handle to its slot.
    ///
    /// The handle can be passed to [`slot_value`](Self::slot_value) and
    /// [`set_slot_value`](Self::set_slot_value) to read or overwrite the value without
    /// probing again.
    pub fn find(&self, key: i64) -> Option<Slot> {
        match self.probe(key) {
            Probe::Found(index) => Some(Slot {
                index,
                key,
                epoch: self.epoch,
            }),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns the value stored in a slot located by [`find`](Self::find).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::PreconditionViolation`] if the map's slot layout changed
    /// since the handle was created, or the handle belongs to another map.
    ///
    /// [`ErrorKind::PreconditionViolation`]: crate::error::ErrorKind::PreconditionViolation
    pub fn slot_value(&self, slot: Slot) -> Result<i32, Error> {
        let index = self.check_slot(slot)?;
        Ok(self.buffers.values[index])
    }

    /// Overwrites the value stored in a slot located by [`find`](Self::find) and
    /// returns the previous value.
    ///
    /// # Errors
    ///
    /// Same as [`slot_value`](Self::slot_value).
    pub fn set_slot_value(&mut self, slot: Slot, value: i32) -> Result<i32, Error> {
        let index = self.check_slot(slot)?;
        Ok(mem::replace(&mut self.buffers.values[index], value))
    }

    fn check_slot(&self, slot: Slot) -> Result<usize, Error> {
        if slot.epoch != self.epoch {
            return Err(Error::precondition(
                "slot handle is stale: the map was modified after find()",
            )
            .with_context("slot", slot.index)
            .with_context("key", slot.key));
        }
        let index = slot.index;
        if index >= self.buffers.capacity()
            || !self.buffers.allocated[index]
            || self.buffers.keys[index] != slot.key
        {
            return Err(
                Error::precondition("slot handle does not refer to a live entry of this map")
                    .with_context("slot", slot.index)
                    .with_context("key", slot.key),
            );
        }
        Ok(index)
    }

    /// Inserts `key -> value`, returning the previous value if the key was present.
    ///
    /// # Panics
    ///
    /// Panics if the map has to grow beyond [`MAX_CAPACITY`](crate::long_int::MAX_CAPACITY)
    /// or the grown buffers cannot be allocated. See [`try_insert`](Self::try_insert).
    pub fn insert(&mut self, key: i64, value: i32) -> Option<i32> {
        match self.try_insert(key, value) {
            Ok(previous) => previous,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::CapacityExhausted`] if growth fails; the map is unchanged.
    ///
    /// [`ErrorKind::CapacityExhausted`]: crate::error::ErrorKind::CapacityExhausted
    pub fn try_insert(&mut self, key: i64, value: i32) -> Result<Option<i32>, Error> {
        let slot = self.prepare_insert(key)?;
        match slot {
            Probe::Found(slot) => Ok(Some(mem::replace(&mut self.buffers.values[slot], value))),
            Probe::Vacant(slot) => {
                self.occupy(slot, key, value);
                Ok(None)
            }
            Probe::Full => unreachable!("growth leaves at least one empty slot"),
        }
    }

    /// Adds `add_value` to the value of `key` if present, otherwise inserts
    /// `put_value`. Returns the value now mapped to `key`.
    ///
    /// Addition wraps on overflow.
    ///
    /// # Panics
    ///
    /// Panics on capacity exhaustion, like [`insert`](Self::insert).
    pub fn put_or_add(&mut self, key: i64, put_value: i32, add_value: i32) -> i32 {
        match self.try_put_or_add(key, put_value, add_value) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible version of [`put_or_add`](Self::put_or_add).
    pub fn try_put_or_add(
        &mut self,
        key: i64,
        put_value: i32,
        add_value: i32,
    ) -> Result<i32, Error> {
        match self.prepare_insert(key)? {
            Probe::Found(slot) => {
                let value = &mut self.buffers.values[slot];
                *value = value.wrapping_add(add_value);
                Ok(*value)
            }
            Probe::Vacant(slot) => {
                self.occupy(slot, key, put_value);
                Ok(put_value)
            }
            Probe::Full => unreachable!("growth leaves at least one empty slot"),
        }
    }

    /// Inserts `key -> value` only if `key` is absent. Returns true if it inserted.
    ///
    /// # Panics
    ///
    /// Panics on capacity exhaustion, like [`insert`](Self::insert).
    pub fn put_if_absent(&mut self, key: i64, value: i32) -> bool {
        match self.try_put_if_absent(key, value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible version of [`put_if_absent`](Self::put_if_absent).
    pub fn try_put_if_absent(&mut self, key: i64, value: i32) -> Result<bool, Error> {
        if self.contains_key(key) {
            return Ok(false);
        }
        self.try_insert(key, value)?;
        Ok(true)
    }

    /// Inserts every entry of `other`, returning how many keys were new.
    pub fn extend_from_map(&mut self, other: &LongIntHashMap) -> usize {
        let before = self.assigned;
        for entry in other {
            self.insert(entry.key(), entry.value());
        }
        self.assigned - before
    }

    /// Inserts every pair of `entries`, returning how many keys were new.
    pub fn put_all<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (i64, i32)>,
    {
        let before = self.assigned;
        for (key, value) in entries {
            self.insert(key, value);
        }
        self.assigned - before
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: i64) -> Option<i32> {
        match self.probe(key) {
            Probe::Found(slot) => {
                let value = self.buffers.values[slot];
                self.vacate(slot);
                Some(value)
            }
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Removes every key yielded by `keys`, returning how many entries were removed.
    pub fn remove_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = i64>,
    {
        let before = self.assigned;
        for key in keys {
            self.remove(key);
        }
        before - self.assigned
    }

    /// Removes every entry whose key satisfies `predicate`, returning how many were
    /// removed. The predicate is called exactly once per entry.
    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(i64) -> bool,
    {
        let before = self.assigned;
        let capacity = self.buffers.capacity();
        let mask = self.buffers.mask();

        let hole = self.buffers.allocated.iter().position(|&a| !a);
        let Some(hole) = hole else {
            // A completely full table has a single probe run spanning every slot, so a
            // shift may carry an unvisited entry behind the cursor. Decide first.
            let doomed: Vec<i64> = self
                .iter()
                .map(|e| e.key())
                .filter(|&k| predicate(k))
                .collect();
            return self.remove_all(doomed);
        };

        // Scan one full turn starting right after an empty slot. Shifts never move an
        // entry across an empty slot, so no unvisited entry can land behind the cursor.
        let mut slot = (hole + 1) & mask;
        let mut visited = 0;
        while visited < capacity {
            if self.buffers.allocated[slot] && predicate(self.buffers.keys[slot]) {
                self.vacate(slot);
                // The shift may have refilled this slot with an unvisited entry: stay
                // on it instead of advancing.
                continue;
            }
            slot = (slot + 1) & mask;
            visited += 1;
        }
        before - self.assigned
    }

    /// Removes all entries, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.assigned = 0;
        self.buffers.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Returns an iterator over the entries in slot order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Returns a read-only view of the keys.
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self)
    }

    /// Returns a view of the keys that can also remove entries.
    pub fn keys_mut(&mut self) -> KeysMut<'_> {
        KeysMut::new(self)
    }

    /// Returns a read-only view of the values.
    pub fn values(&self) -> Values<'_> {
        Values::new(self)
    }

    pub(super) fn buffers(&self) -> &Buffers {
        &self.buffers
    }

    pub(super) fn into_buffers(self) -> Buffers {
        self.buffers
    }

    /// Slot holding `key`, or the hole that ends its probe run.
    fn probe(&self, key: i64) -> Probe {
        let mask = self.buffers.mask();
        let start = (hash_long(key) as usize) & mask;
        let mut slot = start;
        while self.buffers.allocated[slot] {
            if self.buffers.keys[slot] == key {
                return Probe::Found(slot);
            }
            slot = (slot + 1) & mask;
            if slot == start {
                return Probe::Full;
            }
        }
        Probe::Vacant(slot)
    }

    /// Grows if the threshold is reached, then probes for `key`.
    fn prepare_insert(&mut self, key: i64) -> Result<Probe, Error> {
        if self.assigned >= self.resize_threshold {
            self.expand_and_rehash()?;
        }
        Ok(self.probe(key))
    }

    fn occupy(&mut self, slot: usize, key: i64, value: i32) {
        debug_assert!(!self.buffers.allocated[slot]);
        self.buffers.allocated[slot] = true;
        self.buffers.keys[slot] = key;
        self.buffers.values[slot] = value;
        self.assigned += 1;
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn vacate(&mut self, slot: usize) {
        debug_assert!(self.buffers.allocated[slot]);
        self.assigned -= 1;
        self.shift_conflicting_keys(slot);
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Double the capacity and re-insert every entry into fresh buffers.
    ///
    /// The old buffers are kept until the new ones are fully built, so a failure
    /// leaves the map untouched.
    fn expand_and_rehash(&mut self) -> Result<(), Error> {
        debug_assert!(self.assigned >= self.resize_threshold);
        let capacity = next_capacity(self.buffers.capacity())?;
        let mut fresh = Buffers::allocate(capacity)?;
        let mask = fresh.mask();

        let old = &self.buffers;
        for i in 0..old.capacity() {
            if !old.allocated[i] {
                continue;
            }
            let key = old.keys[i];
            let mut slot = (hash_long(key) as usize) & mask;
            while fresh.allocated[slot] {
                slot = (slot + 1) & mask;
            }
            fresh.allocated[slot] = true;
            fresh.keys[slot] = key;
            fresh.values[slot] = old.values[i];
        }

        self.buffers = fresh;
        self.resize_threshold = resize_threshold(capacity, self.load_factor);
        self.epoch = self.epoch.wrapping_add(1);
        Ok(())
    }

    /// Backward-shift deletion of the entry in `gap`.
    ///
    /// Walks the probe run after the gap and moves back the first entry whose probe
    /// sequence does not start inside `(gap, current]`; that entry's old slot becomes
    /// the new gap. Stops at the first empty slot and marks the last gap empty.
    fn shift_conflicting_keys(&mut self, mut gap: usize) {
        let mask = self.buffers.mask();
        let buffers = &mut self.buffers;
        'shift: loop {
            let mut current = (gap + 1) & mask;
            loop {
                if current == gap || !buffers.allocated[current] {
                    break 'shift;
                }
                let ideal = (hash_long(buffers.keys[current]) as usize) & mask;
                if !in_circular_range(gap, ideal, current) {
                    break;
                }
                current = (current + 1) & mask;
            }
            buffers.keys[gap] = buffers.keys[current];
            buffers.values[gap] = buffers.values[current];
            gap = current;
        }
        buffers.allocated[gap] = false;
    }
}

/// True if `slot` lies in the circular half-open range `(from, to]`.
#[inline]
fn in_circular_range(from: usize, slot: usize, to: usize) -> bool {
    if from <= to {
        from < slot && slot <= to
    } else {
        from < slot || slot <= to
    }
}

impl Default for LongIntHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LongIntHashMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|e| other.get(e.key()) == Some(e.value()))
    }
}

impl Eq for LongIntHashMap {}

impl Hash for LongIntHashMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Summing keeps the hash independent of slot layout and insertion order.
        let sum = self.iter().fold(0u64, |acc, e| {
            acc.wrapping_add(hash_long(e.key()))
                .wrapping_add(hash_int(e.value()) as u64)
        });
        state.write_u64(sum);
    }
}

impl fmt::Display for LongIntHashMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, entry) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}=>{}", entry.key(), entry.value())?;
        }
        write!(f, "]")
    }
}

impl Extend<(i64, i32)> for LongIntHashMap {
    fn extend<I: IntoIterator<Item = (i64, i32)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl FromIterator<(i64, i32)> for LongIntHashMap {
    fn from_iter<I: IntoIterator<Item = (i64, i32)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let expected = iter.size_hint().0;
        let capacity = (expected as f64 * (1.0 + DEFAULT_LOAD_FACTOR as f64)) as usize;
        let mut map = Self::with_buffers(
            Buffers::new(round_capacity(capacity)),
            DEFAULT_LOAD_FACTOR,
        );
        map.put_all(iter);
        map
    }
}

#[cfg(test)]
impl LongIntHashMap {
    /// Every live key must be reachable from its ideal slot without crossing a hole.
    pub(crate) fn assert_probe_invariant(&self) {
        let mask = self.buffers.mask();
        let mut live = 0;
        for i in 0..self.buffers.capacity() {
            if !self.buffers.allocated[i] {
                continue;
            }
            live += 1;
            let mut slot = (hash_long(self.buffers.keys[i]) as usize) & mask;
            while slot != i {
                assert!(
                    self.buffers.allocated[slot],
                    "key {} in slot {i} is cut off by a hole at {slot}",
                    self.buffers.keys[i]
                );
                slot = (slot + 1) & mask;
            }
        }
        assert_eq!(live, self.assigned, "cached entry count is out of sync");
        assert!(self.assigned <= self.buffers.capacity());
    }
}
