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

//! Iterators and key/value views over a [`LongIntHashMap`].
//!
//! All of them walk the slots in ascending index order. That order is neither the
//! insertion order nor stable across growth.

use std::iter::FusedIterator;

use crate::long_int::buffers::Buffers;
use crate::long_int::map::LongIntHashMap;

/// One live entry, as produced by [`LongIntHashMap::iter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    index: usize,
    key: i64,
    value: i32,
}

impl Entry {
    /// Returns the slot index the entry occupies.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the key.
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Returns the value.
    pub fn value(&self) -> i32 {
        self.value
    }
}

/// Advance `*next` to the following live slot of `buffers` and return its index.
fn next_live(buffers: &Buffers, next: &mut usize) -> Option<usize> {
    while *next < buffers.capacity() {
        let slot = *next;
        *next += 1;
        if buffers.allocated[slot] {
            return Some(slot);
        }
    }
    None
}

/// Iterator over the entries of a map, see [`LongIntHashMap::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    buffers: &'a Buffers,
    next: usize,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(map: &'a LongIntHashMap) -> Self {
        Self {
            buffers: map.buffers(),
            next: 0,
            remaining: map.len(),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = next_live(self.buffers, &mut self.next)?;
        self.remaining -= 1;
        Some(Entry {
            index,
            key: self.buffers.keys[index],
            value: self.buffers.values[index],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a LongIntHashMap {
    type Item = Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over `(key, value)` pairs.
#[derive(Debug)]
pub struct IntoIter {
    buffers: Buffers,
    next: usize,
    remaining: usize,
}

impl Iterator for IntoIter {
    type Item = (i64, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = next_live(&self.buffers, &mut self.next)?;
        self.remaining -= 1;
        Some((self.buffers.keys[index], self.buffers.values[index]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl IntoIterator for LongIntHashMap {
    type Item = (i64, i32);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        IntoIter {
            buffers: self.into_buffers(),
            next: 0,
            remaining,
        }
    }
}

/// Read-only view of the keys of a map.
#[derive(Debug, Clone, Copy)]
pub struct Keys<'a> {
    map: &'a LongIntHashMap,
}

impl<'a> Keys<'a> {
    pub(super) fn new(map: &'a LongIntHashMap) -> Self {
        Self { map }
    }

    /// Returns true if the map contains `key`.
    pub fn contains(&self, key: i64) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> KeysIter<'a> {
        KeysIter {
            inner: self.map.iter(),
        }
    }
}

impl<'a> IntoIterator for Keys<'a> {
    type Item = i64;
    type IntoIter = KeysIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// View of the keys of a map that can also remove entries.
///
/// Removing a key removes its whole entry.
#[derive(Debug)]
pub struct KeysMut<'a> {
    map: &'a mut LongIntHashMap,
}

impl<'a> KeysMut<'a> {
    pub(super) fn new(map: &'a mut LongIntHashMap) -> Self {
        Self { map }
    }

    /// Returns true if the map contains `key`.
    pub fn contains(&self, key: i64) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> KeysIter<'_> {
        KeysIter {
            inner: self.map.iter(),
        }
    }

    /// Removes every entry of the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Removes every entry whose key satisfies `predicate`. Returns the number removed.
    pub fn remove_if<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(i64) -> bool,
    {
        self.map.remove_if(predicate)
    }

    /// Removes the entry for `key`. Returns 1 if it existed and 0 otherwise.
    pub fn remove_all_occurrences(&mut self, key: i64) -> usize {
        usize::from(self.map.remove(key).is_some())
    }
}

/// Iterator over the keys of a map.
#[derive(Debug, Clone)]
pub struct KeysIter<'a> {
    inner: Iter<'a>,
}

impl Iterator for KeysIter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| e.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for KeysIter<'_> {}

impl FusedIterator for KeysIter<'_> {}

/// Read-only view of the values of a map.
///
/// Values are not unique, so this view offers no way to remove anything.
#[derive(Debug, Clone, Copy)]
pub struct Values<'a> {
    map: &'a LongIntHashMap,
}

impl<'a> Values<'a> {
    pub(super) fn new(map: &'a LongIntHashMap) -> Self {
        Self { map }
    }

    /// Returns true if any entry has `value`. This is a linear scan.
    pub fn contains(&self, value: i32) -> bool {
        let buffers = self.map.buffers();
        buffers
            .allocated
            .iter()
            .zip(&buffers.values)
            .any(|(&live, &v)| live && v == value)
    }

    /// Returns the number of values, counting duplicates.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no values.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> ValuesIter<'a> {
        ValuesIter {
            inner: self.map.iter(),
        }
    }
}

impl<'a> IntoIterator for Values<'a> {
    type Item = i32;
    type IntoIter = ValuesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a map.
#[derive(Debug, Clone)]
pub struct ValuesIter<'a> {
    inner: Iter<'a>,
}

impl Iterator for ValuesIter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| e.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ValuesIter<'_> {}

impl FusedIterator for ValuesIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_is_in_slot_order() {
        let map: LongIntHashMap = (0..100).map(|k| (k, k as i32)).collect();
        let indices: Vec<usize> = map.iter().map(|e| e.index()).collect();
        assert_eq!(indices.len(), 100);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        for e in &map {
            assert_eq!(e.key() as i32, e.value());
        }
    }

    #[test]
    fn test_iter_size_hint() {
        let map: LongIntHashMap = [(1, 1), (2, 2), (3, 3)].into_iter().collect();
        let mut iter = map.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.by_ref().count(), 2);
        assert_eq!(iter.next(), None);
        assert_eq!(map.keys().iter().len(), 3);
        assert_eq!(map.values().iter().len(), 3);
    }

    #[test]
    fn test_into_iter_owned() {
        let map: LongIntHashMap = [(7, 70), (8, 80)].into_iter().collect();
        let mut pairs: Vec<(i64, i32)> = map.into_iter().collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(7, 70), (8, 80)]);
    }

    #[test]
    fn test_values_contains_ignores_dead_slots() {
        let mut map = LongIntHashMap::new();
        map.insert(1, 42);
        map.remove(1);
        // The value still sits in the buffer but the slot is empty.
        assert!(!map.values().contains(42));
        map.insert(2, 42);
        assert!(map.values().contains(42));
    }
}
