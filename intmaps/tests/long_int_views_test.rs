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

use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::none;
use googletest::prelude::some;
use intmaps::long_int::LongIntHashMap;

fn sample() -> LongIntHashMap {
    LongIntHashMap::from_arrays(&[10, 20, 30, 40, 50], &[1, 2, 2, 3, 1]).unwrap()
}

#[test]
fn test_keys_view() {
    let map = sample();
    let keys = map.keys();
    assert_that!(keys.len(), eq(5));
    assert!(!keys.is_empty());
    assert!(keys.contains(30));
    assert!(!keys.contains(31));

    let mut collected: Vec<i64> = keys.into_iter().collect();
    collected.sort_unstable();
    assert_eq!(collected, vec![10, 20, 30, 40, 50]);
}

#[test]
fn test_values_view() {
    let map = sample();
    let values = map.values();
    assert_that!(values.len(), eq(5));
    assert!(values.contains(2));
    assert!(!values.contains(4));

    let mut collected: Vec<i32> = values.iter().collect();
    collected.sort_unstable();
    assert_eq!(collected, vec![1, 1, 2, 2, 3]);
}

#[test]
fn test_views_follow_slot_order() {
    let map = sample();
    let from_entries: Vec<(i64, i32)> = map.iter().map(|e| (e.key(), e.value())).collect();
    let keys: Vec<i64> = map.keys().iter().collect();
    let values: Vec<i32> = map.values().iter().collect();
    assert_eq!(
        from_entries,
        keys.into_iter().zip(values).collect::<Vec<_>>()
    );
}

#[test]
fn test_keys_mut_removes_entries() {
    let mut map = sample();
    let mut keys = map.keys_mut();
    assert_that!(keys.remove_all_occurrences(20), eq(1));
    assert_that!(keys.remove_all_occurrences(20), eq(0));
    assert_that!(keys.remove_if(|k| k > 35), eq(2));
    assert_that!(keys.len(), eq(2));
    assert_eq!(keys.iter().count(), 2);

    assert_that!(map.get(10), some(eq(1)));
    assert_that!(map.get(30), some(eq(2)));
    assert_that!(map.get(40), none());

    map.keys_mut().clear();
    assert!(map.is_empty());
    assert!(map.keys().is_empty());
    assert!(map.values().is_empty());
}

#[test]
fn test_entry_iteration_is_not_restartable() {
    let map = sample();
    let mut iter = map.iter();
    assert_that!(iter.by_ref().count(), eq(5));
    assert!(iter.next().is_none());
    // A fresh iterator starts over.
    assert_that!(map.iter().count(), eq(5));
}

#[test]
fn test_entry_indices_point_at_slots() {
    let map = sample();
    for entry in &map {
        let slot = map.find(entry.key()).unwrap();
        assert_that!(slot.index(), eq(entry.index()));
        assert!(entry.index() < map.capacity());
    }
}

#[test]
fn test_empty_map_views() {
    let map = LongIntHashMap::new();
    assert!(map.keys().is_empty());
    assert!(map.values().is_empty());
    assert_that!(map.iter().next(), none());
    assert!(!map.values().contains(0));
}
