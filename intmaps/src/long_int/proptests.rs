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

use std::collections::HashMap;

use proptest::prelude::*;

use super::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i64, i32),
    PutOrAdd(i64, i32, i32),
    Remove(i64),
    Get(i64),
    RemoveIf(i64),
    Clear,
}

// A narrow key space forces collisions, overwrites and removals of present keys.
fn key_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![-64i64..64, any::<i64>()]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        8 => (key_strategy(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (key_strategy(), any::<i32>(), any::<i32>()).prop_map(|(k, p, a)| Op::PutOrAdd(k, p, a)),
        5 => key_strategy().prop_map(Op::Remove),
        3 => key_strategy().prop_map(Op::Get),
        1 => (2i64..7).prop_map(Op::RemoveIf),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_std(ops in ops_strategy(), load_factor in 0.3f32..=1.0) {
        let mut map = LongIntHashMap::with_capacity_and_load_factor(4, load_factor).unwrap();
        let mut model: HashMap<i64, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                }
                Op::PutOrAdd(key, put, add) => {
                    let expected = match model.get_mut(&key) {
                        Some(v) => {
                            *v = v.wrapping_add(add);
                            *v
                        }
                        None => {
                            model.insert(key, put);
                            put
                        }
                    };
                    prop_assert_eq!(map.put_or_add(key, put, add), expected);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(key), model.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(map.get(key), model.get(&key).copied());
                    prop_assert_eq!(map.contains_key(key), model.contains_key(&key));
                }
                Op::RemoveIf(modulus) => {
                    let before = model.len();
                    model.retain(|k, _| k % modulus != 0);
                    prop_assert_eq!(map.remove_if(|k| k % modulus == 0), before - model.len());
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.capacity().is_power_of_two());
            prop_assert!(map.capacity() >= MIN_CAPACITY);
        }

        map.assert_probe_invariant();
        let mut got: Vec<(i64, i32)> = map.iter().map(|e| (e.key(), e.value())).collect();
        let mut expected: Vec<(i64, i32)> = model.into_iter().collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_removal_keeps_other_keys_reachable(
        keys in prop::collection::hash_set(key_strategy(), 1..200),
        stride in 1usize..5,
    ) {
        let keys: Vec<i64> = keys.into_iter().collect();
        let mut map = LongIntHashMap::with_capacity_and_load_factor(8, 0.9).unwrap();
        for (i, &key) in keys.iter().enumerate() {
            map.insert(key, i as i32);
        }

        for (i, &key) in keys.iter().enumerate().step_by(stride) {
            prop_assert_eq!(map.remove(key), Some(i as i32));
            prop_assert!(!map.contains_key(key));
            map.assert_probe_invariant();
        }

        for (i, &key) in keys.iter().enumerate() {
            let expected = if i % stride == 0 { None } else { Some(i as i32) };
            prop_assert_eq!(map.get(key), expected);
        }
    }

    #[test]
    fn prop_insertion_order_does_not_affect_equality(
        entries in prop::collection::hash_map(any::<i64>(), any::<i32>(), 0..100),
    ) {
        use std::hash::BuildHasher;
        use std::hash::RandomState;

        let forward: LongIntHashMap = entries.iter().map(|(&k, &v)| (k, v)).collect();
        let mut backward = LongIntHashMap::with_capacity(1).unwrap();
        let mut pairs: Vec<(i64, i32)> = entries.into_iter().collect();
        pairs.sort_unstable();
        for &(k, v) in pairs.iter().rev() {
            backward.insert(k, v);
        }

        prop_assert_eq!(&forward, &backward);
        let state = RandomState::new();
        prop_assert_eq!(state.hash_one(&forward), state.hash_one(&backward));
    }
}
