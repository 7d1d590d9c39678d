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

//! Open-addressing hash map from `i64` keys to `i32` values.
//!
//! [`LongIntHashMap`] stores its entries in three flat, parallel arrays whose length
//! is always a power of two. A key's ideal slot is taken from the low bits of a
//! MurmurHash3 finalizer; collisions probe linearly to the next slot. Deletion shifts
//! the rest of a probe run backwards, so there are no tombstones and the table never
//! needs to be cleaned up.
//!
//! # Usage
//!
//! ```rust
//! # use intmaps::long_int::LongIntHashMap;
//! let mut counts = LongIntHashMap::new();
//! for id in [3, 7, 3, 3, 9] {
//!     counts.put_or_add(id, 1, 1);
//! }
//! assert_eq!(counts.get(3), Some(3));
//! assert_eq!(counts.get(4), None);
//! assert_eq!(counts.remove(7), Some(1));
//! assert_eq!(counts.len(), 2);
//! ```
//!
//! # Reading and writing without a second probe
//!
//! ```rust
//! # use intmaps::long_int::LongIntHashMap;
//! let mut map = LongIntHashMap::new();
//! map.insert(42, 1);
//!
//! if let Some(slot) = map.find(42) {
//!     let old = map.slot_value(slot).unwrap();
//!     map.set_slot_value(slot, old * 10).unwrap();
//! }
//! assert_eq!(map.get(42), Some(10));
//! ```

mod buffers;
mod iter;
mod map;
mod slot;

#[cfg(test)]
mod proptests;

pub use self::buffers::MAX_CAPACITY;
pub use self::buffers::MIN_CAPACITY;
pub use self::iter::Entry;
pub use self::iter::IntoIter;
pub use self::iter::Iter;
pub use self::iter::Keys;
pub use self::iter::KeysIter;
pub use self::iter::KeysMut;
pub use self::iter::Values;
pub use self::iter::ValuesIter;
pub use self::map::DEFAULT_CAPACITY;
pub use self::map::DEFAULT_LOAD_FACTOR;
pub use self::map::LongIntHashMap;
pub use self::slot::Slot;
