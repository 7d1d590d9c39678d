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

//! The three parallel slot arrays backing a map.

use crate::error::Error;

/// Smallest capacity a map is ever allocated with.
pub const MIN_CAPACITY: usize = 4;

/// Largest power of two a map may grow to.
pub const MAX_CAPACITY: usize = 1 << 30;

/// Parallel key, value and presence arrays of identical power-of-two length.
///
/// Slot `i` is live iff `allocated[i]`; `keys[i]` and `values[i]` are meaningless
/// otherwise. The three vectors are only ever replaced together.
#[derive(Debug, Clone)]
pub(super) struct Buffers {
    pub(super) keys: Vec<i64>,
    pub(super) values: Vec<i32>,
    pub(super) allocated: Vec<bool>,
}

impl Buffers {
    /// Create empty buffers of exactly `capacity` slots, aborting on allocation
    /// failure like any other `Vec`.
    pub(super) fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            keys: vec![0; capacity],
            values: vec![0; capacity],
            allocated: vec![false; capacity],
        }
    }

    /// Allocate empty buffers of exactly `capacity` slots.
    ///
    /// Allocation failure is reported instead of aborting so that a failed growth
    /// leaves the old buffers untouched.
    pub(super) fn allocate(capacity: usize) -> Result<Self, Error> {
        debug_assert!(capacity.is_power_of_two());
        Ok(Self {
            keys: zeroed(capacity)?,
            values: zeroed(capacity)?,
            allocated: zeroed(capacity)?,
        })
    }

    #[inline]
    pub(super) fn capacity(&self) -> usize {
        self.allocated.len()
    }

    #[inline]
    pub(super) fn mask(&self) -> usize {
        self.allocated.len() - 1
    }

    /// Mark every slot empty, keeping the allocation.
    pub(super) fn clear(&mut self) {
        self.allocated.fill(false);
    }
}

fn zeroed<T: Copy + Default>(len: usize) -> Result<Vec<T>, Error> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|err| {
        Error::capacity_exhausted("failed to allocate slot buffers")
            .with_context("capacity", len)
            .set_source(err)
    })?;
    buf.resize(len, T::default());
    Ok(buf)
}

/// Round a requested capacity up to a power of two within
/// `[MIN_CAPACITY, MAX_CAPACITY]`. Requests above the maximum saturate.
pub(super) fn round_capacity(requested: usize) -> usize {
    if requested > MAX_CAPACITY {
        return MAX_CAPACITY;
    }
    requested.next_power_of_two().max(MIN_CAPACITY)
}

/// Capacity to grow to from `current`.
pub(super) fn next_capacity(current: usize) -> Result<usize, Error> {
    debug_assert!(current.is_power_of_two(), "capacity must be a power of two");
    let next = current.max(MIN_CAPACITY / 2) << 1;
    if next > MAX_CAPACITY {
        return Err(Error::capacity_exhausted("maximum capacity exceeded")
            .with_context("capacity", current)
            .with_context("max_capacity", MAX_CAPACITY));
    }
    Ok(next)
}

/// Growth trigger for a given capacity.
pub(super) fn resize_threshold(capacity: usize, load_factor: f32) -> usize {
    (capacity as f64 * load_factor as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_round_capacity() {
        assert_eq!(round_capacity(1), MIN_CAPACITY);
        assert_eq!(round_capacity(4), 4);
        assert_eq!(round_capacity(5), 8);
        assert_eq!(round_capacity(16), 16);
        assert_eq!(round_capacity(1000), 1024);
        assert_eq!(round_capacity(MAX_CAPACITY), MAX_CAPACITY);
        assert_eq!(round_capacity(MAX_CAPACITY + 1), MAX_CAPACITY);
        assert_eq!(round_capacity(usize::MAX), MAX_CAPACITY);
    }

    #[test]
    fn test_next_capacity() {
        assert_eq!(next_capacity(4).unwrap(), 8);
        assert_eq!(next_capacity(1).unwrap(), MIN_CAPACITY);
        assert_eq!(next_capacity(MAX_CAPACITY / 2).unwrap(), MAX_CAPACITY);

        let err = next_capacity(MAX_CAPACITY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExhausted);
    }

    #[test]
    fn test_resize_threshold() {
        assert_eq!(resize_threshold(4, 0.75), 3);
        assert_eq!(resize_threshold(16, 0.75), 12);
        assert_eq!(resize_threshold(16, 1.0), 16);
        assert_eq!(resize_threshold(4, 0.1), 0);
        assert_eq!(resize_threshold(MAX_CAPACITY, 0.75), 805_306_368);
    }

    #[test]
    fn test_allocate_and_clear() {
        let mut buffers = Buffers::allocate(8).unwrap();
        assert_eq!(buffers.capacity(), 8);
        assert_eq!(buffers.mask(), 7);
        assert!(buffers.allocated.iter().all(|&a| !a));

        buffers.allocated[3] = true;
        buffers.clear();
        assert!(buffers.allocated.iter().all(|&a| !a));
        assert_eq!(buffers.capacity(), 8);
    }
}
