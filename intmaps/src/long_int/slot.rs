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

//! Handles returned by a successful existence check.

/// A live slot located by [`LongIntHashMap::find`].
///
/// The handle records the slot index and the map's structural epoch at the time of
/// the lookup, so a follow-up read or write does not have to probe again. It stays
/// valid while only values change; inserting a new key, removing, clearing or
/// growing the map invalidates it, and using it afterwards reports
/// [`ErrorKind::PreconditionViolation`].
///
/// [`LongIntHashMap::find`]: crate::long_int::LongIntHashMap::find
/// [`ErrorKind::PreconditionViolation`]: crate::error::ErrorKind::PreconditionViolation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub(super) index: usize,
    pub(super) key: i64,
    pub(super) epoch: u64,
}

impl Slot {
    /// Returns the slot index inside the map's buffers.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the key that was found in the slot.
    pub fn key(&self) -> i64 {
        self.key
    }
}
