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

//! Hash maps over primitive integer keys and values.
//!
//! The maps here avoid boxing and per-entry allocation: entries live in flat arrays
//! sized to a power of two and are located by open addressing with linear probing.
//! They are meant for dense, hot tables such as id-to-count maps.
//!
//! - [`long_int::LongIntHashMap`]: `i64` keys to `i32` values.
//!
//! The maps are not synchronized. Every mutating method takes `&mut self`; share a map
//! between threads behind a lock.

#![deny(missing_docs)]

pub mod error;
pub mod long_int;

mod hash;
