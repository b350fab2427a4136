//  Copyright 2026 subrender-rs Authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use std::hash::Hash;

/// Describes one memoized family: the key and value types it caches and how
/// a value is materialized from a key.
///
/// Hashing, equality, key adoption and key/value destruction are not part of
/// this trait: they are carried by `Key`'s own `Hash`/`Eq` impls and by the
/// ordinary `Drop` glue of `Key`/`Value`. The only behavior a family must
/// supply that the type system cannot synthesize on its own is how to build
/// a value from a key plus an out-of-band argument.
pub trait Family: Send + Sync + Sized + 'static {
    /// Looked up by value; typically a small struct embedding `CachedRef`s
    /// into upstream families for composite keys.
    type Key: Hash + Eq + Send + Sync + 'static;

    /// Opaque to the cache. No structure is imposed on it.
    type Value: Send + Sync + 'static;

    /// Threaded verbatim into `construct`. Not stored; consumed once per
    /// miss.
    type Args;

    /// Builds the value for `key`, returning it along with its byte charge
    /// against the cache's size budget. Called at most once per entry,
    /// outside any cache lock.
    fn construct(key: &Self::Key, args: Self::Args) -> (Self::Value, usize);
}
